/// 将 camelCase 属性名转换为 CSS 的 kebab-case
///
/// 在每个大写字母前插入 `-` 并转为小写：
/// - "minWidth" → "min-width"
/// - "WebkitTransition" → "-webkit-transition"
///
/// 自定义属性（`--` 开头）原样返回。
pub fn to_kebab_case(property: &str) -> String {
    if property.starts_with("--") {
        return property.to_string();
    }

    let mut result = String::with_capacity(property.len() + 4);

    for ch in property.chars() {
        if ch.is_uppercase() {
            result.push('-');
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }

    result
}
