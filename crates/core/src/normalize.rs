use crate::error::NormalizeError;
use crate::loader::{style_node_from_value, InvalidValueMode};
use crate::naming::to_kebab_case;
use crate::types::{Declarations, FlatEntry, FlatStyleSheet, KeyKind, Scalar, StyleNode};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, trace, warn};

/// 扁平化配置
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// 组合选择器时使用的分隔符（默认单个空格，即后代选择器）
    pub selector_separator: String,
    /// 从 JSON 加载时如何处理非法声明值
    pub invalid_values: InvalidValueMode,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            selector_separator: " ".to_string(),
            invalid_values: InvalidValueMode::default(),
        }
    }
}

/// 样式树扁平化器
///
/// 将嵌套的样式树转换为 选择器 → 声明块 的扁平映射：
/// - 嵌套选择器以分隔符拼接
/// - 属性名由 camelCase 转为 kebab-case
/// - 可嵌套的 at-rule（如 `@media`）提升到顶层
/// - 不可嵌套的 at-rule（如 `@charset`）原样透传
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    options: NormalizeOptions,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置选择器分隔符（builder 模式）
    pub fn with_selector_separator(mut self, separator: impl Into<String>) -> Self {
        self.options.selector_separator = separator.into();
        self
    }

    /// 设置非法值处理方式（builder 模式）
    pub fn with_invalid_values(mut self, mode: InvalidValueMode) -> Self {
        self.options.invalid_values = mode;
        self
    }

    /// 扁平化样式树
    pub fn normalize(&self, tree: &StyleNode) -> FlatStyleSheet {
        let mut builder = SheetBuilder::default();
        let mut path = Vec::new();

        for (key, value) in tree {
            match KeyKind::classify(key, value) {
                KeyKind::NestableAtRule(body) if is_declaration_block(body) => {
                    // 顶层只含声明的 at-rule（如 @font-face）
                    let decls = body
                        .iter()
                        .filter_map(|(property, value)| match KeyKind::classify(property, value) {
                            KeyKind::Declaration(scalar) => {
                                Some((to_kebab_case(property), scalar.clone()))
                            }
                            _ => None,
                        })
                        .collect();
                    builder.set_block(key, decls);
                }
                kind => self.visit(key, kind, &mut path, None, &mut builder),
            }
        }

        builder.finish()
    }

    /// 校验 JSON 值后扁平化
    pub fn normalize_value(&self, tree: &Value) -> Result<FlatStyleSheet, NormalizeError> {
        let node = style_node_from_value(tree, self.options.invalid_values)?;
        Ok(self.normalize(&node))
    }

    fn walk(
        &self,
        node: &StyleNode,
        path: &mut Vec<String>,
        at_rule: Option<&str>,
        builder: &mut SheetBuilder,
    ) {
        for (key, value) in node {
            self.visit(key, KeyKind::classify(key, value), path, at_rule, builder);
        }
    }

    fn visit(
        &self,
        key: &str,
        kind: KeyKind<'_>,
        path: &mut Vec<String>,
        at_rule: Option<&str>,
        builder: &mut SheetBuilder,
    ) {
        match kind {
            KeyKind::VerbatimAtRule(scalar) => builder.set_verbatim(key, scalar.clone()),
            KeyKind::NestableAtRule(body) => {
                // 嵌套的 at-rule 同样提升，输出到自己的分组
                debug!(
                    at_rule = key,
                    outer = at_rule,
                    selector = %self.compose(path),
                    "hoisting at-rule block"
                );
                builder.reserve_at_rule(key);
                self.walk(body, path, Some(key), builder);
            }
            KeyKind::Selector(body) => {
                path.push(key.to_string());
                self.walk(body, path, at_rule, builder);
                path.pop();
            }
            KeyKind::Declaration(scalar) => {
                // 没有外层选择器时组合选择器为空串
                let selector = self.compose(path);
                let property = to_kebab_case(key);
                trace!(%selector, %property, at_rule, "declaration");
                builder.declare(at_rule, selector, property, scalar.clone());
            }
        }
    }

    fn compose(&self, path: &[String]) -> String {
        path.join(self.options.selector_separator.as_str())
    }
}

/// 使用默认配置扁平化样式树
pub fn normalize(tree: &StyleNode) -> FlatStyleSheet {
    Normalizer::new().normalize(tree)
}

/// 使用默认配置校验并扁平化 JSON 样式树
pub fn normalize_value(tree: &Value) -> Result<FlatStyleSheet, NormalizeError> {
    Normalizer::new().normalize_value(tree)
}

fn is_declaration_block(body: &StyleNode) -> bool {
    !body.is_empty()
        && body
            .iter()
            .all(|(key, value)| {
                matches!(KeyKind::classify(key, value), KeyKind::Declaration(_))
            })
}

/// 递归过程中显式传递的累加器
///
/// at-rule 与普通规则分开存放，输出时 at-rule 在前。
/// 同一个 at-rule 键被用作不同类型时，后出现的替换先出现的，位置不变。
#[derive(Debug, Default)]
struct SheetBuilder {
    at_rules: IndexMap<String, FlatEntry>,
    rules: IndexMap<String, Declarations>,
}

impl SheetBuilder {
    /// 首次遇到可嵌套 at-rule 时占位，保证输出顺序按首次出现排列
    fn reserve_at_rule(&mut self, at_rule: &str) {
        let entry = self
            .at_rules
            .entry(at_rule.to_string())
            .or_insert_with(|| FlatEntry::AtRule(IndexMap::new()));
        if !matches!(entry, FlatEntry::AtRule(_)) {
            warn!(at_rule, "at-rule block replaces earlier value");
            *entry = FlatEntry::AtRule(IndexMap::new());
        }
    }

    fn declare(
        &mut self,
        at_rule: Option<&str>,
        selector: String,
        property: String,
        value: Scalar,
    ) {
        match at_rule {
            // 同一选择器重复出现时，后者覆盖前者
            None => {
                self.rules
                    .entry(selector)
                    .or_default()
                    .insert(property, value);
            }
            Some(at_rule) => {
                let entry = self
                    .at_rules
                    .entry(at_rule.to_string())
                    .or_insert_with(|| FlatEntry::AtRule(IndexMap::new()));
                let mut body = match std::mem::take(entry) {
                    FlatEntry::AtRule(body) => body,
                    _ => {
                        warn!(at_rule, "at-rule block replaces earlier value");
                        IndexMap::new()
                    }
                };
                body.entry(selector).or_default().insert(property, value);
                *entry = FlatEntry::AtRule(body);
            }
        }
    }

    fn set_verbatim(&mut self, at_rule: &str, value: Scalar) {
        if let Some(existing) = self
            .at_rules
            .insert(at_rule.to_string(), FlatEntry::Verbatim(value))
        {
            warn!(at_rule, replaced = ?existing, "overwriting repeated at-rule");
        }
    }

    fn set_block(&mut self, at_rule: &str, decls: Declarations) {
        match self.at_rules.get_mut(at_rule) {
            Some(FlatEntry::Rule(existing)) => existing.extend(decls),
            Some(existing) => {
                warn!(at_rule, "at-rule block replaces earlier value");
                *existing = FlatEntry::Rule(decls);
            }
            None => {
                self.at_rules
                    .insert(at_rule.to_string(), FlatEntry::Rule(decls));
            }
        }
    }

    /// at-rule 在前；从未产生声明的 at-rule 占位被丢弃
    fn finish(self) -> FlatStyleSheet {
        let mut sheet: FlatStyleSheet = self
            .at_rules
            .into_iter()
            .filter(|(_, entry)| !matches!(entry, FlatEntry::AtRule(body) if body.is_empty()))
            .collect();
        sheet.extend(
            self.rules
                .into_iter()
                .map(|(selector, decls)| (selector, FlatEntry::Rule(decls))),
        );
        sheet
    }
}
