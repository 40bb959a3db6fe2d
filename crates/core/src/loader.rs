use crate::error::NormalizeError;
use crate::types::{Scalar, StyleNode, StyleValue, ValueKind};
use serde_json::{Map, Value};
use tracing::warn;

/// 非法声明值（null、布尔、数组）的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidValueMode {
    /// 返回 `InvalidValueKind` 错误
    Reject,
    /// 丢弃该声明并记录警告
    Skip,
}

impl Default for InvalidValueMode {
    fn default() -> Self {
        InvalidValueMode::Reject
    }
}

/// 从 JSON 字符串加载样式树
///
/// JSON 格式示例：
/// ```json
/// {
///   "div": {
///     "minWidth": "34px",
///     "@media screen": { "zIndex": 45 }
///   }
/// }
/// ```
pub fn load_from_json(json_str: &str) -> Result<StyleNode, NormalizeError> {
    let value: Value = serde_json::from_str(json_str)?;
    style_node_from_value(&value, InvalidValueMode::Reject)
}

/// 将任意 JSON 值校验并转换为样式树
///
/// 声明值只能是数字、字符串或对象。
pub fn style_node_from_value(
    value: &Value,
    mode: InvalidValueMode,
) -> Result<StyleNode, NormalizeError> {
    match value {
        Value::Object(map) => convert_map(map, &mut Vec::new(), mode),
        other => Err(NormalizeError::NotAMapping {
            kind: ValueKind::of(other),
        }),
    }
}

fn convert_map(
    map: &Map<String, Value>,
    path: &mut Vec<String>,
    mode: InvalidValueMode,
) -> Result<StyleNode, NormalizeError> {
    let mut node = StyleNode::with_capacity(map.len());

    for (key, value) in map {
        path.push(key.clone());

        let converted = match value {
            Value::String(s) => Some(StyleValue::Scalar(Scalar::String(s.clone()))),
            Value::Number(n) => Some(StyleValue::Scalar(Scalar::Number(n.clone()))),
            Value::Object(child) => Some(StyleValue::Nested(convert_map(child, path, mode)?)),
            other => {
                let kind = ValueKind::of(other);
                match mode {
                    InvalidValueMode::Reject => {
                        return Err(NormalizeError::InvalidValueKind {
                            path: path.join(" / "),
                            kind,
                        });
                    }
                    InvalidValueMode::Skip => {
                        warn!(
                            path = %path.join(" / "),
                            %kind,
                            "skipping invalid declaration value"
                        );
                        None
                    }
                }
            }
        };

        path.pop();

        if let Some(value) = converted {
            node.insert(key.clone(), value);
        }
    }

    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_from_json_basic() {
        let json = r#"{ "div": { "minWidth": "34px", "zIndex": 45 } }"#;

        let node = load_from_json(json).unwrap();

        assert_eq!(node.len(), 1);
        match &node["div"] {
            StyleValue::Nested(div) => {
                assert_eq!(div["minWidth"], StyleValue::from("34px"));
                assert_eq!(div["zIndex"], StyleValue::from(45i64));
            }
            other => panic!("Expected nested node, got {:?}", other),
        }
    }

    #[test]
    fn test_load_keeps_key_order() {
        let json = r#"{ "b": { "z": 1 }, "a": { "y": 1 }, "c": { "x": 1 } }"#;

        let node = load_from_json(json).unwrap();
        let keys: Vec<&str> = node.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_load_from_json_invalid() {
        let result = load_from_json("invalid json");
        assert!(matches!(result, Err(NormalizeError::Json(_))));
    }

    #[test]
    fn test_top_level_must_be_object() {
        let result = style_node_from_value(&json!([1, 2]), InvalidValueMode::Reject);
        assert!(matches!(
            result,
            Err(NormalizeError::NotAMapping {
                kind: ValueKind::Array
            })
        ));
    }

    #[test]
    fn test_reject_invalid_values() {
        for value in [json!(null), json!([]), json!(true), json!(false)] {
            let tree = json!({ "div": { "width": value.clone() } });
            let result = style_node_from_value(&tree, InvalidValueMode::Reject);

            match result {
                Err(NormalizeError::InvalidValueKind { path, kind }) => {
                    assert_eq!(path, "div / width");
                    assert_eq!(kind, ValueKind::of(&value));
                }
                other => panic!("Expected InvalidValueKind for {}, got {:?}", value, other),
            }
        }
    }

    #[test]
    fn test_accept_valid_values() {
        for value in [json!(123), json!("lol"), json!({})] {
            let tree = json!({ "div": { "width": value } });
            assert!(style_node_from_value(&tree, InvalidValueMode::Reject).is_ok());
        }
    }

    #[test]
    fn test_skip_invalid_values() {
        let tree = json!({ "div": { "width": null, "height": "10px", "color": [1] } });

        let node = style_node_from_value(&tree, InvalidValueMode::Skip).unwrap();
        match &node["div"] {
            StyleValue::Nested(div) => {
                assert_eq!(div.len(), 1);
                assert_eq!(div["height"], StyleValue::from("10px"));
            }
            other => panic!("Expected nested node, got {:?}", other),
        }
    }
}
