use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

/// 声明值：数字或字符串
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(Number),
    String(String),
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(value.into())
    }
}

impl From<Number> for Scalar {
    fn from(value: Number) -> Self {
        Scalar::Number(value)
    }
}

/// 样式树中的值
///
/// - `Scalar`：属性声明（如 `minWidth: "34px"`）
/// - `Nested`：嵌套选择器或 at-rule 的规则体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Scalar(Scalar),
    Nested(StyleNode),
}

impl From<Scalar> for StyleValue {
    fn from(value: Scalar) -> Self {
        StyleValue::Scalar(value)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Scalar(value.into())
    }
}

impl From<i64> for StyleValue {
    fn from(value: i64) -> Self {
        StyleValue::Scalar(value.into())
    }
}

impl From<StyleNode> for StyleValue {
    fn from(value: StyleNode) -> Self {
        StyleValue::Nested(value)
    }
}

/// 嵌套样式树（保持键的插入顺序）
pub type StyleNode = IndexMap<String, StyleValue>;

/// 单个选择器下的声明块：kebab-case 属性名 → 值
pub type Declarations = IndexMap<String, Scalar>;

/// 扁平化结果中的一项
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlatEntry {
    /// 普通规则：组合选择器 → 声明块
    Rule(Declarations),
    /// 被提升的 at-rule（如 `@media screen`），按组合选择器分组
    AtRule(IndexMap<String, Declarations>),
    /// 不可嵌套的 at-rule（如 `@charset`），原样输出
    Verbatim(Scalar),
}

impl Default for FlatEntry {
    fn default() -> Self {
        FlatEntry::Rule(Declarations::new())
    }
}

/// 扁平化样式表：at-rule 在前，普通选择器在后，均保持首次出现的顺序
pub type FlatStyleSheet = IndexMap<String, FlatEntry>;

/// 键值对的分类，携带借用的值
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyKind<'a> {
    /// 属性声明
    Declaration(&'a Scalar),
    /// 嵌套选择器
    Selector(&'a StyleNode),
    /// 规则体为映射的 at-rule，需要提升
    NestableAtRule(&'a StyleNode),
    /// 值为标量的 at-rule，原样透传
    VerbatimAtRule(&'a Scalar),
}

impl<'a> KeyKind<'a> {
    pub fn classify(key: &str, value: &'a StyleValue) -> Self {
        match (key.starts_with('@'), value) {
            (true, StyleValue::Nested(body)) => KeyKind::NestableAtRule(body),
            (true, StyleValue::Scalar(scalar)) => KeyKind::VerbatimAtRule(scalar),
            (false, StyleValue::Nested(body)) => KeyKind::Selector(body),
            (false, StyleValue::Scalar(scalar)) => KeyKind::Declaration(scalar),
        }
    }
}

/// JSON 值的种类，用于错误信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        };
        f.write_str(name)
    }
}
