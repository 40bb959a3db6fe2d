use crate::types::ValueKind;
use thiserror::Error;

/// 从 JSON 加载样式树时的错误
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// 声明值既不是数字、字符串，也不是对象
    #[error("invalid value at `{path}`: expected number, string or object, got {kind}")]
    InvalidValueKind { path: String, kind: ValueKind },

    #[error("style tree must be an object, got {kind}")]
    NotAMapping { kind: ValueKind },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
