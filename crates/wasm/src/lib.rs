use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use estilo_core::{InvalidValueMode, Normalizer};

// ── JS 侧 serde 镜像类型 ──────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct JsNormalizeOptions {
    #[serde(default)]
    invalid_values: JsInvalidValueMode,
    #[serde(default)]
    selector_separator: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
enum JsInvalidValueMode {
    Reject,
    Skip,
}

impl Default for JsInvalidValueMode {
    fn default() -> Self {
        JsInvalidValueMode::Reject
    }
}

// ── 类型转换 ──────────────────────────────────────────────────

impl From<JsInvalidValueMode> for InvalidValueMode {
    fn from(m: JsInvalidValueMode) -> Self {
        match m {
            JsInvalidValueMode::Reject => InvalidValueMode::Reject,
            JsInvalidValueMode::Skip => InvalidValueMode::Skip,
        }
    }
}

impl From<JsNormalizeOptions> for Normalizer {
    fn from(opts: JsNormalizeOptions) -> Self {
        let normalizer = Normalizer::new().with_invalid_values(opts.invalid_values.into());
        match opts.selector_separator {
            Some(separator) => normalizer.with_selector_separator(separator),
            None => normalizer,
        }
    }
}

fn parse_options(options: JsValue) -> Result<JsNormalizeOptions, JsError> {
    if options.is_undefined() || options.is_null() {
        Ok(JsNormalizeOptions::default())
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))
    }
}

fn from_js(value: JsValue) -> Result<Value, JsError> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsError::new(&format!("Invalid style object: {}", e)))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value
        .serialize(&serializer)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

// ── WASM 导出函数 ─────────────────────────────────────────────

/// 初始化 panic hook（自动调用）
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// 从左到右浅合并多个对象
///
/// 直接在 JS 侧复制自有可枚举键，值原样保留（函数、Date、undefined 等）。
/// 非普通对象参数（false、null、undefined、数组、原始值）会被忽略，从不抛错。
///
/// @param sources - 参数数组
/// @returns 合并后的新对象
#[wasm_bindgen(js_name = "mix")]
pub fn mix(sources: Vec<JsValue>) -> Object {
    let mixed = Object::new();
    for source in sources {
        if !source.is_object() || Array::is_array(&source) {
            continue;
        }
        let source: Object = source.unchecked_into();
        for key in Object::keys(&source).iter() {
            // 抛错的 getter 只跳过该键
            if let Ok(value) = Reflect::get(&source, &key) {
                let _ = Reflect::set(&mixed, &key, &value);
            }
        }
    }
    mixed
}

/// 扁平化嵌套样式对象
///
/// @param tree    - 以选择器 / at-rule 为键的样式对象
/// @param options - `{ invalidValues?: "reject" | "skip", selectorSeparator?: string }`，可选
/// @returns 选择器 → 声明块 的扁平对象，at-rule 在前
#[wasm_bindgen(js_name = "normalize")]
pub fn normalize(tree: JsValue, options: JsValue) -> Result<JsValue, JsError> {
    let normalizer: Normalizer = parse_options(options)?.into();
    let tree = from_js(tree)?;
    let sheet = normalizer
        .normalize_value(&tree)
        .map_err(|e| JsError::new(&e.to_string()))?;
    to_js(&sheet)
}
