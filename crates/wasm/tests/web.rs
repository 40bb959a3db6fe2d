#![cfg(target_arch = "wasm32")]

use estilo_wasm::{mix, normalize};
use serde_json::{json, Value};
use js_sys::{Function, Object, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn js(value: Value) -> JsValue {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    serde::Serialize::serialize(&value, &serializer).unwrap()
}

fn rs(value: JsValue) -> Value {
    serde_wasm_bindgen::from_value(value).unwrap()
}

#[wasm_bindgen_test]
fn test_mix_ignores_falsy_values() {
    let sources = vec![
        js(json!({ "a": 2 })),
        JsValue::FALSE,
        js(json!({ "b": 3 })),
        JsValue::NULL,
        JsValue::UNDEFINED,
    ];

    let result = mix(sources);
    assert_eq!(rs(result.into()), json!({ "a": 2, "b": 3 }));
}

#[wasm_bindgen_test]
fn test_mix_keeps_function_values() {
    let handler = Function::new_no_args("return 1");
    let source = Object::new();
    Reflect::set(&source, &"onClick".into(), &handler).unwrap();
    Reflect::set(&source, &"nested".into(), &js(json!({ "a": 1 }))).unwrap();

    let nested = Reflect::get(&source, &"nested".into()).unwrap();
    let result = mix(vec![source.into(), js(json!({ "b": 2 }))]);

    // 浅合并：函数与嵌套对象按引用保留
    let on_click = Reflect::get(&result, &"onClick".into()).unwrap();
    assert!(on_click.is_function());
    assert_eq!(on_click, JsValue::from(handler));
    assert_eq!(Reflect::get(&result, &"nested".into()).unwrap(), nested);
    assert_eq!(Reflect::get(&result, &"b".into()).unwrap(), JsValue::from(2));
}

#[wasm_bindgen_test]
fn test_normalize_hoists_media_queries() {
    let tree = js(json!({
        "div": {
            "height": "50px",
            "@media screen": { "width": "100px" }
        }
    }));

    let result = normalize(tree, JsValue::UNDEFINED).unwrap();
    assert_eq!(
        rs(result),
        json!({
            "@media screen": { "div": { "width": "100px" } },
            "div": { "height": "50px" }
        })
    );
}

#[wasm_bindgen_test]
fn test_normalize_rejects_invalid_values() {
    let tree = js(json!({ "div": { "width": true } }));
    assert!(normalize(tree, JsValue::UNDEFINED).is_err());
}

#[wasm_bindgen_test]
fn test_normalize_skip_option() {
    let tree = js(json!({ "div": { "width": null, "height": 1 } }));
    let options = js(json!({ "invalidValues": "skip" }));

    let result = normalize(tree, options).unwrap();
    assert_eq!(rs(result), json!({ "div": { "height": 1 } }));
}
