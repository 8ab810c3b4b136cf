//! Browser-harness tests for the request pipeline, driven against `data:`
//! URLs so no server is involved.

#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use ripple_net::{Body, Error, Settings, ajax, get};
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
async fn missing_url_rejects_before_any_network_call() {
    let outcome = ajax(Settings::new("")).await;
    assert!(matches!(outcome, Err(Error::MissingUrl)));
}

#[wasm_bindgen_test]
async fn before_send_hook_can_abort() {
    let outcome = ajax(Settings::new("data:text/plain,hi").before_send(|_| false)).await;
    assert!(matches!(outcome, Err(Error::Aborted)));
}

#[wasm_bindgen_test]
async fn failures_visit_the_error_hook_first() {
    let seen = Rc::new(Cell::new(false));
    let flag = Rc::clone(&seen);
    let outcome = ajax(Settings::new("").on_error(move |_| flag.set(true))).await;
    assert!(outcome.is_err());
    assert!(seen.get());
}

#[wasm_bindgen_test]
async fn text_content_decodes_to_a_string() {
    let response = get("data:text/plain,hello").await.unwrap();
    assert_eq!(response.status, 200);
    match response.body {
        Body::Text(text) => assert_eq!(text, "hello"),
        other => panic!("expected a text body, got {other:?}"),
    }
}

#[wasm_bindgen_test]
async fn json_content_parses_into_a_value() {
    let response = get("data:application/json,{\"a\":1}").await.unwrap();
    match response.body {
        Body::Json(value) => assert_eq!(value["a"], 1),
        other => panic!("expected a JSON body, got {other:?}"),
    }
}

#[wasm_bindgen_test]
async fn unknown_content_arrives_as_bytes() {
    let response = get("data:application/octet-stream,abc").await.unwrap();
    match response.body {
        Body::Binary(bytes) => assert_eq!(bytes, b"abc"),
        other => panic!("expected a binary body, got {other:?}"),
    }
}
