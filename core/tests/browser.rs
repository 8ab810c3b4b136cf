//! Browser-harness tests for the DOM-facing selection surface.

#![cfg(target_arch = "wasm32")]

use ripple_core::{Selection, StylePatch, document, select};
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn create_wraps_a_detached_element() {
    let card = Selection::create("<div class=\"card\">hi</div>").unwrap();
    assert_eq!(card.len(), 1);
    assert!(card.has_class("card"));
    assert_eq!(card.html().as_deref(), Some("hi"));
}

#[wasm_bindgen_test]
fn invalid_markup_is_a_usage_error() {
    assert!(Selection::create("not markup").is_err());
    assert!(Selection::create("").is_err());
}

#[wasm_bindgen_test]
fn class_and_attribute_helpers_round_trip() {
    let para = Selection::create("<p></p>").unwrap();
    para.add_class("a").unwrap().add_class("b").unwrap();
    para.remove_class("a").unwrap();
    assert!(!para.has_class("a"));
    assert!(para.has_class("b"));

    para.set_attr("data-k", "v").unwrap();
    assert_eq!(para.attr("data-k").as_deref(), Some("v"));
    para.remove_attr("data-k").unwrap();
    assert_eq!(para.attr("data-k"), None);
}

#[wasm_bindgen_test]
fn style_patches_apply_in_one_pass() {
    let target = Selection::create("<div></div>").unwrap();
    let patch = StylePatch::new()
        .with("width", "40px")
        .with("opacity", "0.5");
    target.apply(&patch).unwrap();

    let inline = target.attr("style").unwrap_or_default();
    assert!(inline.contains("width: 40px"), "{inline}");
    assert!(inline.contains("opacity: 0.5"), "{inline}");
}

#[wasm_bindgen_test]
fn select_finds_elements_in_the_document() {
    let body = document().unwrap().body().unwrap();
    body.insert_adjacent_html(
        "beforeend",
        "<section id=\"sel-probe\"><span class=\"item\"></span><span class=\"item\"></span></section>",
    )
    .unwrap();

    let items = select("#sel-probe .item").unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(select("#sel-probe .missing").unwrap().len(), 0);

    select("#sel-probe").unwrap().remove();
    assert!(select("#sel-probe").unwrap().is_empty());
}

#[wasm_bindgen_test]
fn traversal_walks_the_tree() {
    let body = document().unwrap().body().unwrap();
    body.insert_adjacent_html(
        "beforeend",
        "<ul id=\"trav-probe\"><li class=\"x\"></li><li></li><li></li></ul>",
    )
    .unwrap();

    let first = select("#trav-probe .x").unwrap();
    assert_eq!(first.siblings().len(), 2);
    assert_eq!(first.parent().len(), 1);
    assert_eq!(select("#trav-probe").unwrap().children().len(), 3);
    assert_eq!(first.closest("ul").unwrap().len(), 1);

    select("#trav-probe").unwrap().remove();
}
