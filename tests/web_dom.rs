//! Browser tests for the web-sys DOM adapter
//!
//! Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use easyword::annotate::{decorate, remove_decoration, MarkerKind};
use easyword::dom::DomTree;
use easyword::wasm::WebDom;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn fresh_page(html: &str) -> WebDom {
    let dom = WebDom::from_window().unwrap();
    dom.document().body().unwrap().set_inner_html(html);
    dom
}

fn body_html(dom: &WebDom) -> String {
    dom.document().body().unwrap().inner_html()
}

#[wasm_bindgen_test]
fn test_decorate_live_page() {
    let mut dom = fresh_page("<p>The Cat sat</p><p>no match</p>");

    assert_eq!(decorate(&mut dom, "cat", MarkerKind::Selected), 1);
    assert_eq!(
        body_html(&dom),
        "<p>The <span class=\"easyWord_selectedWord\">Cat</span> sat</p><p>no match</p>"
    );
}

#[wasm_bindgen_test]
fn test_wrap_uses_utf16_offsets() {
    let mut dom = fresh_page("<p>😀 café 😀</p>");

    assert_eq!(decorate(&mut dom, "café", MarkerKind::Unknown), 1);
    assert_eq!(
        body_html(&dom),
        "<p>😀 <span class=\"easyWord_unknownWord\">café</span> 😀</p>"
    );
}

#[wasm_bindgen_test]
fn test_round_trip_restores_text() {
    let mut dom = fresh_page("<p>dog at start</p>");
    let text_before = dom.text_content(&dom.body().unwrap());

    decorate(&mut dom, "dog", MarkerKind::Selected);
    assert_eq!(remove_decoration(&mut dom, "DOG"), 1);

    assert_eq!(dom.text_content(&dom.body().unwrap()), text_before);
    assert!(dom
        .query_class(&["easyWord_selectedWord", "easyWord_unknownWord"])
        .is_empty());
}

#[wasm_bindgen_test]
fn test_affordance_button() {
    let mut dom = fresh_page("");
    let button = dom
        .append_affordance(12.0, 34.0, "Add to list", "easyWord_addToList")
        .unwrap();

    assert!(dom.is_attached(&button));
    assert!(dom.has_class(&button, "easyWord_addToList"));
    dom.remove(&button);
    assert!(!dom.is_attached(&button));
}
