// Browser smoke tests, run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn mounts_on_a_fresh_canvas_and_tears_down() {
    hook_the_phish::web::start_fishing_mode(Some("htp-test-canvas".to_string())).expect("mount");
    let doc = web_sys::window().and_then(|w| w.document()).expect("document");
    let canvas: web_sys::HtmlCanvasElement = doc
        .get_element_by_id("htp-test-canvas")
        .expect("canvas created")
        .dyn_into()
        .expect("is a canvas");
    assert!(canvas.width() > 0);
    assert!(doc.get_element_by_id("htp-score").is_some());

    hook_the_phish::web::start_round();
    hook_the_phish::web::teardown();
    assert_eq!(hook_the_phish::web::total_score(), 0.0);
}

#[wasm_bindgen_test]
fn rejects_unknown_level() {
    assert!(hook_the_phish::web::set_advanced_level(7).is_err());
    assert!(hook_the_phish::web::set_advanced_level(3).is_ok());
}

#[wasm_bindgen_test]
fn rejects_bad_config_json() {
    let err = hook_the_phish::start_game_with_config(None, r#"{ "hook_step": -1.0 }"#);
    assert!(err.is_err());
}

#[wasm_bindgen_test]
fn start_game_mounts_on_named_canvas() {
    hook_the_phish::start_game(Some("htp-entry-canvas".to_string())).expect("mount");
    let doc = web_sys::window().and_then(|w| w.document()).expect("document");
    assert!(doc.get_element_by_id("htp-entry-canvas").is_some());

    hook_the_phish::start_game_with_config(Some("htp-entry-canvas".to_string()), r#"{ "hook_step": 8.0 }"#)
        .expect("remount with override");
    hook_the_phish::web::teardown();
}
