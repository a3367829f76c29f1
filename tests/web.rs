#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

use patternstudio::Studio;

wasm_bindgen_test_configure!(run_in_browser);

fn add_canvas(id: &str) -> web_sys::HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    canvas.set_id(id);
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

#[wasm_bindgen_test]
fn missing_canvas_is_an_error() {
    assert!(Studio::new("no-such-canvas").is_err());
}

#[wasm_bindgen_test]
fn parameters_reach_the_studio() {
    add_canvas("c");
    let studio = Studio::new("c").unwrap();

    studio.set_parameter("frequency", "120").unwrap();
    assert_eq!(studio.parameter("frequency"), Some(120.0));
    assert!(studio.set_parameter("frequency", "fast").is_err());
    assert!(studio.set_parameter("warp", "1").is_err());

    assert_eq!(studio.set_mode("pixelated"), "pixelated");
    assert_eq!(studio.set_mode("plasma"), "cosmic");
}

#[wasm_bindgen_test]
fn freeze_adds_a_thumbnail() {
    add_canvas("freeze");
    let studio = Studio::new("freeze").unwrap();
    assert!(studio.toggle_freeze().unwrap());
    assert_eq!(studio.gallery_length(), 1);
    assert!(!studio.toggle_freeze().unwrap());
    assert_eq!(studio.gallery_length(), 1);
}
