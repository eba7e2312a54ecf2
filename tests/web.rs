#![cfg(target_arch = "wasm32")]

use heart_field::{Config, Scene, Viewport};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn scene_builds_with_browser_entropy() {
    let config = Config::from_json(r#"{ "population": { "count": 2000 } }"#).unwrap();
    let scene = Scene::new(config, Viewport::new(640.0, 480.0, 1.0)).unwrap();
    assert_eq!(scene.particles().len(), 2000);
}

#[wasm_bindgen_test]
fn viewport_matches_window() {
    let window = web_sys::window().unwrap();
    let w = window.inner_width().unwrap().as_f64().unwrap();
    let h = window.inner_height().unwrap().as_f64().unwrap();
    let viewport = Viewport::new(w, h, window.device_pixel_ratio());

    let (dw, dh) = viewport.device_size();
    assert!(dw >= w.floor() as u32 && dh >= h.floor() as u32);
}
