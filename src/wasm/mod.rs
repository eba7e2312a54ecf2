use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement};

use crate::Config;

mod audio;
mod canvas;
mod render;

const CANVAS_ID: &str = "hero-canvas";
/// Optional JSON override read from the canvas element.
const CONFIG_ATTR: &str = "data-heart-config";

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();

    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    mount(&document)
}

/// Wires the audio toggle, then starts the field on `#hero-canvas`. The two are
/// independent: either may be missing, and a broken toggle only logs.
fn mount(document: &Document) -> Result<(), JsValue> {
    if let Err(e) = audio::wire(document) {
        log::warn!("audio toggle disabled: {:?}", e);
    }

    let Some(element) = document.get_element_by_id(CANVAS_ID) else {
        log::debug!("#{} not found, heart field disabled", CANVAS_ID);
        return Ok(());
    };
    let canvas = element.dyn_into::<HtmlCanvasElement>()?;
    let config = load_config(&canvas);

    render::start(canvas, config)
}

fn load_config(canvas: &HtmlCanvasElement) -> Config {
    let Some(json) = canvas.get_attribute(CONFIG_ATTR) else {
        return Config::default();
    };
    Config::from_json(&json).unwrap_or_else(|e| {
        log::warn!("ignoring {}: {}", CONFIG_ATTR, e);
        Config::default()
    })
}

#[cfg(test)]
mod tests {
    use wasm_bindgen_test::*;

    use super::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn broken_toggle_does_not_stop_mount() {
        let document = web_sys::window().unwrap().document().unwrap();
        let root = document.document_element().unwrap();
        let track = document.create_element("div").unwrap();
        track.set_id("bg-music");
        let button = document.create_element("button").unwrap();
        button.set_id("music-toggle");
        root.append_child(&track).unwrap();
        root.append_child(&button).unwrap();

        // no canvas on the test page, so the field is a no-op
        let mounted = mount(&document);
        track.remove();
        button.remove();
        assert!(mounted.is_ok(), "{mounted:?}");
    }
}
