//! Play/pause button for the background track.

use js_sys::Promise;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, HtmlMediaElement};

const TOGGLE_ID: &str = "music-toggle";
const AUDIO_ID: &str = "bg-music";

pub fn wire(document: &Document) -> Result<(), JsValue> {
    let (Some(button), Some(audio)) = (
        document.get_element_by_id(TOGGLE_ID),
        document.get_element_by_id(AUDIO_ID),
    ) else {
        log::debug!("no audio toggle on this page");
        return Ok(());
    };
    let audio = match audio.dyn_into::<HtmlMediaElement>() {
        Ok(audio) => audio,
        Err(other) => {
            log::warn!(
                "#{} is a <{}>, not a media element; audio toggle disabled",
                AUDIO_ID,
                other.tag_name().to_lowercase()
            );
            return Ok(());
        }
    };

    let target = button.clone();
    let on_click = Closure::wrap(Box::new(move || {
        if let Err(e) = toggle(&audio, &target) {
            log::error!("audio toggle failed: {:?}", e);
        }
    }) as Box<dyn FnMut()>);
    button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}

fn toggle(audio: &HtmlMediaElement, button: &Element) -> Result<(), JsValue> {
    let playing = if audio.paused() {
        let promise: Promise = audio.play()?;
        // Autoplay policies reject the promise instead of throwing.
        let on_reject = Closure::once(|err: JsValue| {
            log::warn!("audio playback rejected: {:?}", err);
        });
        let _ = promise.catch(&on_reject);
        on_reject.forget();
        true
    } else {
        audio.pause()?;
        false
    };

    button.set_attribute("aria-pressed", if playing { "true" } else { "false" })?;
    button.set_text_content(Some(if playing { "❚❚ Pause" } else { "♪ Play" }));
    Ok(())
}

#[cfg(test)]
mod tests {
    use wasm_bindgen_test::*;

    use super::*;

    fn insert(document: &Document, tag: &str, id: &str) -> Element {
        let el = document.create_element(tag).unwrap();
        el.set_id(id);
        document
            .document_element()
            .unwrap()
            .append_child(&el)
            .unwrap();
        el
    }

    #[wasm_bindgen_test]
    fn non_media_track_is_skipped() {
        let document = web_sys::window().unwrap().document().unwrap();
        let track = insert(&document, "div", AUDIO_ID);
        let button = insert(&document, "button", TOGGLE_ID);

        let wired = wire(&document);
        track.remove();
        button.remove();
        assert!(wired.is_ok(), "{wired:?}");
    }

    #[wasm_bindgen_test]
    fn missing_elements_are_skipped() {
        let document = web_sys::window().unwrap().document().unwrap();
        assert!(wire(&document).is_ok());
    }
}
