use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, HtmlCanvasElement};

use super::canvas::CanvasSurface;
use crate::{Config, Scene, Viewport};

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Builds the scene and starts the render loop. Without a 2D context this is a
/// silent no-op.
pub fn start(canvas: HtmlCanvasElement, config: Config) -> Result<(), JsValue> {
    let Some(mut surface) = CanvasSurface::new(canvas.clone())? else {
        log::debug!("2d context unavailable, heart field disabled");
        return Ok(());
    };

    let viewport = viewport_of(&canvas);
    surface.fit(&viewport)?;
    let scene = Scene::new(config, viewport).map_err(|e| JsValue::from_str(&e.to_string()))?;
    log::info!("heart field: {} particles", scene.particles().len());
    let scene = Rc::new(RefCell::new(scene));

    // Resize only records the new viewport; the frame callback rebuilds.
    let resize_closure = {
        let scene = scene.clone();
        let canvas = canvas.clone();
        Closure::wrap(Box::new(move || {
            scene.borrow_mut().resize(viewport_of(&canvas));
        }) as Box<dyn FnMut()>)
    };
    window()
        .ok_or("no window")?
        .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();

    // Animation loop
    // `f` holds the animation-frame closure so that it can keep calling
    // `request_animation_frame` on itself.
    let f: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        {
            let mut scene = scene.borrow_mut();
            if scene.flush() {
                if let Err(e) = surface.fit(&scene.viewport()) {
                    log::error!("canvas resize failed: {:?}", e);
                }
            }
            if let Err(e) = scene.frame(now, &mut surface) {
                log::error!("frame failed: {}", e);
            }
        }

        // schedule next
        if let Some(next) = f.borrow().as_ref() {
            if let Err(e) = request_frame(next) {
                log::error!("request_animation_frame failed: {:?}", e);
            }
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(first) = g.borrow().as_ref() {
        request_frame(first)?;
    }
    Ok(())
}

fn request_frame(callback: &FrameCallback) -> Result<i32, JsValue> {
    window()
        .ok_or("no window")?
        .request_animation_frame(callback.as_ref().unchecked_ref())
}

fn viewport_of(canvas: &HtmlCanvasElement) -> Viewport {
    let ratio = window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    Viewport::new(
        f64::from(canvas.client_width()),
        f64::from(canvas.client_height()),
        ratio,
    )
}
