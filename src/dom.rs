use crate::constants::MAX_DEVICE_PIXEL_RATIO;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Look up `#id` and cast it to the expected element type.
pub fn element_by_id<T: JsCast>(document: &web::Document, id: &str) -> anyhow::Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?
        .dyn_into::<T>()
        .map_err(|e| anyhow::anyhow!("#{} has the wrong element type: {:?}", id, e))
}

#[inline]
pub fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

/// Match the canvas backing store to its CSS size times the (capped) device
/// pixel ratio. Returns `true` when the size changed.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> bool {
    let Some(w) = web::window() else {
        return false;
    };
    let dpr = w.device_pixel_ratio().min(MAX_DEVICE_PIXEL_RATIO);
    let rect = canvas.get_bounding_client_rect();
    let w_px = ((rect.width() * dpr) as u32).max(1);
    let h_px = ((rect.height() * dpr) as u32).max(1);
    if canvas.width() == w_px && canvas.height() == h_px {
        return false;
    }
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    true
}

pub fn add_keydown_listener(mut handler: impl FnMut(web::KeyboardEvent) + 'static) {
    if let Some(window) = web::window() {
        let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| handler(ev))
            as Box<dyn FnMut(web::KeyboardEvent)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn toggle_fullscreen(target: &web::Element) {
    if let Some(doc) = window_document() {
        if doc.fullscreen_element().is_some() {
            doc.exit_fullscreen();
        } else {
            _ = target.request_fullscreen();
        }
    }
}

pub fn exit_fullscreen() {
    if let Some(doc) = window_document() {
        if doc.fullscreen_element().is_some() {
            doc.exit_fullscreen();
        }
    }
}
