use crate::constants::MAX_DEVICE_PIXEL_RATIO;
use folio_core::{ClientRect, Viewport};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Look up an element and cast it, or `None` if it is missing or of another type.
pub fn element<T: JsCast>(document: &web::Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
}

pub fn attribute(el: &web::Element, name: &str) -> Option<String> {
    el.get_attribute(name)
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

#[inline]
pub fn device_pixel_ratio() -> f64 {
    web::window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0)
        .clamp(1.0, MAX_DEVICE_PIXEL_RATIO)
}

/// Match the canvas backing store to its CSS size, capped at 2x density.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    let dpr = device_pixel_ratio();
    let rect = canvas.get_bounding_client_rect();
    let w_px = ((rect.width() * dpr) as u32).max(1);
    let h_px = ((rect.height() * dpr) as u32).max(1);
    if canvas.width() != w_px {
        canvas.set_width(w_px);
    }
    if canvas.height() != h_px {
        canvas.set_height(h_px);
    }
    (w_px, h_px)
}

/// CSS size of the canvas, used for the camera aspect.
pub fn canvas_viewport(canvas: &web::HtmlCanvasElement) -> Viewport {
    let rect = canvas.get_bounding_client_rect();
    Viewport::new(rect.width() as f32, rect.height() as f32)
}

/// Client rect of the mount element, or of the window while the element has no size.
pub fn pointer_rect(window: &web::Window, el: Option<&web::Element>) -> ClientRect {
    el.map(|el| {
        let r = el.get_bounding_client_rect();
        ClientRect {
            left: r.left() as f32,
            top: r.top() as f32,
            width: r.width() as f32,
            height: r.height() as f32,
        }
    })
    .filter(|r| r.width > 0.0 && r.height > 0.0)
    .unwrap_or_else(|| window_rect(window))
}

/// The layout viewport as a client rect.
fn window_rect(window: &web::Window) -> ClientRect {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    ClientRect {
        left: 0.0,
        top: 0.0,
        width: width as f32,
        height: height as f32,
    }
}

#[inline]
pub fn scroll_y(window: &web::Window) -> f32 {
    window.scroll_y().unwrap_or(0.0) as f32
}

/// Wall clock in seconds, shared by the load gate and the fetch timeout.
#[inline]
pub fn now_seconds() -> f64 {
    js_sys::Date::now() / 1000.0
}

pub fn set_opacity(el: &web::HtmlElement, opacity: f32) {
    let _ = el
        .style()
        .set_property("opacity", &format!("{:.3}", opacity.clamp(0.0, 1.0)));
}
