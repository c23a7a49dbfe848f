//! Listener plumbing.
//!
//! Listeners only write into [`InputCells`]; the frame loop takes one
//! snapshot per frame. Every registration is an [`EventListener`] handle that
//! unregisters itself when dropped.

use crate::dom;
use folio_core::{InputSnapshot, PointerState, ScrollProgress, ScrollRange, Viewport};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct EventListener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl EventListener {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

#[derive(Default)]
pub struct InputCells {
    pointer: Cell<PointerState>,
    scroll_y: Cell<f32>,
    viewport: Cell<Viewport>,
    resized: Cell<bool>,
}

impl InputCells {
    pub fn new(viewport: Viewport, scroll_y: f32) -> Self {
        Self {
            viewport: Cell::new(viewport),
            scroll_y: Cell::new(scroll_y),
            ..Self::default()
        }
    }

    pub fn snapshot(&self, range: ScrollRange) -> InputSnapshot {
        InputSnapshot {
            pointer: self.pointer.get(),
            scroll: ScrollProgress::from_offset(self.scroll_y.get(), range),
            viewport: self.viewport.get(),
        }
    }

    /// True once per resize burst; the frame loop resizes surfaces on it.
    pub fn take_resized(&self) -> bool {
        self.resized.replace(false)
    }
}

/// Register pointer, resize and scroll listeners on the window.
///
/// `canvas` is the element whose CSS box defines the scene viewport.
pub fn wire_input(
    window: &web::Window,
    canvas: Option<web::HtmlCanvasElement>,
    cells: &Rc<InputCells>,
) -> anyhow::Result<Vec<EventListener>> {
    let target: &web::EventTarget = window.as_ref();
    let mut listeners = Vec::with_capacity(3);

    {
        let cells = cells.clone();
        let window = window.clone();
        let mount: Option<web::Element> = canvas.clone().map(Into::into);
        listeners.push(EventListener::new(target, "pointermove", move |ev| {
            let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
                return;
            };
            let rect = dom::pointer_rect(&window, mount.as_ref());
            cells.pointer.set(PointerState::from_client(
                ev.client_x() as f32,
                ev.client_y() as f32,
                rect,
            ));
        })?);
    }

    {
        let cells = cells.clone();
        listeners.push(EventListener::new(target, "resize", move |_| {
            if let Some(canvas) = &canvas {
                cells.viewport.set(dom::canvas_viewport(canvas));
            }
            cells.resized.set(true);
        })?);
    }

    {
        let cells = cells.clone();
        let window = window.clone();
        listeners.push(EventListener::new(target, "scroll", move |_| {
            cells.scroll_y.set(dom::scroll_y(&window));
        })?);
    }

    Ok(listeners)
}
