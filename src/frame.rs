use crate::background::Starfield2d;
use crate::dom;
use crate::events::InputCells;
use crate::loader::{AssetEvent, AssetSlot};
use crate::render::GpuState;
use folio_core::SceneDriver;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything the 3D ship layer needs per frame.
pub struct ShipScene {
    pub driver: SceneDriver,
    pub gpu: GpuState,
    pub canvas: web::HtmlCanvasElement,
    pub asset: Rc<RefCell<AssetSlot>>,
    pub applied_opacity: f32,
}

impl ShipScene {
    fn frame(&mut self, dt: f32, cells: &InputCells, resized: bool) {
        if resized {
            let (w, h) = dom::sync_canvas_backing_size(&self.canvas);
            self.gpu.resize_if_needed(w, h);
        }

        let event = self.asset.borrow_mut().poll(dom::now_seconds());
        match event {
            Some(AssetEvent::Ready(model)) => {
                if self.driver.on_asset_ready(&model.bounds) {
                    self.gpu.upload_model(&model);
                }
            }
            Some(AssetEvent::Failed(err)) => self.driver.on_asset_failed(&err),
            None => {}
        }

        let snapshot = cells.snapshot(self.driver.config().scroll);
        let out = self.driver.update(dt, &snapshot);
        if (out.canvas_opacity - self.applied_opacity).abs() > 1e-3 {
            self.applied_opacity = out.canvas_opacity;
            dom::set_opacity(&self.canvas, out.canvas_opacity);
        }
        if let Err(e) = self.gpu.render(&out) {
            log::error!("[gpu] render error: {:?}", e);
        }
    }
}

pub struct FrameContext {
    pub cells: Rc<InputCells>,
    pub background: Option<Starfield2d>,
    pub scene: Option<ShipScene>,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        let resized = self.cells.take_resized();
        if let Some(bg) = &mut self.background {
            if resized {
                bg.resize();
            }
            bg.draw(dt);
        }
        if let Some(scene) = &mut self.scene {
            scene.frame(dt, &self.cells, resized);
        }
    }
}

/// A `requestAnimationFrame` chain that stops when cancelled or dropped.
pub struct AnimationLoop {
    handle: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl AnimationLoop {
    pub fn cancel(&self) {
        if let Some(id) = self.handle.take() {
            if let Some(w) = web::window() {
                let _ = w.cancel_animation_frame(id);
            }
        }
        // Breaks the closure's reference to itself.
        self.tick.borrow_mut().take();
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>, handle: &Cell<Option<i32>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        handle.set(w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> AnimationLoop {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let tick_clone = tick.clone();
    let handle_clone = handle.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        handle_clone.set(None);
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone, &handle_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &handle);
    AnimationLoop { handle, tick }
}
