#![cfg(target_arch = "wasm32")]
use folio_core::{SceneConfig, SceneDriver};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod background;
mod constants;
mod contact;
mod core;
mod dom;
mod events;
mod frame;
mod loader;
mod render;
mod toast;

use constants::{
    BACKGROUND_CANVAS_ID, DEFAULT_MODEL_URL, MODEL_URL_ATTR, SCENE_CONFIG_ATTR, SHIP_CANVAS_ID,
    TOAST_REGION_ID, VARIANT_ATTR,
};
use events::{EventListener, InputCells};
use frame::{AnimationLoop, FrameContext, ShipScene};
use loader::AssetSlot;

/// Everything one page mount owns. Dropping it stops the frame loop,
/// unregisters every listener and releases the GPU device.
struct Mount {
    frame_loop: Option<AnimationLoop>,
    listeners: Vec<EventListener>,
    frame: Rc<RefCell<FrameContext>>,
}

impl Drop for Mount {
    fn drop(&mut self) {
        if let Some(frame_loop) = self.frame_loop.take() {
            frame_loop.cancel();
        }
        self.listeners.clear();
        if let Ok(mut ctx) = self.frame.try_borrow_mut() {
            ctx.scene = None;
            ctx.background = None;
        }
        log::info!("[scene] unmounted");
    }
}

thread_local! {
    static MOUNT: RefCell<Option<Mount>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Tear the page mount down. Safe to call more than once.
#[wasm_bindgen]
pub fn unmount() {
    let mount = MOUNT.with(|m| m.borrow_mut().take());
    drop(mount);
}

fn scene_config(canvas: &web::HtmlCanvasElement) -> SceneConfig {
    let variant = dom::attribute(canvas, VARIANT_ATTR);
    let overrides = dom::attribute(canvas, SCENE_CONFIG_ATTR);
    match SceneConfig::resolve(variant.as_deref(), overrides.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("[scene] {}; using the hero preset", e);
            SceneConfig::hero()
        }
    }
}

async fn build_ship_scene(canvas: web::HtmlCanvasElement) -> anyhow::Result<ShipScene> {
    let config = scene_config(&canvas);
    dom::sync_canvas_backing_size(&canvas);
    let viewport = dom::canvas_viewport(&canvas);

    let gpu = render::GpuState::new(&canvas, config.exit.streak_count, config.seed).await?;

    let asset = Rc::new(RefCell::new(AssetSlot::new(
        dom::now_seconds(),
        config.load_timeout_sec,
    )));
    let url = dom::attribute(&canvas, MODEL_URL_ATTR).unwrap_or_else(|| DEFAULT_MODEL_URL.to_owned());
    loader::begin_load(url, &asset)?;

    Ok(ShipScene {
        driver: SceneDriver::new(config, viewport),
        gpu,
        canvas,
        asset,
        applied_opacity: 1.0,
    })
}

async fn init() -> anyhow::Result<()> {
    // A second start replaces the previous mount.
    unmount();

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let mut listeners = Vec::new();
    let toasts = toast::ToastRegion::new(&document, TOAST_REGION_ID);
    if let Some(listener) = contact::wire_contact_form(&document, toasts)? {
        listeners.push(listener);
    }

    let background = dom::element::<web::HtmlCanvasElement>(&document, BACKGROUND_CANVAS_ID)
        .and_then(|canvas| match background::Starfield2d::new(canvas) {
            Ok(bg) => Some(bg),
            Err(e) => {
                log::warn!("starfield disabled: {:?}", e);
                None
            }
        });

    let ship_canvas = dom::element::<web::HtmlCanvasElement>(&document, SHIP_CANVAS_ID);
    let viewport = ship_canvas
        .as_ref()
        .map(dom::canvas_viewport)
        .unwrap_or_default();
    let scene = match ship_canvas.clone() {
        Some(canvas) => match build_ship_scene(canvas).await {
            Ok(scene) => Some(scene),
            Err(e) => {
                // The page keeps working without the 3D layer.
                log::error!("[gpu] WebGPU init error: {:?}", e);
                None
            }
        },
        None => {
            log::info!("[scene] no #{} on this page", SHIP_CANVAS_ID);
            None
        }
    };

    let cells = Rc::new(InputCells::new(viewport, dom::scroll_y(&window)));
    listeners.extend(events::wire_input(&window, ship_canvas, &cells)?);

    // Defer the teardown: the pagehide listener is itself owned by the mount.
    let window_target: &web::EventTarget = window.as_ref();
    listeners.push(EventListener::new(window_target, "pagehide", |_| {
        spawn_local(async { unmount() });
    })?);

    let frame = Rc::new(RefCell::new(FrameContext {
        cells,
        background,
        scene,
        last_instant: Instant::now(),
    }));
    let frame_loop = frame::start_loop(frame.clone());

    MOUNT.with(|m| {
        *m.borrow_mut() = Some(Mount {
            frame_loop: Some(frame_loop),
            listeners,
            frame,
        });
    });
    log::info!("[scene] mounted");
    Ok(())
}
