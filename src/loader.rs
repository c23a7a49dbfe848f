//! Ship asset fetch.
//!
//! The fetch runs on its own future and only deposits its outcome in the
//! shared [`AssetSlot`]. The frame loop polls the slot, so the driver sees at
//! most one accepted result and a timeout that fires exactly once.

use crate::dom;
use folio_core::{AssetError, LoadGate, LoadStatus, ModelData};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub enum AssetEvent {
    Ready(ModelData),
    Failed(AssetError),
}

pub struct AssetSlot {
    gate: LoadGate,
    abort: Option<web::AbortController>,
    outcome: Option<AssetEvent>,
}

impl AssetSlot {
    pub fn new(now: f64, timeout: f64) -> Self {
        Self {
            gate: LoadGate::new(now, timeout),
            abort: None,
            outcome: None,
        }
    }

    /// Hand the next outcome to the frame loop; flips to a timeout at the deadline.
    pub fn poll(&mut self, now: f64) -> Option<AssetEvent> {
        if let Some(err) = self.gate.check_deadline(now) {
            if let Some(abort) = self.abort.take() {
                abort.abort();
            }
            return Some(AssetEvent::Failed(err));
        }
        self.outcome.take()
    }

    fn settle(&mut self, now: f64, result: Result<ModelData, AssetError>) {
        self.abort = None;
        match self.gate.settle(now, result) {
            Ok(model) => self.outcome = Some(AssetEvent::Ready(model)),
            Err(AssetError::Late) => {
                log::warn!("[asset] result arrived after the load settled; dropped");
            }
            Err(err @ AssetError::Timeout(_)) => {
                log::warn!("[asset] result arrived after the deadline; dropped");
                self.outcome = Some(AssetEvent::Failed(err));
            }
            Err(err) => self.outcome = Some(AssetEvent::Failed(err)),
        }
    }
}

impl Drop for AssetSlot {
    fn drop(&mut self) {
        if self.gate.status() == LoadStatus::Pending {
            if let Some(abort) = self.abort.take() {
                abort.abort();
            }
        }
    }
}

/// Start fetching `url`; the outcome lands in `slot`.
pub fn begin_load(url: String, slot: &Rc<RefCell<AssetSlot>>) -> anyhow::Result<()> {
    let controller = web::AbortController::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let signal = controller.signal();
    slot.borrow_mut().abort = Some(controller);
    log::info!("[asset] loading {}", url);

    let weak = Rc::downgrade(slot);
    spawn_local(async move {
        let result = fetch_model(&url, &signal).await;
        match &result {
            Ok(model) => log::info!(
                "[asset] {} parsed: {} primitives, {} triangles",
                url,
                model.primitives.len(),
                model.triangle_count()
            ),
            Err(e) => log::error!("[asset] {} failed: {}", url, e),
        }
        // The mount may have been torn down while the request was in flight.
        if let Some(slot) = weak.upgrade() {
            slot.borrow_mut().settle(dom::now_seconds(), result);
        }
    });
    Ok(())
}

async fn fetch_model(url: &str, signal: &web::AbortSignal) -> Result<ModelData, AssetError> {
    let window = web::window().ok_or_else(|| AssetError::Fetch("no window".into()))?;
    let init = web::RequestInit::new();
    init.set_method("GET");
    init.set_signal(Some(signal));
    let request = web::Request::new_with_str_and_init(url, &init)
        .map_err(|e| AssetError::Fetch(format!("{:?}", e)))?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| AssetError::Fetch(format!("{:?}", e)))?;
    let response: web::Response = response
        .dyn_into()
        .map_err(|e| AssetError::Fetch(format!("{:?}", e)))?;
    if !response.ok() {
        return Err(AssetError::Http(response.status()));
    }
    let buffer = response
        .array_buffer()
        .map_err(|e| AssetError::Fetch(format!("{:?}", e)))?;
    let buffer = JsFuture::from(buffer)
        .await
        .map_err(|e| AssetError::Fetch(format!("{:?}", e)))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    ModelData::from_slice(&bytes)
}
