use crate::constants::TOAST_LIFETIME_MS;
use folio_core::{Notice, NoticeKind};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Transient notices appended to `#toast-region`.
#[derive(Clone)]
pub struct ToastRegion {
    document: web::Document,
    region: Option<web::Element>,
}

impl ToastRegion {
    pub fn new(document: &web::Document, id: &str) -> Self {
        let region = document.get_element_by_id(id);
        if region.is_none() {
            log::warn!("[contact] #{} missing; notices go to the console only", id);
        }
        Self {
            document: document.clone(),
            region,
        }
    }

    pub fn show(&self, notice: &Notice) {
        let Some(region) = &self.region else {
            log::info!("[contact] {}: {}", notice.title, notice.description);
            return;
        };
        let toast = match self.build(notice) {
            Ok(el) => el,
            Err(e) => {
                log::warn!("[contact] toast error: {:?}", e);
                return;
            }
        };
        if region.append_child(&toast).is_err() {
            return;
        }
        let dismiss = Closure::once_into_js(move || toast.remove());
        if let Some(w) = web::window() {
            let _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(
                dismiss.unchecked_ref(),
                TOAST_LIFETIME_MS,
            );
        }
    }

    fn build(&self, notice: &Notice) -> Result<web::Element, wasm_bindgen::JsValue> {
        let toast = self.document.create_element("div")?;
        let modifier = match notice.kind {
            NoticeKind::Success => "toast--success",
            NoticeKind::Error => "toast--error",
        };
        toast.set_class_name(&format!("toast {}", modifier));
        toast.set_attribute(
            "role",
            match notice.kind {
                NoticeKind::Success => "status",
                NoticeKind::Error => "alert",
            },
        )?;

        let title = self.document.create_element("strong")?;
        title.set_text_content(Some(&notice.title));
        toast.append_child(&title)?;

        if !notice.description.is_empty() {
            let body = self.document.create_element("p")?;
            body.set_text_content(Some(&notice.description));
            toast.append_child(&body)?;
        }
        Ok(toast)
    }
}
