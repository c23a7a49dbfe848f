//! Browser side of the contact form: reads the fields, posts JSON, and
//! reports the outcome as a toast.

use crate::constants::{CONTACT_FORM_ID, DEFAULT_CONTACT_ENDPOINT, ENDPOINT_ATTR, SUBMIT_BUSY_LABEL};
use crate::dom;
use crate::events::EventListener;
use crate::toast::ToastRegion;
use folio_core::{submit_once, ContactDraft, ContactForm, ContactMessage, ContactTransport, NoticeKind};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub struct FetchTransport {
    endpoint: String,
}

impl FetchTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl ContactTransport for FetchTransport {
    async fn send(&self, message: &ContactMessage) -> Result<(), String> {
        let body = serde_json::to_string(message).map_err(|e| e.to_string())?;
        let window = web::window().ok_or("no window")?;

        let headers = web::Headers::new().map_err(js_err)?;
        headers.set("Content-Type", "application/json").map_err(js_err)?;
        let init = web::RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(&body));

        let request = web::Request::new_with_str_and_init(&self.endpoint, &init).map_err(js_err)?;
        let response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_err)?;
        let response: web::Response = response.dyn_into().map_err(js_err)?;
        if response.ok() {
            Ok(())
        } else {
            Err(format!("The server responded with status {}.", response.status()))
        }
    }
}

fn js_err(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

fn field_value(form: &web::HtmlFormElement, name: &str) -> String {
    let Ok(Some(el)) = form.query_selector(&format!("[name=\"{}\"]", name)) else {
        return String::new();
    };
    if let Some(input) = el.dyn_ref::<web::HtmlInputElement>() {
        input.value()
    } else if let Some(area) = el.dyn_ref::<web::HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

fn read_draft(form: &web::HtmlFormElement) -> ContactDraft {
    ContactDraft {
        name: field_value(form, "name"),
        email: field_value(form, "email"),
        message: field_value(form, "message"),
    }
}

fn submit_button(form: &web::HtmlFormElement) -> Option<web::HtmlButtonElement> {
    form.query_selector("button[type=\"submit\"]")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into().ok())
}

/// Swap the submit button into its busy state; returns the label to restore.
fn set_busy(button: Option<&web::HtmlButtonElement>, busy: bool, label: &str) -> String {
    let Some(button) = button else {
        return String::new();
    };
    let previous = button.text_content().unwrap_or_default();
    button.set_disabled(busy);
    button.set_text_content(Some(label));
    previous
}

/// Hook the submit handler onto `#contact-form`, if the page has one.
pub fn wire_contact_form(
    document: &web::Document,
    toasts: ToastRegion,
) -> anyhow::Result<Option<EventListener>> {
    let Some(form) = dom::element::<web::HtmlFormElement>(document, CONTACT_FORM_ID) else {
        log::info!("[contact] no #{} on this page", CONTACT_FORM_ID);
        return Ok(None);
    };
    let endpoint =
        dom::attribute(&form, ENDPOINT_ATTR).unwrap_or_else(|| DEFAULT_CONTACT_ENDPOINT.to_owned());
    log::info!("[contact] form wired to {}", endpoint);

    let state = Rc::new(RefCell::new(ContactForm::new()));
    let transport = Rc::new(FetchTransport::new(endpoint));
    let target: web::EventTarget = form.clone().into();

    let listener = EventListener::new(&target, "submit", move |ev| {
        ev.prevent_default();
        if state.borrow().is_submitting() {
            return;
        }
        state.borrow_mut().set_draft(read_draft(&form));

        let form = form.clone();
        let state = state.clone();
        let transport = transport.clone();
        let toasts = toasts.clone();
        spawn_local(async move {
            let button = submit_button(&form);
            let label = set_busy(button.as_ref(), true, SUBMIT_BUSY_LABEL);
            let notice = submit_once(&state, transport.as_ref()).await;
            set_busy(button.as_ref(), false, &label);
            if notice.kind == NoticeKind::Success {
                form.reset();
            }
            toasts.show(&notice);
        });
    })?;
    Ok(Some(listener))
}
