//! Contact form state.
//!
//! The web crate copies field values into a [`ContactDraft`], then hands the
//! form and a [`ContactTransport`] to [`submit_once`]. The transport is the
//! only part that talks to the network.

use crate::constants::{CONTACT_FAILURE_TITLE, CONTACT_SUCCESS_DESCRIPTION, CONTACT_SUCCESS_TITLE};
use crate::error::ContactError;
use serde::Serialize;
use std::cell::RefCell;

/// Raw, untrimmed field values as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Validated payload posted to the contact endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    pub fn from_draft(draft: &ContactDraft) -> Result<Self, ContactError> {
        let name = draft.name.trim();
        let email = draft.email.trim();
        let message = draft.message.trim();
        if name.is_empty() {
            return Err(ContactError::MissingField("name"));
        }
        if email.is_empty() {
            return Err(ContactError::MissingField("email"));
        }
        if message.is_empty() {
            return Err(ContactError::MissingField("message"));
        }
        if !is_plausible_email(email) {
            return Err(ContactError::InvalidEmail);
        }
        Ok(Self {
            name: name.to_owned(),
            email: email.to_owned(),
            message: message.to_owned(),
        })
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient message for the toast region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn success(title: &str, description: &str) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.to_owned(),
            description: description.to_owned(),
        }
    }

    pub fn error(title: &str, description: &str) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.to_owned(),
            description: description.to_owned(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ContactForm {
    draft: ContactDraft,
    submitting: bool,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &ContactDraft {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: ContactDraft) {
        self.draft = draft;
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate the draft and mark the form in flight.
    pub fn begin_submit(&mut self) -> Result<ContactMessage, ContactError> {
        if self.submitting {
            return Err(ContactError::AlreadySubmitting);
        }
        let message = ContactMessage::from_draft(&self.draft)?;
        self.submitting = true;
        log::debug!("[contact] submitting for {}", message.email);
        Ok(message)
    }

    /// Finish an in-flight submission. The draft is cleared only on success.
    pub fn complete(&mut self, result: Result<(), String>) -> Notice {
        self.submitting = false;
        match result {
            Ok(()) => {
                log::info!("[contact] message sent");
                self.draft = ContactDraft::default();
                Notice::success(CONTACT_SUCCESS_TITLE, CONTACT_SUCCESS_DESCRIPTION)
            }
            Err(reason) => {
                log::warn!("[contact] send failed: {}", reason);
                Notice::error(CONTACT_FAILURE_TITLE, &reason)
            }
        }
    }
}

/// Delivers a validated message somewhere. Errors are human-readable.
#[allow(async_fn_in_trait)]
pub trait ContactTransport {
    async fn send(&self, message: &ContactMessage) -> Result<(), String>;
}

/// Run one submission: validate, send once, and report the outcome.
///
/// The form borrow is released before awaiting the transport, so input
/// handlers can still read the form while a send is in flight.
pub async fn submit_once<T: ContactTransport>(form: &RefCell<ContactForm>, transport: &T) -> Notice {
    let begun = form.borrow_mut().begin_submit();
    let message = match begun {
        Ok(message) => message,
        Err(e) => return Notice::error(CONTACT_FAILURE_TITLE, &e.to_string()),
    };
    let result = transport.send(&message).await;
    form.borrow_mut().complete(result)
}
