// Host-side tests for the contact form state and submission flow.

use folio_core::*;
use std::cell::{Cell, RefCell};

struct FakeTransport {
    calls: Cell<usize>,
    fail_with: Option<&'static str>,
    last: RefCell<Option<ContactMessage>>,
}

impl FakeTransport {
    fn ok() -> Self {
        Self {
            calls: Cell::new(0),
            fail_with: None,
            last: RefCell::new(None),
        }
    }

    fn failing(reason: &'static str) -> Self {
        Self {
            fail_with: Some(reason),
            ..Self::ok()
        }
    }
}

impl ContactTransport for FakeTransport {
    async fn send(&self, message: &ContactMessage) -> Result<(), String> {
        self.calls.set(self.calls.get() + 1);
        *self.last.borrow_mut() = Some(message.clone());
        match self.fail_with {
            Some(reason) => Err(reason.to_owned()),
            None => Ok(()),
        }
    }
}

fn filled() -> ContactDraft {
    ContactDraft {
        name: "  Ada Lovelace ".into(),
        email: "ada@example.com".into(),
        message: "Hello from the engine room.\n".into(),
    }
}

fn form_with(draft: ContactDraft) -> RefCell<ContactForm> {
    let mut form = ContactForm::new();
    form.set_draft(draft);
    RefCell::new(form)
}

#[test]
fn successful_send_posts_once_and_clears_the_draft() {
    let form = form_with(filled());
    let transport = FakeTransport::ok();
    let notice = pollster::block_on(submit_once(&form, &transport));

    assert_eq!(transport.calls.get(), 1);
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.title, "Message sent successfully!");
    assert_eq!(form.borrow().draft(), &ContactDraft::default());
    assert!(!form.borrow().is_submitting());

    let sent = transport.last.borrow().clone().unwrap();
    assert_eq!(sent.name, "Ada Lovelace");
    assert_eq!(sent.message, "Hello from the engine room.");
}

#[test]
fn failed_send_keeps_the_draft_and_reports_the_reason() {
    let form = form_with(filled());
    let transport = FakeTransport::failing("network error");
    let notice = pollster::block_on(submit_once(&form, &transport));

    assert_eq!(transport.calls.get(), 1);
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.title, "Failed to send message");
    assert!(notice.description.contains("network error"));
    assert_eq!(form.borrow().draft(), &filled());
    assert!(!form.borrow().is_submitting());
}

#[test]
fn invalid_draft_never_reaches_the_transport() {
    let mut draft = filled();
    draft.email = "not-an-address".into();
    let form = form_with(draft.clone());
    let transport = FakeTransport::ok();
    let notice = pollster::block_on(submit_once(&form, &transport));

    assert_eq!(transport.calls.get(), 0);
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(form.borrow().draft(), &draft);
}

#[test]
fn a_second_submit_while_in_flight_is_refused() {
    let mut form = ContactForm::new();
    form.set_draft(filled());
    assert!(form.begin_submit().is_ok());
    assert!(form.is_submitting());
    assert_eq!(form.begin_submit(), Err(ContactError::AlreadySubmitting));

    let form = RefCell::new(form);
    let transport = FakeTransport::ok();
    let notice = pollster::block_on(submit_once(&form, &transport));
    assert_eq!(transport.calls.get(), 0);
    assert_eq!(notice.kind, NoticeKind::Error);
    assert!(form.borrow().is_submitting());
}

#[test]
fn validation_names_the_first_missing_field() {
    let blank = ContactDraft {
        name: " ".into(),
        ..filled()
    };
    assert_eq!(
        ContactMessage::from_draft(&blank),
        Err(ContactError::MissingField("name"))
    );
    let no_message = ContactDraft {
        message: "\n\t".into(),
        ..filled()
    };
    assert_eq!(
        ContactMessage::from_draft(&no_message),
        Err(ContactError::MissingField("message"))
    );
    for bad in ["@example.com", "ada@", "a@b@c"] {
        let draft = ContactDraft {
            email: bad.into(),
            ..filled()
        };
        assert_eq!(ContactMessage::from_draft(&draft), Err(ContactError::InvalidEmail), "{}", bad);
    }
}

#[test]
fn message_serializes_as_a_flat_json_object() {
    let message = ContactMessage::from_draft(&filled()).unwrap();
    let json = serde_json::to_value(&message).unwrap();
    assert_eq!(json["name"], "Ada Lovelace");
    assert_eq!(json["email"], "ada@example.com");
    assert_eq!(json.as_object().unwrap().len(), 3);
}
