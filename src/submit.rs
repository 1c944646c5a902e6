//! Contact form delivery.
//!
//! Delivery goes through a [`Transport`], injected by the caller. The stock
//! [`HttpTransport`] POSTs the submission as JSON and expects
//! `{"success": bool, "error"?: string}` back.
//!
//! ```text
//! ContactForm ──validate──► invalid ──► Outcome::Rejected(errors)
//!                  │
//!                  ▼ valid
//!             Transport::send (once)
//!                  │
//!        ┌─────────┴──────────┐
//!   success: true      error / success: false
//!        │                    │
//! Outcome::Delivered   Outcome::Fallback { mailto }
//! ```
//!
//! There is exactly one delivery attempt. When it fails the caller gets a
//! pre-filled `mailto:` link carrying everything the visitor typed, so the
//! message is never lost.

use crate::prefs::Language;
use crate::validate::{self, ContactForm, ValidationResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::form_urlencoded;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Endpoint answered HTTP {0}")]
    Status(u16),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Payload sent to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    #[serde(flatten)]
    pub form: ContactForm,
    pub language: Language,
}

/// Endpoint reply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Delivers a submission somewhere.
pub trait Transport {
    fn send(&self, submission: &Submission) -> Result<SubmitResponse, TransportError>;
}

/// JSON-over-HTTP transport for a form endpoint.
pub struct HttpTransport {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Transport for HttpTransport {
    fn send(&self, submission: &Submission) -> Result<SubmitResponse, TransportError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(submission)
            .send()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }
        resp.json::<SubmitResponse>()
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))
    }
}

/// Result of a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The endpoint accepted the message.
    Delivered,
    /// The form did not validate; nothing was sent.
    Rejected(ValidationResult),
    /// Delivery failed; the visitor can send the message with their mail client.
    Fallback { mailto: String, reason: String },
}

fn encode(value: &str) -> String {
    // form encoding writes spaces as '+', mail clients expect %20. A literal
    // '+' has already been escaped to %2B at this point.
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Build a pre-filled `mailto:` link for a form.
pub fn mailto_link(recipient: &str, form: &ContactForm, language: Language) -> String {
    let (name_label, phone_label) = match language {
        Language::Fr => ("Nom", "Téléphone"),
        Language::En => ("Name", "Phone"),
    };
    let mut body = format!("{name_label}: {}\nEmail: {}\n", form.name.trim(), form.email.trim());
    if let Some(phone) = form.phone.as_deref().filter(|p| !p.trim().is_empty()) {
        body.push_str(&format!("{phone_label}: {}\n", phone.trim()));
    }
    body.push('\n');
    body.push_str(form.message.trim());

    format!(
        "mailto:{}?subject={}&body={}",
        recipient.trim(),
        encode(form.subject.trim()),
        encode(&body)
    )
}

/// Validate a form and, if valid, deliver it through `transport`.
pub fn submit<T: Transport + ?Sized>(
    form: &ContactForm,
    language: Language,
    transport: &T,
    fallback_email: &str,
) -> Outcome {
    let result = validate::validate(form);
    if !result.is_valid() {
        tracing::debug!(errors = result.field_errors.len(), "submission rejected");
        return Outcome::Rejected(result);
    }

    let submission = Submission {
        form: form.trimmed(),
        language,
    };
    let reason = match transport.send(&submission) {
        Ok(SubmitResponse { success: true, .. }) => {
            tracing::info!("contact form delivered");
            return Outcome::Delivered;
        }
        Ok(SubmitResponse { error, .. }) => {
            error.unwrap_or_else(|| "endpoint reported failure".to_string())
        }
        Err(err) => err.to_string(),
    };
    tracing::warn!(%reason, "contact form delivery failed, offering mailto fallback");
    Outcome::Fallback {
        mailto: mailto_link(fallback_email, form, language),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::valid_form;
    use std::cell::{Cell, RefCell};

    /// Transport returning a canned reply and recording what it was sent.
    struct FakeTransport {
        reply: fn() -> Result<SubmitResponse, TransportError>,
        calls: Cell<usize>,
        last: RefCell<Option<Submission>>,
    }

    impl FakeTransport {
        fn new(reply: fn() -> Result<SubmitResponse, TransportError>) -> Self {
            Self {
                reply,
                calls: Cell::new(0),
                last: RefCell::new(None),
            }
        }
    }

    impl Transport for FakeTransport {
        fn send(&self, submission: &Submission) -> Result<SubmitResponse, TransportError> {
            self.calls.set(self.calls.get() + 1);
            *self.last.borrow_mut() = Some(submission.clone());
            (self.reply)()
        }
    }

    fn accepted() -> Result<SubmitResponse, TransportError> {
        Ok(SubmitResponse {
            success: true,
            error: None,
        })
    }

    fn refused() -> Result<SubmitResponse, TransportError> {
        Ok(SubmitResponse {
            success: false,
            error: Some("quota exceeded".into()),
        })
    }

    fn offline() -> Result<SubmitResponse, TransportError> {
        Err(TransportError::Network("connection refused".into()))
    }

    // =========================================================================
    // submit()
    // =========================================================================

    #[test]
    fn valid_form_is_delivered_once() {
        let transport = FakeTransport::new(accepted);
        let outcome = submit(&valid_form(), Language::En, &transport, "me@example.org");
        assert_eq!(outcome, Outcome::Delivered);
        assert_eq!(transport.calls.get(), 1);
        let sent = transport.last.borrow().clone().unwrap();
        assert_eq!(sent.form, valid_form());
        assert_eq!(sent.language, Language::En);
    }

    #[test]
    fn delivered_fields_are_trimmed() {
        let transport = FakeTransport::new(accepted);
        let form = ContactForm {
            name: " A ".into(),
            email: "  a@b.com  ".into(),
            phone: Some("  ".into()),
            ..valid_form()
        };
        assert_eq!(
            submit(&form, Language::En, &transport, "me@example.org"),
            Outcome::Delivered
        );
        let sent = transport.last.borrow().clone().unwrap();
        assert_eq!(sent.form.name, "A");
        assert_eq!(sent.form.email, "a@b.com");
        assert_eq!(sent.form.phone, None);
    }

    #[test]
    fn invalid_form_is_never_sent() {
        let transport = FakeTransport::new(accepted);
        let form = ContactForm {
            email: "bad".into(),
            ..valid_form()
        };
        let outcome = submit(&form, Language::Fr, &transport, "me@example.org");
        assert!(matches!(outcome, Outcome::Rejected(ref r) if !r.is_valid()));
        assert_eq!(transport.calls.get(), 0);
    }

    #[test]
    fn endpoint_failure_falls_back_to_mailto() {
        let transport = FakeTransport::new(refused);
        let outcome = submit(&valid_form(), Language::Fr, &transport, "me@example.org");
        match outcome {
            Outcome::Fallback { mailto, reason } => {
                assert!(mailto.starts_with("mailto:me@example.org?subject=x&body="));
                assert_eq!(reason, "quota exceeded");
            }
            other => panic!("expected fallback, got {other:?}"),
        }
        assert_eq!(transport.calls.get(), 1);
    }

    #[test]
    fn network_error_falls_back_without_retry() {
        let transport = FakeTransport::new(offline);
        let outcome = submit(&valid_form(), Language::En, &transport, "me@example.org");
        assert!(matches!(
            outcome,
            Outcome::Fallback { ref reason, .. } if reason.contains("connection refused")
        ));
        assert_eq!(transport.calls.get(), 1);
    }

    // =========================================================================
    // mailto_link()
    // =========================================================================

    #[test]
    fn mailto_encodes_spaces_and_newlines() {
        let form = ContactForm {
            name: "Ada Lovelace".into(),
            email: "ada@example.org".into(),
            subject: "Hello there".into(),
            message: "Line one\nLine two".into(),
            phone: None,
        };
        let link = mailto_link("me@example.org", &form, Language::En);
        assert_eq!(
            link,
            "mailto:me@example.org?subject=Hello%20there&body=\
             Name%3A%20Ada%20Lovelace%0AEmail%3A%20ada%40example.org%0A%0ALine%20one%0ALine%20two"
        );
    }

    #[test]
    fn mailto_keeps_literal_plus() {
        let form = ContactForm {
            phone: Some("+33 6 12".into()),
            ..valid_form()
        };
        let link = mailto_link("me@example.org", &form, Language::Fr);
        assert!(link.contains("T%C3%A9l%C3%A9phone%3A%20%2B33%206%2012"));
    }

    #[test]
    fn submission_serializes_flat() {
        let submission = Submission {
            form: valid_form(),
            language: Language::Fr,
        };
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "A",
                "email": "a@b.com",
                "subject": "x",
                "message": "0123456789",
                "language": "fr"
            })
        );
    }

    #[test]
    fn response_error_is_optional() {
        let ok: SubmitResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(ok.success);
        assert_eq!(ok.error, None);
    }
}
