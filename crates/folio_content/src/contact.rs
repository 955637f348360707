//! Contact form submission
//!
//! Messages go to the EmailJS relay. The relay is behind the [`MailRelay`]
//! trait; [`HttpMailRelay`] is the real HTTPS client. [`ContactController`]
//! owns the form and reports every outcome as a toast:
//!
//! - invalid input and missing credentials are caught before any request
//! - a loading toast is shown while sending and replaced by the result
//! - on failure the form keeps its contents so the user can retry

use crate::error::{ContentError, Result};
use crate::registry::PERSONAL_INFO;
use crate::toast::{ToastId, ToastQueue};
use serde::{Deserialize, Serialize};

/// EmailJS REST endpoint
pub const EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

pub const SENDING_MESSAGE: &str = "Sending your message...";
pub const SENT_MESSAGE: &str = "Message sent successfully!";
pub const FAILED_MESSAGE: &str = "Failed to send message. Try again later.";

/// Form fields as typed by the visitor
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    /// Optional
    #[serde(default)]
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ContentError::InvalidField {
                field: "name",
                reason: "required",
            });
        }
        if !is_valid_email(&self.email) {
            return Err(ContentError::InvalidField {
                field: "email",
                reason: "not an email address",
            });
        }
        if self.message.trim().is_empty() {
            return Err(ContentError::InvalidField {
                field: "message",
                reason: "required",
            });
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Loose shape check: `local@domain.tld`, no whitespace
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

/// EmailJS account identifiers
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RelayCredentials {
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub template_id: String,
    #[serde(default)]
    pub public_key: String,
}

impl RelayCredentials {
    /// Fails on the first blank identifier
    pub fn check(&self) -> Result<()> {
        for (name, value) in [
            ("service_id", &self.service_id),
            ("template_id", &self.template_id),
            ("public_key", &self.public_key),
        ] {
            if value.trim().is_empty() {
                return Err(ContentError::MissingCredential(name));
            }
        }
        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        self.check().is_ok()
    }
}

#[derive(Serialize)]
struct TemplateParams<'a> {
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
}

#[derive(Serialize)]
struct RelayPayload<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

/// JSON body of an EmailJS send request
pub fn relay_payload(credentials: &RelayCredentials, form: &ContactForm) -> Result<Vec<u8>> {
    let payload = RelayPayload {
        service_id: &credentials.service_id,
        template_id: &credentials.template_id,
        user_id: &credentials.public_key,
        template_params: TemplateParams {
            name: &form.name,
            email: &form.email,
            subject: &form.subject,
            message: &form.message,
        },
    };
    Ok(serde_json::to_vec(&payload)?)
}

/// Delivers a contact message
pub trait MailRelay {
    fn send(&self, credentials: &RelayCredentials, form: &ContactForm) -> Result<()>;
}

/// EmailJS over HTTPS
#[cfg(feature = "http")]
pub struct HttpMailRelay {
    client: reqwest::blocking::Client,
    endpoint: String,
}

#[cfg(feature = "http")]
impl HttpMailRelay {
    pub fn new() -> Result<Self> {
        Self::with_endpoint(EMAILJS_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .map_err(|err| ContentError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[cfg(feature = "http")]
impl MailRelay for HttpMailRelay {
    fn send(&self, credentials: &RelayCredentials, form: &ContactForm) -> Result<()> {
        let body = relay_payload(credentials, form)?;
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(|err| ContentError::Transport(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(ContentError::Rejected {
            status: status.as_u16(),
            body: response.text().unwrap_or_default(),
        })
    }
}

/// What a submit attempt did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    /// Relay error; form kept for retry
    Failed,
    /// Rejected before sending
    Invalid,
    /// No credentials; visitor pointed at the email address instead
    NotConfigured,
}

/// Form state, relay and toasts for the contact section
pub struct ContactController<R> {
    relay: R,
    credentials: RelayCredentials,
    form: ContactForm,
    toasts: ToastQueue,
}

impl<R: MailRelay> ContactController<R> {
    pub fn new(relay: R, credentials: RelayCredentials) -> Self {
        Self {
            relay,
            credentials,
            form: ContactForm::default(),
            toasts: ToastQueue::new(),
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut ToastQueue {
        &mut self.toasts
    }

    pub fn relay(&self) -> &R {
        &self.relay
    }

    /// Validate, then send through the relay
    pub fn submit(&mut self) -> SubmitOutcome {
        if let Err(err) = self.form.validate() {
            tracing::debug!("ContactController: {}", err);
            self.toasts.error(err.to_string(), None);
            return SubmitOutcome::Invalid;
        }

        if let Err(err) = self.credentials.check() {
            tracing::warn!("ContactController: {}", err);
            self.toasts.error(
                format!(
                    "The contact form is unavailable right now. Please email {} directly.",
                    PERSONAL_INFO.email
                ),
                None,
            );
            return SubmitOutcome::NotConfigured;
        }

        let loading: ToastId = self.toasts.loading(SENDING_MESSAGE);
        match self.relay.send(&self.credentials, &self.form) {
            Ok(()) => {
                self.toasts.success(SENT_MESSAGE, Some(loading));
                self.form.clear();
                SubmitOutcome::Sent
            }
            Err(err) => {
                tracing::warn!("ContactController: send failed: {}", err);
                self.toasts.error(FAILED_MESSAGE, Some(loading));
                SubmitOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::ToastKind;
    use std::cell::{Cell, RefCell};

    /// Records requests; fails when told to
    #[derive(Default)]
    struct RecordingRelay {
        requests: Cell<usize>,
        last_body: RefCell<Vec<u8>>,
        fail: bool,
    }

    impl MailRelay for RecordingRelay {
        fn send(&self, credentials: &RelayCredentials, form: &ContactForm) -> Result<()> {
            self.requests.set(self.requests.get() + 1);
            *self.last_body.borrow_mut() = relay_payload(credentials, form)?;
            if self.fail {
                return Err(ContentError::Rejected {
                    status: 400,
                    body: "The user_id parameter is required".into(),
                });
            }
            Ok(())
        }
    }

    fn credentials() -> RelayCredentials {
        RelayCredentials {
            service_id: "service_x".into(),
            template_id: "template_y".into(),
            public_key: "key_z".into(),
        }
    }

    fn filled() -> ContactForm {
        ContactForm::new("Ada", "ada@example.com", "", "Hello there")
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email(" a.b@mail.example.org "));
        assert!(!is_valid_email("ada"));
        assert!(!is_valid_email("ada@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada@exa mple.com"));
        assert!(!is_valid_email("a@b@c.com"));
    }

    #[test]
    fn test_send_success_clears_form() {
        let mut contact = ContactController::new(RecordingRelay::default(), credentials());
        *contact.form_mut() = filled();

        assert_eq!(contact.submit(), SubmitOutcome::Sent);
        assert_eq!(contact.relay().requests.get(), 1);
        assert!(contact.form().is_empty());

        let toasts: Vec<_> = contact.toasts().iter().collect();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Success);

        let body: serde_json::Value =
            serde_json::from_slice(&contact.relay().last_body.borrow()).unwrap();
        assert_eq!(body["user_id"], "key_z");
        assert_eq!(body["template_params"]["email"], "ada@example.com");
    }

    #[test]
    fn test_failure_keeps_form() {
        let relay = RecordingRelay {
            fail: true,
            ..RecordingRelay::default()
        };
        let mut contact = ContactController::new(relay, credentials());
        *contact.form_mut() = filled();

        assert_eq!(contact.submit(), SubmitOutcome::Failed);
        assert_eq!(contact.form(), &filled());
        let toast = contact.toasts().iter().next().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, FAILED_MESSAGE);
    }

    #[test]
    fn test_missing_credentials_make_no_request() {
        let mut contact = ContactController::new(RecordingRelay::default(), RelayCredentials::default());
        *contact.form_mut() = filled();

        assert_eq!(contact.submit(), SubmitOutcome::NotConfigured);
        assert_eq!(contact.relay().requests.get(), 0);
        let toast = contact.toasts().iter().next().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert!(toast.message.contains(PERSONAL_INFO.email));
        assert_eq!(contact.form(), &filled());
    }

    #[test]
    fn test_invalid_input_makes_no_request() {
        let mut contact = ContactController::new(RecordingRelay::default(), credentials());
        *contact.form_mut() = ContactForm::new("Ada", "not-an-email", "", "Hi");

        assert_eq!(contact.submit(), SubmitOutcome::Invalid);
        assert_eq!(contact.relay().requests.get(), 0);
        assert!(contact.toasts().iter().next().unwrap().message.contains("email"));
    }

    #[test]
    fn test_credential_check_names_field() {
        let creds = RelayCredentials {
            template_id: "   ".into(),
            ..credentials()
        };
        assert!(matches!(
            creds.check(),
            Err(ContentError::MissingCredential("template_id"))
        ));
    }
}
