//! Contact form validation and the in-memory inbox.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{ContactMessage, ContactReceipt};
use crate::utils::{id::generate_id, time::now};

pub const THANK_YOU: &str = "Thank you for your message. I will get back to you soon.";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.-]+@[\w.-]+\.\w+$").expect("valid email regex"));

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("{field} must be between {min} and {max} characters")]
    Length {
        field: &'static str,
        min: usize,
        max: usize,
    },

    #[error("email address is not valid")]
    Email,
}

fn check_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ContactError> {
    let len = value.chars().count();
    if (min..=max).contains(&len) {
        Ok(())
    } else {
        Err(ContactError::Length { field, min, max })
    }
}

pub fn validate(message: &ContactMessage) -> Result<(), ContactError> {
    check_length("name", &message.name, 2, 100)?;
    if !EMAIL_RE.is_match(&message.email) {
        return Err(ContactError::Email);
    }
    check_length("subject", &message.subject, 5, 200)?;
    check_length("message", &message.message, 10, 5000)?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMessage {
    pub id: String,
    /// Unix millis
    pub submitted_at: u64,
    #[serde(flatten)]
    pub message: ContactMessage,
}

/// Messages received since startup. Not persisted.
#[derive(Debug, Default)]
pub struct ContactInbox {
    messages: Vec<StoredMessage>,
}

impl ContactInbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit(&mut self, message: ContactMessage) -> Result<ContactReceipt, ContactError> {
        validate(&message)?;
        log::info!(
            "Contact form submission from {} ({})",
            message.name,
            message.email
        );

        self.messages.push(StoredMessage {
            id: generate_id(),
            submitted_at: now(),
            message,
        });

        Ok(ContactReceipt {
            success: true,
            message: THANK_YOU.to_string(),
        })
    }

    pub fn messages(&self) -> &[StoredMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> ContactMessage {
        ContactMessage {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: "Hello there".into(),
            message: "I enjoyed the notes on Sapiens.".into(),
        }
    }

    #[test]
    fn test_valid_message_is_stored() {
        let mut inbox = ContactInbox::new();
        let receipt = inbox.submit(message()).unwrap();

        assert!(receipt.success);
        assert_eq!(receipt.message, THANK_YOU);
        assert_eq!(inbox.len(), 1);
        assert!(!inbox.messages()[0].id.is_empty());
        assert!(inbox.messages()[0].submitted_at > 0);
    }

    #[test]
    fn test_validation_failures() {
        let mut short_name = message();
        short_name.name = "A".into();
        assert_eq!(
            validate(&short_name),
            Err(ContactError::Length {
                field: "name",
                min: 2,
                max: 100
            })
        );

        let mut bad_email = message();
        bad_email.email = "not-an-email".into();
        assert_eq!(validate(&bad_email), Err(ContactError::Email));

        let mut short_body = message();
        short_body.message = "hi".into();
        assert!(matches!(
            validate(&short_body),
            Err(ContactError::Length {
                field: "message",
                ..
            })
        ));
    }

    #[test]
    fn test_rejected_message_is_not_stored() {
        let mut inbox = ContactInbox::new();
        let mut bad = message();
        bad.subject = "Hi".into();
        assert!(inbox.submit(bad).is_err());
        assert!(inbox.is_empty());
    }

    #[test]
    fn test_stored_message_serializes_flat() {
        let mut inbox = ContactInbox::new();
        inbox.submit(message()).unwrap();
        let json = serde_json::to_value(&inbox.messages()[0]).unwrap();
        assert_eq!(json["name"], "Ada");
        assert!(json["id"].is_string());
    }
}
