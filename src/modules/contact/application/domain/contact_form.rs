use std::str::FromStr;

use email_address::EmailAddress;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::modules::remote_table::application::ports::outgoing::Row;

// ========================= Contact Form =========================

/// Raw visitor input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct ContactForm {
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[schema(example = "Project inquiry")]
    pub subject: String,
    #[schema(example = "I'd like to talk about a project.")]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactValidationError {
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("Please enter a valid email address")]
    InvalidEmail,
}

const NAME_CHARS: (usize, usize) = (2, 100);
const EMAIL_MAX_CHARS: usize = 255;
const SUBJECT_CHARS: (usize, usize) = (3, 200);
const MESSAGE_CHARS: (usize, usize) = (10, 2000);

/// A submission that passed every rule; fields are trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidContactMessage {
    name: String,
    email: String,
    subject: String,
    message: String,
}

impl ValidContactMessage {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_row(self) -> Row {
        let mut row = Row::new();
        row.insert("name".to_string(), self.name.into());
        row.insert("email".to_string(), self.email.into());
        row.insert("subject".to_string(), self.subject.into());
        row.insert("message".to_string(), self.message.into());
        row
    }
}

impl ContactForm {
    /// Rules run in field order and the first violation is returned.
    pub fn validate(&self) -> Result<ValidContactMessage, ContactValidationError> {
        let name = check_length("Name", &self.name, NAME_CHARS)?;
        let email = check_email(&self.email)?;
        let subject = check_length("Subject", &self.subject, SUBJECT_CHARS)?;
        let message = check_length("Message", &self.message, MESSAGE_CHARS)?;

        Ok(ValidContactMessage {
            name,
            email,
            subject,
            message,
        })
    }
}

// ------------------------
// Validation helpers
// ------------------------

fn check_length(
    field: &'static str,
    raw: &str,
    (min, max): (usize, usize),
) -> Result<String, ContactValidationError> {
    let value = raw.trim();
    let chars = value.chars().count();

    if chars < min {
        return Err(ContactValidationError::TooShort { field, min });
    }
    if chars > max {
        return Err(ContactValidationError::TooLong { field, max });
    }

    Ok(value.to_string())
}

fn check_email(raw: &str) -> Result<String, ContactValidationError> {
    let value = raw.trim();

    let address =
        EmailAddress::from_str(value).map_err(|_| ContactValidationError::InvalidEmail)?;
    if !address.domain().contains('.') {
        return Err(ContactValidationError::InvalidEmail);
    }

    if value.chars().count() > EMAIL_MAX_CHARS {
        return Err(ContactValidationError::TooLong {
            field: "Email",
            max: EMAIL_MAX_CHARS,
        });
    }

    Ok(value.to_string())
}
