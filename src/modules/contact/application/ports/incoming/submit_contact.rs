use async_trait::async_trait;

use crate::modules::contact::application::domain::{ContactForm, ContactValidationError};
use crate::modules::remote_table::application::ports::outgoing::TableError;

//
// ──────────────────────────────────────────────────────────
// Use Case Error
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitContactError {
    /// Nothing was written.
    #[error(transparent)]
    Invalid(#[from] ContactValidationError),

    #[error(transparent)]
    Remote(#[from] TableError),
}

//
// ──────────────────────────────────────────────────────────
// Incoming Port (Use Case)
// ──────────────────────────────────────────────────────────
//

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmitContactUseCase: Send + Sync {
    /// Validates, then inserts exactly one contact message.
    async fn execute(&self, form: ContactForm) -> Result<(), SubmitContactError>;
}
