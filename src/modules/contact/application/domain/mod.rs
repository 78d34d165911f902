pub mod contact_form;
pub mod submitted_flag;

pub use contact_form::{ContactForm, ContactValidationError, ValidContactMessage};
pub use submitted_flag::{SubmittedFlag, SUBMITTED_NOTICE};
