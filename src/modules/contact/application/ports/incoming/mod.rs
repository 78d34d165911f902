mod submit_contact;

pub use submit_contact::{SubmitContactError, SubmitContactUseCase};

#[cfg(test)]
pub use submit_contact::MockSubmitContactUseCase;
