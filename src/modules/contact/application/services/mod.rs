mod contact_form_controller;
mod submit_contact_service;

pub use contact_form_controller::{ContactFormController, SubmissionResult};
pub use submit_contact_service::SubmitContactService;
