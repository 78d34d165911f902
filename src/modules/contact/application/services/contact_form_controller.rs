use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::modules::contact::application::domain::{ContactForm, SubmittedFlag};
use crate::modules::contact::application::ports::incoming::SubmitContactUseCase;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SubmissionResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Submission state for one contact form: in flight, and recently sent.
pub struct ContactFormController {
    use_case: Arc<dyn SubmitContactUseCase + Send + Sync>,
    submitting: AtomicBool,
    submitted: SubmittedFlag,
}

/// Lowers `submitting` however the submission ends.
struct SubmittingGuard<'a>(&'a AtomicBool);

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl ContactFormController {
    pub fn new(use_case: Arc<dyn SubmitContactUseCase + Send + Sync>) -> Self {
        Self::with_flag(use_case, SubmittedFlag::new())
    }

    pub fn with_flag(
        use_case: Arc<dyn SubmitContactUseCase + Send + Sync>,
        submitted: SubmittedFlag,
    ) -> Self {
        Self {
            use_case,
            submitting: AtomicBool::new(false),
            submitted,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted.is_raised()
    }

    /// Leaves the form's own fields alone; clearing them is up to the caller.
    pub async fn submit(&self, form: ContactForm) -> SubmissionResult {
        self.submitting.store(true, Ordering::SeqCst);
        let _guard = SubmittingGuard(&self.submitting);

        match self.use_case.execute(form).await {
            Ok(()) => {
                let _ = self.submitted.raise();
                SubmissionResult {
                    success: true,
                    error: None,
                }
            }
            Err(e) => SubmissionResult {
                success: false,
                error: Some(e.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::modules::contact::application::domain::ContactValidationError;
    use crate::modules::contact::application::ports::incoming::{
        MockSubmitContactUseCase, SubmitContactError,
    };

    fn form() -> ContactForm {
        ContactForm {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            subject: "Project inquiry".to_string(),
            message: "Let's build something.".to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_raises_submitted_until_timeout() {
        let mut use_case = MockSubmitContactUseCase::new();
        use_case.expect_execute().times(1).returning(|_| Ok(()));
        let controller = ContactFormController::new(Arc::new(use_case));

        let result = controller.submit(form()).await;

        assert_eq!(
            result,
            SubmissionResult {
                success: true,
                error: None
            }
        );
        assert!(controller.is_submitted());
        assert!(!controller.is_submitting());

        tokio::time::sleep(Duration::from_secs(5) + Duration::from_millis(10)).await;
        assert!(!controller.is_submitted());
    }

    #[tokio::test]
    async fn test_failure_returns_rule_message() {
        let mut use_case = MockSubmitContactUseCase::new();
        use_case.expect_execute().returning(|_| {
            Err(SubmitContactError::Invalid(
                ContactValidationError::InvalidEmail,
            ))
        });
        let controller = ContactFormController::new(Arc::new(use_case));

        let result = controller.submit(form()).await;

        assert!(!result.success);
        assert_eq!(
            result.error.as_deref(),
            Some("Please enter a valid email address")
        );
        assert!(!controller.is_submitted());
        assert!(!controller.is_submitting());
    }
}
