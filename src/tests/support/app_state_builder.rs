use std::sync::Arc;

use actix_web::web;

use crate::modules::admin::application::domain::JsonFieldPolicy;
use crate::modules::admin::application::services::AdminEditor;
use crate::modules::contact::application::ports::incoming::SubmitContactUseCase;
use crate::modules::contact::application::services::SubmitContactService;
use crate::modules::content::application::hooks::PageSize;
use crate::modules::content::application::services::PortfolioContent;
use crate::tests::support::in_memory_table::InMemoryTableClient;
use crate::AppState;

/// Wires `AppState` over an in-memory table store. Every service shares `tables`.
pub struct TestAppStateBuilder {
    tables: InMemoryTableClient,
    page_size: PageSize,
    policy: JsonFieldPolicy,
    submit_contact: Option<Arc<dyn SubmitContactUseCase + Send + Sync>>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            tables: InMemoryTableClient::new(),
            page_size: PageSize::DEFAULT,
            policy: JsonFieldPolicy::default(),
            submit_contact: None,
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_tables(mut self, tables: InMemoryTableClient) -> Self {
        self.tables = tables;
        self
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_json_policy(mut self, policy: JsonFieldPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_submit_contact(
        mut self,
        uc: impl SubmitContactUseCase + Send + Sync + 'static,
    ) -> Self {
        self.submit_contact = Some(Arc::new(uc));
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        let client = self.tables.shared();
        let submit_contact = self
            .submit_contact
            .unwrap_or_else(|| Arc::new(SubmitContactService::new(self.tables.shared())));

        web::Data::new(AppState {
            content: PortfolioContent::new(client.clone(), self.page_size),
            admin: AdminEditor::new(client, self.policy),
            submit_contact,
        })
    }
}
