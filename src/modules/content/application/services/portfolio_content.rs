use std::sync::Arc;

use uuid::Uuid;

use crate::modules::content::application::hooks::queries::{
    CertificationsHook, ContactMessagesHook, EducationHook, ExperiencesHook, ListQuery,
    PersonalInfoHook, PersonalInfoQuery, ProjectByIdQuery, ProjectHook, SkillsHook,
};
use crate::modules::content::application::hooks::{PageSize, ProjectListParams, ProjectsBrowser};
use crate::modules::remote_table::application::ports::outgoing::RemoteTableClient;

// ============================================================================
// Service Implementation
// ============================================================================

/// Mounts a fresh hook per call. Hooks share the client but never their state.
#[derive(Clone)]
pub struct PortfolioContent {
    client: Arc<dyn RemoteTableClient>,
    default_page_size: PageSize,
}

impl PortfolioContent {
    pub fn new(client: Arc<dyn RemoteTableClient>, default_page_size: PageSize) -> Self {
        Self {
            client,
            default_page_size,
        }
    }

    pub fn client(&self) -> Arc<dyn RemoteTableClient> {
        Arc::clone(&self.client)
    }

    pub fn default_page_size(&self) -> PageSize {
        self.default_page_size
    }

    pub async fn personal_info(&self) -> PersonalInfoHook {
        PersonalInfoHook::mount(self.client(), PersonalInfoQuery).await
    }

    pub async fn experiences(&self) -> ExperiencesHook {
        ExperiencesHook::mount(self.client(), ListQuery::new()).await
    }

    pub async fn education(&self) -> EducationHook {
        EducationHook::mount(self.client(), ListQuery::new()).await
    }

    pub async fn certifications(&self) -> CertificationsHook {
        CertificationsHook::mount(self.client(), ListQuery::new()).await
    }

    pub async fn skills(&self) -> SkillsHook {
        SkillsHook::mount(self.client(), ListQuery::new()).await
    }

    pub async fn project(&self, id: Uuid) -> ProjectHook {
        ProjectHook::mount(self.client(), ProjectByIdQuery { id }).await
    }

    /// Contact messages are only readable with an admin session's client.
    pub async fn contact_messages(client: Arc<dyn RemoteTableClient>) -> ContactMessagesHook {
        ContactMessagesHook::mount(client, ListQuery::new()).await
    }

    pub async fn projects(
        &self,
        params: ProjectListParams,
        page: u32,
        page_size: Option<PageSize>,
    ) -> ProjectsBrowser {
        let page_size = page_size.unwrap_or(self.default_page_size);
        ProjectsBrowser::open_at(self.client(), page_size, params, page).await
    }
}
