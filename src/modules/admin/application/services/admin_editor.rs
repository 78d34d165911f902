use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::admin::application::domain::{
    DraftError, EntityDraft, EntityKind, JsonFieldPolicy, RawForm,
};
use crate::modules::content::application::hooks::queries::{
    CertificationsHook, EducationHook, ExperiencesHook, ListQuery, PersonalInfoHook,
    PersonalInfoQuery, ProjectsHook, SkillsHook,
};
use crate::modules::content::application::hooks::{Listing, Refresh};
use crate::modules::remote_table::application::ports::outgoing::{
    RemoteTableClient, Row, SelectQuery, TableError,
};

//
// ──────────────────────────────────────────────────────────
// Outcomes and errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "outcome", content = "id", rename_all = "snake_case")]
pub enum SaveOutcome {
    Inserted,
    Updated(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error("No personal info row exists to update")]
    MissingPersonalInfo,

    #[error("Personal info {0} is not the stored row")]
    StaleSingleton(Uuid),

    #[error("{0} entries cannot be deleted")]
    NotDeletable(EntityKind),

    #[error("The editor is not open")]
    NotOpen,

    #[error(transparent)]
    Remote(#[from] TableError),
}

/// Asked once before a row is deleted.
pub trait DeleteConfirmation: Send + Sync {
    fn confirm(&self, kind: EntityKind, id: Uuid) -> bool;
}

impl DeleteConfirmation for bool {
    fn confirm(&self, _kind: EntityKind, _id: Uuid) -> bool {
        *self
    }
}

// ============================================================================
// Service Implementation
// ============================================================================

/// Dispatches exactly one mutation per save or delete.
#[derive(Clone)]
pub struct AdminEditor {
    client: Arc<dyn RemoteTableClient>,
    policy: JsonFieldPolicy,
}

impl AdminEditor {
    pub fn new(client: Arc<dyn RemoteTableClient>, policy: JsonFieldPolicy) -> Self {
        Self { client, policy }
    }

    /// Same editor, writing as the signed-in user.
    pub fn for_session(&self, access_token: &str) -> Self {
        Self {
            client: self.client.as_user(access_token),
            policy: self.policy,
        }
    }

    pub fn client(&self) -> Arc<dyn RemoteTableClient> {
        Arc::clone(&self.client)
    }

    pub fn policy(&self) -> JsonFieldPolicy {
        self.policy
    }

    /// The stored row an edit form starts from, if it still exists.
    pub async fn find_row(&self, kind: EntityKind, id: Uuid) -> Result<Option<Row>, TableError> {
        let result = self
            .client
            .select(
                kind.table(),
                SelectQuery::all().eq("id", id.to_string()).limit(1),
            )
            .await?;
        Ok(result.rows.into_iter().next())
    }

    pub async fn submit_form(
        &self,
        kind: EntityKind,
        form: &RawForm,
        editing: Option<Uuid>,
    ) -> Result<SaveOutcome, EditorError> {
        let draft = EntityDraft::from_form(kind, form, self.policy)?;
        self.save(draft, editing).await
    }

    /// Personal info always updates the stored row; an `editing` id naming any
    /// other row is rejected. Other kinds update when `editing` is set and
    /// insert otherwise.
    pub async fn save(
        &self,
        draft: EntityDraft,
        editing: Option<Uuid>,
    ) -> Result<SaveOutcome, EditorError> {
        let kind = draft.kind();
        let table = kind.table();
        let row = draft.into_row()?;

        let target = if kind.is_singleton() {
            let stored = self.singleton_id(kind).await?;
            match editing {
                Some(id) if id != stored => return Err(EditorError::StaleSingleton(id)),
                _ => Some(stored),
            }
        } else {
            editing
        };

        match target {
            Some(id) => {
                self.client.update(table, row, id).await?;
                info!("Updated {} {}", kind, id);
                Ok(SaveOutcome::Updated(id))
            }
            None => {
                self.client.insert(table, row).await?;
                info!("Inserted new {}", kind);
                Ok(SaveOutcome::Inserted)
            }
        }
    }

    pub async fn delete(
        &self,
        kind: EntityKind,
        id: Uuid,
        confirmation: &dyn DeleteConfirmation,
        listing: &dyn Refresh,
    ) -> Result<DeleteOutcome, EditorError> {
        if kind.is_singleton() {
            return Err(EditorError::NotDeletable(kind));
        }

        if !confirmation.confirm(kind, id) {
            debug!("Delete of {} {} cancelled", kind, id);
            return Ok(DeleteOutcome::Cancelled);
        }

        self.client.delete(kind.table(), id).await?;
        info!("Deleted {} {}", kind, id);
        listing.refresh().await;
        Ok(DeleteOutcome::Deleted)
    }

    async fn singleton_id(&self, kind: EntityKind) -> Result<Uuid, EditorError> {
        let result = self
            .client
            .select(kind.table(), SelectQuery::all().columns("id").limit(1))
            .await?;

        let raw = result
            .rows
            .first()
            .and_then(|row| row.get("id"))
            .and_then(|id| id.as_str())
            .ok_or(EditorError::MissingPersonalInfo)?;

        Uuid::parse_str(raw)
            .map_err(|e| EditorError::Remote(TableError::Decode(format!("{kind} id: {e}"))))
    }
}

/// The listing a page shows for `kind`, not yet fetched.
pub fn listing_for(client: Arc<dyn RemoteTableClient>, kind: EntityKind) -> Box<dyn Listing> {
    match kind {
        EntityKind::PersonalInfo => Box::new(PersonalInfoHook::new(client, PersonalInfoQuery)),
        EntityKind::Project => Box::new(ProjectsHook::new(client, ListQuery::new())),
        EntityKind::Experience => Box::new(ExperiencesHook::new(client, ListQuery::new())),
        EntityKind::Education => Box::new(EducationHook::new(client, ListQuery::new())),
        EntityKind::Certification => {
            Box::new(CertificationsHook::new(client, ListQuery::new()))
        }
        EntityKind::Skill => Box::new(SkillsHook::new(client, ListQuery::new())),
    }
}
