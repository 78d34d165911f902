use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::admin_editor::{AdminEditor, EditorError, SaveOutcome};
use crate::modules::admin::application::domain::{
    field_specs, prefill_form, DraftError, EntityDraft, EntityKind, RawForm,
};
use crate::modules::content::application::hooks::Refresh;
use crate::modules::remote_table::application::ports::outgoing::Row;

/// One open form in the admin panel. Owned by whoever renders it and passed
/// down explicitly; there is no ambient editing state.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EditorSession {
    kind: EntityKind,
    editing: Option<Uuid>,
    #[schema(value_type = Object)]
    values: RawForm,
    open: bool,
    error: Option<String>,
}

impl EditorSession {
    /// Blank form for a new row.
    pub fn open_create(kind: EntityKind) -> Self {
        let values = field_specs(kind)
            .iter()
            .map(|spec| (spec.name.to_string(), String::new()))
            .collect();

        Self {
            kind,
            editing: None,
            values,
            open: true,
            error: None,
        }
    }

    /// Form prefilled from the stored row it will update.
    pub fn open_edit(kind: EntityKind, id: Uuid, row: &Row) -> Self {
        Self {
            kind,
            editing: Some(id),
            values: prefill_form(kind, row),
            open: true,
            error: None,
        }
    }

    /// Open form carrying values that arrived in one piece, e.g. a request body.
    pub fn with_values(
        kind: EntityKind,
        editing: Option<Uuid>,
        values: RawForm,
    ) -> Result<Self, DraftError> {
        let mut session = Self::open_create(kind);
        session.editing = editing;
        for (name, value) in values {
            session.set_field(&name, value)?;
        }
        Ok(session)
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn editing(&self) -> Option<Uuid> {
        self.editing
    }

    pub fn values(&self) -> &RawForm {
        &self.values
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), DraftError> {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(DraftError::UnknownField(name.to_string())),
        }
    }

    /// Discards the form without writing anything.
    pub fn close(&mut self) {
        self.open = false;
        self.error = None;
    }

    /// On success the form closes and `listing` is refreshed. On failure the
    /// form stays open with the typed values and the error message.
    pub async fn submit(
        &mut self,
        editor: &AdminEditor,
        listing: &dyn Refresh,
    ) -> Result<SaveOutcome, EditorError> {
        if !self.open {
            return Err(EditorError::NotOpen);
        }

        let result = match EntityDraft::from_form(self.kind, &self.values, editor.policy()) {
            Ok(draft) => editor.save(draft, self.editing).await,
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(outcome) => {
                self.open = false;
                self.error = None;
                listing.refresh().await;
                Ok(outcome)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}
