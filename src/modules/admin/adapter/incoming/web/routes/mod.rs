mod delete_entity;
mod get_contact_messages;
mod get_entity_form;
mod save_entity;

use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;
use tracing::{error, warn};

use crate::modules::admin::application::domain::EntityKind;
use crate::modules::admin::application::services::{EditorError, EditorSession};
use crate::shared::api::ApiResponse;

pub use delete_entity::{__path_delete_entity_handler, delete_entity_handler, DeleteEntityQuery};
pub use get_contact_messages::{__path_get_contact_messages_handler, get_contact_messages_handler};
pub use get_entity_form::{
    __path_get_edit_form_handler, __path_get_entity_form_handler, get_edit_form_handler,
    get_entity_form_handler, EntityFormView,
};
pub use save_entity::{
    __path_create_entity_handler, __path_update_entity_handler, create_entity_handler,
    update_entity_handler,
};

/// A mutation's result together with the listing it refreshed.
#[derive(Debug, Serialize)]
pub struct MutationResponse<O> {
    pub outcome: O,
    pub listing: serde_json::Value,
}

pub(crate) fn parse_kind(raw: &str) -> Result<EntityKind, HttpResponse> {
    raw.parse::<EntityKind>()
        .map_err(|e| ApiResponse::not_found("UNKNOWN_ENTITY_KIND", &e.to_string()))
}

/// Maps a failed save to a response that hands the typed values back.
pub(crate) fn save_failure(err: EditorError, session: &EditorSession) -> HttpResponse {
    let message = err.to_string();
    match err {
        EditorError::Draft(_) => {
            warn!("Rejected {} form: {}", session.kind(), message);
            ApiResponse::error_with_data(StatusCode::BAD_REQUEST, "INVALID_FORM", &message, session)
        }
        EditorError::MissingPersonalInfo => ApiResponse::error_with_data(
            StatusCode::NOT_FOUND,
            "PERSONAL_INFO_NOT_FOUND",
            &message,
            session,
        ),
        EditorError::StaleSingleton(_) => ApiResponse::error_with_data(
            StatusCode::CONFLICT,
            "STALE_PERSONAL_INFO",
            &message,
            session,
        ),
        EditorError::Remote(_) => {
            error!("Failed to save {}: {}", session.kind(), message);
            ApiResponse::error_with_data(
                StatusCode::BAD_GATEWAY,
                "REMOTE_TABLE_ERROR",
                &message,
                session,
            )
        }
        EditorError::NotDeletable(_) | EditorError::NotOpen => {
            error!("Unexpected editor state while saving: {}", message);
            ApiResponse::internal_error()
        }
    }
}
