use actix_web::{delete, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::IntoParams;
use uuid::Uuid;

use super::{parse_kind, MutationResponse};
use crate::modules::admin::adapter::incoming::web::extractors::AdminSession;
use crate::modules::admin::application::services::{listing_for, DeleteOutcome, EditorError};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct DeleteEntityQuery {
    /// Must be `true`; anything else cancels the delete
    #[serde(default)]
    pub confirm: bool,
}

#[utoipa::path(
    delete,
    path = "/api/admin/{kind}/{id}",
    tag = "admin",
    params(
        ("kind" = String, Path, description = "Entity kind"),
        ("id" = Uuid, Path, description = "Row to delete"),
        DeleteEntityQuery
    ),
    responses(
        (status = 200, description = "Row deleted, refreshed listing returned"),
        (status = 400, description = "Not confirmed, or kind cannot be deleted"),
        (status = 401, description = "Missing or invalid session"),
        (status = 404, description = "Unknown entity kind"),
        (status = 502, description = "Table store rejected the delete")
    ),
    security(("BearerAuth" = []))
)]
#[delete("/api/admin/{kind}/{id}")]
pub async fn delete_entity_handler(
    session: AdminSession,
    path: web::Path<(String, Uuid)>,
    query: web::Query<DeleteEntityQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let (raw_kind, id) = path.into_inner();
    let kind = match parse_kind(&raw_kind) {
        Ok(kind) => kind,
        Err(resp) => return resp,
    };

    let editor = data.admin.for_session(&session.access_token);
    let listing = listing_for(editor.client(), kind);

    match editor.delete(kind, id, &query.confirm, listing.as_ref()).await {
        Ok(DeleteOutcome::Deleted) => ApiResponse::success(MutationResponse {
            outcome: DeleteOutcome::Deleted,
            listing: listing.snapshot(),
        }),
        Ok(DeleteOutcome::Cancelled) => ApiResponse::bad_request(
            "CONFIRMATION_REQUIRED",
            "Pass confirm=true to delete this row",
        ),
        Err(EditorError::NotDeletable(kind)) => ApiResponse::bad_request(
            "NOT_DELETABLE",
            &EditorError::NotDeletable(kind).to_string(),
        ),
        Err(e) => {
            error!("Failed to delete {} {}: {}", kind, id, e);
            ApiResponse::remote_failure(&e.to_string())
        }
    }
}
