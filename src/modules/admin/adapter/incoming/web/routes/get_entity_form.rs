use actix_web::{get, web, Responder};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use super::parse_kind;
use crate::modules::admin::adapter::incoming::web::extractors::AdminSession;
use crate::modules::admin::application::domain::{field_specs, EntityKind, FieldSpec};
use crate::modules::admin::application::services::EditorSession;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Everything needed to render one entity form.
#[derive(Debug, Serialize, ToSchema)]
pub struct EntityFormView {
    pub kind: EntityKind,
    pub fields: Vec<FieldSpec>,
    pub session: EditorSession,
}

impl EntityFormView {
    fn new(session: EditorSession) -> Self {
        Self {
            kind: session.kind(),
            fields: field_specs(session.kind()).to_vec(),
            session,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/admin/forms/{kind}",
    tag = "admin",
    params(("kind" = String, Path, description = "Entity kind, e.g. project or skill")),
    responses(
        (status = 200, description = "Blank form for a new row", body = EntityFormView),
        (status = 401, description = "Missing or invalid session"),
        (status = 404, description = "Unknown entity kind")
    ),
    security(("BearerAuth" = []))
)]
#[get("/api/admin/forms/{kind}")]
pub async fn get_entity_form_handler(
    _session: AdminSession,
    path: web::Path<String>,
) -> impl Responder {
    let kind = match parse_kind(&path) {
        Ok(kind) => kind,
        Err(resp) => return resp,
    };

    ApiResponse::success(EntityFormView::new(EditorSession::open_create(kind)))
}

#[utoipa::path(
    get,
    path = "/api/admin/forms/{kind}/{id}",
    tag = "admin",
    params(
        ("kind" = String, Path, description = "Entity kind"),
        ("id" = Uuid, Path, description = "Row to edit")
    ),
    responses(
        (status = 200, description = "Form prefilled from the stored row", body = EntityFormView),
        (status = 401, description = "Missing or invalid session"),
        (status = 404, description = "Unknown entity kind or row"),
        (status = 502, description = "Table store failure")
    ),
    security(("BearerAuth" = []))
)]
#[get("/api/admin/forms/{kind}/{id}")]
pub async fn get_edit_form_handler(
    session: AdminSession,
    path: web::Path<(String, Uuid)>,
    data: web::Data<AppState>,
) -> impl Responder {
    let (raw_kind, id) = path.into_inner();
    let kind = match parse_kind(&raw_kind) {
        Ok(kind) => kind,
        Err(resp) => return resp,
    };

    let editor = data.admin.for_session(&session.access_token);
    match editor.find_row(kind, id).await {
        Ok(Some(row)) => {
            ApiResponse::success(EntityFormView::new(EditorSession::open_edit(kind, id, &row)))
        }
        Ok(None) => ApiResponse::not_found("ENTITY_NOT_FOUND", &format!("No {kind} with id {id}")),
        Err(e) => {
            error!("Failed to load {} {}: {}", kind, id, e);
            ApiResponse::remote_failure(&e.to_string())
        }
    }
}
