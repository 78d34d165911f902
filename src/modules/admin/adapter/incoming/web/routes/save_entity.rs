use actix_web::{http::StatusCode, post, put, web, HttpResponse, Responder};
use tracing::warn;
use uuid::Uuid;

use super::{parse_kind, save_failure, MutationResponse};
use crate::modules::admin::adapter::incoming::web::extractors::AdminSession;
use crate::modules::admin::application::domain::{EntityKind, RawForm};
use crate::modules::admin::application::services::{listing_for, EditorSession};
use crate::shared::api::ApiResponse;
use crate::AppState;

async fn save(
    data: &AppState,
    session: &AdminSession,
    kind: EntityKind,
    editing: Option<Uuid>,
    values: RawForm,
    status: StatusCode,
) -> HttpResponse {
    let mut form = match EditorSession::with_values(kind, editing, values) {
        Ok(form) => form,
        Err(e) => {
            warn!("Rejected {} form: {}", kind, e);
            return ApiResponse::bad_request("INVALID_FORM", &e.to_string());
        }
    };

    let editor = data.admin.for_session(&session.access_token);
    let listing = listing_for(editor.client(), kind);

    match form.submit(&editor, listing.as_ref()).await {
        Ok(outcome) => {
            let body = MutationResponse {
                outcome,
                listing: listing.snapshot(),
            };
            if status == StatusCode::CREATED {
                ApiResponse::created(body)
            } else {
                ApiResponse::success(body)
            }
        }
        Err(e) => save_failure(e, &form),
    }
}

#[utoipa::path(
    post,
    path = "/api/admin/{kind}",
    tag = "admin",
    params(("kind" = String, Path, description = "Entity kind")),
    request_body = inline(std::collections::BTreeMap<String, String>),
    responses(
        (status = 201, description = "Row saved; personal info updates its single row"),
        (status = 400, description = "Form values rejected, values echoed back"),
        (status = 401, description = "Missing or invalid session"),
        (status = 404, description = "Unknown entity kind"),
        (status = 502, description = "Table store rejected the write")
    ),
    security(("BearerAuth" = []))
)]
#[post("/api/admin/{kind}")]
pub async fn create_entity_handler(
    session: AdminSession,
    path: web::Path<String>,
    body: web::Json<RawForm>,
    data: web::Data<AppState>,
) -> impl Responder {
    let kind = match parse_kind(&path) {
        Ok(kind) => kind,
        Err(resp) => return resp,
    };

    save(&data, &session, kind, None, body.into_inner(), StatusCode::CREATED).await
}

#[utoipa::path(
    put,
    path = "/api/admin/{kind}/{id}",
    tag = "admin",
    params(
        ("kind" = String, Path, description = "Entity kind"),
        ("id" = Uuid, Path, description = "Row to update")
    ),
    request_body = inline(std::collections::BTreeMap<String, String>),
    responses(
        (status = 200, description = "Row updated"),
        (status = 400, description = "Form values rejected, values echoed back"),
        (status = 401, description = "Missing or invalid session"),
        (status = 404, description = "Unknown entity kind"),
        (status = 409, description = "Personal info id is not the stored row"),
        (status = 502, description = "Table store rejected the write")
    ),
    security(("BearerAuth" = []))
)]
#[put("/api/admin/{kind}/{id}")]
pub async fn update_entity_handler(
    session: AdminSession,
    path: web::Path<(String, Uuid)>,
    body: web::Json<RawForm>,
    data: web::Data<AppState>,
) -> impl Responder {
    let (raw_kind, id) = path.into_inner();
    let kind = match parse_kind(&raw_kind) {
        Ok(kind) => kind,
        Err(resp) => return resp,
    };

    save(&data, &session, kind, Some(id), body.into_inner(), StatusCode::OK).await
}
