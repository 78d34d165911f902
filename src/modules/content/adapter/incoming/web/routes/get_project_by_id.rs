use actix_web::{get, web, Responder};
use tracing::error;
use uuid::Uuid;

use crate::shared::api::ApiResponse;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    tag = "content",
    params(("id" = Uuid, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project detail", body = crate::modules::content::application::domain::entities::Project),
        (status = 404, description = "No project with that id"),
        (status = 502, description = "Table store failure")
    )
)]
#[get("/api/projects/{id}")]
pub async fn get_project_by_id_handler(
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = path.into_inner();
    let state = data.content.project(id).await.state();

    match (state.data, state.error) {
        (_, Some(message)) => {
            error!("Failed to load project {}: {}", id, message);
            ApiResponse::remote_failure(&message)
        }
        (Some(project), None) => ApiResponse::success(project),
        (None, None) => ApiResponse::not_found("PROJECT_NOT_FOUND", "Project not found"),
    }
}
