use actix_web::{get, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::IntoParams;

use crate::modules::content::application::hooks::{PageSize, ProjectListParams, TagFilter};
use crate::shared::api::ApiResponse;
use crate::AppState;

//
// ──────────────────────────────────────────────────────────
// Query DTO
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetProjectsQuery {
    /// Case-insensitive match against title or description
    #[serde(default)]
    pub search: String,

    /// Tag to require, or `all`
    #[serde(default)]
    pub tag: String,

    /// 1-based page number
    #[serde(default)]
    pub page: u32,

    pub page_size: Option<i64>,
}

impl GetProjectsQuery {
    fn params(&self) -> ProjectListParams {
        ProjectListParams {
            search_term: self.search.clone(),
            tag: TagFilter::parse(&self.tag),
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Handler
// ──────────────────────────────────────────────────────────
//

#[utoipa::path(
    get,
    path = "/api/projects",
    tag = "content",
    params(GetProjectsQuery),
    responses(
        (status = 200, description = "One page of projects with total count",
            body = inline(crate::api::schemas::SuccessResponse<crate::modules::content::application::hooks::ProjectListState>)),
        (status = 400, description = "Invalid page size", body = crate::api::schemas::ErrorResponse),
        (status = 502, description = "Table store failure", body = crate::api::schemas::ErrorResponse)
    )
)]
#[get("/api/projects")]
pub async fn get_projects_handler(
    query: web::Query<GetProjectsQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let page_size = match query.page_size.map(PageSize::new).transpose() {
        Ok(size) => size,
        Err(e) => return ApiResponse::bad_request("INVALID_PAGE_SIZE", &e.to_string()),
    };

    let browser = data
        .content
        .projects(query.params(), query.page, page_size)
        .await;
    let state = browser.state();

    if let Some(message) = state.error.as_deref() {
        error!("Failed to list projects: {}", message);
        return ApiResponse::remote_failure(message);
    }

    ApiResponse::success(state)
}
