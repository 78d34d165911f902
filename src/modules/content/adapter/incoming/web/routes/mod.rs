mod get_personal_info;
mod get_project_by_id;
mod get_projects;
mod get_resume_sections;

use actix_web::HttpResponse;
use serde::Serialize;
use tracing::error;

use crate::modules::content::application::hooks::ResourceState;
use crate::shared::api::ApiResponse;

pub use get_personal_info::{__path_get_personal_info_handler, get_personal_info_handler};
pub use get_project_by_id::{__path_get_project_by_id_handler, get_project_by_id_handler};
pub use get_projects::{__path_get_projects_handler, get_projects_handler, GetProjectsQuery};
pub use get_resume_sections::{
    __path_get_certifications_handler, __path_get_education_handler,
    __path_get_experiences_handler, __path_get_skills_handler, get_certifications_handler,
    get_education_handler, get_experiences_handler, get_skills_handler,
};

/// Settled hook state as a response: 200 with the state, or 502 when the fetch failed.
pub(crate) fn respond_with_state<T: Serialize>(what: &str, state: ResourceState<T>) -> HttpResponse {
    if let Some(message) = state.error.as_deref() {
        error!("Failed to load {}: {}", what, message);
        return ApiResponse::remote_failure(message);
    }

    ApiResponse::success(state)
}
