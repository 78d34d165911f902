use actix_web::{get, web, Responder};

use super::respond_with_state;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/experiences",
    tag = "content",
    responses(
        (status = 200, description = "Experiences by order_index ascending"),
        (status = 502, description = "Table store failure", body = crate::api::schemas::ErrorResponse)
    )
)]
#[get("/api/experiences")]
pub async fn get_experiences_handler(data: web::Data<AppState>) -> impl Responder {
    let hook = data.content.experiences().await;
    respond_with_state("experiences", hook.state())
}

#[utoipa::path(
    get,
    path = "/api/education",
    tag = "content",
    responses(
        (status = 200, description = "Education entries by period descending"),
        (status = 502, description = "Table store failure", body = crate::api::schemas::ErrorResponse)
    )
)]
#[get("/api/education")]
pub async fn get_education_handler(data: web::Data<AppState>) -> impl Responder {
    let hook = data.content.education().await;
    respond_with_state("education", hook.state())
}

#[utoipa::path(
    get,
    path = "/api/certifications",
    tag = "content",
    responses(
        (status = 200, description = "Certifications by date descending"),
        (status = 502, description = "Table store failure", body = crate::api::schemas::ErrorResponse)
    )
)]
#[get("/api/certifications")]
pub async fn get_certifications_handler(data: web::Data<AppState>) -> impl Responder {
    let hook = data.content.certifications().await;
    respond_with_state("certifications", hook.state())
}

#[utoipa::path(
    get,
    path = "/api/skills",
    tag = "content",
    responses(
        (status = 200, description = "Skills by category ascending"),
        (status = 502, description = "Table store failure", body = crate::api::schemas::ErrorResponse)
    )
)]
#[get("/api/skills")]
pub async fn get_skills_handler(data: web::Data<AppState>) -> impl Responder {
    let hook = data.content.skills().await;
    respond_with_state("skills", hook.state())
}
