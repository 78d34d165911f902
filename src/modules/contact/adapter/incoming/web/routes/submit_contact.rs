use actix_web::{post, web, Responder};
use serde_json::json;
use tracing::error;

use crate::modules::contact::application::domain::ContactForm;
use crate::modules::contact::application::ports::incoming::SubmitContactError;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "contact",
    request_body = ContactForm,
    responses(
        (status = 201, description = "Message stored"),
        (status = 400, description = "First failing rule", body = crate::api::schemas::ErrorResponse),
        (status = 502, description = "Table store failure", body = crate::api::schemas::ErrorResponse)
    )
)]
#[post("/api/contact")]
pub async fn submit_contact_handler(
    body: web::Json<ContactForm>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.submit_contact.execute(body.into_inner()).await {
        Ok(()) => ApiResponse::created(json!({ "submitted": true })),
        Err(SubmitContactError::Invalid(e)) => {
            ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string())
        }
        Err(SubmitContactError::Remote(e)) => {
            error!("Failed to store contact message: {}", e);
            ApiResponse::remote_failure(&e.to_string())
        }
    }
}
