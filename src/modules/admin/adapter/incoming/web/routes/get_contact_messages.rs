use actix_web::{get, web, Responder};

use crate::modules::admin::adapter::incoming::web::extractors::AdminSession;
use crate::modules::content::adapter::incoming::web::routes::respond_with_state;
use crate::modules::content::application::services::PortfolioContent;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/admin/messages",
    tag = "admin",
    responses(
        (status = 200, description = "Contact messages, newest first"),
        (status = 401, description = "Missing or invalid session"),
        (status = 502, description = "Table store failure")
    ),
    security(("BearerAuth" = []))
)]
#[get("/api/admin/messages")]
pub async fn get_contact_messages_handler(
    session: AdminSession,
    data: web::Data<AppState>,
) -> impl Responder {
    let client = data.content.client().as_user(&session.access_token);
    let hook = PortfolioContent::contact_messages(client).await;

    respond_with_state("contact messages", hook.state())
}
