pub mod api;
pub mod health;
pub mod modules;
pub mod shared;

mod config;

use crate::api::ApiDoc;
use crate::config::AppConfig;
use crate::modules::admin::adapter::outgoing::SupabaseJwtVerifier;
use crate::modules::admin::application::ports::outgoing::AccessTokenVerifier;
use crate::modules::admin::application::services::AdminEditor;
use crate::modules::contact::application::ports::incoming::SubmitContactUseCase;
use crate::modules::contact::application::services::SubmitContactService;
use crate::modules::content::application::services::PortfolioContent;
use crate::modules::remote_table::adapter::outgoing::PostgrestTableClient;
use crate::modules::remote_table::application::ports::outgoing::RemoteTableClient;
use crate::shared::api::custom_json_config;

use actix_web::{web, App, HttpResponse, HttpServer};
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub content: PortfolioContent,
    pub admin: AdminEditor,
    pub submit_contact: Arc<dyn SubmitContactUseCase + Send + Sync>,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    // Try .env.{environment} first, then fall back to .env
    let env = std::env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
    let env_file = format!(".env.{}", env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    let config = AppConfig::from_env().map_err(|e| {
        error!("Invalid configuration: {:#}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let table_client: Arc<dyn RemoteTableClient> = Arc::new(
        PostgrestTableClient::new(config.postgrest())
            .map_err(|e| std::io::Error::other(e.to_string()))?,
    );
    info!("Table store client ready for {}", config.supabase_url);

    let verifier: Arc<dyn AccessTokenVerifier + Send + Sync> =
        Arc::new(SupabaseJwtVerifier::new(&config.jwt_secret));

    let state = AppState {
        content: PortfolioContent::new(Arc::clone(&table_client), config.projects_page_size),
        admin: AdminEditor::new(Arc::clone(&table_client), config.json_field_policy),
        submit_contact: Arc::new(SubmitContactService::new(Arc::clone(&table_client))),
    };

    let server_url = config.server_url();
    info!("Listening on {}", server_url);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&verifier)))
            .app_data(custom_json_config())
            .configure(init_routes)
    })
    .bind(server_url)?
    .run()
    .await
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Content
    cfg.service(crate::modules::content::adapter::incoming::web::routes::get_personal_info_handler);
    cfg.service(crate::modules::content::adapter::incoming::web::routes::get_projects_handler);
    cfg.service(crate::modules::content::adapter::incoming::web::routes::get_project_by_id_handler);
    cfg.service(crate::modules::content::adapter::incoming::web::routes::get_experiences_handler);
    cfg.service(crate::modules::content::adapter::incoming::web::routes::get_education_handler);
    cfg.service(crate::modules::content::adapter::incoming::web::routes::get_certifications_handler);
    cfg.service(crate::modules::content::adapter::incoming::web::routes::get_skills_handler);
    // Contact
    cfg.service(crate::modules::contact::adapter::incoming::web::routes::submit_contact_handler);
    // Admin
    cfg.service(crate::modules::admin::adapter::incoming::web::routes::get_contact_messages_handler);
    cfg.service(crate::modules::admin::adapter::incoming::web::routes::get_entity_form_handler);
    cfg.service(crate::modules::admin::adapter::incoming::web::routes::get_edit_form_handler);
    cfg.service(crate::modules::admin::adapter::incoming::web::routes::create_entity_handler);
    cfg.service(crate::modules::admin::adapter::incoming::web::routes::update_entity_handler);
    cfg.service(crate::modules::admin::adapter::incoming::web::routes::delete_entity_handler);
    // Docs
    cfg.route(
        "/api-docs/openapi.json",
        web::get().to(|| async { HttpResponse::Ok().json(ApiDoc::openapi()) }),
    );
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
    }
}
