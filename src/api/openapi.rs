use crate::api::schemas::{ErrorDetail, ErrorResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::modules::admin::adapter::incoming::web::routes::EntityFormView;
use crate::modules::admin::application::domain::{EntityKind, FieldSpec, FieldType};
use crate::modules::admin::application::services::{DeleteOutcome, EditorSession, SaveOutcome};
use crate::modules::contact::application::domain::ContactForm;
use crate::modules::content::application::domain::entities::{
    Certification, ContactMessage, Education, Experience, PersonalInfo, Project, Service, Skill,
    Stat,
};
use crate::modules::content::application::hooks::ProjectListState;
use crate::modules::remote_table::application::ports::outgoing::RowRange;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Portfolio Content API",
        version = "1.0.0",
        description = "Public portfolio content, contact submissions and the admin editor",
        contact(
            name = "API Support",
            email = "support@example.com"
        )
    ),
    paths(
        // Content endpoints
        crate::modules::content::adapter::incoming::web::routes::get_personal_info_handler,
        crate::modules::content::adapter::incoming::web::routes::get_projects_handler,
        crate::modules::content::adapter::incoming::web::routes::get_project_by_id_handler,
        crate::modules::content::adapter::incoming::web::routes::get_experiences_handler,
        crate::modules::content::adapter::incoming::web::routes::get_education_handler,
        crate::modules::content::adapter::incoming::web::routes::get_certifications_handler,
        crate::modules::content::adapter::incoming::web::routes::get_skills_handler,

        // Contact endpoints
        crate::modules::contact::adapter::incoming::web::routes::submit_contact_handler,

        // Admin endpoints
        crate::modules::admin::adapter::incoming::web::routes::get_entity_form_handler,
        crate::modules::admin::adapter::incoming::web::routes::get_edit_form_handler,
        crate::modules::admin::adapter::incoming::web::routes::create_entity_handler,
        crate::modules::admin::adapter::incoming::web::routes::update_entity_handler,
        crate::modules::admin::adapter::incoming::web::routes::delete_entity_handler,
        crate::modules::admin::adapter::incoming::web::routes::get_contact_messages_handler,
    ),
    components(
        schemas(
            // Response wrappers
            ErrorResponse,
            ErrorDetail,

            // Content
            PersonalInfo,
            Stat,
            Service,
            Project,
            Experience,
            Education,
            Certification,
            Skill,
            ContactMessage,
            ProjectListState,
            RowRange,

            // Contact
            ContactForm,

            // Admin
            EntityKind,
            FieldType,
            FieldSpec,
            EditorSession,
            EntityFormView,
            SaveOutcome,
            DeleteOutcome
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "content", description = "Public portfolio content"),
        (name = "contact", description = "Contact form submissions"),
        (name = "admin", description = "Signed-in content editing"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Backend session access token"))
                        .build(),
                ),
            )
        }
    }
}
