use actix_web::{get, web, Responder};

use super::respond_with_state;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/personal-info",
    tag = "content",
    responses(
        (status = 200, description = "Site owner profile, or null when none exists"),
        (status = 502, description = "Table store failure")
    )
)]
#[get("/api/personal-info")]
pub async fn get_personal_info_handler(data: web::Data<AppState>) -> impl Responder {
    let hook = data.content.personal_info().await;
    respond_with_state("personal info", hook.state())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::Value as JsonValue;
    use uuid::Uuid;

    use crate::modules::remote_table::application::ports::outgoing::{TableError, TableName};
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::fixtures::personal_info_row;
    use crate::tests::support::in_memory_table::InMemoryTableClient;

    #[actix_web::test]
    async fn test_get_personal_info_success() {
        let tables = InMemoryTableClient::new();
        let id = Uuid::new_v4();
        tables.seed(TableName::PersonalInfo, vec![personal_info_row(id)]);

        let app_state = TestAppStateBuilder::default().with_tables(tables).build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .service(get_personal_info_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/personal-info")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: JsonValue = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["loading"], false);
        assert_eq!(body["data"]["data"]["id"], id.to_string());
        assert_eq!(body["data"]["data"]["roles"][1], "Mentor");
    }

    #[actix_web::test]
    async fn test_get_personal_info_empty_table_returns_null() {
        let app_state = TestAppStateBuilder::default().build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .service(get_personal_info_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/personal-info")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: JsonValue = test::read_body_json(resp).await;
        assert!(body["data"]["data"].is_null());
    }

    #[actix_web::test]
    async fn test_get_personal_info_remote_failure_is_bad_gateway() {
        let tables = InMemoryTableClient::new();
        tables.fail(
            TableName::PersonalInfo,
            TableError::Transport("connection reset".to_string()),
        );

        let app_state = TestAppStateBuilder::default().with_tables(tables).build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .service(get_personal_info_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/personal-info")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let body: JsonValue = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "REMOTE_TABLE_ERROR");
        assert_eq!(body["error"]["message"], "Network error: connection reset");
    }
}
