use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;
use tracing::warn;

use crate::modules::remote_table::application::ports::outgoing::{SelectQuery, TableName};
use crate::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadinessResponse {
    status: &'static str,
    table_store: &'static str,
}

/// LIVENESS PROBE
/// - No I/O
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}

/// READINESS PROBE
/// - One cheap read against the table store
#[get("/ready")]
pub async fn readiness(data: web::Data<AppState>) -> impl Responder {
    let probe = data
        .content
        .client()
        .select(
            TableName::PersonalInfo,
            SelectQuery::all().columns("id").limit(1),
        )
        .await;

    match probe {
        Ok(_) => HttpResponse::Ok().json(ReadinessResponse {
            status: "ok",
            table_store: "ok",
        }),
        Err(e) => {
            warn!("Readiness probe failed: {}", e);
            HttpResponse::ServiceUnavailable().json(ReadinessResponse {
                status: "unhealthy",
                table_store: "unhealthy",
            })
        }
    }
}
