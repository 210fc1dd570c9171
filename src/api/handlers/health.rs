use crate::api::state::AppState;
use actix_web::{web, HttpResponse};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    storage_configured: bool,
    assist_configured: bool,
    dashboard_configured: bool,
}

/// `GET /health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        storage_configured: state.submissions.is_some(),
        assist_configured: state.assist.is_some(),
        dashboard_configured: state.sessions.is_some(),
    })
}
