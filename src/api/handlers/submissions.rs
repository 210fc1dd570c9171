use crate::api::errors::ApiError;
use crate::api::session::AdminSession;
use crate::api::state::AppState;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    row_index: u32,
    status: String,
}

/// `GET /api/submissions`
pub async fn list(_session: AdminSession, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let submissions = state.submissions()?.list().await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "submissions": submissions })))
}

/// `PATCH /api/submissions`
pub async fn update_status(
    _session: AdminSession,
    state: web::Data<AppState>,
    body: web::Json<StatusUpdate>,
) -> Result<HttpResponse, ApiError> {
    let status = state
        .submissions()?
        .update_status(body.row_index, &body.status)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "status": status })))
}
