use crate::api::errors::ApiError;
use crate::api::session::{cleared_cookie, session_cookie};
use crate::api::state::AppState;
use crate::core::auth::SESSION_COOKIE;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    password: String,
}

/// `POST /api/auth`
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let guard = state.sessions()?;

    if !guard.verify_password(&body.password) {
        tracing::warn!("Dashboard login rejected");
        return Err(ApiError::Unauthorized);
    }

    let cookie = session_cookie(guard.issue(), guard, state.cookie_secure);
    tracing::info!("Dashboard session issued");

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(json!({ "success": true })))
}

/// `DELETE /api/auth`
pub async fn logout(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    if let (Ok(guard), Some(cookie)) = (state.sessions(), req.cookie(SESSION_COOKIE)) {
        guard.revoke(cookie.value());
    }

    HttpResponse::Ok()
        .cookie(cleared_cookie(state.cookie_secure))
        .json(json!({ "success": true }))
}
