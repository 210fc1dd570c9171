// Dashboard authentication as an extractor: a handler that takes
// `AdminSession` only runs when the request carries a live session cookie.

use super::errors::ApiError;
use super::state::AppState;
use crate::core::auth::{SessionGuard, SESSION_COOKIE};
use actix_web::cookie::{time, Cookie, SameSite};
use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use std::time::Duration;

pub struct AdminSession;

impl FromRequest for AdminSession {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authorize(req))
    }
}

fn authorize(req: &HttpRequest) -> Result<AdminSession, ApiError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or(ApiError::MissingConfig("application state"))?;
    let guard = state.sessions()?;

    match req.cookie(SESSION_COOKIE) {
        Some(cookie) if guard.is_valid(cookie.value()) => Ok(AdminSession),
        Some(_) => {
            tracing::debug!(path = %req.path(), "Rejected unknown or expired session");
            Err(ApiError::Unauthorized)
        }
        None => Err(ApiError::Unauthorized),
    }
}

/// Cookie carrying a freshly issued session token.
pub fn session_cookie(token: String, guard: &SessionGuard, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .max_age(max_age(guard.ttl()))
        .finish()
}

/// Expired, empty cookie that makes the browser drop the session.
pub fn cleared_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .finish();
    cookie.make_removal();
    cookie
}

fn max_age(ttl: Duration) -> time::Duration {
    time::Duration::seconds(ttl.as_secs() as i64)
}
