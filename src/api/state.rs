use super::errors::ApiError;
use crate::core::ai::DynAssistService;
use crate::core::auth::SessionGuard;
use crate::core::submissions::DynSubmissionService;
use std::sync::Arc;

/// Shared by every handler through `web::Data`.
///
/// Services are optional so the server still boots with a partial `.env`;
/// handlers ask for what they need and get [`ApiError::MissingConfig`] back
/// when it is absent.
pub struct AppState {
    pub submissions: Option<Arc<DynSubmissionService>>,
    pub assist: Option<Arc<DynAssistService>>,
    pub sessions: Option<SessionGuard>,
    pub cookie_secure: bool,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn submissions(&self) -> Result<&DynSubmissionService, ApiError> {
        self.submissions
            .as_deref()
            .ok_or(ApiError::MissingConfig("Google Sheets/Drive credentials"))
    }

    pub fn assist(&self) -> Result<&DynAssistService, ApiError> {
        self.assist
            .as_deref()
            .ok_or(ApiError::MissingConfig("OPENROUTER_API_KEY"))
    }

    pub fn sessions(&self) -> Result<&SessionGuard, ApiError> {
        self.sessions
            .as_ref()
            .ok_or(ApiError::MissingConfig("ADMIN_PASSWORD"))
    }
}
