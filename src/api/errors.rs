// The single error type returned by HTTP handlers.
//
// Clients only ever see four kinds of failure. Anything that carries
// server-side detail (missing env vars, upstream bodies) is logged here and
// replaced with a generic message in the response.

use crate::core::ai::AssistError;
use crate::core::forms::FieldErrors;
use crate::core::submissions::SubmissionError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

const MISSING_CONFIG_MESSAGE: &str = "Server is not configured";
const UPSTREAM_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Error)]
pub enum ApiError {
    /// A service this endpoint needs was not configured at startup.
    #[error("Missing configuration: {0}")]
    MissingConfig(&'static str),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Request body exceeds {0} bytes")]
    PayloadTooLarge(usize),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Upstream failure: {0}")]
    Upstream(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a BTreeMap<String, String>>,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::MissingConfig(_) | ApiError::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ApiError::MissingConfig(what) => {
                tracing::error!(missing = %what, "Request needs a service that is not configured");
                MISSING_CONFIG_MESSAGE.to_string()
            }
            ApiError::Upstream(detail) => {
                tracing::error!(error = %detail, "Upstream service failed");
                UPSTREAM_MESSAGE.to_string()
            }
            ApiError::Validation(_) => "Please fix the highlighted fields".to_string(),
            other => other.to_string(),
        };

        let fields = match self {
            ApiError::Validation(errors) => Some(errors.as_map()),
            _ => None,
        };

        HttpResponse::build(self.status_code()).json(ErrorBody {
            success: false,
            error: &message,
            fields,
        })
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<SubmissionError> for ApiError {
    fn from(error: SubmissionError) -> Self {
        match error {
            SubmissionError::Validation(errors) => ApiError::Validation(errors),
            SubmissionError::Store(e) => ApiError::Upstream(e.to_string()),
        }
    }
}

impl From<AssistError> for ApiError {
    fn from(error: AssistError) -> Self {
        match error {
            AssistError::InvalidInput(message) => ApiError::BadRequest(message),
            other => ApiError::Upstream(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::submissions::StoreError;
    use actix_web::body::to_bytes;

    async fn body_json(error: ApiError) -> serde_json::Value {
        let body = to_bytes(error.error_response().into_body()).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[actix_web::test]
    async fn upstream_detail_is_masked() {
        let error: ApiError = SubmissionError::Store(StoreError::Drive("quota exceeded for key abc".into())).into();
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(error).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], UPSTREAM_MESSAGE);
        assert!(body.get("fields").is_none());
    }

    #[actix_web::test]
    async fn missing_config_is_masked() {
        let body = body_json(ApiError::MissingConfig("OPENROUTER_API_KEY")).await;
        assert_eq!(body["error"], MISSING_CONFIG_MESSAGE);
        assert!(!body.to_string().contains("OPENROUTER"));
    }

    #[actix_web::test]
    async fn validation_errors_list_fields() {
        let mut errors = FieldErrors::single("email", "Enter a valid email address");
        errors.add("headshot", "A headshot is required");
        let error = ApiError::from(SubmissionError::Validation(errors));
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);

        let body = body_json(error).await;
        assert_eq!(body["fields"]["headshot"], "A headshot is required");
        assert_eq!(body["fields"]["email"], "Enter a valid email address");
    }

    #[test]
    fn assist_input_errors_are_client_errors() {
        let error = ApiError::from(AssistError::InvalidInput("text is required".into()));
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        let error = ApiError::from(AssistError::EmptyResponse);
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
