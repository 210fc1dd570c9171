// Google Workspace REST clients sharing one service-account authenticator.

pub mod drive_client;
pub mod service_account;
pub mod sheets_client;

pub use drive_client::DriveClient;
pub use service_account::{AuthError, ServiceAccountAuth, TokenCache};
pub use sheets_client::SheetsClient;

use reqwest::{Response, StatusCode};
use service_account::TokenExchange;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GoogleApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{api} API error ({status}): {body}")]
    Api {
        api: &'static str,
        status: u16,
        body: String,
    },
}

/// Turns a non-2xx response into [`GoogleApiError::Api`]. A 401 also drops
/// the cached token so the next call signs a fresh assertion.
pub(crate) async fn check_response<X: TokenExchange>(
    api: &'static str,
    auth: &ServiceAccountAuth<X>,
    response: Response,
) -> Result<Response, GoogleApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::UNAUTHORIZED {
        auth.invalidate();
    }

    let body = response.text().await.unwrap_or_default();
    Err(GoogleApiError::Api {
        api,
        status: status.as_u16(),
        body,
    })
}
