// HTTP layer - actix-web handlers and the plumbing they share.
//
// Handlers stay thin: extract, call one core service method, shape JSON.

#[path = "errors.rs"]
pub mod errors;

#[path = "handlers/mod.rs"]
pub mod handlers;

#[path = "multipart.rs"]
pub mod multipart;

#[path = "session.rs"]
pub mod session;

#[path = "state.rs"]
pub mod state;

pub use state::AppState;

use actix_web::web;
use errors::ApiError;
use handlers::{assist, auth, health, intake, submissions};

/// JSON bodies use the same error shape as every other failure.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}

/// Registers every route on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health::health))
        .service(
            web::scope("/api")
                .route("/auth", web::post().to(auth::login))
                .route("/auth", web::delete().to(auth::logout))
                .route("/form-schema", web::get().to(intake::form_schema))
                .route("/submit", web::post().to(intake::submit))
                .route("/upload", web::post().to(intake::upload))
                .route("/grammar", web::post().to(assist::grammar))
                .route("/ask-ai", web::post().to(assist::ask))
                .route("/submissions", web::get().to(submissions::list))
                .route("/submissions", web::patch().to(submissions::update_status)),
        );
}
