// This is the entry point of the team intake service.
//
// **Architecture Overview:**
// - `core/` = Business logic (form schema, submissions, text assist, sessions)
// - `infra/` = Implementations of core traits (Google Sheets/Drive, OpenRouter)
// - `api/` = HTTP adapters (actix-web handlers, errors, multipart reading)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Start the HTTP server

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "api/api_layer.rs"]
mod api;
mod config;
#[path = "core/core_layer.rs"]
mod core;
#[path = "infra/infra_layer.rs"]
mod infra;

use crate::api::AppState;
use crate::config::AppConfig;
use crate::core::ai::{AiConfig, AiProvider, AssistService, DynAssistService};
use crate::core::auth::SessionGuard;
use crate::core::submissions::{
    DynSubmissionService, FileStore, SheetStore, SubmissionConfig, SubmissionService,
};
use crate::infra::ai::OpenRouterClient;
use crate::infra::google::{AuthError, DriveClient, ServiceAccountAuth, SheetsClient, TokenCache};
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;

/// Sheets + Drive backed submissions, or `None` when Google is not configured.
async fn build_submission_service(
    config: &AppConfig,
    http: reqwest::Client,
    assist: Option<Arc<DynAssistService>>,
) -> anyhow::Result<Option<DynSubmissionService>> {
    let (Some(sheet_id), Some(root_folder_id)) =
        (config.sheet_id.clone(), config.drive_root_folder_id.clone())
    else {
        tracing::warn!(
            "GOOGLE_SHEET_ID or GOOGLE_DRIVE_ROOT_FOLDER_ID not set; submissions are disabled"
        );
        return Ok(None);
    };

    // One cache for both clients so they share a single bearer token.
    let token_cache = Arc::new(TokenCache::new());
    let auth = match ServiceAccountAuth::from_env(http.clone(), token_cache).await {
        Ok(auth) => Arc::new(auth),
        Err(AuthError::MissingCredentials) => {
            tracing::warn!("No Google service account configured; submissions are disabled");
            return Ok(None);
        }
        Err(e) => return Err(e).context("Failed to load Google service account"),
    };
    tracing::info!(account = %auth.client_email(), "Google service account loaded");

    let sheets: Box<dyn SheetStore> =
        Box::new(SheetsClient::new(http.clone(), Arc::clone(&auth), sheet_id));
    let files: Box<dyn FileStore> = Box::new(DriveClient::new(http, auth));

    let service = SubmissionService::new(
        sheets,
        files,
        assist,
        SubmissionConfig {
            sheet_name: config.sheet_name.clone(),
            root_folder_id,
        },
    );

    // A blank sheet gets its header row; an unreachable one is not fatal.
    match service.ensure_header_row().await {
        Ok(true) => tracing::info!(sheet = %config.sheet_name, "Wrote header row"),
        Ok(false) => {}
        Err(e) => tracing::warn!(error = %e, "Could not check the sheet header row"),
    }

    Ok(Some(service))
}

fn build_assist_service(config: &AppConfig, http: reqwest::Client) -> Option<Arc<DynAssistService>> {
    let Some(api_key) = config.openrouter_api_key.clone() else {
        tracing::warn!("OPENROUTER_API_KEY not set; grammar and ask-ai are disabled");
        return None;
    };

    let provider: Box<dyn AiProvider> = Box::new(OpenRouterClient::new(http, api_key));
    let ai_config = AiConfig {
        model: config.openrouter_model.clone(),
        ..AiConfig::default()
    };
    tracing::info!(model = %ai_config.model, "Text assist enabled");
    Some(Arc::new(AssistService::new(provider, ai_config)))
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let config = AppConfig::from_env()?;

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // This is the "composition root" where we wire everything together.

    let http = reqwest::Client::builder()
        .user_agent(concat!("team-intake/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    let assist = build_assist_service(&config, http.clone());
    let submissions = build_submission_service(&config, http, assist.clone())
        .await?
        .map(Arc::new);

    let sessions = config.admin_password.clone().map(SessionGuard::new);
    if sessions.is_none() {
        tracing::warn!("ADMIN_PASSWORD not set; the dashboard is disabled");
    }

    let state = web::Data::new(AppState {
        submissions,
        assist,
        sessions,
        cookie_secure: config.cookie_secure,
        max_upload_bytes: config.max_upload_bytes,
    });

    // ========================================================================
    // HTTP SERVER
    // ========================================================================

    let (host, port) = config.bind_address();
    tracing::info!(%host, port, "Starting team intake service");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(api::configure)
    })
    .bind((host.as_str(), port))
    .with_context(|| format!("Failed to bind {}:{}", host, port))?
    .run()
    .await?;

    Ok(())
}
