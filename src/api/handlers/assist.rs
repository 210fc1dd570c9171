use crate::api::errors::ApiError;
use crate::api::state::AppState;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct GrammarRequest {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    question: String,
    #[serde(default)]
    field: Option<String>,
}

/// `POST /api/grammar`
pub async fn grammar(
    state: web::Data<AppState>,
    body: web::Json<GrammarRequest>,
) -> Result<HttpResponse, ApiError> {
    let corrected = state.assist()?.fix_grammar(&body.text).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "corrected": corrected })))
}

/// `POST /api/ask-ai`
pub async fn ask(
    state: web::Data<AppState>,
    body: web::Json<AskRequest>,
) -> Result<HttpResponse, ApiError> {
    let answer = state
        .assist()?
        .ask(&body.question, body.field.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "answer": answer })))
}
