use crate::api::errors::ApiError;
use crate::api::multipart::read_multipart;
use crate::api::state::AppState;
use crate::core::forms::{FieldErrors, FORM_SCHEMA};
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use serde_json::json;

/// `GET /api/form-schema`
pub async fn form_schema() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "success": true, "sections": FORM_SCHEMA }))
}

/// `POST /api/submit`
pub async fn submit(state: web::Data<AppState>, payload: Multipart) -> Result<HttpResponse, ApiError> {
    let service = state.submissions()?;
    let form = read_multipart(payload, state.max_upload_bytes).await?;

    let receipt = service.submit(&form.fields, form.files).await?;
    if !receipt.failed_uploads.is_empty() {
        tracing::warn!(failed = ?receipt.failed_uploads, "Submission stored with missing files");
    }

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": receipt.message,
        "folderUrl": receipt.folder_url,
        "failedUploads": receipt.failed_uploads,
    })))
}

/// `POST /api/upload`
pub async fn upload(state: web::Data<AppState>, payload: Multipart) -> Result<HttpResponse, ApiError> {
    let service = state.submissions()?;
    let mut form = read_multipart(payload, state.max_upload_bytes).await?;

    let file = form
        .take_file("file")
        .ok_or_else(|| FieldErrors::single("file", "A file is required"))?;
    let stored = service.upload(form.text("folderId"), file).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "fileId": stored.file_id,
        "url": stored.url,
    })))
}
