// Buffers a `multipart/form-data` body into text fields and files.
//
// The whole body is capped at `max_bytes`; the read stops as soon as the cap
// is crossed.

use super::errors::ApiError;
use crate::core::forms::UploadedFile;
use actix_multipart::Multipart;
use futures_util::StreamExt;
use std::collections::HashMap;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, Default)]
pub struct MultipartForm {
    pub fields: HashMap<String, String>,
    pub files: Vec<UploadedFile>,
}

impl MultipartForm {
    /// Removes and returns the first file sent under `field`.
    pub fn take_file(&mut self, field: &str) -> Option<UploadedFile> {
        let index = self.files.iter().position(|f| f.field == field)?;
        Some(self.files.remove(index))
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

pub async fn read_multipart(mut payload: Multipart, max_bytes: usize) -> Result<MultipartForm, ApiError> {
    let mut form = MultipartForm::default();
    let mut total = 0usize;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| ApiError::BadRequest(format!("Malformed form data: {}", e)))?;

        let (name, file_name) = match field.content_disposition() {
            Some(cd) => (
                cd.get_name().map(str::to_string),
                cd.get_filename().map(str::to_string),
            ),
            None => (None, None),
        };
        let Some(name) = name else {
            continue;
        };
        let content_type = field
            .content_type()
            .map(|mime| mime.essence_str().to_string())
            .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| ApiError::BadRequest(format!("Malformed form data: {}", e)))?;
            total += chunk.len();
            if total > max_bytes {
                tracing::warn!(limit = max_bytes, "Rejected oversized form body");
                return Err(ApiError::PayloadTooLarge(max_bytes));
            }
            bytes.extend_from_slice(&chunk);
        }

        match file_name {
            // Browsers send an empty, nameless part for untouched file inputs.
            Some(file_name) if file_name.is_empty() && bytes.is_empty() => {}
            Some(file_name) => form.files.push(UploadedFile {
                field: name,
                file_name,
                content_type,
                bytes,
            }),
            None => {
                let value = String::from_utf8(bytes)
                    .map_err(|_| ApiError::BadRequest(format!("Field {} is not valid UTF-8", name)))?;
                form.fields.insert(name, value);
            }
        }
    }

    tracing::debug!(
        fields = form.fields.len(),
        files = form.files.len(),
        bytes = total,
        "Read multipart form"
    );
    Ok(form)
}
