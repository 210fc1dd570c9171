// Google Drive v3 client: folder lookup/creation, multipart uploads and
// link sharing.
//
// See: https://developers.google.com/drive/api/reference/rest/v3/files

use super::{check_response, GoogleApiError, ServiceAccountAuth};
use crate::core::forms::UploadedFile;
use crate::core::submissions::{FileStore, StoreError};
use async_trait::async_trait;
use rand::distributions::Alphanumeric;
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

const FILES_API: &str = "https://www.googleapis.com/drive/v3/files";
const UPLOAD_API: &str = "https://www.googleapis.com/upload/drive/v3/files";
const FOLDER_MIME: &str = "application/vnd.google-apps.folder";

#[derive(Debug, Deserialize)]
struct FileRef {
    id: String,
}

#[derive(Debug, Deserialize)]
struct FileParents {
    #[serde(default)]
    parents: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<FileRef>,
}

pub struct DriveClient {
    client: Client,
    auth: Arc<ServiceAccountAuth>,
}

impl DriveClient {
    pub fn new(client: Client, auth: Arc<ServiceAccountAuth>) -> Self {
        Self { client, auth }
    }

    pub async fn find_folder_id(
        &self,
        parent_id: &str,
        name: &str,
    ) -> Result<Option<String>, GoogleApiError> {
        let token = self.auth.access_token().await?;
        let query = folder_query(parent_id, name);
        let response = self
            .client
            .get(FILES_API)
            .bearer_auth(token)
            .query(&[
                ("q", query.as_str()),
                ("fields", "files(id)"),
                ("pageSize", "1"),
                ("supportsAllDrives", "true"),
                ("includeItemsFromAllDrives", "true"),
            ])
            .send()
            .await?;
        let response = check_response("Drive", &*self.auth, response).await?;

        let list: FileList = response.json().await?;
        Ok(list.files.into_iter().next().map(|f| f.id))
    }

    pub async fn create_folder_in(&self, parent_id: &str, name: &str) -> Result<String, GoogleApiError> {
        let token = self.auth.access_token().await?;
        let response = self
            .client
            .post(FILES_API)
            .bearer_auth(token)
            .query(&[("supportsAllDrives", "true"), ("fields", "id")])
            .json(&json!({
                "name": name,
                "mimeType": FOLDER_MIME,
                "parents": [parent_id],
            }))
            .send()
            .await?;
        let response = check_response("Drive", &*self.auth, response).await?;

        let folder: FileRef = response.json().await?;
        tracing::debug!(folder = %name, id = %folder.id, "Created drive folder");
        Ok(folder.id)
    }

    pub async fn upload(&self, parent_id: &str, file: &UploadedFile) -> Result<String, GoogleApiError> {
        let token = self.auth.access_token().await?;
        let boundary = random_boundary();
        let metadata = json!({
            "name": file.file_name,
            "parents": [parent_id],
        });
        let body = multipart_related_body(&boundary, &metadata, &file.content_type, &file.bytes);

        let response = self
            .client
            .post(UPLOAD_API)
            .bearer_auth(token)
            .query(&[
                ("uploadType", "multipart"),
                ("supportsAllDrives", "true"),
                ("fields", "id"),
            ])
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={}", boundary),
            )
            .body(body)
            .send()
            .await?;
        let response = check_response("Drive", &*self.auth, response).await?;

        let uploaded: FileRef = response.json().await?;
        tracing::info!(
            file = %file.file_name,
            bytes = file.bytes.len(),
            id = %uploaded.id,
            "Uploaded file"
        );
        Ok(uploaded.id)
    }

    /// Parent folder ids of a file or folder. A missing id has no parents.
    pub async fn parent_ids(&self, id: &str) -> Result<Vec<String>, GoogleApiError> {
        let token = self.auth.access_token().await?;
        let response = self
            .client
            .get(format!("{}/{}", FILES_API, urlencoding::encode(id)))
            .bearer_auth(token)
            .query(&[("fields", "parents"), ("supportsAllDrives", "true")])
            .send()
            .await?;
        let response = match check_response("Drive", &*self.auth, response).await {
            Ok(response) => response,
            Err(GoogleApiError::Api { status: 404, .. }) => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let file: FileParents = response.json().await?;
        Ok(file.parents)
    }

    pub async fn share_with_anyone(&self, file_id: &str) -> Result<(), GoogleApiError> {
        let token = self.auth.access_token().await?;
        let response = self
            .client
            .post(format!("{}/{}/permissions", FILES_API, file_id))
            .bearer_auth(token)
            .query(&[("supportsAllDrives", "true")])
            .json(&json!({ "role": "reader", "type": "anyone" }))
            .send()
            .await?;
        check_response("Drive", &*self.auth, response).await?;
        Ok(())
    }
}

/// Escapes a literal for a Drive `q` string.
fn escape_query(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

fn folder_query(parent_id: &str, name: &str) -> String {
    format!(
        "name = '{}' and '{}' in parents and mimeType = '{}' and trashed = false",
        escape_query(name),
        escape_query(parent_id),
        FOLDER_MIME
    )
}

fn random_boundary() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(24)
        .map(char::from)
        .collect();
    format!("intake_{}", suffix)
}

/// Two-part `multipart/related` body: JSON metadata, then the raw content.
fn multipart_related_body(
    boundary: &str,
    metadata: &serde_json::Value,
    content_type: &str,
    content: &[u8],
) -> Vec<u8> {
    let mut body = Vec::with_capacity(content.len() + 512);
    body.extend_from_slice(
        format!(
            "--{b}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{meta}\r\n\
             --{b}\r\nContent-Type: {ct}\r\n\r\n",
            b = boundary,
            meta = metadata,
            ct = content_type
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    body
}

fn drive_error(e: GoogleApiError) -> StoreError {
    StoreError::Drive(e.to_string())
}

#[async_trait]
impl FileStore for DriveClient {
    async fn find_folder(&self, parent_id: &str, name: &str) -> Result<Option<String>, StoreError> {
        self.find_folder_id(parent_id, name).await.map_err(drive_error)
    }

    async fn create_folder(&self, parent_id: &str, name: &str) -> Result<String, StoreError> {
        self.create_folder_in(parent_id, name).await.map_err(drive_error)
    }

    async fn upload_file(&self, parent_id: &str, file: &UploadedFile) -> Result<String, StoreError> {
        self.upload(parent_id, file).await.map_err(drive_error)
    }

    async fn make_public(&self, file_id: &str) -> Result<(), StoreError> {
        self.share_with_anyone(file_id).await.map_err(drive_error)
    }

    async fn parents(&self, id: &str) -> Result<Vec<String>, StoreError> {
        self.parent_ids(id).await.map_err(drive_error)
    }
}
