// Google Sheets v4 client: append, read and update single A1 ranges.
//
// See: https://developers.google.com/sheets/api/reference/rest/v4/spreadsheets.values

use super::{check_response, GoogleApiError, ServiceAccountAuth};
use crate::core::submissions::{SheetStore, StoreError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const SHEETS_API: &str = "https://sheets.googleapis.com/v4/spreadsheets";

#[derive(Debug, Serialize)]
struct ValuesBody<'a> {
    values: &'a [Vec<String>],
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

pub struct SheetsClient {
    client: Client,
    auth: Arc<ServiceAccountAuth>,
    spreadsheet_id: String,
}

impl SheetsClient {
    pub fn new(client: Client, auth: Arc<ServiceAccountAuth>, spreadsheet_id: String) -> Self {
        Self {
            client,
            auth,
            spreadsheet_id,
        }
    }

    fn values_url(&self, range: &str, suffix: &str) -> String {
        format!(
            "{}/{}/values/{}{}",
            SHEETS_API,
            self.spreadsheet_id,
            urlencoding::encode(range),
            suffix
        )
    }

    pub async fn append_values(&self, range: &str, rows: &[Vec<String>]) -> Result<(), GoogleApiError> {
        let token = self.auth.access_token().await?;
        let response = self
            .client
            .post(self.values_url(range, ":append"))
            .bearer_auth(token)
            .query(&[
                ("valueInputOption", "RAW"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&ValuesBody { values: rows })
            .send()
            .await?;
        check_response("Sheets", &*self.auth, response).await?;

        tracing::debug!(range, rows = rows.len(), "Appended rows");
        Ok(())
    }

    pub async fn get_values(&self, range: &str) -> Result<Vec<Vec<String>>, GoogleApiError> {
        let token = self.auth.access_token().await?;
        let response = self
            .client
            .get(self.values_url(range, ""))
            .bearer_auth(token)
            .send()
            .await?;
        let response = check_response("Sheets", &*self.auth, response).await?;

        let body: ValueRange = response.json().await?;
        Ok(body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }

    pub async fn update_values(&self, range: &str, rows: &[Vec<String>]) -> Result<(), GoogleApiError> {
        let token = self.auth.access_token().await?;
        let response = self
            .client
            .put(self.values_url(range, ""))
            .bearer_auth(token)
            .query(&[("valueInputOption", "RAW")])
            .json(&ValuesBody { values: rows })
            .send()
            .await?;
        check_response("Sheets", &*self.auth, response).await?;
        Ok(())
    }
}

/// Formatted cell values arrive as strings; anything else is rendered as JSON.
fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn sheet_error(e: GoogleApiError) -> StoreError {
    StoreError::Sheet(e.to_string())
}

#[async_trait]
impl SheetStore for SheetsClient {
    async fn append(&self, range: &str, rows: Vec<Vec<String>>) -> Result<(), StoreError> {
        self.append_values(range, &rows).await.map_err(sheet_error)
    }

    async fn read(&self, range: &str) -> Result<Vec<Vec<String>>, StoreError> {
        self.get_values(range).await.map_err(sheet_error)
    }

    async fn update(&self, range: &str, rows: Vec<Vec<String>>) -> Result<(), StoreError> {
        self.update_values(range, &rows).await.map_err(sheet_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::google::TokenCache;

    const TEST_KEY: &str = include_str!("testdata/service_account_test_key.pem");

    fn client() -> SheetsClient {
        let json = serde_json::json!({
            "client_email": "intake@example.iam.gserviceaccount.com",
            "private_key": TEST_KEY,
        })
        .to_string();
        let auth = ServiceAccountAuth::from_json(&json, Client::new(), Arc::new(TokenCache::new()))
            .unwrap();
        SheetsClient::new(Client::new(), Arc::new(auth), "sheet-123".to_string())
    }

    #[test]
    fn range_is_percent_encoded_in_url() {
        let url = client().values_url("'Team List'!A2:R", ":append");
        assert_eq!(
            url,
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-123/values/%27Team%20List%27%21A2%3AR:append"
        );
    }

    #[test]
    fn value_range_tolerates_missing_values_and_numbers() {
        let body: ValueRange = serde_json::from_str(r#"{"range": "A1:B2"}"#).unwrap();
        assert!(body.values.is_empty());

        let body: ValueRange =
            serde_json::from_str(r#"{"values": [["a", 3, null, true]]}"#).unwrap();
        let row: Vec<String> = body.values[0].iter().cloned().map(cell_text).collect();
        assert_eq!(row, vec!["a", "3", "", "true"]);
    }
}
