// Process configuration, read once at startup.
//
// `.env` is loaded by `main` before this runs. Every external service is
// optional here: a missing piece leaves that service unset and its endpoints
// answer with a masked configuration error instead of refusing to boot.
//
// Google credentials are not read here; `ServiceAccountAuth::from_env` owns
// `GOOGLE_SERVICE_ACCOUNT_KEY` / `GOOGLE_SERVICE_ACCOUNT_JSON`.

use crate::core::ai::AiConfig;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_SHEET_NAME: &str = "Submissions";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 200 * 1024 * 1024;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub admin_password: Option<String>,
    pub sheet_id: Option<String>,
    pub sheet_name: String,
    pub drive_root_folder_id: Option<String>,
    pub openrouter_api_key: Option<String>,
    pub openrouter_model: String,
    pub max_upload_bytes: usize,
    pub cookie_secure: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset.
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&get, "PORT", DEFAULT_PORT)?,
            admin_password: get("ADMIN_PASSWORD"),
            sheet_id: get("GOOGLE_SHEET_ID"),
            sheet_name: get("GOOGLE_SHEET_NAME").unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string()),
            drive_root_folder_id: get("GOOGLE_DRIVE_ROOT_FOLDER_ID"),
            openrouter_api_key: get("OPENROUTER_API_KEY"),
            openrouter_model: get("OPENROUTER_MODEL").unwrap_or_else(|| AiConfig::default().model),
            max_upload_bytes: parse_or(&get, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            cookie_secure: parse_or(&get, "COOKIE_SECURE", true)?,
        })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn parse_or<T, G>(get: &G, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(name) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config(&[]).unwrap();
        assert_eq!(config.bind_address(), ("0.0.0.0".to_string(), DEFAULT_PORT));
        assert_eq!(config.sheet_name, DEFAULT_SHEET_NAME);
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert!(config.cookie_secure);
        assert!(config.admin_password.is_none());
        assert!(config.sheet_id.is_none());
        assert_eq!(config.openrouter_model, AiConfig::default().model);
    }

    #[test]
    fn reads_values_and_ignores_blanks() {
        let config = config(&[
            ("PORT", "9000"),
            ("ADMIN_PASSWORD", "s3cret"),
            ("GOOGLE_SHEET_ID", "sheet-1"),
            ("GOOGLE_SHEET_NAME", "  "),
            ("COOKIE_SECURE", "false"),
            ("MAX_UPLOAD_BYTES", "1048576"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.admin_password.as_deref(), Some("s3cret"));
        assert_eq!(config.sheet_id.as_deref(), Some("sheet-1"));
        assert_eq!(config.sheet_name, DEFAULT_SHEET_NAME);
        assert!(!config.cookie_secure);
        assert_eq!(config.max_upload_bytes, 1_048_576);
    }

    #[test]
    fn malformed_numbers_are_reported() {
        let err = config(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "PORT",
                value: "eighty".to_string()
            }
        );
        assert!(config(&[("COOKIE_SECURE", "yes")]).is_err());
    }
}
