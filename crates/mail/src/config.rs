//! App credential loading
//!
//! Supports loading Stratus app credentials from (in order of priority):
//! 1. Compile-time embedded credentials (for production builds)
//! 2. JSON file in the Stratus config directory
//! 3. Runtime environment variables (fallback)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Credentials filename in the Stratus config directory
const CREDENTIALS_FILE: &str = "credentials.json";

/// App credentials for the Stratus API
#[derive(Debug, Clone)]
pub struct Credentials {
    pub app_id: String,
    pub app_secret: String,
}

/// Credential file format
#[derive(Deserialize)]
struct CredentialFile {
    app_id: String,
    app_secret: String,
}

impl Credentials {
    /// Load credentials using the following priority:
    /// 1. Compile-time embedded credentials (for production builds)
    /// 2. JSON file (~/.config/stratus/credentials.json)
    /// 3. Runtime environment variables
    pub fn load() -> Result<Self> {
        if let Some(credentials) = Self::from_compile_time() {
            return Ok(credentials);
        }

        if config::config_exists(CREDENTIALS_FILE) {
            let file: CredentialFile = config::load_json(CREDENTIALS_FILE)?;
            return Ok(Self::from_credential_file(file));
        }

        Self::from_env()
    }

    /// Load credentials embedded at compile time via environment variables.
    /// Build with: STRATUS_APP_ID=xxx STRATUS_APP_SECRET=yyy cargo build --release
    pub fn from_compile_time() -> Option<Self> {
        let app_id = option_env!("STRATUS_APP_ID")?;
        let app_secret = option_env!("STRATUS_APP_SECRET")?;

        if app_id.is_empty() || app_secret.is_empty() {
            return None;
        }

        Some(Self {
            app_id: app_id.to_string(),
            app_secret: app_secret.to_string(),
        })
    }

    /// Load credentials from a specific JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file: CredentialFile = config::load_json_file(path)?;
        Ok(Self::from_credential_file(file))
    }

    /// Parse credentials from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CredentialFile =
            serde_json::from_str(json).context("Failed to parse credentials JSON")?;
        Ok(Self::from_credential_file(file))
    }

    /// Load credentials from environment variables
    pub fn from_env() -> Result<Self> {
        let app_id = std::env::var("STRATUS_APP_ID")
            .context("STRATUS_APP_ID environment variable not set")?;
        let app_secret = std::env::var("STRATUS_APP_SECRET")
            .context("STRATUS_APP_SECRET environment variable not set")?;

        Ok(Self { app_id, app_secret })
    }

    /// Get the default credentials file path (~/.config/stratus/credentials.json)
    pub fn default_credentials_path() -> Option<PathBuf> {
        config::config_path(CREDENTIALS_FILE)
    }

    /// Check if credentials are available (compile-time, file, or env vars)
    pub fn is_available() -> bool {
        if Self::from_compile_time().is_some() {
            return true;
        }
        if config::config_exists(CREDENTIALS_FILE) {
            return true;
        }
        std::env::var("STRATUS_APP_ID").is_ok() && std::env::var("STRATUS_APP_SECRET").is_ok()
    }

    fn from_credential_file(file: CredentialFile) -> Self {
        Self {
            app_id: file.app_id,
            app_secret: file.app_secret,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_credentials() {
        let json = r#"{
            "app_id": "app-abc123",
            "app_secret": "shh"
        }"#;

        let credentials = Credentials::from_json(json).unwrap();
        assert_eq!(credentials.app_id, "app-abc123");
        assert_eq!(credentials.app_secret, "shh");
    }

    #[test]
    fn test_invalid_json() {
        let json = r#"{ "other": {} }"#;
        assert!(Credentials::from_json(json).is_err());
    }
}
