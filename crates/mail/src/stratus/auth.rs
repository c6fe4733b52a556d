//! Stratus hosted authentication
//!
//! Implements the hosted OAuth flow: the library builds the authorize URL
//! for the caller to send the user to, exchanges the callback code for an
//! access token, and can revoke it later. Issued tokens are long-lived and
//! persisted under the config directory. Uses synchronous HTTP (ureq) to
//! be executor-agnostic.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::config::Credentials;

/// Token file in the Stratus config directory
const TOKEN_FILE: &str = "stratus-token.json";

const AUTHORIZE_PATH: &str = "/oauth/authorize";
const TOKEN_PATH: &str = "/oauth/token";
const REVOKE_PATH: &str = "/oauth/revoke";

/// What the authorize endpoint hands back to the redirect URI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseType {
    /// Authorization code, to be exchanged server-side
    Code,
    /// Access token directly (implicit flow)
    Token,
}

impl ResponseType {
    fn as_str(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Token => "token",
        }
    }
}

/// Parameters for building the hosted authorize URL
#[derive(Debug, Clone)]
pub struct AuthorizeParams {
    pub redirect_uri: String,
    pub scopes: Vec<String>,
    pub response_type: ResponseType,
    /// Opaque value echoed back on the redirect, 1-255 characters
    pub state: Option<String>,
    /// Pre-fill the account email on the hosted login page
    pub login_hint: Option<String>,
    /// Skip provider selection on the hosted login page
    pub provider: Option<String>,
}

impl AuthorizeParams {
    pub fn new(redirect_uri: impl Into<String>, scopes: Vec<String>) -> Self {
        Self {
            redirect_uri: redirect_uri.into(),
            scopes,
            response_type: ResponseType::Code,
            state: None,
            login_hint: None,
            provider: None,
        }
    }
}

/// Access token issued by the hosted token endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub account_id: String,
    pub email_address: String,
    #[serde(default)]
    pub provider: String,
    /// Unix timestamp of when this token was stored locally
    #[serde(default)]
    pub issued_at: Option<i64>,
}

/// Hosted OAuth flow and token storage for a Stratus app
pub struct HostedAuth {
    app_id: String,
    app_secret: String,
    base_url: String,
    token_path: PathBuf,
}

impl HostedAuth {
    /// Create a new HostedAuth instance from app credentials
    pub fn new(credentials: &Credentials) -> Result<Self> {
        let token_path =
            config::config_path(TOKEN_FILE).context("Could not determine config directory")?;

        Ok(Self {
            app_id: credentials.app_id.clone(),
            app_secret: credentials.app_secret.clone(),
            base_url: super::client::BASE_URL.to_string(),
            token_path,
        })
    }

    /// Override the API base URL (regions, self-hosted deployments)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override where the token is stored (mainly for tests)
    pub fn with_token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = path.into();
        self
    }

    /// Build the hosted authorize URL to send the user to.
    ///
    /// Validates the parameters locally; no network call is made.
    pub fn authorize_url(&self, params: &AuthorizeParams) -> Result<String> {
        url::Url::parse(&params.redirect_uri)
            .with_context(|| format!("redirect_uri {:?} is not a valid URL", params.redirect_uri))?;
        if params.scopes.is_empty() {
            bail!("at least one scope is required");
        }
        if let Some(state) = &params.state
            && (state.is_empty() || state.len() > 255)
        {
            bail!("state must be between 1 and 255 characters");
        }

        let mut url = format!(
            "{}{}?app_id={}&redirect_uri={}&response_type={}&scopes={}",
            self.base_url,
            AUTHORIZE_PATH,
            urlencoding::encode(&self.app_id),
            urlencoding::encode(&params.redirect_uri),
            params.response_type.as_str(),
            urlencoding::encode(&params.scopes.join(",")),
        );

        if let Some(state) = &params.state {
            url.push_str(&format!("&state={}", urlencoding::encode(state)));
        }
        if let Some(hint) = &params.login_hint {
            url.push_str(&format!("&login_hint={}", urlencoding::encode(hint)));
        }
        if let Some(provider) = &params.provider {
            url.push_str(&format!("&provider={}", urlencoding::encode(provider)));
        }

        Ok(url)
    }

    /// Exchange an authorization code for an access token.
    ///
    /// The token is persisted so later sessions can pick it up via
    /// [`HostedAuth::access_token`].
    pub fn exchange_code(&self, code: &str) -> Result<AccessToken> {
        if code.is_empty() {
            bail!("authorization code must not be empty");
        }

        let url = format!("{}{}", self.base_url, TOKEN_PATH);
        let mut response = ureq::post(&url)
            .send_form([
                ("app_id", self.app_id.as_str()),
                ("app_secret", self.app_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
            ])
            .context("Failed to exchange authorization code")?;

        let token: AccessToken = response
            .body_mut()
            .read_json()
            .context("Failed to parse token response")?;

        self.save_token(&token)?;
        Ok(token)
    }

    /// Get the stored access token for API calls
    pub fn access_token(&self) -> Result<String> {
        let token = self
            .load_token()
            .context("Not authenticated: no stored access token")?;
        Ok(token.access_token)
    }

    /// Check if a stored access token is available
    pub fn is_authenticated(&self) -> bool {
        self.load_token().is_ok()
    }

    /// Revoke the stored access token with the service, then forget it
    pub fn revoke(&self) -> Result<()> {
        let token = self.load_token().context("No stored token to revoke")?;

        let url = format!("{}{}", self.base_url, REVOKE_PATH);
        ureq::post(&url)
            .header("Authorization", &format!("Bearer {}", token.access_token))
            .send_empty()
            .context("Failed to revoke access token")?;

        self.logout()
    }

    /// Forget the stored token locally without contacting the service
    pub fn logout(&self) -> Result<()> {
        if self.token_path.exists() {
            fs::remove_file(&self.token_path)?;
        }
        Ok(())
    }

    /// Load the stored token from disk
    pub fn load_token(&self) -> Result<AccessToken> {
        let content = fs::read_to_string(&self.token_path)?;
        let token: AccessToken = serde_json::from_str(&content)?;
        Ok(token)
    }

    /// Save a token to disk, stamping when it was stored
    fn save_token(&self, token: &AccessToken) -> Result<()> {
        if let Some(parent) = self.token_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut stored = token.clone();
        stored
            .issued_at
            .get_or_insert_with(|| chrono::Utc::now().timestamp());

        let content = serde_json::to_string_pretty(&stored)?;
        fs::write(&self.token_path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn auth(dir: &TempDir) -> HostedAuth {
        let credentials = Credentials {
            app_id: "app-123".to_string(),
            app_secret: "secret".to_string(),
        };
        HostedAuth::new(&credentials)
            .unwrap()
            .with_token_path(dir.path().join("token.json"))
    }

    #[test]
    fn test_authorize_url_contains_required_params() {
        let dir = TempDir::new().unwrap();
        let mut params = AuthorizeParams::new("https://example.com/callback", vec![
            "email.modify".to_string(),
            "email.send".to_string(),
        ]);
        params.state = Some("abc123".to_string());

        let url = auth(&dir).authorize_url(&params).unwrap();

        assert!(url.starts_with("https://api.stratus.email/oauth/authorize?"));
        assert!(url.contains("app_id=app-123"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Fexample.com%2Fcallback"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("scopes=email.modify%2Cemail.send"));
        assert!(url.contains("state=abc123"));
    }

    #[test]
    fn test_authorize_url_rejects_bad_redirect_uri() {
        let dir = TempDir::new().unwrap();
        let params = AuthorizeParams::new("not a url", vec!["email.modify".to_string()]);
        assert!(auth(&dir).authorize_url(&params).is_err());
    }

    #[test]
    fn test_authorize_url_rejects_empty_scopes() {
        let dir = TempDir::new().unwrap();
        let params = AuthorizeParams::new("https://example.com/cb", Vec::new());
        assert!(auth(&dir).authorize_url(&params).is_err());
    }

    #[test]
    fn test_authorize_url_rejects_oversized_state() {
        let dir = TempDir::new().unwrap();
        let mut params =
            AuthorizeParams::new("https://example.com/cb", vec!["email.modify".to_string()]);
        params.state = Some("x".repeat(256));
        assert!(auth(&dir).authorize_url(&params).is_err());
    }

    #[test]
    fn test_token_store_roundtrip() {
        let dir = TempDir::new().unwrap();
        let auth = auth(&dir);
        assert!(!auth.is_authenticated());

        let token = AccessToken {
            access_token: "tok-1".to_string(),
            account_id: "acc-1".to_string(),
            email_address: "user@example.com".to_string(),
            provider: "gmail".to_string(),
            issued_at: None,
        };
        auth.save_token(&token).unwrap();

        assert!(auth.is_authenticated());
        assert_eq!(auth.access_token().unwrap(), "tok-1");
        assert!(auth.load_token().unwrap().issued_at.is_some());

        auth.logout().unwrap();
        assert!(!auth.is_authenticated());
    }
}
