//! Stratus API HTTP client
//!
//! Thin wrappers over the account, category and message endpoints.
//! Uses synchronous HTTP (ureq) to be executor-agnostic; batching and
//! concurrency live a layer up in [`crate::batch`].

use anyhow::{Context, Result};
use log::debug;
use serde_json::{Map, Value};

use super::api::{AccountResponse, CategoryResponse, MessageResponse};
use super::normalize::{normalize_account, normalize_category, normalize_message};
use crate::models::{Account, Category, CategoryModel, Message, MessageId};
use crate::service::MessageApi;

/// Stratus API base URL (US region)
pub const BASE_URL: &str = "https://api.stratus.email";

/// Authenticated client for one Stratus account
pub struct StratusClient {
    access_token: String,
    base_url: String,
}

impl StratusClient {
    /// Create a client from an access token issued by the hosted flow
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Override the API base URL (regions, self-hosted deployments)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// Fetch the authenticated account
    pub fn get_account(&self) -> Result<Account> {
        let url = format!("{}/account", self.base_url);

        let mut response = ureq::get(&url)
            .header("Authorization", &self.bearer())
            .call()
            .context("Failed to send account request")?;

        let account: AccountResponse = response
            .body_mut()
            .read_json()
            .context("Failed to parse account response")?;

        Ok(normalize_account(account))
    }

    /// The account's category model (label vs folder provider).
    ///
    /// Read this once and inject it into the action handler; the model is
    /// fixed per account and must not be re-read mid-batch.
    pub fn category_model(&self) -> Result<CategoryModel> {
        let account = self.get_account()?;
        account.category_model().with_context(|| {
            format!(
                "Account {} reports unknown organizer unit {:?}",
                account.id, account.organizer_unit
            )
        })
    }

    fn list_categories(&self, path: &str) -> Result<Vec<Category>> {
        let url = format!("{}{}", self.base_url, path);

        let mut response = ureq::get(&url)
            .header("Authorization", &self.bearer())
            .call()
            .with_context(|| format!("Failed to send {path} listing request"))?;

        // list endpoints return a bare JSON array
        let categories: Vec<CategoryResponse> = response
            .body_mut()
            .read_json()
            .with_context(|| format!("Failed to parse {path} listing response"))?;

        Ok(categories.into_iter().map(normalize_category).collect())
    }
}

impl MessageApi for StratusClient {
    fn list_labels(&self) -> Result<Vec<Category>> {
        self.list_categories("/labels")
    }

    fn list_folders(&self) -> Result<Vec<Category>> {
        self.list_categories("/folders")
    }

    fn get_message(&self, id: &MessageId) -> Result<Message> {
        let url = format!("{}/messages/{}", self.base_url, id.as_str());

        let mut response = ureq::get(&url)
            .header("Authorization", &self.bearer())
            .call()
            .with_context(|| format!("Failed to fetch message {}", id.as_str()))?;

        let message: MessageResponse = response
            .body_mut()
            .read_json()
            .context("Failed to parse message response")?;

        Ok(normalize_message(message))
    }

    fn update_message(&self, id: &MessageId, fields: &Map<String, Value>) -> Result<Value> {
        let url = format!("{}/messages/{}", self.base_url, id.as_str());
        debug!("PUT {url}");

        let mut response = ureq::put(&url)
            .header("Authorization", &self.bearer())
            .send_json(fields)
            .with_context(|| format!("Failed to update message {}", id.as_str()))?;

        response
            .body_mut()
            .read_json()
            .context("Failed to parse update response")
    }
}
