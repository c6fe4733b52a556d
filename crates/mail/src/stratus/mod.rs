//! Stratus API integration
//!
//! This module provides:
//! - Hosted OAuth authentication (authorize URL, code exchange, revoke)
//! - The HTTP client for account, category and message endpoints
//! - Response normalization to domain models

mod auth;
mod client;
mod normalize;

pub use auth::{AccessToken, AuthorizeParams, HostedAuth, ResponseType};
pub use client::StratusClient;
pub use normalize::{normalize_account, normalize_category, normalize_message};

/// Stratus API response types
pub mod api {
    use serde::Deserialize;

    /// A label or folder as returned by the category endpoints.
    ///
    /// Exactly one of `name` and `display_name` is populated: canonical
    /// categories carry `name`, custom ones carry `display_name`.
    #[derive(Debug, Clone, Deserialize)]
    pub struct CategoryResponse {
        pub id: String,
        #[serde(default)]
        pub name: String,
        #[serde(default)]
        pub display_name: String,
        #[serde(default)]
        pub object: Option<String>,
        #[serde(default)]
        pub account_id: Option<String>,
    }

    /// Full message resource.
    ///
    /// Label-model accounts populate `labels`, folder-model accounts
    /// populate `folder`; never both.
    #[derive(Debug, Clone, Deserialize)]
    pub struct MessageResponse {
        pub id: String,
        #[serde(default)]
        pub thread_id: Option<String>,
        #[serde(default)]
        pub subject: String,
        #[serde(default)]
        pub snippet: String,
        #[serde(default)]
        pub starred: bool,
        #[serde(default)]
        pub unread: bool,
        /// Unix timestamp, seconds
        #[serde(default)]
        pub date: Option<i64>,
        #[serde(default)]
        pub labels: Option<Vec<CategoryResponse>>,
        #[serde(default)]
        pub folder: Option<CategoryResponse>,
    }

    /// Account resource; `organizer_unit` selects the category model
    #[derive(Debug, Clone, Deserialize)]
    pub struct AccountResponse {
        pub id: String,
        pub email_address: String,
        #[serde(default)]
        pub provider: String,
        pub organizer_unit: String,
        #[serde(default)]
        pub sync_state: Option<String>,
    }
}
