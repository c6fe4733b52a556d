//! Account model representing a connected Stratus account

use super::CategoryModel;
use serde::{Deserialize, Serialize};

/// A connected account as reported by the `/account` endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Opaque account identifier
    pub id: String,
    /// Email address the account is bound to
    pub email_address: String,
    /// Upstream provider name (e.g. "gmail", "exchange", "imap")
    pub provider: String,
    /// "label" or "folder"; selects the category model
    pub organizer_unit: String,
    /// Server-side sync state (e.g. "running", "stopped")
    pub sync_state: Option<String>,
}

impl Account {
    /// The category model this account's provider uses, if the
    /// `organizer_unit` string is recognized.
    pub fn category_model(&self) -> Option<CategoryModel> {
        CategoryModel::from_organizer_unit(&self.organizer_unit)
    }
}
