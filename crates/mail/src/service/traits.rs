//! Service trait definitions

use crate::models::{Category, Message, MessageId};
use anyhow::Result;
use serde_json::{Map, Value};

/// Trait for the remote message service.
///
/// This trait abstracts the three collaborators the mutation layer needs:
/// the category catalog (labels or folders), the current state of a single
/// message, and the per-message update call. The HTTP client implements it
/// against the live API; [`crate::service::InMemoryService`] implements it
/// for tests and offline use.
pub trait MessageApi: Send + Sync {
    /// Full label catalog for the account
    fn list_labels(&self) -> Result<Vec<Category>>;

    /// Full folder catalog for the account
    fn list_folders(&self) -> Result<Vec<Category>>;

    /// Fetch a message's current server-side state
    fn get_message(&self, id: &MessageId) -> Result<Message>;

    /// Apply a field update to one message and return the decoded
    /// response body (`PUT /messages/{id}`)
    fn update_message(&self, id: &MessageId, fields: &Map<String, Value>) -> Result<Value>;
}
