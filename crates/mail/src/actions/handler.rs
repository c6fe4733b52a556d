//! Action handler for message mutations
//!
//! Turns one logical intent (star, archive, move…) into per-message
//! update requests against the remote service. Field updates accept a
//! batch of ids; the name-based operations work on one message at a time
//! because they must fetch that message's current categories first.

use anyhow::Result;
use log::{debug, info};
use serde_json::{Map, Value, json};
use std::sync::Arc;

use super::reconcile::{ResolutionError, find_folder, reconcile};
use crate::batch::{
    BatchExecutor, BatchResult, DEFAULT_CONCURRENCY, ValidationError, aggregate, build_requests,
};
use crate::models::{CategoryId, CategoryModel, MessageId};
use crate::service::MessageApi;

/// Well-known category names used by the high-level operations
pub mod names {
    pub const INBOX: &str = "inbox";
    pub const ARCHIVE: &str = "archive";
    pub const TRASH: &str = "trash";
}

/// Handler for message actions like star, archive and label changes.
///
/// The account's category model is injected once at construction and every
/// operation branches on it; a model cannot change mid-batch. Per-message
/// failures end up in the returned [`BatchResult`]; only pre-flight
/// validation and name-resolution failures fail the call itself.
pub struct ActionHandler {
    api: Arc<dyn MessageApi>,
    model: CategoryModel,
    executor: BatchExecutor,
}

impl ActionHandler {
    /// Create a handler with the default batch concurrency
    pub fn new(api: Arc<dyn MessageApi>, model: CategoryModel) -> Result<Self> {
        Self::with_concurrency(api, model, DEFAULT_CONCURRENCY)
    }

    /// Create a handler with a caller-chosen batch concurrency
    pub fn with_concurrency(
        api: Arc<dyn MessageApi>,
        model: CategoryModel,
        workers: usize,
    ) -> Result<Self> {
        Ok(Self {
            api,
            model,
            executor: BatchExecutor::with_concurrency(workers)?,
        })
    }

    /// Star messages
    pub fn star(&self, ids: &[MessageId]) -> Result<BatchResult> {
        self.update_field(ids, field("starred", json!(true)))
    }

    /// Unstar messages
    pub fn unstar(&self, ids: &[MessageId]) -> Result<BatchResult> {
        self.update_field(ids, field("starred", json!(false)))
    }

    /// Mark messages as read
    pub fn mark_as_read(&self, ids: &[MessageId]) -> Result<BatchResult> {
        self.update_field(ids, field("unread", json!(false)))
    }

    /// Mark messages as unread
    pub fn mark_as_unread(&self, ids: &[MessageId]) -> Result<BatchResult> {
        self.update_field(ids, field("unread", json!(true)))
    }

    /// Move messages to a folder by id (folder-model accounts only)
    pub fn move_to_folder(&self, ids: &[MessageId], folder_id: &CategoryId) -> Result<BatchResult> {
        self.ensure_model(CategoryModel::Folders)?;
        if folder_id.as_str().is_empty() {
            return Err(ValidationError::EmptyCategoryId.into());
        }
        self.update_field(ids, field("folder_id", json!(folder_id.as_str())))
    }

    /// Replace messages' label sets by id (label-model accounts only)
    pub fn move_to_labels(
        &self,
        ids: &[MessageId],
        label_ids: &[CategoryId],
    ) -> Result<BatchResult> {
        self.ensure_model(CategoryModel::Labels)?;
        if label_ids.iter().any(|label| label.as_str().is_empty()) {
            return Err(ValidationError::EmptyCategoryId.into());
        }
        let values: Vec<Value> = label_ids
            .iter()
            .map(|label| json!(label.as_str()))
            .collect();
        self.update_field(ids, field("label_ids", Value::Array(values)))
    }

    /// Add labels to a message by name
    pub fn add_labels(&self, id: &MessageId, labels: &[&str]) -> Result<BatchResult> {
        self.update_labels(id, labels, &[])
    }

    /// Remove labels from a message by name
    pub fn remove_labels(&self, id: &MessageId, labels: &[&str]) -> Result<BatchResult> {
        self.update_labels(id, &[], labels)
    }

    /// Archive a message (remove it from the inbox)
    pub fn archive(&self, id: &MessageId) -> Result<BatchResult> {
        info!("Archiving message {}", id.as_str());
        match self.model {
            CategoryModel::Labels => self.update_labels(id, &[], &[names::INBOX]),
            CategoryModel::Folders => self.update_folder(id, names::ARCHIVE),
        }
    }

    /// Put an archived message back in the inbox
    pub fn unarchive(&self, id: &MessageId) -> Result<BatchResult> {
        info!("Unarchiving message {}", id.as_str());
        match self.model {
            CategoryModel::Labels => self.update_labels(id, &[names::INBOX], &[names::ARCHIVE]),
            CategoryModel::Folders => self.update_folder(id, names::INBOX),
        }
    }

    /// Move a message to trash
    pub fn trash(&self, id: &MessageId) -> Result<BatchResult> {
        info!("Trashing message {}", id.as_str());
        match self.model {
            CategoryModel::Labels => self.update_labels(id, &[names::TRASH], &[names::INBOX]),
            CategoryModel::Folders => self.update_folder(id, names::TRASH),
        }
    }

    /// Move a message between categories by name.
    ///
    /// Label-model accounts add `to` and remove `from`; folder-model
    /// accounts only care about the destination.
    pub fn move_to(&self, id: &MessageId, from: &str, to: &str) -> Result<BatchResult> {
        info!("Moving message {} from {from:?} to {to:?}", id.as_str());
        match self.model {
            CategoryModel::Labels => self.update_labels(id, &[to], &[from]),
            CategoryModel::Folders => self.update_folder(id, to),
        }
    }

    /// Reconcile one message's label set against add/remove name intents
    /// and push the result.
    fn update_labels(
        &self,
        id: &MessageId,
        to_add: &[&str],
        to_remove: &[&str],
    ) -> Result<BatchResult> {
        let catalog = self.api.list_labels()?;
        let message = self.api.get_message(id)?;
        let target = reconcile(&message.categories, to_add, to_remove, &catalog);
        debug!(
            "reconciled message {} to {} label(s)",
            id.as_str(),
            target.len()
        );
        self.move_to_labels(std::slice::from_ref(id), &target)
    }

    /// Resolve a folder name to its id and move one message there.
    ///
    /// A name that matches no folder fails the whole call with
    /// [`ResolutionError`]; no request is issued.
    fn update_folder(&self, id: &MessageId, folder: &str) -> Result<BatchResult> {
        let folders = self.api.list_folders()?;
        let folder_id =
            find_folder(&folders, folder).ok_or_else(|| ResolutionError(folder.to_string()))?;
        self.move_to_folder(std::slice::from_ref(id), &folder_id)
    }

    /// Fan out one field payload across the batch, execute, aggregate.
    fn update_field(&self, ids: &[MessageId], fields: Map<String, Value>) -> Result<BatchResult> {
        let requests = build_requests(ids, &fields)?;
        let outcomes = self.executor.execute(self.api.as_ref(), &requests);
        Ok(aggregate(ids, outcomes))
    }

    fn ensure_model(&self, expected: CategoryModel) -> Result<(), ValidationError> {
        if self.model != expected {
            return Err(ValidationError::ModelMismatch {
                expected,
                actual: self.model,
            });
        }
        Ok(())
    }
}

fn field(name: &str, value: Value) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert(name.to_string(), value);
    fields
}
