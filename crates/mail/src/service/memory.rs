//! In-memory service implementation
//!
//! Mimics the remote service's mutation semantics against local state.
//! Used by the test suite and as a stub when no live account is wired up.
//! Supports failure injection per message id and counts transport calls,
//! which the batch tests lean on.

use anyhow::{Result, bail};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::MessageApi;
use crate::models::{Category, Message, MessageId};

/// In-memory implementation of [`MessageApi`]
pub struct InMemoryService {
    labels: RwLock<Vec<Category>>,
    folders: RwLock<Vec<Category>>,
    messages: RwLock<HashMap<String, Message>>,
    /// Message ids whose updates should fail (injected transport errors)
    fail_ids: RwLock<HashSet<String>>,
    update_calls: AtomicUsize,
}

impl InMemoryService {
    /// Create a new empty in-memory service
    pub fn new() -> Self {
        Self {
            labels: RwLock::new(Vec::new()),
            folders: RwLock::new(Vec::new()),
            messages: RwLock::new(HashMap::new()),
            fail_ids: RwLock::new(HashSet::new()),
            update_calls: AtomicUsize::new(0),
        }
    }

    /// Add a label to the account catalog
    pub fn add_label(&self, label: Category) {
        self.labels.write().unwrap().push(label);
    }

    /// Add a folder to the account catalog
    pub fn add_folder(&self, folder: Category) {
        self.folders.write().unwrap().push(folder);
    }

    /// Insert or replace a message
    pub fn insert_message(&self, message: Message) {
        let id = message.id.as_str().to_string();
        self.messages.write().unwrap().insert(id, message);
    }

    /// Make every future update of `id` fail with a transport error
    pub fn fail_updates_for(&self, id: &MessageId) {
        self.fail_ids
            .write()
            .unwrap()
            .insert(id.as_str().to_string());
    }

    /// Number of update calls received so far, failures included
    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    /// Peek at a stored message
    pub fn message(&self, id: &MessageId) -> Option<Message> {
        self.messages.read().unwrap().get(id.as_str()).cloned()
    }

    fn resolve_category(catalog: &[Category], id: &str) -> Category {
        catalog
            .iter()
            .find(|c| c.id.as_str() == id)
            .cloned()
            .unwrap_or_else(|| Category::new(id, ""))
    }
}

impl Default for InMemoryService {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageApi for InMemoryService {
    fn list_labels(&self) -> Result<Vec<Category>> {
        Ok(self.labels.read().unwrap().clone())
    }

    fn list_folders(&self) -> Result<Vec<Category>> {
        Ok(self.folders.read().unwrap().clone())
    }

    fn get_message(&self, id: &MessageId) -> Result<Message> {
        match self.messages.read().unwrap().get(id.as_str()) {
            Some(message) => Ok(message.clone()),
            None => bail!("message {} not found", id.as_str()),
        }
    }

    fn update_message(&self, id: &MessageId, fields: &Map<String, Value>) -> Result<Value> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_ids.read().unwrap().contains(id.as_str()) {
            bail!("injected transport failure for message {}", id.as_str());
        }

        let mut messages = self.messages.write().unwrap();
        let Some(message) = messages.get_mut(id.as_str()) else {
            bail!("message {} not found", id.as_str());
        };

        for (key, value) in fields {
            match key.as_str() {
                "starred" => {
                    if let Some(flag) = value.as_bool() {
                        message.starred = flag;
                    }
                }
                "unread" => {
                    if let Some(flag) = value.as_bool() {
                        message.unread = flag;
                    }
                }
                "label_ids" => {
                    if let Some(ids) = value.as_array() {
                        let labels = self.labels.read().unwrap();
                        message.categories = ids
                            .iter()
                            .filter_map(|v| v.as_str())
                            .map(|label_id| Self::resolve_category(&labels, label_id))
                            .collect();
                    }
                }
                "folder_id" => {
                    if let Some(folder_id) = value.as_str() {
                        let folders = self.folders.read().unwrap();
                        message.categories = vec![Self::resolve_category(&folders, folder_id)];
                    }
                }
                other => bail!("unsupported update field {other:?}"),
            }
        }

        Ok(serde_json::to_value(&*message)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn starred_fields(starred: bool) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("starred".to_string(), json!(starred));
        fields
    }

    #[test]
    fn test_update_applies_field_and_counts_call() {
        let service = InMemoryService::new();
        service.insert_message(Message::builder(MessageId::new("m1")).build());

        let body = service
            .update_message(&MessageId::new("m1"), &starred_fields(true))
            .unwrap();

        assert_eq!(body["starred"], json!(true));
        assert!(service.message(&MessageId::new("m1")).unwrap().starred);
        assert_eq!(service.update_calls(), 1);
    }

    #[test]
    fn test_injected_failure_still_counts_as_call() {
        let service = InMemoryService::new();
        service.insert_message(Message::builder(MessageId::new("m1")).build());
        service.fail_updates_for(&MessageId::new("m1"));

        let result = service.update_message(&MessageId::new("m1"), &starred_fields(true));
        assert!(result.is_err());
        assert_eq!(service.update_calls(), 1);
    }

    #[test]
    fn test_label_ids_update_rewrites_categories() {
        let service = InMemoryService::new();
        service.add_label(Category::new("l1", "inbox"));
        service.add_label(Category::new("l2", "archive"));
        service.insert_message(
            Message::builder(MessageId::new("m1"))
                .categories(vec![Category::new("l1", "inbox")])
                .build(),
        );

        let mut fields = Map::new();
        fields.insert("label_ids".to_string(), json!(["l2"]));
        service
            .update_message(&MessageId::new("m1"), &fields)
            .unwrap();

        let message = service.message(&MessageId::new("m1")).unwrap();
        assert_eq!(message.categories.len(), 1);
        assert_eq!(message.categories[0].id.as_str(), "l2");
    }
}
