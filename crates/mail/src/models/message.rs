//! Message model representing a Stratus message

use super::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a message (Stratus message ID)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for MessageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A message as known to the remote service.
///
/// Only the slice of the resource the mutation layer needs is modelled
/// here; `categories` holds the message's labels (label-model accounts)
/// or its single folder (folder-model accounts).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub subject: String,
    pub snippet: String,
    pub starred: bool,
    pub unread: bool,
    pub received_at: DateTime<Utc>,
    pub categories: Vec<Category>,
}

impl Message {
    /// Create a new message builder
    pub fn builder(id: MessageId) -> MessageBuilder {
        MessageBuilder::new(id)
    }
}

/// Builder for creating Message instances
pub struct MessageBuilder {
    id: MessageId,
    subject: String,
    snippet: String,
    starred: bool,
    unread: bool,
    received_at: Option<DateTime<Utc>>,
    categories: Vec<Category>,
}

impl MessageBuilder {
    fn new(id: MessageId) -> Self {
        Self {
            id,
            subject: String::new(),
            snippet: String::new(),
            starred: false,
            unread: false,
            received_at: None,
            categories: Vec::new(),
        }
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = snippet.into();
        self
    }

    pub fn starred(mut self, starred: bool) -> Self {
        self.starred = starred;
        self
    }

    pub fn unread(mut self, unread: bool) -> Self {
        self.unread = unread;
        self
    }

    pub fn received_at(mut self, received_at: DateTime<Utc>) -> Self {
        self.received_at = Some(received_at);
        self
    }

    pub fn categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    pub fn build(self) -> Message {
        Message {
            id: self.id,
            subject: self.subject,
            snippet: self.snippet,
            starred: self.starred,
            unread: self.unread,
            received_at: self.received_at.unwrap_or_else(Utc::now),
            categories: self.categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let message = Message::builder(MessageId::new("m1")).build();
        assert_eq!(message.id.as_str(), "m1");
        assert!(!message.starred);
        assert!(!message.unread);
        assert!(message.categories.is_empty());
    }

    #[test]
    fn test_builder_sets_fields() {
        let message = Message::builder(MessageId::new("m1"))
            .subject("Hello")
            .starred(true)
            .unread(true)
            .categories(vec![Category::new("l1", "inbox")])
            .build();
        assert_eq!(message.subject, "Hello");
        assert!(message.starred);
        assert_eq!(message.categories.len(), 1);
    }
}
