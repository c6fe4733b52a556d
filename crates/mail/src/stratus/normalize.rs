//! Normalization of Stratus API responses to domain models

use chrono::{DateTime, Utc};

use super::api::{AccountResponse, CategoryResponse, MessageResponse};
use crate::models::{Account, Category, CategoryId, Message, MessageId};

pub fn normalize_category(category: CategoryResponse) -> Category {
    Category {
        id: CategoryId::new(category.id),
        name: category.name,
        display_name: category.display_name,
    }
}

pub fn normalize_account(account: AccountResponse) -> Account {
    Account {
        id: account.id,
        email_address: account.email_address,
        provider: account.provider,
        organizer_unit: account.organizer_unit,
        sync_state: account.sync_state,
    }
}

/// Map an API message to the domain model.
///
/// The `labels` array (label-model accounts) and the single `folder`
/// object (folder-model accounts) both land in `categories`, so the
/// mutation layer sees one shape regardless of account model.
pub fn normalize_message(message: MessageResponse) -> Message {
    let categories = match (message.labels, message.folder) {
        (Some(labels), _) => labels.into_iter().map(normalize_category).collect(),
        (None, Some(folder)) => vec![normalize_category(folder)],
        (None, None) => Vec::new(),
    };

    let received_at = message
        .date
        .and_then(|seconds| DateTime::from_timestamp(seconds, 0))
        .unwrap_or_else(Utc::now);

    Message {
        id: MessageId::new(message.id),
        subject: message.subject,
        snippet: message.snippet,
        starred: message.starred,
        unread: message.unread,
        received_at,
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: &str, name: &str, display_name: &str) -> CategoryResponse {
        CategoryResponse {
            id: id.to_string(),
            name: name.to_string(),
            display_name: display_name.to_string(),
            object: None,
            account_id: None,
        }
    }

    fn base_message(id: &str) -> MessageResponse {
        MessageResponse {
            id: id.to_string(),
            thread_id: None,
            subject: "Subject".to_string(),
            snippet: String::new(),
            starred: false,
            unread: true,
            date: Some(1_700_000_000),
            labels: None,
            folder: None,
        }
    }

    #[test]
    fn test_labels_become_categories() {
        let mut message = base_message("m1");
        message.labels = Some(vec![
            category("l1", "inbox", ""),
            category("l2", "", "Receipts"),
        ]);

        let normalized = normalize_message(message);

        assert_eq!(normalized.categories.len(), 2);
        assert_eq!(normalized.categories[0].effective_name(), "inbox");
        assert_eq!(normalized.categories[1].effective_name(), "Receipts");
    }

    #[test]
    fn test_folder_becomes_single_category() {
        let mut message = base_message("m1");
        message.folder = Some(category("f1", "archive", ""));

        let normalized = normalize_message(message);

        assert_eq!(normalized.categories.len(), 1);
        assert_eq!(normalized.categories[0].id.as_str(), "f1");
    }

    #[test]
    fn test_date_maps_to_received_at() {
        let normalized = normalize_message(base_message("m1"));
        assert_eq!(normalized.received_at.timestamp(), 1_700_000_000);
    }
}
