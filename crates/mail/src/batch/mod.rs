//! Batched mutation primitives
//!
//! A single logical mutation ("star these messages") fans out into one
//! independent `PUT /messages/{id}` per target message. This module owns
//! the pieces of that pipeline:
//! - [`build_requests`] expands ids + one field payload into per-message
//!   [`RequestDescriptor`]s, validating the batch before any network call
//! - [`BatchExecutor`] dispatches the descriptors concurrently
//! - [`aggregate`] zips the per-message [`Outcome`]s back into an ordered
//!   [`BatchResult`]
//!
//! A batch is best-effort, not a transaction: one message failing never
//! aborts its siblings, and the result always carries one entry per input
//! id so callers can see exactly which messages failed.

mod executor;

pub use executor::{BatchExecutor, DEFAULT_CONCURRENCY};

use serde_json::{Map, Value};

use crate::models::{CategoryModel, MessageId};

/// Rejected before dispatch: the batch itself is malformed.
///
/// Raised pre-flight, so no transport call has been made when callers see
/// one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("no message ids were provided")]
    EmptyBatch,
    #[error("message ids must be non-empty strings")]
    EmptyMessageId,
    #[error("category ids must be non-empty strings")]
    EmptyCategoryId,
    #[error("operation requires a {expected}-model account, this account uses {actual}s")]
    ModelMismatch {
        expected: CategoryModel,
        actual: CategoryModel,
    },
}

/// One dispatch-ready mutation unit for one message.
///
/// Immutable once built; every descriptor in a batch carries an identical
/// copy of the field payload.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub message_id: MessageId,
    pub fields: Map<String, Value>,
}

/// Terminal result of one request in a batch
#[derive(Debug)]
pub enum Outcome {
    /// Decoded response body from the service
    Success(Value),
    /// The request failed; siblings in the batch were unaffected
    Failure(anyhow::Error),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn as_success(&self) -> Option<&Value> {
        match self {
            Self::Success(body) => Some(body),
            Self::Failure(_) => None,
        }
    }

    pub fn as_failure(&self) -> Option<&anyhow::Error> {
        match self {
            Self::Success(_) => None,
            Self::Failure(err) => Some(err),
        }
    }
}

/// Ordered mapping from message id to outcome.
///
/// Entry order equals the order the caller supplied the ids, not the order
/// requests happened to complete, and there is exactly one entry per input
/// id, failed ones included.
#[derive(Debug, Default)]
pub struct BatchResult {
    entries: Vec<(MessageId, Outcome)>,
}

impl BatchResult {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Outcome for a specific message id
    pub fn get(&self, id: &MessageId) -> Option<&Outcome> {
        self.entries
            .iter()
            .find(|(entry_id, _)| entry_id == id)
            .map(|(_, outcome)| outcome)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(MessageId, Outcome)> {
        self.entries.iter()
    }

    /// Message ids in caller order
    pub fn ids(&self) -> impl Iterator<Item = &MessageId> {
        self.entries.iter().map(|(id, _)| id)
    }

    /// The entries that failed, in caller order
    pub fn failures(&self) -> impl Iterator<Item = (&MessageId, &anyhow::Error)> {
        self.entries
            .iter()
            .filter_map(|(id, outcome)| outcome.as_failure().map(|err| (id, err)))
    }

    pub fn all_succeeded(&self) -> bool {
        self.entries.iter().all(|(_, outcome)| outcome.is_success())
    }
}

impl IntoIterator for BatchResult {
    type Item = (MessageId, Outcome);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Expand a batch of message ids and one field payload into per-message
/// request descriptors.
///
/// Fails fast on an empty batch or a blank id: a malformed batch is
/// rejected whole, before any request is dispatched.
pub fn build_requests(
    ids: &[MessageId],
    fields: &Map<String, Value>,
) -> Result<Vec<RequestDescriptor>, ValidationError> {
    if ids.is_empty() {
        return Err(ValidationError::EmptyBatch);
    }
    if ids.iter().any(|id| id.as_str().is_empty()) {
        return Err(ValidationError::EmptyMessageId);
    }

    Ok(ids
        .iter()
        .map(|id| RequestDescriptor {
            message_id: id.clone(),
            fields: fields.clone(),
        })
        .collect())
}

/// Zip message ids with their outcomes into an ordered [`BatchResult`].
///
/// The two slices are order-aligned by construction ([`build_requests`]
/// never reorders, [`BatchExecutor::execute`] returns outcomes in request
/// order), so this is a plain positional zip. No I/O, cannot fail.
pub fn aggregate(ids: &[MessageId], outcomes: Vec<Outcome>) -> BatchResult {
    debug_assert_eq!(ids.len(), outcomes.len());
    BatchResult {
        entries: ids.iter().cloned().zip(outcomes).collect(),
    }
}
