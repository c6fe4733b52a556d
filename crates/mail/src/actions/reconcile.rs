//! Pure category reconciliation
//!
//! Computes the category-id set a message should end up with, given the
//! names a caller wants added and removed. No I/O happens here: callers
//! fetch the catalog and the message's current state, these functions
//! only diff.

use crate::models::{Category, CategoryId};

/// A name-based folder operation found no folder with that name.
///
/// There is no identifier to mutate in that case, so the whole operation
/// fails before any request is issued.
#[derive(Debug, thiserror::Error)]
#[error("no folder named {0:?} exists for this account")]
pub struct ResolutionError(pub String);

/// Resolve requested category names to ids against a catalog.
///
/// Matching is exact and case-sensitive, on `name` when populated and on
/// `display_name` otherwise (the service fills exactly one of the two).
/// Names that match nothing are silently skipped: asking for a label that
/// doesn't exist is a no-op, not an error.
pub fn resolve_names(catalog: &[Category], names: &[&str]) -> Vec<CategoryId> {
    catalog
        .iter()
        .filter(|category| names.contains(&category.effective_name()))
        .map(|category| category.id.clone())
        .collect()
}

/// Compute the final category-id set for a message.
///
/// Additions resolve against the full catalog; removals are tested against
/// the message's current categories only, so removing a name the message
/// doesn't carry is harmless. The asymmetry is deliberate and matches the
/// service's permissive semantics. Pure and idempotent: reconciling an
/// already-reconciled state with empty intents returns it unchanged.
pub fn reconcile(
    current: &[Category],
    to_add: &[&str],
    to_remove: &[&str],
    catalog: &[Category],
) -> Vec<CategoryId> {
    let mut result: Vec<CategoryId> = Vec::new();

    for id in resolve_names(catalog, to_add) {
        if !result.contains(&id) {
            result.push(id);
        }
    }

    for category in current {
        if to_remove.contains(&category.effective_name()) {
            continue;
        }
        if !result.contains(&category.id) {
            result.push(category.id.clone());
        }
    }

    result
}

/// Find the folder with exactly this canonical name. First match wins.
pub fn find_folder(catalog: &[Category], name: &str) -> Option<CategoryId> {
    catalog
        .iter()
        .find(|folder| folder.name == name)
        .map(|folder| folder.id.clone())
}
