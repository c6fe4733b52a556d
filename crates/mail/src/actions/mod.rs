//! High-level message mutations
//!
//! [`ActionHandler`] exposes the caller-facing operations; `reconcile`
//! holds the pure name-resolution and diff logic they build on.

mod handler;
mod reconcile;

pub use handler::{ActionHandler, names};
pub use reconcile::{ResolutionError, find_folder, reconcile, resolve_names};
