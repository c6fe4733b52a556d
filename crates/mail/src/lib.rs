//! Mail crate - Client library for the Stratus hosted email service
//!
//! This crate provides platform-independent access to a Stratus account:
//! - Domain models (Message, Category, Account)
//! - Hosted OAuth authentication and the HTTP client
//! - Batched mutation orchestration with per-message outcomes
//! - Action handlers for mutations (star, read/unread, archive, trash,
//!   label and folder reconciliation)
//!
//! Accounts come in two category models: label providers attach many
//! labels per message, folder providers keep each message in exactly one
//! folder. The model is read once from the account and injected into
//! [`ActionHandler`]; everything else branches on it internally.

pub mod actions;
pub mod batch;
pub mod config;
pub mod models;
pub mod service;
pub mod stratus;

pub use actions::{ActionHandler, ResolutionError, names};
pub use batch::{
    BatchExecutor, BatchResult, DEFAULT_CONCURRENCY, Outcome, RequestDescriptor, ValidationError,
    aggregate, build_requests,
};
pub use config::Credentials;
pub use models::{Account, Category, CategoryId, CategoryModel, Message, MessageId};
pub use service::{InMemoryService, MessageApi};
pub use stratus::{AccessToken, AuthorizeParams, HostedAuth, ResponseType, StratusClient};
