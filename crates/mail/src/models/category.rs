//! Category model representing a Stratus label or folder

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a category (Stratus label/folder ID)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CategoryId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CategoryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A label or folder attached to a message.
///
/// The service populates exactly one of `name` (canonical, lowercase for
/// well-known categories) or `display_name` (user-visible, set for custom
/// categories that carry no canonical name). [`Category::effective_name`]
/// applies that rule when matching by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
}

impl Category {
    /// Create a category with a canonical name
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            display_name: String::new(),
        }
    }

    /// Create a category known only by its display name
    pub fn with_display_name(id: impl Into<CategoryId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            display_name: display_name.into(),
        }
    }

    /// The name this category matches on: `name` when populated,
    /// `display_name` otherwise.
    pub fn effective_name(&self) -> &str {
        if !self.name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }
}

/// How the account organizes messages: many labels per message, or a
/// single folder. Fixed per provider, read from the account's
/// `organizer_unit` and injected once at handler construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryModel {
    Labels,
    Folders,
}

impl CategoryModel {
    /// Parse the account payload's `organizer_unit` string
    pub fn from_organizer_unit(unit: &str) -> Option<Self> {
        match unit {
            "label" => Some(Self::Labels),
            "folder" => Some(Self::Folders),
            _ => None,
        }
    }

    /// The wire name of this model
    pub fn organizer_unit(self) -> &'static str {
        match self {
            Self::Labels => "label",
            Self::Folders => "folder",
        }
    }
}

impl fmt::Display for CategoryModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.organizer_unit())
    }
}
