//! Folder identifier resolution
//!
//! A folder can be given either as its UID, which is passed straight to the
//! CLI, or as a name/pattern that has to be looked up first.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    static ref UID_PATTERN: Regex = Regex::new(
        r"^[a-fA-F0-9]{8}-[a-fA-F0-9]{4}-4[a-fA-F0-9]{3}-[89abAB][a-fA-F0-9]{3}-[a-fA-F0-9]{12}$"
    )
    .expect("Failed to compile UID pattern");
}

/// Check for the canonical (version 4 shaped) UID format
pub fn is_uid(value: &str) -> bool {
    UID_PATTERN.is_match(value)
}

/// How the user asked to scope the item query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderSelector {
    /// No folder filtering
    All,
    /// Direct folder id, no lookup needed
    Id(String),
    /// Folder name or pattern, resolved through `list folders --search`
    Name(String),
}

impl FolderSelector {
    pub fn parse(identifier: &str) -> Self {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            FolderSelector::All
        } else if is_uid(identifier) {
            FolderSelector::Id(identifier.to_string())
        } else {
            FolderSelector::Name(identifier.to_string())
        }
    }
}

/// Resolved folder scope used to filter items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FolderScope {
    /// Every item is considered
    #[default]
    All,
    /// Items were already narrowed server-side by `--folderid`
    Id(String),
    /// Only items in one of these folders (id -> name)
    Named(HashMap<String, String>),
}

impl FolderScope {
    /// Folder id to pass as `--folderid`, if any
    pub fn folder_id(&self) -> Option<&str> {
        match self {
            FolderScope::Id(id) => Some(id),
            _ => None,
        }
    }

    /// id -> name lookup used to label sessions
    pub fn names(&self) -> Option<&HashMap<String, String>> {
        match self {
            FolderScope::Named(names) => Some(names),
            _ => None,
        }
    }

    /// Whether an item in `folder_id` belongs to this scope
    ///
    /// An id scope relies on `--folderid` alone. An empty name map does not
    /// filter anything.
    pub fn contains(&self, folder_id: &str) -> bool {
        match self {
            FolderScope::All | FolderScope::Id(_) => true,
            FolderScope::Named(names) => names.is_empty() || names.contains_key(folder_id),
        }
    }
}
