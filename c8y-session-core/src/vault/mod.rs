//! Vault module
//!
//! Handles the vault CLI integration: process invocation, raw item decoding,
//! folder resolution and session listing.

pub mod cli;
pub mod client;
pub mod folder;
pub mod model;

// Public re-exports
pub use cli::VaultCli;
pub use client::{build_sessions, VaultClient};
pub use folder::{is_uid, FolderScope, FolderSelector};
pub use model::{VaultField, VaultFolder, VaultItem, VaultLogin, VaultUri};
