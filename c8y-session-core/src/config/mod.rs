//! Configuration module
//!
//! Handles the settings that control how the vault CLI is invoked and how
//! sessions are presented.

use serde::{Deserialize, Serialize};

pub mod toml_config;

/// Runtime settings
///
/// Every field has a default, so an absent or partial config file is fine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Vault CLI executable, looked up on PATH
    pub program: String,

    /// Environment variable holding the vault session token
    pub session_env: String,

    /// Folder used when none is given on the command line
    pub default_folder: String,

    /// Scheme of the synthesized session URI (`<scheme>://<item-id>`)
    pub uri_scheme: String,

    /// Skip the picker when exactly one session matches
    pub auto_select_single: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            program: "bw".to_string(),
            session_env: "BW_SESSION".to_string(),
            default_folder: "c8y".to_string(),
            uri_scheme: "vault".to_string(),
            auto_select_single: true,
        }
    }
}

impl Settings {
    /// Validate the settings
    pub fn validate(&self) -> Result<(), String> {
        if self.program.trim().is_empty() {
            return Err("program cannot be empty".to_string());
        }

        if self.session_env.trim().is_empty() {
            return Err("session_env cannot be empty".to_string());
        }

        if self.uri_scheme.is_empty()
            || !self
                .uri_scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
        {
            return Err(format!("invalid uri_scheme '{}'", self.uri_scheme));
        }

        Ok(())
    }
}
