//! Error types for the session selector
//!
//! This module defines all error types used throughout the pipeline,
//! from the vault subprocess up to the interactive picker.

use thiserror::Error;

/// Main error type for session resolution
#[derive(Error, Debug)]
pub enum SessionError {
    /// Errors related to configuration loading/parsing
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors raised while talking to the vault CLI
    #[error("Vault error: {0}")]
    Vault(#[from] VaultError),

    /// Errors raised while selecting a session
    #[error("Selection error: {0}")]
    Picker(#[from] PickerError),

    /// Errors related to OTP/TOTP operations
    #[error("OTP error: {0}")]
    Otp(#[from] OtpError),

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors (result output)
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {message}")]
    LoadFailed { path: String, message: String },

    #[error("Failed to parse configuration file {path}: {message}")]
    ParseFailed { path: String, message: String },

    #[error("Configuration validation error: {message}")]
    ValidationError { message: String },
}

/// Vault CLI errors
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("could not find '{program}' on PATH. Check if the vault CLI is installed on your machine")]
    ToolNotFound { program: String },

    #[error("vault session not available. Expected {variable} to be defined and not empty")]
    NotAuthenticated { variable: String },

    #[error("failed to spawn '{program}': {reason}")]
    SpawnFailed { program: String, reason: String },

    #[error("malformed response from vault CLI: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    #[error("decoding vault CLI output was aborted: {reason}")]
    DecodeAborted { reason: String },

    #[error("{operation}: {source}")]
    Operation {
        /// What was being done, e.g. "list items"
        operation: String,
        #[source]
        source: Box<VaultError>,
    },
}

impl VaultError {
    /// Wraps an error with the operation that produced it.
    pub fn in_operation(operation: impl Into<String>, err: VaultError) -> Self {
        Self::Operation {
            operation: operation.into(),
            source: Box::new(err),
        }
    }

    /// Returns the innermost error, skipping any operation context.
    pub fn root(&self) -> &VaultError {
        match self {
            Self::Operation { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Interactive selection errors
#[derive(Error, Debug)]
pub enum PickerError {
    #[error("no matching sessions found")]
    NoMatch,

    #[error("session selection was aborted")]
    SelectionAborted,

    #[error("prompt failed: {reason}")]
    Prompt { reason: String },
}

/// OTP/TOTP operation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("Invalid TOTP secret: {reason}")]
    InvalidTotpSecret { reason: String },

    #[error("System time error")]
    TimeError,
}
