//! Session records and secure wrappers
//!
//! [`SessionRecord`] is the externally visible unit produced by the pipeline.
//! Secret material handed to the TOTP calculator is wrapped with the secrecy
//! crate so it never shows up in logs or debug output.

use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Target environment of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Dev,
    Qual,
    Prod,
}

/// Outcome of normalizing a free-form mode value
///
/// The mode is always usable; `warning` is set when the input was not
/// recognized and the fallback was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMode {
    pub mode: Mode,
    pub warning: Option<String>,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Dev => "dev",
            Mode::Qual => "qual",
            Mode::Prod => "prod",
        }
    }

    /// Normalize a user supplied mode, falling back to [`Mode::Prod`]
    pub fn normalize(value: &str) -> ParsedMode {
        let mode = match value.trim().to_ascii_lowercase().as_str() {
            "dev" => Some(Mode::Dev),
            "qual" => Some(Mode::Qual),
            "prod" => Some(Mode::Prod),
            _ => None,
        };

        match mode {
            Some(mode) => ParsedMode {
                mode,
                warning: None,
            },
            None => ParsedMode {
                mode: Mode::Prod,
                warning: Some(format!(
                    "invalid mode '{}'. Expected one of dev, qual, prod; using prod",
                    value
                )),
            },
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Cumulocity session resolved from a vault item
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub session_uri: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub host: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tenant: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub totp: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub totp_secret: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub login_type: String,

    // Vault specific
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub folder_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub folder_name: String,
}

impl SessionRecord {
    /// Mode as text, empty when the item carried no mode field
    pub fn mode_str(&self) -> &str {
        self.mode.as_ref().map(Mode::as_str).unwrap_or_default()
    }

    /// Picker label; typing in the picker filters on this text
    pub fn filter_value(&self) -> String {
        [
            self.session_uri.as_str(),
            self.host.as_str(),
            self.username.as_str(),
        ]
        .join(" ")
    }

    /// Human readable summary, also part of the searchable text
    pub fn description(&self) -> String {
        let mut out = format!("Username={}", self.username);
        if !self.tenant.is_empty() {
            out.push_str(&format!(", Tenant={}", self.tenant));
        }
        if !self.folder_name.is_empty() {
            out.push_str(&format!(", Folder={}", self.folder_name));
        }
        out.push_str(&format!(" | uri={}", self.session_uri));
        out
    }

    /// Copy without any credential material
    pub fn redacted(&self) -> SessionRecord {
        SessionRecord {
            session_uri: self.session_uri.clone(),
            name: self.name.clone(),
            host: self.host.clone(),
            username: self.username.clone(),
            tenant: self.tenant.clone(),
            mode: self.mode,
            login_type: self.login_type.clone(),
            folder_id: self.folder_id.clone(),
            folder_name: self.folder_name.clone(),
            ..Default::default()
        }
    }

    /// Re-attach password and TOTP secret from the unredacted record
    ///
    /// Returns false (and leaves `self` untouched) when `full` describes a
    /// different session.
    pub fn restore_credentials(&mut self, full: &SessionRecord) -> bool {
        if self.session_uri != full.session_uri {
            return false;
        }
        self.password = full.password.clone();
        self.totp_secret = full.totp_secret.clone();
        true
    }
}

impl fmt::Debug for SessionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn mask(value: &str) -> &'static str {
            if value.is_empty() {
                ""
            } else {
                "[REDACTED]"
            }
        }

        f.debug_struct("SessionRecord")
            .field("session_uri", &self.session_uri)
            .field("name", &self.name)
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &mask(&self.password))
            .field("tenant", &self.tenant)
            .field("totp", &mask(&self.totp))
            .field("totp_secret", &mask(&self.totp_secret))
            .field("mode", &self.mode)
            .field("login_type", &self.login_type)
            .field("folder_id", &self.folder_id)
            .field("folder_name", &self.folder_name)
            .finish()
    }
}

/// Wrapper for TOTP secrets read from vault items
///
/// The value may be a bare Base32 secret or an `otpauth://` URI.
#[derive(Clone, Debug)]
pub struct OtpSecret(Secret<String>);

impl OtpSecret {
    pub fn new(secret: String) -> Self {
        Self(Secret::new(secret))
    }

    /// Expose the secret value (use with caution!)
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<String> for OtpSecret {
    fn from(secret: String) -> Self {
        Self::new(secret)
    }
}

impl From<&str> for OtpSecret {
    fn from(secret: &str) -> Self {
        Self::new(secret.to_string())
    }
}

/// Wrapper for generated TOTP codes
#[derive(Clone, Debug)]
pub struct TotpToken(Secret<String>);

impl TotpToken {
    pub fn new(token: String) -> Self {
        Self(Secret::new(token))
    }

    /// Expose the token value (use with caution!)
    ///
    /// Only needed when writing the final session to stdout.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}
