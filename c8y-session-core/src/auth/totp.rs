//! TOTP (Time-based One-Time Password) generation
//!
//! Implements RFC 6238 TOTP using the totp-lite crate. Codes that are about
//! to expire are never handed out: inside the last few seconds of a window
//! the code of the next window is returned instead.

use crate::auth::base32::decode_base32;
use crate::error::OtpError;
use crate::types::{OtpSecret, SessionRecord, TotpToken};
use chrono::{DateTime, Utc};
use totp_lite::{Sha1, Sha256, Sha512};
use tracing::warn;
use url::Url;

/// RFC 6238 default time step
pub const DEFAULT_PERIOD: u64 = 30;

/// Default number of digits
pub const DEFAULT_DIGITS: u32 = 6;

/// Codes with less validity than this are skipped in favour of the next window
pub const EXPIRY_GUARD_SECS: u64 = 5;

/// Hash algorithm for TOTP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashAlgorithm {
    #[default]
    Sha1,
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    fn parse(value: &str) -> Result<Self, OtpError> {
        match value.to_ascii_uppercase().as_str() {
            "SHA1" => Ok(Self::Sha1),
            "SHA256" => Ok(Self::Sha256),
            "SHA512" => Ok(Self::Sha512),
            other => Err(OtpError::InvalidTotpSecret {
                reason: format!("unsupported algorithm '{}'", other),
            }),
        }
    }
}

/// Decoded TOTP parameters
#[derive(Clone, PartialEq, Eq)]
pub struct TotpParams {
    key: Vec<u8>,
    pub algorithm: HashAlgorithm,
    pub digits: u32,
    pub period: u64,
}

impl std::fmt::Debug for TotpParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TotpParams")
            .field("key", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .field("digits", &self.digits)
            .field("period", &self.period)
            .finish()
    }
}

impl TotpParams {
    /// Parse a bare Base32 secret or an `otpauth://totp/...` URI
    pub fn parse(secret: &OtpSecret) -> Result<Self, OtpError> {
        let value = secret.expose().trim();
        if value.to_ascii_lowercase().starts_with("otpauth://") {
            Self::from_uri(value)
        } else {
            Ok(Self {
                key: decode_base32(value)?,
                algorithm: HashAlgorithm::default(),
                digits: DEFAULT_DIGITS,
                period: DEFAULT_PERIOD,
            })
        }
    }

    fn from_uri(value: &str) -> Result<Self, OtpError> {
        let invalid = |reason: String| OtpError::InvalidTotpSecret { reason };

        let uri = Url::parse(value).map_err(|e| invalid(format!("invalid otpauth URI ({})", e)))?;
        if uri.host_str() != Some("totp") {
            return Err(invalid("only otpauth://totp URIs are supported".to_string()));
        }

        let mut key = None;
        let mut algorithm = HashAlgorithm::default();
        let mut digits = DEFAULT_DIGITS;
        let mut period = DEFAULT_PERIOD;

        for (name, val) in uri.query_pairs() {
            match name.to_ascii_lowercase().as_str() {
                "secret" => key = Some(decode_base32(&val)?),
                "algorithm" => algorithm = HashAlgorithm::parse(&val)?,
                "digits" => {
                    digits = val
                        .parse()
                        .ok()
                        .filter(|d| (1..=10).contains(d))
                        .ok_or_else(|| invalid(format!("invalid digits '{}'", val)))?
                }
                "period" => {
                    period = val
                        .parse()
                        .ok()
                        .filter(|p| *p > 0)
                        .ok_or_else(|| invalid(format!("invalid period '{}'", val)))?
                }
                _ => {}
            }
        }

        Ok(Self {
            key: key.ok_or_else(|| invalid("otpauth URI has no secret".to_string()))?,
            algorithm,
            digits,
            period,
        })
    }

    /// Code for the window containing `unix_secs`
    pub fn code_at_secs(&self, unix_secs: u64) -> TotpToken {
        let token = match self.algorithm {
            HashAlgorithm::Sha1 => {
                totp_lite::totp_custom::<Sha1>(self.period, self.digits, &self.key, unix_secs)
            }
            HashAlgorithm::Sha256 => {
                totp_lite::totp_custom::<Sha256>(self.period, self.digits, &self.key, unix_secs)
            }
            HashAlgorithm::Sha512 => {
                totp_lite::totp_custom::<Sha512>(self.period, self.digits, &self.key, unix_secs)
            }
        };
        TotpToken::new(token)
    }

    /// Time to use for a code requested at `unix_secs`
    ///
    /// Moves to the next window when fewer than [`EXPIRY_GUARD_SECS`]
    /// remain in the current one.
    pub fn guarded_time(&self, unix_secs: u64) -> u64 {
        let remaining = self.period - (unix_secs % self.period);
        if remaining < EXPIRY_GUARD_SECS {
            unix_secs + self.period
        } else {
            unix_secs
        }
    }
}

fn unix_secs(at: DateTime<Utc>) -> Result<u64, OtpError> {
    u64::try_from(at.timestamp()).map_err(|_| OtpError::TimeError)
}

/// Code for the window containing `at`, without the expiry guard
pub fn generate_totp(secret: &OtpSecret, at: DateTime<Utc>) -> Result<TotpToken, OtpError> {
    let params = TotpParams::parse(secret)?;
    Ok(params.code_at_secs(unix_secs(at)?))
}

/// Code to hand out at `now`, skipping windows that are about to roll over
pub fn current_code_at(secret: &OtpSecret, now: DateTime<Utc>) -> Result<TotpToken, OtpError> {
    let params = TotpParams::parse(secret)?;
    let at = params.guarded_time(unix_secs(now)?);
    Ok(params.code_at_secs(at))
}

/// Code to hand out right now
pub fn current_code(secret: &OtpSecret) -> Result<TotpToken, OtpError> {
    current_code_at(secret, Utc::now())
}

/// Fill in the session's TOTP code if it carries a secret
///
/// An invalid secret is not fatal: the session is returned without a code.
pub fn attach_totp(session: &mut SessionRecord) {
    if session.totp_secret.is_empty() {
        return;
    }

    match current_code(&OtpSecret::from(session.totp_secret.as_str())) {
        Ok(token) => session.totp = token.expose().to_string(),
        Err(e) => warn!(session = %session.session_uri, "Skipping TOTP code: {}", e),
    }
}
