//! Lenient Base32 decoding for TOTP secrets
//!
//! Secrets copied into a vault by hand often contain spaces, lower case
//! letters or lack padding. Decoding:
//! 1. Remove all whitespace
//! 2. Apply padding to 8-character boundaries
//! 3. Decode case-insensitively

use crate::error::OtpError;
use data_encoding::BASE32;

/// Remove whitespace from the input
fn clean(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Pad input string to 8-character boundaries
///
/// Formula: padding_length = (8 - (len % 8)) % 8
fn pad(input: &str) -> String {
    let padding_len = (8 - (input.len() % 8)) % 8;
    format!("{}{}", input, "=".repeat(padding_len))
}

/// Decode a Base32 secret to key bytes
pub fn decode_base32(input: &str) -> Result<Vec<u8>, OtpError> {
    let cleaned = clean(input);
    let cleaned = cleaned.trim_end_matches('=');
    if cleaned.is_empty() {
        return Err(OtpError::InvalidTotpSecret {
            reason: "secret is empty".to_string(),
        });
    }

    let padded = pad(cleaned);

    BASE32
        .decode(padded.to_uppercase().as_bytes())
        .map_err(|e| OtpError::InvalidTotpSecret {
            reason: format!("not valid Base32 ({})", e),
        })
}
