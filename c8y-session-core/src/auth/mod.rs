//! Authentication module
//!
//! Handles TOTP secret decoding and code generation.

pub mod base32;
pub mod totp;
