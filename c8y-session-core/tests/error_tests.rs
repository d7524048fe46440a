//! Unit tests for error types and conversions

use c8y_session_core::error::{ConfigError, OtpError, PickerError, SessionError, VaultError};

#[test]
fn test_config_error_display() {
    let error = ConfigError::ParseFailed {
        path: "/tmp/config.toml".to_string(),
        message: "expected `=`".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Failed to parse configuration file /tmp/config.toml: expected `=`"
    );
}

#[test]
fn test_vault_error_display() {
    let error = VaultError::ToolNotFound {
        program: "bw".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "could not find 'bw' on PATH. Check if the vault CLI is installed on your machine"
    );

    let error = VaultError::NotAuthenticated {
        variable: "BW_SESSION".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "vault session not available. Expected BW_SESSION to be defined and not empty"
    );
}

#[test]
fn test_nested_operation_context() {
    let error = VaultError::in_operation(
        "list items",
        VaultError::SpawnFailed {
            program: "bw".to_string(),
            reason: "permission denied".to_string(),
        },
    );
    assert_eq!(
        error.to_string(),
        "list items: failed to spawn 'bw': permission denied"
    );
    assert!(matches!(error.root(), VaultError::SpawnFailed { .. }));
}

#[test]
fn test_picker_error_display() {
    assert_eq!(PickerError::NoMatch.to_string(), "no matching sessions found");
    assert_eq!(
        PickerError::SelectionAborted.to_string(),
        "session selection was aborted"
    );
}

#[test]
fn test_otp_error_display() {
    let error = OtpError::InvalidTotpSecret {
        reason: "empty secret".to_string(),
    };
    assert_eq!(error.to_string(), "Invalid TOTP secret: empty secret");
}

#[test]
fn test_session_error_from_vault() {
    let error: SessionError = VaultError::NotAuthenticated {
        variable: "BW_SESSION".to_string(),
    }
    .into();
    assert!(matches!(error, SessionError::Vault(_)));
    assert!(error.to_string().starts_with("Vault error: "));
}

#[test]
fn test_session_error_from_json() {
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: SessionError = json_error.into();
    assert!(matches!(error, SessionError::Json(_)));
}

#[test]
fn test_session_error_from_io() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error: SessionError = io_error.into();
    assert!(matches!(error, SessionError::Io(_)));
}
