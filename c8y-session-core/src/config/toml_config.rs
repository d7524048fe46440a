//! TOML configuration file I/O
//!
//! Loads [`Settings`] from the user's configuration directory. A missing
//! file is not an error; defaults are used instead.

use crate::config::Settings;
use crate::error::{ConfigError, SessionError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default configuration file name
const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name below the user's config root
const APP_DIR_NAME: &str = "c8y-session-bitwarden";

/// Environment variable that overrides the configuration directory
pub const CONFIG_DIR_ENV: &str = "C8Y_SESSION_BITWARDEN_CONFIG_DIR";

/// Get the configuration directory
///
/// Resolution order: `C8Y_SESSION_BITWARDEN_CONFIG_DIR`, then
/// `$XDG_CONFIG_HOME/c8y-session-bitwarden`, then
/// `$HOME/.config/c8y-session-bitwarden`.
pub fn get_config_dir() -> Result<PathBuf, SessionError> {
    if let Some(dir) = non_empty_env(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    if let Some(xdg) = non_empty_env("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join(APP_DIR_NAME));
    }

    let home = non_empty_env("HOME").ok_or_else(|| {
        SessionError::Config(ConfigError::ValidationError {
            message: "HOME environment variable not set".to_string(),
        })
    })?;

    Ok(PathBuf::from(home).join(".config").join(APP_DIR_NAME))
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Get the default configuration file path
pub fn get_config_path() -> Result<PathBuf, SessionError> {
    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load settings from the default location, falling back to defaults
pub fn load_settings() -> Result<Settings, SessionError> {
    let path = match get_config_path() {
        Ok(path) => path,
        Err(e) => {
            debug!("No configuration directory available ({}), using defaults", e);
            return Ok(Settings::default());
        }
    };

    if !path.exists() {
        debug!("No configuration file at {:?}, using defaults", path);
        return Ok(Settings::default());
    }

    load_settings_from_path(&path)
}

/// Load settings from a specific TOML file
pub fn load_settings_from_path<P: AsRef<Path>>(path: P) -> Result<Settings, SessionError> {
    let shown = path.as_ref().to_string_lossy().to_string();

    let contents = std::fs::read_to_string(&path).map_err(|e| {
        SessionError::Config(ConfigError::LoadFailed {
            path: shown.clone(),
            message: e.to_string(),
        })
    })?;

    let settings: Settings = toml::from_str(&contents).map_err(|e| {
        SessionError::Config(ConfigError::ParseFailed {
            path: shown.clone(),
            message: e.to_string(),
        })
    })?;

    settings
        .validate()
        .map_err(|message| SessionError::Config(ConfigError::ValidationError { message }))?;

    debug!("Loaded settings from {}", shown);
    Ok(settings)
}
