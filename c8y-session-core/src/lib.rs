//! Core library for the c8y-session-bitwarden CLI tool
//!
//! This crate resolves Cumulocity sessions from a Bitwarden vault: it runs
//! the vault CLI, maps login items to session records, filters them, lets
//! the operator pick one and computes its TOTP code.

pub mod error;
pub mod types;

pub mod auth;
pub mod config;
pub mod picker;
pub mod session;
pub mod vault;

#[cfg(test)]
pub(crate) mod test_support;

use tracing_subscriber::filter::LevelFilter;

/// Log verbosity chosen on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    #[default]
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    /// Pick the level from the `--verbose` / `--debug` flags
    pub fn from_flags(verbose: bool, debug: bool) -> Self {
        if debug {
            LogLevel::Debug
        } else if verbose {
            LogLevel::Info
        } else {
            LogLevel::Warn
        }
    }

    fn filter(self) -> LevelFilter {
        match self {
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
        }
    }
}

/// Whether `JOURNAL_STREAM` (`<dev>:<inode>`) names the given stream
#[cfg(target_os = "linux")]
fn journal_stream_matches(value: &str, dev: u64, ino: u64) -> bool {
    value
        .split_once(':')
        .and_then(|(d, i)| Some((d.parse::<u64>().ok()?, i.parse::<u64>().ok()?)))
        .is_some_and(|(d, i)| d == dev && i == ino)
}

/// Shells started from a systemd unit inherit `JOURNAL_STREAM`, so it only
/// counts when stderr is still the journal stream itself.
#[cfg(target_os = "linux")]
fn stderr_is_journal() -> bool {
    use std::os::fd::AsFd;
    use std::os::unix::fs::MetadataExt;

    let Ok(value) = std::env::var("JOURNAL_STREAM") else {
        return false;
    };
    let Ok(fd) = std::io::stderr().as_fd().try_clone_to_owned() else {
        return false;
    };
    match std::fs::File::from(fd).metadata() {
        Ok(meta) => journal_stream_matches(&value, meta.dev(), meta.ino()),
        Err(_) => false,
    }
}

/// Initialize logging infrastructure
///
/// Uses the systemd journal when stderr is connected to it, otherwise logs
/// to stderr. Stdout is reserved for the session JSON.
pub fn init_logging(level: LogLevel) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    #[cfg(target_os = "linux")]
    {
        if stderr_is_journal() {
            let journal_layer = tracing_journald::layer()?;
            tracing_subscriber::registry()
                .with(journal_layer)
                .with(level.filter())
                .try_init()?;
            return Ok(());
        }
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(level.filter())
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_flags() {
        assert_eq!(LogLevel::from_flags(false, false), LogLevel::Warn);
        assert_eq!(LogLevel::from_flags(true, false), LogLevel::Info);
        assert_eq!(LogLevel::from_flags(true, true), LogLevel::Debug);
        assert_eq!(LogLevel::from_flags(false, true), LogLevel::Debug);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_journal_stream_must_match_stderr() {
        assert!(journal_stream_matches("8:12345", 8, 12345));
        assert!(!journal_stream_matches("8:12345", 8, 99));
        assert!(!journal_stream_matches("9:12345", 8, 12345));
        assert!(!journal_stream_matches("", 8, 12345));
        assert!(!journal_stream_matches("garbage", 8, 12345));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_inherited_journal_stream_is_ignored() {
        // Under the test harness stderr is a pipe or terminal, never 0:0
        std::env::set_var("JOURNAL_STREAM", "0:0");
        assert!(!stderr_is_journal());
    }
}
