//! Vault CLI process adapter
//!
//! Runs the external vault CLI and decodes its JSON output while it is
//! still being written. This is the only part of the crate that touches
//! the outside world.

use crate::config::Settings;
use crate::error::VaultError;
use serde::de::DeserializeOwned;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::{Child, Command};
use tokio_util::io::SyncIoBridge;
use tracing::{debug, warn, Instrument, Span};

/// Handle for invoking the vault CLI
#[derive(Debug, Clone)]
pub struct VaultCli {
    /// Executable name or path
    program: String,

    /// Environment variable carrying the session token
    session_env: String,

    /// Log context for every invocation
    span: Span,
}

impl VaultCli {
    pub fn new(program: impl Into<String>, session_env: impl Into<String>) -> Self {
        let program = program.into();
        let span = tracing::debug_span!("vault_cli", program = %program);
        Self {
            program,
            session_env: session_env.into(),
            span,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.program.clone(), settings.session_env.clone())
    }

    /// Check that the CLI is installed and a session token is exported
    ///
    /// Returns the resolved executable path and the token.
    pub fn check_preconditions(&self) -> Result<(PathBuf, String), VaultError> {
        let path = which::which(&self.program).map_err(|_| VaultError::ToolNotFound {
            program: self.program.clone(),
        })?;

        let token = std::env::var(&self.session_env)
            .ok()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| VaultError::NotAuthenticated {
                variable: self.session_env.clone(),
            })?;

        Ok((path, token))
    }

    /// Run the CLI with `args` and decode its stdout as `T`
    ///
    /// Completion is gated on the decoder only. The child process is reaped
    /// by a detached task and its exit status is never reported back; a
    /// non-zero status is only logged.
    pub async fn execute<T>(&self, args: &[String]) -> Result<T, VaultError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let operation = args.iter().take(2).cloned().collect::<Vec<_>>().join(" ");

        self.run(args)
            .instrument(self.span.clone())
            .await
            .map_err(|e| VaultError::in_operation(operation, e))
    }

    async fn run<T>(&self, args: &[String]) -> Result<T, VaultError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let (path, token) = self.check_preconditions()?;

        debug!("Running {} {}", self.program, redact_args(args));

        let mut child = Command::new(&path)
            .args(args)
            .env(&self.session_env, token)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| VaultError::SpawnFailed {
                program: self.program.clone(),
                reason: e.to_string(),
            })?;

        let stdout = child.stdout.take().ok_or_else(|| VaultError::SpawnFailed {
            program: self.program.clone(),
            reason: "stdout was not captured".to_string(),
        })?;

        // Fire and forget: the caller never waits on process exit.
        tokio::spawn(reap(child, self.program.clone()).instrument(Span::current()));

        let reader = SyncIoBridge::new(stdout);
        let decoded = tokio::task::spawn_blocking(move || {
            serde_json::from_reader::<_, T>(BufReader::new(reader))
        })
        .await
        .map_err(|e| VaultError::DecodeAborted {
            reason: e.to_string(),
        })?;

        decoded.map_err(VaultError::MalformedResponse)
    }
}

/// Wait for the child so it does not linger as a zombie
async fn reap(mut child: Child, program: String) {
    match child.wait().await {
        Ok(status) if status.success() => debug!("{} exited successfully", program),
        Ok(status) => warn!("{} exited with {}", program, status),
        Err(e) => debug!("Failed to wait for {}: {}", program, e),
    }
}

/// Search terms may be sensitive enough to keep out of logs at debug level
fn redact_args(args: &[String]) -> String {
    let mut out = Vec::with_capacity(args.len());
    let mut hide_next = false;
    for arg in args {
        if hide_next {
            out.push("***");
            hide_next = false;
        } else {
            hide_next = arg == "--search";
            out.push(arg.as_str());
        }
    }
    out.join(" ")
}
