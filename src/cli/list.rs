//! List command implementation
//!
//! Implements `c8y-session-bitwarden list`: resolve matching sessions, let the
//! user pick one and print it as JSON on stdout.

use c8y_session_core::auth::totp::attach_totp;
use c8y_session_core::config::toml_config::load_settings;
use c8y_session_core::error::SessionError;
use c8y_session_core::picker::{self, PickOptions, TerminalPrompter};
use c8y_session_core::vault::VaultClient;
use clap::Args;
use tracing::{debug, info};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Folder name, pattern or id (defaults to the configured folder, "c8y")
    #[arg(long)]
    pub folder: Option<String>,

    /// Not used. Kept to satisfy the go-c8y-cli session interface
    #[arg(long = "loginType")]
    pub login_type: Option<String>,

    /// Not used. Kept to satisfy the go-c8y-cli session interface
    #[arg(long)]
    pub clear: bool,

    /// Search terms; every term has to match the session
    pub search: Vec<String>,
}

/// Run the list command
///
/// Only the selected session is written to stdout. Errors go to stderr.
pub async fn run_list(args: ListArgs) -> Result<(), SessionError> {
    debug!(
        "Ignoring compatibility flags: loginType={:?}, clear={}",
        args.login_type, args.clear
    );

    let settings = load_settings()?;
    let folder = args
        .folder
        .unwrap_or_else(|| settings.default_folder.clone());

    let client = VaultClient::from_settings(&settings);
    let sessions = client.list(&folder, &args.search).await?;

    let options = PickOptions {
        auto_select_if_only_one: settings.auto_select_single,
    };
    let picked = picker::pick(&sessions, options, &TerminalPrompter)?;

    // The picker only saw redacted copies
    let mut session = picker::restore_selection(picked, &sessions);
    attach_totp(&mut session);

    info!(session = ?session, "Selected session");

    let out = serde_json::to_string_pretty(&session)?;
    println!("{}", out);

    Ok(())
}
