//! c8y-session-bitwarden - go-c8y-cli session selector
//!
//! Lists Cumulocity sessions stored in a Bitwarden vault, lets the user pick
//! one and prints it as JSON for go-c8y-cli.

use c8y_session_core::error::{SessionError, VaultError};
use c8y_session_core::{init_logging, LogLevel};
use clap::{Parser, Subcommand};

mod cli;

const LONG_ABOUT: &str = "Select a session from your bitwarden password manager

Pre-requisites:

 * bitwarden-cli (bw) - https://github.com/bitwarden/clients

Login to your bitwarden account from the command line

    $ bw login

Then export the bitwarden session variable (as suggested in the command's output)";

#[derive(Parser)]
#[command(name = "c8y-session-bitwarden")]
#[command(about = "go-c8y-cli bitwarden session selector", long_about = LONG_ABOUT)]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List sessions stored in your bitwarden vault
    List(cli::list::ListArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(LogLevel::from_flags(cli.verbose, cli.debug)) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(2);
    }

    let result = match cli.command {
        Commands::List(args) => cli::list::run_list(args).await,
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(exit_code(&e));
        }
    }
}

/// Map an error to the process exit code
///
/// 2 for setup problems (configuration, missing CLI, no session token),
/// 1 for everything that went wrong at runtime.
fn exit_code(error: &SessionError) -> i32 {
    match error {
        SessionError::Config(_) => 2,
        SessionError::Vault(vault_error) => match vault_error.root() {
            VaultError::ToolNotFound { .. } | VaultError::NotAuthenticated { .. } => 2,
            _ => 1,
        },
        SessionError::Picker(_) | SessionError::Otp(_) => 1,
        SessionError::Io(_) | SessionError::Json(_) => 1,
    }
}
