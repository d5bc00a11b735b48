#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chatsend::ChatError;

mod commands;

use crate::commands::profile::ProfileCommands;
use crate::commands::utils::BrowserArgs;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_COMMAND_ERROR: i32 = 1;

#[derive(Parser)]
#[command(name = "chatsend")]
#[command(about = "Send chat messages by driving a browser", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a message to a contact or group and confirm delivery
    Send {
        /// Contact or group name, exactly as shown in the chat list
        contact: String,

        /// Message text; line breaks are kept
        message: Option<String>,

        /// Read the message text from a file
        #[arg(long)]
        message_file: Option<PathBuf>,

        #[command(flatten)]
        browser: BrowserArgs,

        /// Seconds to look for the sent message bubble
        #[arg(long, default_value = "20")]
        verify_timeout: u64,

        /// Skip delivery confirmation
        #[arg(long)]
        no_verify: bool,
    },

    /// Open a visible browser and wait for the QR-code login to complete
    Login {
        #[command(flatten)]
        browser: BrowserArgs,

        /// Seconds to wait for the login
        #[arg(long, default_value = "180")]
        timeout: u64,
    },

    /// Manage persistent browser profiles
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
}

/// Exit code for an error coming out of a command
fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<ChatError>()
        .map(ChatError::exit_code)
        .unwrap_or(EXIT_COMMAND_ERROR)
}

/// Chat errors already spell out their cause; other errors get the full context chain
fn error_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ChatError>() {
        Some(chat_err) => chat_err.to_string(),
        None => format!("{:#}", err),
    }
}

#[tokio::main]
async fn main() {
    let result = run().await;

    match result {
        Ok(()) => std::process::exit(EXIT_SUCCESS),
        Err(err) => {
            let code = exit_code(&err);
            let message = error_message(&err);

            // Output JSON error to stdout for programmatic consumption
            let error_json = json!({
                "error": true,
                "message": message,
                "exit_code": code
            });
            println!(
                "{}",
                serde_json::to_string(&error_json).unwrap_or_else(|_| "{}".to_string())
            );

            // Also log to stderr for human reading
            eprintln!("Error: {}", message);
            std::process::exit(code);
        }
    }
}

async fn run() -> Result<()> {
    // Initialize tracing to stderr (so JSON output to stdout remains clean)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chatsend=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Send {
            contact,
            message,
            message_file,
            browser,
            verify_timeout,
            no_verify,
        } => {
            commands::send::handle_send(
                contact,
                message,
                message_file,
                browser,
                verify_timeout,
                no_verify,
            )
            .await?
        }

        Commands::Login { browser, timeout } => {
            commands::login::handle_login(browser, timeout).await?
        }

        Commands::Profile { command } => commands::profile::handle_profile(command).await?,
    }

    Ok(())
}
