//! trainctl
//!
//! Operator console for a model-training server.
//!
//! Architecture:
//! - Configuration: server URL from the command line, tuning from environment
//! - Controller: status poller, command dispatcher and presenter
//! - View: terminal rendering surface the controller pushes state into
//! - Commands: one-shot subcommands and the interactive console
//!
//! Everything runs on a single-threaded runtime; the view is only ever
//! mutated from that thread.

mod commands;
mod config;
mod controller;
mod form;
mod gallery;
mod view;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{Commands, handle_command};
use crate::config::Config;

#[derive(Parser)]
#[command(name = "trainctl")]
#[command(about = "Start, stop and watch a model training server", long_about = None)]
struct Cli {
    /// Training server URL
    #[arg(
        long,
        global = true,
        env = "TRAINCTL_SERVER_URL",
        default_value = "http://localhost:5000"
    )]
    server_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr so the status line on stdout stays readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trainctl=info,trainctl_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::from_env(cli.server_url);
    config.validate()?;

    handle_command(cli.command, &config).await
}
