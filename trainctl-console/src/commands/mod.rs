//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod console;
mod training;
mod videos;

use anyhow::{Context, Result};
use clap::Subcommand;
use std::sync::Arc;
use trainctl_client::TrainingClient;

use crate::config::Config;
use crate::controller::Controller;
use crate::form::TrainingArgs;
use crate::view::TerminalView;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show the current training status
    Status,
    /// Follow the training status until interrupted
    Watch,
    /// Start a training run
    Start {
        #[command(flatten)]
        training: TrainingArgs,
    },
    /// Stop the running training job
    Stop,
    /// List recorded videos
    Videos,
    /// Live status with interactive start/stop commands
    Console {
        #[command(flatten)]
        training: TrainingArgs,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let client = connect(config)?;

    match command {
        Commands::Status => training::status(config, client).await,
        Commands::Watch => training::watch(config, client).await,
        Commands::Start { training } => training::start(config, client, &training).await,
        Commands::Stop => training::stop(config, client).await,
        Commands::Videos => videos::list(config, client.as_ref()).await,
        Commands::Console { training } => console::run(config, client, &training).await,
    }
}

fn connect(config: &Config) -> Result<Arc<TrainingClient>> {
    let client = TrainingClient::with_timeout(&config.server_url, config.request_timeout)
        .context("Failed to build HTTP client")?;
    Ok(Arc::new(client))
}

/// Controller rendering onto a fresh terminal view
fn terminal_controller(
    config: &Config,
    client: Arc<TrainingClient>,
) -> (Controller, Arc<TerminalView>) {
    let view = Arc::new(TerminalView::new());
    let controller = Controller::new(
        client,
        view.clone(),
        config.poll_intervals(),
        config.request_timeout,
    );
    (controller, view)
}
