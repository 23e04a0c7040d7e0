//! One-shot training commands
//!
//! Each command reconciles with a final status read so what is printed last
//! is the server's view, not the optimistic one.

use anyhow::{Result, bail};
use colored::*;
use std::sync::Arc;
use tracing::info;
use trainctl_client::TrainingClient;

use super::terminal_controller;
use crate::config::Config;
use crate::controller::{CommandOutcome, PollOutcome, StatusPoller};
use crate::form::{TrainingArgs, TrainingForm};

/// Prints the current status once
pub async fn status(config: &Config, client: Arc<TrainingClient>) -> Result<()> {
    let (controller, _view) = terminal_controller(config, client);
    reconcile(config, &controller.poller).await
}

/// Runs the poll loop until Ctrl-C
pub async fn watch(config: &Config, client: Arc<TrainingClient>) -> Result<()> {
    let (controller, _view) = terminal_controller(config, client);
    println!(
        "{}",
        format!("Watching {} (Ctrl-C to exit)", config.server_url).dimmed()
    );

    tokio::select! {
        _ = controller.poller.run() => {}
        result = tokio::signal::ctrl_c() => {
            result?;
            info!("Interrupted, stopping watch");
        }
    }

    Ok(())
}

pub async fn start(
    config: &Config,
    client: Arc<TrainingClient>,
    args: &TrainingArgs,
) -> Result<()> {
    let form = TrainingForm::from_args(args)?;
    let (controller, _view) = terminal_controller(config, client);

    match controller.dispatcher.start(&form).await {
        CommandOutcome::Completed => reconcile(config, &controller.poller).await,
        CommandOutcome::Rejected => bail!("Training form is incomplete or invalid"),
        _ => bail!("Failed to start training"),
    }
}

pub async fn stop(config: &Config, client: Arc<TrainingClient>) -> Result<()> {
    let (controller, _view) = terminal_controller(config, client);

    let outcome = controller.dispatcher.stop().await;
    reconcile(config, &controller.poller).await?;

    if outcome != CommandOutcome::Completed {
        bail!("Failed to stop training");
    }
    Ok(())
}

async fn reconcile(config: &Config, poller: &StatusPoller) -> Result<()> {
    match poller.poll_once().await {
        PollOutcome::Presented(_) => Ok(()),
        PollOutcome::Failed => bail!("Could not read training status from {}", config.server_url),
    }
}
