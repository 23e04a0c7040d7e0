//! Interactive console
//!
//! Runs the status poller in the background and reads operator commands
//! from stdin. Start/stop run as their own tasks so input keeps flowing
//! while a command is outstanding; a control the view shows as disabled
//! cannot be used, the same way a disabled button cannot be clicked.

use anyhow::{Context, Result};
use colored::*;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use trainctl_client::{TrainingApi, TrainingClient};

use super::terminal_controller;
use crate::config::Config;
use crate::controller::{CommandOutcome, PollPhase};
use crate::form::{TrainingArgs, TrainingForm};
use crate::gallery::Gallery;

/// A line of operator input
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Start,
    Stop,
    Status,
    Videos,
    Form,
    Environment(String),
    Defaults(bool),
    Set { name: String, value: String },
    Help,
    Quit,
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();

        match (command, args.as_slice()) {
            ("start", []) => Ok(Self::Start),
            ("stop", []) => Ok(Self::Stop),
            ("status", []) => Ok(Self::Status),
            ("videos", []) => Ok(Self::Videos),
            ("form", []) => Ok(Self::Form),
            ("env", [name]) => Ok(Self::Environment(name.to_string())),
            ("defaults", ["on"]) => Ok(Self::Defaults(true)),
            ("defaults", ["off"]) => Ok(Self::Defaults(false)),
            ("set", [name, value]) => Ok(Self::Set {
                name: name.to_string(),
                value: value.to_string(),
            }),
            ("help", []) | ("?", []) => Ok(Self::Help),
            ("quit", []) | ("exit", []) => Ok(Self::Quit),
            _ => Err(format!("Unrecognized command: '{}' (try 'help')", line.trim())),
        }
    }
}

const HELP: &str = "\
Commands:
  start                 start training with the current form
  stop                  stop the running training job
  status                show the current status line
  videos                list recorded videos
  form                  show the training form
  env <name>            set the environment
  defaults on|off       use server default hyperparameters or custom values
  set <param> <value>   set a hyperparameter (switches to custom values)
  quit                  exit";

pub async fn run(config: &Config, client: Arc<TrainingClient>, args: &TrainingArgs) -> Result<()> {
    let mut form = TrainingForm::from_args(args)?;
    let api: Arc<dyn TrainingApi> = client.clone();
    let (controller, view) = terminal_controller(config, client);
    let dispatcher = Arc::new(controller.dispatcher);
    let poller = controller.poller;
    let poll = poller.handle();

    info!("Console connected to {}", config.server_url);
    println!("{}", "Type 'help' for commands.".dimmed());

    let poll_task = tokio::spawn(async move { poller.run().await });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match ConsoleCommand::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message.yellow());
                continue;
            }
        };
        debug!("Console command: {:?}", command);

        match command {
            ConsoleCommand::Start => {
                if !view.state().start_enabled() {
                    println!("{}", "Start is disabled.".yellow());
                    continue;
                }
                let dispatcher = Arc::clone(&dispatcher);
                let form = form.clone();
                tokio::spawn(async move {
                    report(dispatcher.start(&form).await, "start");
                });
            }
            ConsoleCommand::Stop => {
                if dispatcher.is_stopping() || !view.state().stop_enabled() {
                    println!("{}", "Stop is disabled.".yellow());
                    continue;
                }
                let dispatcher = Arc::clone(&dispatcher);
                tokio::spawn(async move {
                    report(dispatcher.stop().await, "stop");
                });
            }
            ConsoleCommand::Status => {
                view.print();
                println!("{}", describe_phase(poll.phase()).dimmed());
            }
            ConsoleCommand::Videos => {
                let gallery = Gallery::load(api.as_ref(), &config.video_base_path).await;
                println!("{}", gallery.render(&config.server_url));
            }
            ConsoleCommand::Form => println!("{}", form.describe()),
            ConsoleCommand::Environment(name) => form.set_environment(name),
            ConsoleCommand::Defaults(on) => form.set_use_defaults(on),
            ConsoleCommand::Set { name, value } => match form.set_param(&name, &value) {
                Ok(()) => form.set_use_defaults(false),
                Err(e) => println!("{}", e.to_string().yellow()),
            },
            ConsoleCommand::Help => println!("{}", HELP),
            ConsoleCommand::Quit => break,
        }
    }

    poll_task.abort();
    Ok(())
}

fn describe_phase(phase: PollPhase) -> String {
    match phase {
        PollPhase::Idle => "poller: not started".to_string(),
        PollPhase::Polling => "poller: request in flight".to_string(),
        PollPhase::ScheduledWait(delay) => format!("poller: next poll within {:?}", delay),
    }
}

fn report(outcome: CommandOutcome, command: &str) {
    match outcome {
        CommandOutcome::Completed | CommandOutcome::Ignored => {}
        CommandOutcome::Failed => println!("{}", format!("{} failed, see log", command).red()),
        CommandOutcome::Rejected => {
            println!("{}", "Training form is incomplete, see 'form'".yellow())
        }
    }
}
