//! Status poller
//!
//! Repeatedly reads the training status and presents it. The loop is an
//! explicit state machine:
//!
//! ```text
//! Idle ──▶ Polling ──(response or failure)──▶ ScheduledWait ──(timer | resync)──▶ Polling
//! ```
//!
//! A new request is only issued from `ScheduledWait`, so at most one status
//! request is outstanding at any time. A resync requested while `Polling` is
//! remembered and ends the following wait immediately; any number of such
//! requests collapse into one follow-up poll.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, watch};
use tokio::time;
use tracing::{debug, info, warn};
use trainctl_client::{ClientError, TrainingApi};
use trainctl_core::domain::status::JobStatus;

use super::presenter::Presenter;

/// Delays between polls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollIntervals {
    /// Used while training runs
    pub active: Duration,
    /// Used while idle and after any failure
    pub idle: Duration,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            active: Duration::from_secs(1),
            idle: Duration::from_secs(5),
        }
    }
}

/// Where the poll loop currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    /// No poll issued yet
    Idle,
    /// A status request is outstanding
    Polling,
    /// Waiting this long before the next poll
    ScheduledWait(Duration),
}

/// Result of a single poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// A status was read and presented
    Presented(JobStatus),
    /// Transport, decode or timeout failure; nothing was presented
    Failed,
}

impl PollOutcome {
    /// Delay before the poll that follows this one
    pub fn next_delay(&self, intervals: &PollIntervals) -> Duration {
        match self {
            PollOutcome::Presented(status) if status.is_running => intervals.active,
            _ => intervals.idle,
        }
    }
}

/// Handle for asking a running poller to re-read the status now
#[derive(Debug, Clone)]
pub struct PollHandle {
    resync: Arc<Notify>,
    phase: watch::Receiver<PollPhase>,
}

impl PollHandle {
    /// Cancels the pending wait, or queues one immediate follow-up if a
    /// poll is in flight
    pub fn request_sync(&self) {
        self.resync.notify_one();
    }

    pub fn phase(&self) -> PollPhase {
        *self.phase.borrow()
    }
}

/// Single-flight, self-rescheduling status loop
pub struct StatusPoller {
    api: Arc<dyn TrainingApi>,
    presenter: Presenter,
    intervals: PollIntervals,
    request_timeout: Duration,
    resync: Arc<Notify>,
    phase: watch::Sender<PollPhase>,
}

impl StatusPoller {
    /// Creates a poller in the `Idle` phase
    pub fn new(
        api: Arc<dyn TrainingApi>,
        presenter: Presenter,
        intervals: PollIntervals,
        request_timeout: Duration,
    ) -> Self {
        let (phase, _) = watch::channel(PollPhase::Idle);
        Self {
            api,
            presenter,
            intervals,
            request_timeout,
            resync: Arc::new(Notify::new()),
            phase,
        }
    }

    pub fn handle(&self) -> PollHandle {
        PollHandle {
            resync: Arc::clone(&self.resync),
            phase: self.phase.subscribe(),
        }
    }

    /// Runs the poll loop; never returns
    pub async fn run(&self) {
        info!(
            "Starting status poller (active: {:?}, idle: {:?})",
            self.intervals.active, self.intervals.idle
        );

        loop {
            let outcome = self.poll_once().await;
            let delay = outcome.next_delay(&self.intervals);

            self.phase.send_replace(PollPhase::ScheduledWait(delay));
            debug!("Next status poll in {:?}", delay);

            tokio::select! {
                _ = time::sleep(delay) => {}
                _ = self.resync.notified() => {
                    debug!("Resync requested, polling early");
                }
            }
        }
    }

    /// Issues one status request and presents the result
    ///
    /// Failures are logged and leave the view untouched.
    pub async fn poll_once(&self) -> PollOutcome {
        self.phase.send_replace(PollPhase::Polling);

        let result = match time::timeout(self.request_timeout, self.api.training_status()).await {
            Ok(result) => result,
            Err(_) => Err(ClientError::Timeout(self.request_timeout)),
        };

        match result {
            Ok(status) => {
                self.presenter.present(status);
                PollOutcome::Presented(status)
            }
            Err(e) => {
                warn!("Error polling training status ({}): {}", failure_kind(&e), e);
                PollOutcome::Failed
            }
        }
    }
}

/// Short classification of a poll failure for the log
fn failure_kind(e: &ClientError) -> &'static str {
    if e.is_timeout() {
        "timed out"
    } else if e.is_transport() {
        "server unreachable"
    } else if e.is_decode() {
        "malformed response"
    } else {
        "rejected by server"
    }
}
