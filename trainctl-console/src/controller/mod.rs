//! Controller layer
//!
//! Keeps the rendering surface in sync with the remote training job:
//! - [`StatusPoller`]: single-flight, self-rescheduling status loop
//! - [`CommandDispatcher`]: start/stop commands with optimistic updates
//! - [`Presenter`]: status-to-controls projection pushed into the view
//!
//! A stop, and a start the server accepted, is followed by a forced poll so
//! the optimistic status is replaced by an authoritative read. A failed start
//! changes nothing and does not poll.

mod dispatcher;
mod poller;
mod presenter;

#[cfg(test)]
pub(crate) mod testing;

pub use dispatcher::{CommandDispatcher, CommandOutcome};
pub use poller::{PollIntervals, PollOutcome, PollPhase, StatusPoller};
pub use presenter::Presenter;

use std::sync::Arc;
use std::time::Duration;
use trainctl_client::TrainingApi;

use crate::view::StatusView;

/// Poller and dispatcher wired to the same API and view
pub struct Controller {
    pub poller: StatusPoller,
    pub dispatcher: CommandDispatcher,
}

impl Controller {
    pub fn new(
        api: Arc<dyn TrainingApi>,
        view: Arc<dyn StatusView>,
        intervals: PollIntervals,
        request_timeout: Duration,
    ) -> Self {
        let presenter = Presenter::new(Arc::clone(&view));
        let poller = StatusPoller::new(
            Arc::clone(&api),
            presenter.clone(),
            intervals,
            request_timeout,
        );
        let dispatcher = CommandDispatcher::new(api, presenter, view, poller.handle());

        Self { poller, dispatcher }
    }
}
