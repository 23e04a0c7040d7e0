//! Status presenter

use std::sync::Arc;
use tracing::debug;
use trainctl_core::domain::control::ControlState;
use trainctl_core::domain::status::JobStatus;

use crate::view::StatusView;

/// Projects job statuses onto the view
///
/// Holds no state of its own, so the poller and the dispatcher can both
/// present without coordinating.
#[derive(Clone)]
pub struct Presenter {
    view: Arc<dyn StatusView>,
}

impl Presenter {
    pub fn new(view: Arc<dyn StatusView>) -> Self {
        Self { view }
    }

    pub fn present(&self, status: JobStatus) {
        let controls = ControlState::from_status(status);
        debug!("Presenting status: {}", status);
        self.view.show_controls(controls);
    }
}
