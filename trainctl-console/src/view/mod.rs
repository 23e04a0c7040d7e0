//! Rendering surface
//!
//! The controller pushes state into a [`StatusView`]; it never reads state
//! back out of it. The view is the only shared mutable resource between the
//! poller and the dispatcher.

mod terminal;

pub use terminal::TerminalView;

use trainctl_core::domain::control::{ControlState, StopControl};

/// Surface the controller renders onto
pub trait StatusView: Send + Sync {
    /// Shows the projection of the latest presented status
    fn show_controls(&self, controls: ControlState);

    /// Shows the transient appearance of the stop control
    fn show_stop_control(&self, stop: StopControl);
}

/// Everything a view currently displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    /// `None` until the first status has been presented
    pub controls: Option<ControlState>,
    pub stop_control: StopControl,
}

impl ViewState {
    pub fn start_enabled(&self) -> bool {
        self.controls.is_some_and(|c| c.start_enabled)
    }

    /// The stop control is usable only when the status allows it and no
    /// stop is already outstanding.
    pub fn stop_enabled(&self) -> bool {
        self.controls.is_some_and(|c| c.stop_enabled) && !self.stop_control.is_stopping()
    }
}
