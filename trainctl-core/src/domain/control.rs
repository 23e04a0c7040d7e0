//! Control projection
//!
//! Pure mapping from a [`JobStatus`] to the state of the console's controls.
//! Nothing here is stored as truth: a [`ControlState`] is recomputed every
//! time a status is presented.

use serde::{Deserialize, Serialize};

use super::status::JobStatus;

/// Status indicator rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusBadge {
    Training,
    NotTraining,
}

impl StatusBadge {
    /// Text shown in the indicator
    pub fn label(&self) -> &'static str {
        match self {
            StatusBadge::Training => "Training in Progress",
            StatusBadge::NotTraining => "Not Training",
        }
    }
}

/// Enablement of the start/stop controls plus the status badge
///
/// `start_enabled` and `stop_enabled` are always complementary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    pub start_enabled: bool,
    pub stop_enabled: bool,
    pub badge: StatusBadge,
}

impl ControlState {
    /// Projects a job status onto the controls
    pub fn from_status(status: JobStatus) -> Self {
        let badge = if status.is_running {
            StatusBadge::Training
        } else {
            StatusBadge::NotTraining
        };

        Self {
            start_enabled: !status.is_running,
            stop_enabled: status.is_running,
            badge,
        }
    }
}

impl From<JobStatus> for ControlState {
    fn from(status: JobStatus) -> Self {
        Self::from_status(status)
    }
}

/// Transient appearance of the stop control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StopControl {
    /// Normal "Stop Training" appearance
    #[default]
    Ready,
    /// Disabled while a stop request is outstanding
    Stopping,
}

impl StopControl {
    pub fn label(&self) -> &'static str {
        match self {
            StopControl::Ready => "Stop Training",
            StopControl::Stopping => "Stopping...",
        }
    }

    pub fn is_stopping(&self) -> bool {
        matches!(self, StopControl::Stopping)
    }
}
