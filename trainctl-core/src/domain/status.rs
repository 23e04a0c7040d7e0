//! Job status domain type

use serde::{Deserialize, Serialize};

use crate::dto::training::TrainingStatus;

/// Whether the remote training job is running
///
/// Transient value: never persisted, always superseded by the most
/// recently fetched one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobStatus {
    pub is_running: bool,
}

impl JobStatus {
    pub const RUNNING: JobStatus = JobStatus { is_running: true };
    pub const IDLE: JobStatus = JobStatus { is_running: false };

    pub fn new(is_running: bool) -> Self {
        Self { is_running }
    }
}

impl From<TrainingStatus> for JobStatus {
    fn from(status: TrainingStatus) -> Self {
        Self::new(status.is_training)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_running {
            write!(f, "running")
        } else {
            write!(f, "not running")
        }
    }
}
