//! Training API abstraction
//!
//! The console drives the training server through this trait so that the
//! controller can be exercised against an in-memory fake.

use async_trait::async_trait;
use trainctl_core::domain::status::JobStatus;
use trainctl_core::domain::video::VideoRecord;
use trainctl_core::dto::training::{Acknowledgment, StartTraining};

use crate::TrainingClient;
use crate::error::Result;

/// Operations the training server exposes
#[async_trait]
pub trait TrainingApi: Send + Sync {
    /// Fetches whether training is running
    async fn training_status(&self) -> Result<JobStatus>;

    /// Starts a training run with the given configuration
    async fn start_training(&self, req: &StartTraining) -> Result<Acknowledgment>;

    /// Stops the running training job, if any
    async fn stop_training(&self) -> Result<Acknowledgment>;

    /// Lists the recorded videos
    async fn list_videos(&self) -> Result<Vec<VideoRecord>>;
}

#[async_trait]
impl TrainingApi for TrainingClient {
    async fn training_status(&self) -> Result<JobStatus> {
        self.get_training_status().await.map(JobStatus::from)
    }

    async fn start_training(&self, req: &StartTraining) -> Result<Acknowledgment> {
        TrainingClient::start_training(self, req).await
    }

    async fn stop_training(&self) -> Result<Acknowledgment> {
        TrainingClient::stop_training(self).await
    }

    async fn list_videos(&self) -> Result<Vec<VideoRecord>> {
        TrainingClient::list_videos(self).await
    }
}
