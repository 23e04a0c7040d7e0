//! Recorded video endpoints

use crate::TrainingClient;
use crate::error::Result;
use trainctl_core::domain::video::VideoRecord;

impl TrainingClient {
    // =============================================================================
    // Videos
    // =============================================================================

    /// List the recorded videos
    ///
    /// # Returns
    /// Video records in the order the server lists them
    pub async fn list_videos(&self) -> Result<Vec<VideoRecord>> {
        let response = self.client.get(self.url("/videos")).send().await?;

        self.handle_response(response).await
    }
}
