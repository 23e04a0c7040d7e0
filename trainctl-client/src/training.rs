//! Training control endpoints

use crate::TrainingClient;
use crate::error::Result;
use tracing::debug;
use trainctl_core::dto::training::{Acknowledgment, StartTraining, TrainingStatus};

impl TrainingClient {
    // =============================================================================
    // Training Control
    // =============================================================================

    /// Get the current training status
    ///
    /// # Returns
    /// `{ is_training }` as reported by the server
    pub async fn get_training_status(&self) -> Result<TrainingStatus> {
        let response = self.client.get(self.url("/training_status")).send().await?;

        self.handle_response(response).await
    }

    /// Start a training run
    ///
    /// The request is sent form-encoded, the way the server's HTML form
    /// submits it.
    ///
    /// # Arguments
    /// * `req` - Environment and hyperparameter selection
    ///
    /// # Example
    /// ```no_run
    /// # use trainctl_client::TrainingClient;
    /// # use trainctl_core::dto::training::StartTraining;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = TrainingClient::new("http://localhost:5000");
    /// let ack = client
    ///     .start_training(&StartTraining::with_defaults("cartpole"))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn start_training(&self, req: &StartTraining) -> Result<Acknowledgment> {
        let fields = req.form_fields();
        debug!("Sending start request with {} form field(s)", fields.len());

        let response = self
            .client
            .post(self.url("/start_training"))
            .form(&fields)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Stop the running training job
    pub async fn stop_training(&self) -> Result<Acknowledgment> {
        let response = self.client.post(self.url("/stop_training")).send().await?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_server;
    use crate::{ClientError, TrainingClient};
    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Form, Json, Router};
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use trainctl_core::dto::training::StartTraining;

    type Received = Arc<Mutex<Vec<HashMap<String, String>>>>;

    async fn start(
        State(received): State<Received>,
        Form(fields): Form<HashMap<String, String>>,
    ) -> (StatusCode, Json<Value>) {
        let environment = fields.get("environment").cloned().unwrap_or_default();
        received.lock().unwrap().push(fields);

        if environment == "cartpole" {
            (StatusCode::OK, Json(json!({ "status": "started" })))
        } else {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "status": "error", "message": "Invalid environment" })),
            )
        }
    }

    async fn server(is_training: bool) -> (TrainingClient, Received) {
        let received: Received = Arc::default();
        let router = Router::new()
            .route(
                "/training_status",
                get(move || async move { Json(json!({ "is_training": is_training })) }),
            )
            .route("/start_training", post(start))
            .route(
                "/stop_training",
                post(|| async { Json(json!({ "status": "not_running" })) }),
            )
            .with_state(received.clone());

        let url = test_server::spawn(router).await;
        (TrainingClient::new(url), received)
    }

    #[tokio::test]
    async fn test_get_training_status() {
        let (client, _) = server(true).await;
        let status = client.get_training_status().await.unwrap();
        assert!(status.is_training);
    }

    #[tokio::test]
    async fn test_start_training_sends_form() {
        let (client, received) = server(false).await;

        let ack = client
            .start_training(&StartTraining::with_defaults("cartpole"))
            .await
            .unwrap();
        assert_eq!(ack.status(), Some("started"));

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].get("environment").map(String::as_str), Some("cartpole"));
        assert_eq!(
            received[0].get("hyperparameterToggle").map(String::as_str),
            Some("on")
        );
    }

    #[tokio::test]
    async fn test_start_training_rejected() {
        let (client, _) = server(false).await;

        let err = client
            .start_training(&StartTraining::with_defaults("doom"))
            .await
            .unwrap_err();

        match err {
            ClientError::ApiError { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid environment");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_stop_training_not_running() {
        let (client, _) = server(false).await;
        let ack = client.stop_training().await.unwrap();
        assert!(ack.was_not_running());
    }

    #[tokio::test]
    async fn test_malformed_status_is_parse_error() {
        let router = Router::new().route("/training_status", get(|| async { "not json" }));
        let client = TrainingClient::new(test_server::spawn(router).await);

        let err = client.get_training_status().await.unwrap_err();
        assert!(err.is_decode());
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let router = Router::new().route(
            "/training_status",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let client = TrainingClient::new(test_server::spawn(router).await);

        let err = client.get_training_status().await.unwrap_err();
        assert!(err.is_server_error());
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport() {
        let client = TrainingClient::new("http://127.0.0.1:1");
        let err = client.get_training_status().await.unwrap_err();
        assert!(err.is_transport());
    }
}
