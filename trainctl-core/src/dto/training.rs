//! Training DTOs for the server API

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::catalog::find_hyperparameter;

/// Response of `GET /training_status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingStatus {
    pub is_training: bool,
}

/// Request body of `POST /start_training`
///
/// Sent form-encoded. With `hyperparameters == None` the server trains
/// with its defaults (`hyperparameterToggle=on`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartTraining {
    pub environment: String,
    pub num_timestamps: Option<u64>,
    pub hyperparameters: Option<BTreeMap<String, f64>>,
}

impl StartTraining {
    /// Request that trains `environment` with default hyperparameters
    pub fn with_defaults(environment: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            num_timestamps: None,
            hyperparameters: None,
        }
    }

    pub fn uses_default_hyperparameters(&self) -> bool {
        self.hyperparameters.is_none()
    }

    /// Form fields in the order the server expects them
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let toggle = if self.uses_default_hyperparameters() {
            "on"
        } else {
            "off"
        };

        let mut fields = vec![
            ("environment".to_string(), self.environment.clone()),
            ("hyperparameterToggle".to_string(), toggle.to_string()),
        ];

        if let Some(num_timestamps) = self.num_timestamps {
            fields.push(("num_timestamps".to_string(), num_timestamps.to_string()));
        }

        if let Some(hyperparameters) = &self.hyperparameters {
            for (name, value) in hyperparameters {
                let formatted = match find_hyperparameter(name) {
                    Some(spec) => spec.format(*value),
                    None => value.to_string(),
                };
                fields.push((name.clone(), formatted));
            }
        }

        fields
    }
}

/// JSON acknowledgment of a start/stop command
///
/// The body is arbitrary JSON; the server conventionally answers
/// `{"status": "...", "message": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Acknowledgment(pub serde_json::Value);

impl Acknowledgment {
    /// The `status` field, if present
    pub fn status(&self) -> Option<&str> {
        self.0.get("status").and_then(|v| v.as_str())
    }

    /// The `message` field, if present
    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(|v| v.as_str())
    }

    /// True when a stop found no job to stop
    pub fn was_not_running(&self) -> bool {
        self.status() == Some("not_running")
    }
}
