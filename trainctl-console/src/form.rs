//! Training form
//!
//! The operator-editable fields a start request is assembled from. Values
//! are kept as typed by the operator and only validated when a request is
//! built, so a bad field aborts the start before anything is sent.

use clap::Args;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::warn;
use trainctl_core::domain::catalog::{
    DEFAULT_NUM_TIMESTAMPS, HYPERPARAMETERS, find_environment, find_hyperparameter,
};
use trainctl_core::dto::training::StartTraining;

/// Reasons a start request could not be assembled
#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Unknown hyperparameter: {0}")]
    UnknownParameter(String),

    #[error("Expected NAME=VALUE, got '{0}'")]
    MalformedAssignment(String),

    #[error("Invalid value for {name}: '{value}'")]
    InvalidValue { name: String, value: String },

    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{name} must be a multiple of {step} from {min}, got {value}")]
    OffStep {
        name: String,
        value: f64,
        min: f64,
        step: f64,
    },
}

/// Training options shared by `start` and `console`
#[derive(Debug, Clone, Default, Args)]
pub struct TrainingArgs {
    /// Environment to train (e.g. cartpole, lunarlander, breakout)
    #[arg(short, long)]
    pub environment: Option<String>,

    /// Send custom hyperparameters instead of using the server defaults
    #[arg(long)]
    pub custom: bool,

    /// Training length in timesteps
    #[arg(long)]
    pub num_timestamps: Option<u64>,

    /// Hyperparameter value, NAME=VALUE (implies --custom)
    #[arg(long = "param", value_name = "NAME=VALUE")]
    pub params: Vec<String>,
}

/// Current contents of the training form
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingForm {
    environment: Option<String>,
    use_defaults: bool,
    num_timestamps: Option<u64>,
    values: BTreeMap<String, String>,
}

impl Default for TrainingForm {
    fn default() -> Self {
        Self {
            environment: None,
            use_defaults: true,
            num_timestamps: None,
            values: BTreeMap::new(),
        }
    }
}

impl TrainingForm {
    /// Builds a form from command-line options
    pub fn from_args(args: &TrainingArgs) -> Result<Self, FormError> {
        let mut form = Self {
            environment: args.environment.clone(),
            use_defaults: !args.custom && args.params.is_empty(),
            num_timestamps: args.num_timestamps,
            values: BTreeMap::new(),
        };

        for assignment in &args.params {
            let (name, value) = assignment
                .split_once('=')
                .ok_or_else(|| FormError::MalformedAssignment(assignment.clone()))?;
            form.set_param(name.trim(), value.trim())?;
        }

        Ok(form)
    }

    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }

    pub fn set_environment(&mut self, environment: impl Into<String>) {
        self.environment = Some(environment.into());
    }

    pub fn uses_defaults(&self) -> bool {
        self.use_defaults
    }

    pub fn set_use_defaults(&mut self, use_defaults: bool) {
        self.use_defaults = use_defaults;
    }

    /// Stores a raw hyperparameter value; the name must be in the catalog
    pub fn set_param(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        if find_hyperparameter(name).is_none() {
            return Err(FormError::UnknownParameter(name.to_string()));
        }
        self.values.insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Assembles the start request, validating every field
    pub fn to_request(&self) -> Result<StartTraining, FormError> {
        let environment = self
            .environment
            .as_deref()
            .map(str::trim)
            .filter(|env| !env.is_empty())
            .ok_or(FormError::MissingField("environment"))?;

        if find_environment(environment).is_none() {
            warn!(
                "Environment '{}' is not in the local catalog, the server may reject it",
                environment
            );
        }

        if self.num_timestamps == Some(0) {
            return Err(FormError::InvalidValue {
                name: "num_timestamps".to_string(),
                value: "0".to_string(),
            });
        }

        let hyperparameters = if self.use_defaults {
            None
        } else {
            let mut resolved = BTreeMap::new();
            for spec in HYPERPARAMETERS {
                let value = match self.values.get(spec.name) {
                    Some(raw) => raw.parse::<f64>().map_err(|_| FormError::InvalidValue {
                        name: spec.name.to_string(),
                        value: raw.clone(),
                    })?,
                    None => spec.default,
                };

                if !spec.accepts(value) {
                    let in_range = value >= spec.min && value <= spec.max;
                    return Err(if in_range && value.fract() == 0.0 {
                        FormError::OffStep {
                            name: spec.name.to_string(),
                            value,
                            min: spec.min,
                            step: spec.step,
                        }
                    } else {
                        FormError::OutOfRange {
                            name: spec.name.to_string(),
                            value,
                            min: spec.min,
                            max: spec.max,
                        }
                    });
                }
                resolved.insert(spec.name.to_string(), value);
            }
            Some(resolved)
        };

        Ok(StartTraining {
            environment: environment.to_string(),
            num_timestamps: self.num_timestamps,
            hyperparameters,
        })
    }

    /// Multi-line summary for the console's `form` command
    pub fn describe(&self) -> String {
        let environment = match self.environment() {
            Some(name) => match find_environment(name) {
                Some(env) => format!("{} ({}, {})", name, env.gym_id, env.kind.label()),
                None => format!("{} (not in catalog)", name),
            },
            None => "<unset>".to_string(),
        };
        let num_timestamps = match self.num_timestamps {
            Some(n) => n.to_string(),
            None => format!("{} (server default)", DEFAULT_NUM_TIMESTAMPS),
        };

        let mut lines = vec![
            format!("environment:     {}", environment),
            format!("num_timestamps:  {}", num_timestamps),
            format!(
                "hyperparameters: {}",
                if self.uses_defaults() { "defaults" } else { "custom" }
            ),
        ];
        if !self.uses_defaults() {
            for spec in HYPERPARAMETERS {
                let value = self
                    .values
                    .get(spec.name)
                    .cloned()
                    .unwrap_or_else(|| spec.format(spec.default));
                lines.push(format!("  {:<24}{}", spec.name, value));
            }
        }
        lines.join("\n")
    }
}
