//! Training catalog
//!
//! Environments the server can train on and the tunable hyperparameters
//! with their ranges. The server owns the authoritative copy; the console
//! uses this one to validate operator input before sending a start request.

use serde::Serialize;

/// Observation type of an environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnvironmentKind {
    /// Atari-style pixel observations
    Pixel,
    /// Low-dimensional state observations
    Regular,
}

impl EnvironmentKind {
    pub fn label(&self) -> &'static str {
        match self {
            EnvironmentKind::Pixel => "pixel",
            EnvironmentKind::Regular => "regular",
        }
    }
}

/// A trainable environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Environment {
    /// Short name sent in the start form
    pub name: &'static str,
    /// Gymnasium environment id
    pub gym_id: &'static str,
    pub kind: EnvironmentKind,
}

pub const ENVIRONMENTS: &[Environment] = &[
    Environment {
        name: "breakout",
        gym_id: "BreakoutNoFrameskip-v4",
        kind: EnvironmentKind::Pixel,
    },
    Environment {
        name: "pacman",
        gym_id: "ALE/Pacman-v5",
        kind: EnvironmentKind::Pixel,
    },
    Environment {
        name: "donkeykong",
        gym_id: "ALE/DonkeyKong-v5",
        kind: EnvironmentKind::Pixel,
    },
    Environment {
        name: "tetris",
        gym_id: "tetris_gymnasium/Tetris",
        kind: EnvironmentKind::Regular,
    },
    Environment {
        name: "cartpole",
        gym_id: "CartPole-v1",
        kind: EnvironmentKind::Regular,
    },
    Environment {
        name: "lunarlander",
        gym_id: "LunarLander-v3",
        kind: EnvironmentKind::Regular,
    },
    Environment {
        name: "mountaincar",
        gym_id: "MountainCar-v0",
        kind: EnvironmentKind::Regular,
    },
];

/// Looks up an environment by its short name
pub fn find_environment(name: &str) -> Option<&'static Environment> {
    ENVIRONMENTS.iter().find(|env| env.name == name)
}

/// Default training length sent when the operator does not pick one
pub const DEFAULT_NUM_TIMESTAMPS: u64 = 1_000_000;

/// Numeric type of a hyperparameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParamKind {
    Float,
    Integer,
}

/// Range and default of a tunable hyperparameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HyperparameterSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub default: f64,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl HyperparameterSpec {
    /// Checks that a value is inside the range and of the right kind
    ///
    /// Integer values must also sit on the step grid starting at `min`.
    /// Float steps only describe input granularity and are not enforced.
    pub fn accepts(&self, value: f64) -> bool {
        if !value.is_finite() || value < self.min || value > self.max {
            return false;
        }
        match self.kind {
            ParamKind::Float => true,
            ParamKind::Integer => {
                value.fract() == 0.0 && ((value - self.min) % self.step) == 0.0
            }
        }
    }

    /// Formats a value the way the server parses it
    pub fn format(&self, value: f64) -> String {
        match self.kind {
            ParamKind::Float => value.to_string(),
            ParamKind::Integer => format!("{}", value as i64),
        }
    }
}

pub const HYPERPARAMETERS: &[HyperparameterSpec] = &[
    HyperparameterSpec {
        name: "learning_rate",
        kind: ParamKind::Float,
        default: 0.001,
        min: 0.0001,
        max: 0.1,
        step: 0.0001,
    },
    HyperparameterSpec {
        name: "gamma",
        kind: ParamKind::Float,
        default: 0.99,
        min: 0.8,
        max: 1.0,
        step: 0.01,
    },
    HyperparameterSpec {
        name: "exploration_fraction",
        kind: ParamKind::Float,
        default: 0.1,
        min: 0.01,
        max: 1.0,
        step: 0.01,
    },
    HyperparameterSpec {
        name: "exploration_final_eps",
        kind: ParamKind::Float,
        default: 0.01,
        min: 0.001,
        max: 0.1,
        step: 0.001,
    },
    HyperparameterSpec {
        name: "learning_starts",
        kind: ParamKind::Integer,
        default: 1_000.0,
        min: 100.0,
        max: 10_000.0,
        step: 100.0,
    },
    HyperparameterSpec {
        name: "buffer_size",
        kind: ParamKind::Integer,
        default: 50_000.0,
        min: 1_000.0,
        max: 100_000.0,
        step: 1_000.0,
    },
    HyperparameterSpec {
        name: "batch_size",
        kind: ParamKind::Integer,
        default: 32.0,
        min: 16.0,
        max: 256.0,
        step: 16.0,
    },
    HyperparameterSpec {
        name: "target_update_interval",
        kind: ParamKind::Integer,
        default: 1_000.0,
        min: 100.0,
        max: 10_000.0,
        step: 100.0,
    },
];

/// Looks up a hyperparameter by name
pub fn find_hyperparameter(name: &str) -> Option<&'static HyperparameterSpec> {
    HYPERPARAMETERS.iter().find(|spec| spec.name == name)
}
