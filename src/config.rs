//! Tunable domain parameters for a recruitment machine.
//!
//! [`RecruitmentConfig`] holds every threshold the guards consult plus the
//! status topic. Fields missing from a JSON document fall back to the
//! `DEFAULT_*` constants.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Strength at which a candidate counts as fit.
pub const DEFAULT_FITNESS_THRESHOLD: u32 = 10;

/// Recruits required before the machine moves on to world domination.
pub const DEFAULT_REQUIRED_RECRUITS: usize = 3;

/// Probability that a struggling candidate stays motivated.
pub const DEFAULT_MOTIVATION_PROBABILITY: f64 = 0.7;

/// Topic every status snapshot is published on.
pub const DEFAULT_STATUS_TOPIC: &str = "wd/status";

/// Transitions kept in a machine's history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 256;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Motivation probability must lie in [0, 1], got {0}")]
    InvalidProbability(f64),

    #[error("Status topic must not be empty")]
    EmptyTopic,

    #[error("History capacity must be at least 1")]
    ZeroHistoryCapacity,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecruitmentConfig {
    #[serde(default = "default_fitness_threshold")]
    pub fitness_threshold: u32,

    #[serde(default = "default_required_recruits")]
    pub required_recruits: usize,

    #[serde(default = "default_motivation_probability")]
    pub motivation_probability: f64,

    #[serde(default = "default_status_topic")]
    pub status_topic: String,

    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

fn default_fitness_threshold() -> u32 {
    DEFAULT_FITNESS_THRESHOLD
}

fn default_required_recruits() -> usize {
    DEFAULT_REQUIRED_RECRUITS
}

fn default_motivation_probability() -> f64 {
    DEFAULT_MOTIVATION_PROBABILITY
}

fn default_status_topic() -> String {
    DEFAULT_STATUS_TOPIC.to_string()
}

fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

impl Default for RecruitmentConfig {
    fn default() -> Self {
        Self {
            fitness_threshold: default_fitness_threshold(),
            required_recruits: default_required_recruits(),
            motivation_probability: default_motivation_probability(),
            status_topic: default_status_topic(),
            history_capacity: default_history_capacity(),
        }
    }
}

impl RecruitmentConfig {
    /// Parse and validate a config from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: RecruitmentConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.motivation_probability) {
            return Err(ConfigError::InvalidProbability(self.motivation_probability));
        }
        if self.status_topic.is_empty() {
            return Err(ConfigError::EmptyTopic);
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::ZeroHistoryCapacity);
        }
        Ok(())
    }
}
