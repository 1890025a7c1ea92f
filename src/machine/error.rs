//! Errors raised while building a machine.

use crate::config::ConfigError;
use crate::table::TableViolation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Transition table has {} violation(s): {}", .violations.len(), join(.violations))]
    InvalidTable { violations: Vec<TableViolation> },
}

fn join(violations: &[TableViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
