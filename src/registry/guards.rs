//! Guard predicates referenced by the transition table.

use super::motivation::MotivationSource;
use crate::candidate::Candidate;
use crate::config::RecruitmentConfig;
use crate::core::Stage;
use crate::error::MachineError;
use crate::roster::Roster;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// Names of the boolean predicates a transition can be conditioned on.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Guard {
    HasFocusApplicant,
    IsEvil,
    IsFit,
    /// Randomized; the only guard that is not a pure function of the roster.
    HasMotivation,
    HasEnoughRecruits,
}

impl Guard {
    pub fn name(&self) -> &'static str {
        match self {
            Guard::HasFocusApplicant => "has_focus_applicant",
            Guard::IsEvil => "is_evil",
            Guard::IsFit => "is_fit",
            Guard::HasMotivation => "has_motivation",
            Guard::HasEnoughRecruits => "has_enough_recruits",
        }
    }
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Evaluates guards against a roster using the configured thresholds and
/// an injected motivation source.
pub struct GuardRegistry {
    fitness_threshold: u32,
    required_recruits: usize,
    motivation: Box<dyn MotivationSource + Send>,
}

impl GuardRegistry {
    pub fn new(config: &RecruitmentConfig, motivation: Box<dyn MotivationSource + Send>) -> Self {
        Self {
            fitness_threshold: config.fitness_threshold,
            required_recruits: config.required_recruits,
            motivation,
        }
    }

    /// Evaluate `guard` fresh against the current roster.
    ///
    /// Fails only when a focus-inspecting guard runs without a focus
    /// candidate, which the transition table should make unreachable.
    pub fn evaluate(
        &mut self,
        guard: Guard,
        stage: Stage,
        roster: &Roster,
    ) -> Result<bool, MachineError> {
        let outcome = match guard {
            Guard::HasFocusApplicant => roster.has_focus(),
            Guard::IsEvil => focus(guard, stage, roster)?.is_evil(),
            Guard::IsFit => focus(guard, stage, roster)?.is_fit_at(self.fitness_threshold),
            Guard::HasMotivation => self.motivation.is_motivated(),
            Guard::HasEnoughRecruits => roster.recruits().len() >= self.required_recruits,
        };
        trace!(guard = %guard, %stage, outcome, "guard evaluated");
        Ok(outcome)
    }
}

fn focus<'a>(guard: Guard, stage: Stage, roster: &'a Roster) -> Result<&'a Candidate, MachineError> {
    roster.focus().ok_or(MachineError::MissingFocus {
        stage,
        operation: guard.name(),
    })
}
