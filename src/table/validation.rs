//! Structural checks for transition tables.
//!
//! Checks accumulate every violation through `stillwater`'s `Validation`
//! instead of stopping at the first one, so a broken table is reported in
//! full.

use super::transition::{Condition, TransitionRule, Trigger};
use super::TransitionTable;
use crate::core::{Stage, State};
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TableViolation {
    #[error("Non-terminal state '{stage}' has no outgoing rules")]
    MissingRules { stage: Stage },

    #[error("Terminal state '{stage}' has outgoing rules")]
    TerminalHasRules { stage: Stage },

    #[error("Trigger '{trigger}' is defined more than once for state '{stage}'")]
    DuplicateTrigger { stage: Stage, trigger: Trigger },

    #[error(
        "Rules of state '{stage}' must be one unconditional rule or a when/unless pair on one guard"
    )]
    UnbalancedArms { stage: Stage },
}

type Checked = Validation<(), NonEmptyVec<TableViolation>>;

/// Validate every stage's arms and every `(stage, trigger)` key.
pub fn validate(table: &TransitionTable) -> Checked {
    let mut checks: Vec<Checked> = Vec::new();

    for stage in Stage::ALL {
        let rules: Vec<&TransitionRule> = table.rules_from(stage).collect();
        checks.push(check_arms(stage, &rules));
    }

    let mut seen = HashSet::new();
    for rule in table.rules() {
        let check = if seen.insert((rule.source, rule.trigger)) {
            Validation::success(())
        } else {
            Validation::fail(TableViolation::DuplicateTrigger {
                stage: rule.source,
                trigger: rule.trigger,
            })
        };
        checks.push(check);
    }

    Validation::all_vec(checks).map(|_| ())
}

fn check_arms(stage: Stage, rules: &[&TransitionRule]) -> Checked {
    if stage.is_final() {
        return if rules.is_empty() {
            Validation::success(())
        } else {
            Validation::fail(TableViolation::TerminalHasRules { stage })
        };
    }

    match rules {
        [] => Validation::fail(TableViolation::MissingRules { stage }),
        [only] if only.condition == Condition::Always => Validation::success(()),
        [first, second] => match (first.condition, second.condition) {
            (Condition::When(a), Condition::Unless(b)) | (Condition::Unless(a), Condition::When(b))
                if a == b =>
            {
                Validation::success(())
            }
            _ => Validation::fail(TableViolation::UnbalancedArms { stage }),
        },
        _ => Validation::fail(TableViolation::UnbalancedArms { stage }),
    }
}
