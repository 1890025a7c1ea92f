//! Triggers, conditions and transition rules.

use crate::core::Stage;
use crate::registry::Guard;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named events that move the machine between stages.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    Recruit,
    NoRecruit,
    Good,
    Evil,
    Fit,
    Unfit,
    NewRecruitment,
    Yes,
    No,
    Enough,
    NotEnough,
}

impl Trigger {
    pub fn name(&self) -> &'static str {
        match self {
            Trigger::Recruit => "recruit",
            Trigger::NoRecruit => "no_recruit",
            Trigger::Good => "good",
            Trigger::Evil => "evil",
            Trigger::Fit => "fit",
            Trigger::Unfit => "unfit",
            Trigger::NewRecruitment => "new_recruitment",
            Trigger::Yes => "yes",
            Trigger::No => "no",
            Trigger::Enough => "enough",
            Trigger::NotEnough => "not_enough",
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// When a rule may fire.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Unconditional.
    Always,
    /// Fires when the guard holds.
    When(Guard),
    /// Fires when the guard does not hold.
    Unless(Guard),
}

impl Condition {
    pub fn guard(&self) -> Option<Guard> {
        match self {
            Condition::Always => None,
            Condition::When(guard) | Condition::Unless(guard) => Some(*guard),
        }
    }

    /// Whether the rule fires for a guard outcome.
    ///
    /// `outcome` is `None` when no guard was evaluated, which only
    /// satisfies [`Condition::Always`].
    pub fn accepts(&self, outcome: Option<bool>) -> bool {
        match self {
            Condition::Always => true,
            Condition::When(_) => outcome == Some(true),
            Condition::Unless(_) => outcome == Some(false),
        }
    }
}

/// One legal move: `(source, trigger) -> target`, under a condition.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TransitionRule {
    pub source: Stage,
    pub trigger: Trigger,
    pub target: Stage,
    pub condition: Condition,
}

impl TransitionRule {
    pub fn always(source: Stage, trigger: Trigger, target: Stage) -> Self {
        Self {
            source,
            trigger,
            target,
            condition: Condition::Always,
        }
    }

    pub fn when(source: Stage, trigger: Trigger, target: Stage, guard: Guard) -> Self {
        Self {
            source,
            trigger,
            target,
            condition: Condition::When(guard),
        }
    }

    pub fn unless(source: Stage, trigger: Trigger, target: Stage, guard: Guard) -> Self {
        Self {
            source,
            trigger,
            target,
            condition: Condition::Unless(guard),
        }
    }

    /// Check if this rule can fire from `current` given a guard outcome (pure).
    pub fn can_fire(&self, current: Stage, outcome: Option<bool>) -> bool {
        self.source == current && self.condition.accepts(outcome)
    }
}
