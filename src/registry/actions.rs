//! Entry actions run when a state is entered.

use crate::core::Stage;
use crate::error::MachineError;
use crate::roster::Roster;
use crate::sink::{StatusSink, StatusSnapshot};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Pull a pending applicant into an empty focus slot.
    RefillFocusFromPending,
    PublishSnapshot,
    /// Drop the focus candidate.
    ClearFocus,
    TrainFocus,
    /// Move the focus candidate into `recruits`.
    CommitFocusToRecruits,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::RefillFocusFromPending => "refill_focus_from_pending",
            Action::PublishSnapshot => "publish_snapshot",
            Action::ClearFocus => "clear_focus",
            Action::TrainFocus => "train_focus",
            Action::CommitFocusToRecruits => "commit_focus_to_recruits",
        }
    }

    pub fn requires_focus(&self) -> bool {
        matches!(self, Action::TrainFocus | Action::CommitFocusToRecruits)
    }

    /// Run the action for the state that was just entered.
    pub fn apply(self, ctx: &mut ActionContext<'_>) -> Result<(), MachineError> {
        match self {
            Action::RefillFocusFromPending => {
                if ctx.roster.refill_focus() {
                    debug!(stage = %ctx.stage, "focus refilled from pending");
                }
            }
            Action::PublishSnapshot => ctx.publish(),
            Action::ClearFocus => {
                if let Some(candidate) = ctx.roster.clear_focus() {
                    debug!(stage = %ctx.stage, name = candidate.name(), "focus cleared");
                }
            }
            Action::TrainFocus => {
                let strength = ctx
                    .roster
                    .train_focus()
                    .ok_or_else(|| self.missing_focus(ctx.stage))?;
                debug!(stage = %ctx.stage, strength, "focus trained");
            }
            Action::CommitFocusToRecruits => {
                let recruits = ctx
                    .roster
                    .commit_focus()
                    .ok_or_else(|| self.missing_focus(ctx.stage))?;
                debug!(stage = %ctx.stage, recruits, "focus committed");
            }
        }
        Ok(())
    }

    fn missing_focus(self, stage: Stage) -> MachineError {
        MachineError::MissingFocus {
            stage,
            operation: self.name(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Verify that `actions` can all run, in order, against `roster` without
/// touching it.
pub fn check_preconditions(
    actions: &[Action],
    stage: Stage,
    roster: &Roster,
) -> Result<(), MachineError> {
    let mut has_focus = roster.has_focus();
    let mut pending = roster.pending().len();
    for action in actions {
        if action.requires_focus() && !has_focus {
            return Err(action.missing_focus(stage));
        }
        match action {
            Action::RefillFocusFromPending if !has_focus && pending > 0 => {
                has_focus = true;
                pending -= 1;
            }
            Action::ClearFocus | Action::CommitFocusToRecruits => has_focus = false,
            _ => {}
        }
    }
    Ok(())
}

/// Everything an entry action may touch.
pub struct ActionContext<'a> {
    pub stage: Stage,
    pub roster: &'a mut Roster,
    pub sink: &'a mut dyn StatusSink,
    pub topic: &'a str,
}

impl ActionContext<'_> {
    fn publish(&mut self) {
        let snapshot = StatusSnapshot::capture(self.stage, self.roster);
        match snapshot.to_payload() {
            Ok(payload) => self.sink.publish(self.topic, &payload),
            Err(error) => warn!(stage = %self.stage, %error, "snapshot encoding failed"),
        }
    }
}
