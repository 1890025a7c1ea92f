//! Fatal engine faults.

use crate::core::Stage;
use crate::table::Trigger;
use thiserror::Error;

/// Errors raised while driving a machine.
///
/// None of these describe a guard rejecting a transition; that outcome is
/// [`Fired::Rejected`](crate::machine::Fired::Rejected). Every variant
/// means the transition table, the actions and the caller disagree about
/// what is legal. The step that produced it left state, focus, queues and
/// history unchanged, though a motivation draw made by its guard is spent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    #[error("'{operation}' requires a focus candidate in state '{stage}' but none is present")]
    MissingFocus {
        stage: Stage,
        operation: &'static str,
    },

    #[error("No transition arm accepted the guard outcome in state '{stage}'")]
    NoArmFired { stage: Stage },

    #[error("Trigger '{trigger}' is not defined for state '{stage}'")]
    UnknownTrigger { stage: Stage, trigger: Trigger },
}
