//! State trait and the recruitment pipeline's stages.
//!
//! All state machine states implement [`State`], which provides pure
//! methods for inspecting state properties without side effects.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

/// Trait for state machine states.
///
/// All methods are pure - no side effects. States are small immutable
/// values that describe the current position in a state machine.
///
/// # Required Traits
///
/// - `Copy`: States are tokens and are passed around by value
/// - `Eq`: States must be comparable for transition lookup
/// - `Debug`: States must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: States appear in snapshots and history
///
/// # Example
///
/// ```rust
/// use domination::core::{Stage, State};
///
/// assert_eq!(Stage::Intake.name(), "intake");
/// assert!(Stage::TakeOverTheWorld.is_final());
/// assert!(!Stage::Train.is_final());
/// ```
pub trait State:
    Copy + Eq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display, logging and published snapshots.
    fn name(&self) -> &'static str;

    /// Check if this is a final (terminal) state.
    ///
    /// Final states have no outgoing transitions; driving the machine
    /// further from one is a no-op.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}

/// Stages of the recruitment pipeline.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Waiting for an applicant to come into focus.
    Intake,
    /// Sorting the focus applicant by alignment.
    Process,
    Accept,
    Decline,
    Train,
    Motivated,
    /// Committing the focus applicant and counting recruits.
    Assess,
    TakeOverTheWorld,
}

impl Stage {
    /// Every stage, in pipeline order.
    pub const ALL: [Stage; 8] = [
        Stage::Intake,
        Stage::Process,
        Stage::Accept,
        Stage::Decline,
        Stage::Train,
        Stage::Motivated,
        Stage::Assess,
        Stage::TakeOverTheWorld,
    ];
}

impl State for Stage {
    fn name(&self) -> &'static str {
        match self {
            Self::Intake => "intake",
            Self::Process => "process",
            Self::Accept => "accept",
            Self::Decline => "decline",
            Self::Train => "train",
            Self::Motivated => "motivated",
            Self::Assess => "assess",
            Self::TakeOverTheWorld => "take_over_the_world",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::TakeOverTheWorld)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
