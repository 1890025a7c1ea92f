//! State transition history tracking.
//!
//! Keeps a bounded, ordered record of the transitions a machine has fired.
//! Idle machines re-poll the intake stage on every step, so the history
//! retains only the most recent transitions.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single fired transition.
///
/// # Example
///
/// ```rust
/// use domination::core::{Stage, StateTransition};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: Stage::Intake,
///     to: Stage::Process,
///     trigger: "recruit".to_string(),
///     timestamp: Utc::now(),
///     sequence: 1,
/// };
/// assert!(!transition.is_self_loop());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// Name of the trigger that fired
    pub trigger: String,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
    /// Position of this transition in the machine's lifetime, starting at 1
    pub sequence: u64,
}

impl<S: State> StateTransition<S> {
    /// True when the transition re-entered the state it left.
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Ordered, bounded history of state transitions.
///
/// Once `capacity` transitions are held, recording a new one evicts the
/// oldest.
///
/// # Example
///
/// ```rust
/// use domination::core::{Stage, StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let mut history = StateHistory::with_capacity(8);
/// history.record(StateTransition {
///     from: Stage::Intake,
///     to: Stage::Process,
///     trigger: "recruit".to_string(),
///     timestamp: Utc::now(),
///     sequence: 1,
/// });
/// history.record(StateTransition {
///     from: Stage::Process,
///     to: Stage::Accept,
///     trigger: "evil".to_string(),
///     timestamp: Utc::now(),
///     sequence: 2,
/// });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&Stage::Intake, &Stage::Process, &Stage::Accept]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    capacity: usize,
    transitions: VecDeque<StateTransition<S>>,
}

impl<S: State> StateHistory<S> {
    /// Create an empty history that retains at most `capacity` transitions.
    ///
    /// A capacity of zero is treated as one. Storage grows with use, so a
    /// large capacity costs nothing until transitions are recorded.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            transitions: VecDeque::new(),
        }
    }

    /// Record a transition, evicting the oldest one when full.
    pub fn record(&mut self, transition: StateTransition<S>) {
        if self.transitions.len() == self.capacity {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Get the path of states traversed by the retained transitions.
    ///
    /// Returns the `from` state of the oldest retained transition, then
    /// the `to` state of each transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Duration from the oldest to the newest retained transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        match (self.transitions.front(), self.transitions.back()) {
            (Some(first), Some(last)) => last
                .timestamp
                .signed_duration_since(first.timestamp)
                .to_std()
                .ok(),
            _ => None,
        }
    }

    /// Retained transitions, oldest first.
    pub fn transitions(&self) -> impl Iterator<Item = &StateTransition<S>> + '_ {
        self.transitions.iter()
    }

    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
