//! Core state machine types.
//!
//! This module contains the pure pieces of the state machine:
//! - State definitions via the `State` trait and the `Stage` enum
//! - Bounded transition history
//!
//! Nothing in this module performs I/O or touches the applicant queues.

mod history;
mod state;

pub use history::{StateHistory, StateTransition};
pub use state::{Stage, State};
