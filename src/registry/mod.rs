//! Guard and action registry.
//!
//! Guards and actions are named values the transition table refers to.
//! They live apart from the table so either side can be tested alone:
//!
//! - [`Guard`] and [`GuardRegistry`]: boolean predicates over the roster
//! - [`Action`]: side effects run on state entry
//! - [`MotivationSource`]: the injectable entropy behind `HasMotivation`

mod actions;
mod guards;
mod motivation;

pub use actions::{check_preconditions, Action, ActionContext};
pub use guards::{Guard, GuardRegistry};
pub use motivation::{MotivationSource, RandomMotivation, ScriptedMotivation};
