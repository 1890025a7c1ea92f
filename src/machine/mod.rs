//! The recruitment state machine engine.
//!
//! - [`Machine`]: owns the current state and the roster, and exposes the
//!   single-step driving operation
//! - [`MachineBuilder`]: assembles a machine from a table, a config, a
//!   status sink and a motivation source
//!
//! The engine performs no I/O of its own and holds no locks; it is driven
//! by an external loop, one step at a time.

mod builder;
mod engine;
mod error;

pub use builder::MachineBuilder;
pub use engine::{Fired, Machine, StepResult};
pub use error::BuildError;
