//! Domination: a guarded, step-driven recruitment state machine
//!
//! Applicants move through an explicit finite-state machine. Each step
//! evaluates one guard, follows one arm of a declarative transition table
//! and runs the destination's entry actions, which may move candidates
//! between queues and publish a status snapshot.
//!
//! # Core Concepts
//!
//! - **Stages**: the pipeline's states, via the `State` trait
//! - **Transition table**: `(stage, trigger) -> target` rules with guard conditions
//! - **Guards and actions**: named predicates and entry side effects
//! - **Roster**: the focus candidate plus the `pending` and `recruits` queues
//! - **Status sink**: fire-and-forget receiver of state snapshots
//!
//! # Example
//!
//! ```rust
//! use domination::candidate::{Alignment, CandidateDescriptor};
//! use domination::core::Stage;
//! use domination::machine::Machine;
//! use domination::registry::ScriptedMotivation;
//! use domination::sink::MemorySink;
//!
//! let sink = MemorySink::new();
//! let mut machine = Machine::builder()
//!     .sink(sink.clone())
//!     .motivation(ScriptedMotivation::default())
//!     .build()
//!     .unwrap();
//!
//! machine.admit(CandidateDescriptor::new("Ann", 12, Alignment::Evil));
//! assert_eq!(machine.step().unwrap().state(), Stage::Process);
//! assert_eq!(machine.step().unwrap().state(), Stage::Accept);
//! assert_eq!(machine.step().unwrap().state(), Stage::Assess);
//! assert_eq!(machine.step().unwrap().state(), Stage::Intake);
//!
//! assert_eq!(machine.roster().recruits().len(), 1);
//! assert_eq!(sink.len(), 5);
//! ```

pub mod candidate;
pub mod config;
pub mod core;
pub mod error;
pub mod intake;
pub mod machine;
pub mod registry;
pub mod roster;
pub mod sink;
pub mod table;

// Re-export commonly used types
pub use candidate::{Alignment, Candidate, CandidateDescriptor};
pub use config::RecruitmentConfig;
pub use self::core::{Stage, State, StateHistory, StateTransition};
pub use error::MachineError;
pub use machine::{BuildError, Fired, Machine, MachineBuilder, StepResult};
pub use sink::{StatusSink, StatusSnapshot};
pub use table::{Condition, TransitionRule, TransitionTable, Trigger};
