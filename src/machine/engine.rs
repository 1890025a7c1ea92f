//! The step-driven recruitment machine.

use crate::candidate::Candidate;
use crate::core::{Stage, State, StateHistory, StateTransition};
use crate::error::MachineError;
use crate::registry::{check_preconditions, ActionContext, Guard, GuardRegistry};
use crate::roster::Roster;
use crate::sink::{StatusSink, StatusSnapshot};
use crate::table::{TransitionRule, TransitionTable, Trigger};
use chrono::Utc;
use tracing::{debug, error, info, trace, warn};
use uuid::Uuid;

/// Result of one call to [`Machine::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// A rule fired. `from == to` for the intake re-poll.
    Transitioned {
        from: Stage,
        trigger: Trigger,
        to: Stage,
    },

    /// The machine is in a terminal state; nothing happened.
    Halted(Stage),
}

impl StepResult {
    /// The machine's state after the step.
    pub fn state(&self) -> Stage {
        match self {
            StepResult::Transitioned { to, .. } => *to,
            StepResult::Halted(stage) => *stage,
        }
    }
}

/// Result of explicitly firing one trigger with [`Machine::fire`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fired {
    Transitioned(Stage),
    /// The trigger's guard did not hold; nothing happened.
    Rejected,
}

/// A recruitment state machine.
///
/// Owns its state, roster, guard registry and status sink. Nothing is
/// shared between machines.
///
/// Each [`step`](Machine::step) evaluates the current stage's guard once,
/// follows the matching arm of the transition table, runs the destination's
/// entry actions and returns. A step either completes fully or fails
/// before touching state, focus, queues or history.
pub struct Machine {
    id: Uuid,
    state: Stage,
    roster: Roster,
    table: TransitionTable,
    guards: GuardRegistry,
    sink: Box<dyn StatusSink + Send>,
    topic: String,
    history: StateHistory<Stage>,
    fired: u64,
}

impl Machine {
    pub(crate) fn new(
        initial: Stage,
        table: TransitionTable,
        guards: GuardRegistry,
        sink: Box<dyn StatusSink + Send>,
        topic: String,
        history_capacity: usize,
    ) -> Self {
        let mut machine = Self {
            id: Uuid::new_v4(),
            state: initial,
            roster: Roster::new(),
            table,
            guards,
            sink,
            topic,
            history: StateHistory::with_capacity(history_capacity),
            fired: 0,
        };
        debug!(machine_id = %machine.id, state = %initial, "machine created");
        machine.announce();
        machine
    }

    pub fn builder() -> super::MachineBuilder {
        super::MachineBuilder::new()
    }

    pub fn machine_id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> Stage {
        self.state
    }

    pub fn is_final(&self) -> bool {
        self.state.is_final()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    pub fn history(&self) -> &StateHistory<Stage> {
        &self.history
    }

    /// Transitions fired over the machine's lifetime.
    pub fn transitions_fired(&self) -> u64 {
        self.fired
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot::capture(self.state, &self.roster)
    }

    /// Hand an applicant to the machine. It takes the focus slot if that
    /// is empty and joins `pending` otherwise.
    pub fn admit(&mut self, applicant: impl Into<Candidate>) {
        let candidate = applicant.into();
        debug!(machine_id = %self.id, name = candidate.name(), "applicant admitted");
        self.roster.admit(candidate);
    }

    /// Admit applicants in the order given.
    pub fn admit_all<I, T>(&mut self, applicants: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<Candidate>,
    {
        for applicant in applicants {
            self.admit(applicant);
        }
    }

    /// Advance the machine by exactly one transition.
    ///
    /// Calling `step` in a terminal state is a no-op returning
    /// [`StepResult::Halted`].
    pub fn step(&mut self) -> Result<StepResult, MachineError> {
        let from = self.state;
        if from.is_final() {
            return Ok(StepResult::Halted(from));
        }

        let outcome = match self.table.branch_guard(from) {
            Some(guard) => Some(self.check(guard)?),
            None => None,
        };

        let rule = match self.table.rules_from(from).find(|r| r.can_fire(from, outcome)) {
            Some(rule) => *rule,
            None => return Err(self.fault(MachineError::NoArmFired { stage: from })),
        };

        self.apply(rule)?;
        Ok(StepResult::Transitioned {
            from,
            trigger: rule.trigger,
            to: rule.target,
        })
    }

    /// Fire `trigger` from the current state.
    ///
    /// The trigger's guard is evaluated fresh. If it does not hold the
    /// transition is rejected and nothing changes; that is not an error.
    pub fn fire(&mut self, trigger: Trigger) -> Result<Fired, MachineError> {
        let stage = self.state;
        let rule = match self.table.lookup(stage, trigger) {
            Some(rule) => *rule,
            None => return Err(self.fault(MachineError::UnknownTrigger { stage, trigger })),
        };

        let outcome = match rule.condition.guard() {
            Some(guard) => Some(self.check(guard)?),
            None => None,
        };
        if !rule.can_fire(stage, outcome) {
            trace!(machine_id = %self.id, %stage, %trigger, "trigger rejected by guard");
            return Ok(Fired::Rejected);
        }

        self.apply(rule)?;
        Ok(Fired::Transitioned(rule.target))
    }

    /// Step until the machine halts or `max_steps` steps have run,
    /// returning the state reached.
    pub fn drive(&mut self, max_steps: usize) -> Result<Stage, MachineError> {
        for _ in 0..max_steps {
            if let StepResult::Halted(stage) = self.step()? {
                return Ok(stage);
            }
        }
        Ok(self.state)
    }

    fn check(&mut self, guard: Guard) -> Result<bool, MachineError> {
        let result = self.guards.evaluate(guard, self.state, &self.roster);
        result.map_err(|e| self.fault(e))
    }

    fn apply(&mut self, rule: TransitionRule) -> Result<(), MachineError> {
        let actions = self.table.entry_actions(rule.target);
        if let Err(e) = check_preconditions(actions, rule.target, &self.roster) {
            return Err(self.fault(e));
        }

        self.state = rule.target;
        self.fired += 1;
        self.history.record(StateTransition {
            from: rule.source,
            to: rule.target,
            trigger: rule.trigger.name().to_string(),
            timestamp: Utc::now(),
            sequence: self.fired,
        });
        debug!(
            machine_id = %self.id,
            from = %rule.source,
            trigger = %rule.trigger,
            to = %rule.target,
            "transition fired"
        );

        let mut ctx = ActionContext {
            stage: rule.target,
            roster: &mut self.roster,
            sink: self.sink.as_mut(),
            topic: &self.topic,
        };
        for action in actions {
            trace!(machine_id = %self.id, action = %action, stage = %rule.target, "entry action");
            action.apply(&mut ctx)?;
        }

        if rule.target.is_final() {
            info!(
                machine_id = %self.id,
                recruits = self.roster.recruits().len(),
                "terminal state reached"
            );
        }
        Ok(())
    }

    fn announce(&mut self) {
        let snapshot = self.snapshot();
        match snapshot.to_payload() {
            Ok(payload) => self.sink.publish(&self.topic, &payload),
            Err(e) => warn!(machine_id = %self.id, error = %e, "snapshot encoding failed"),
        }
    }

    fn fault(&self, e: MachineError) -> MachineError {
        error!(machine_id = %self.id, state = %self.state, error = %e, "machine fault");
        e
    }
}
