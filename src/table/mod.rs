//! Declarative transition table.
//!
//! The table is the single definition of legal moves. Each rule is keyed
//! by `(source, trigger)` and carries a [`Condition`]; every non-terminal
//! stage branches either unconditionally or on the true/false arms of one
//! guard. Entry actions per stage are declared alongside the rules.
//!
//! | Stage     | Guard                 | True arm              | False arm   |
//! |-----------|-----------------------|-----------------------|-------------|
//! | intake    | has_focus_applicant   | process               | intake      |
//! | process   | is_evil               | accept                | decline     |
//! | accept    | is_fit                | assess                | train       |
//! | decline   | (none)                | intake                |             |
//! | train     | is_fit                | assess                | motivated   |
//! | motivated | has_motivation        | train                 | decline     |
//! | assess    | has_enough_recruits   | take_over_the_world   | intake      |

mod transition;
mod validation;

pub use transition::{Condition, TransitionRule, Trigger};
pub use validation::{validate, TableViolation};

use crate::core::Stage;
use crate::registry::{Action, Guard};
use std::collections::HashMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

#[derive(Clone, Debug, Default)]
pub struct TransitionTable {
    rules: Vec<TransitionRule>,
    entry_actions: HashMap<Stage, Vec<Action>>,
}

impl TransitionTable {
    /// An empty table: no rules, no entry actions.
    pub fn new() -> Self {
        Self::default()
    }

    /// The recruitment pipeline.
    pub fn recruitment() -> Self {
        use Action::*;
        use Guard::*;
        use Stage::*;
        use Trigger::*;

        Self::new()
            .with_rule(TransitionRule::when(Intake, Recruit, Process, HasFocusApplicant))
            .with_rule(TransitionRule::unless(Intake, NoRecruit, Intake, HasFocusApplicant))
            .with_rule(TransitionRule::when(Process, Evil, Accept, IsEvil))
            .with_rule(TransitionRule::unless(Process, Good, Decline, IsEvil))
            .with_rule(TransitionRule::when(Accept, Fit, Assess, IsFit))
            .with_rule(TransitionRule::unless(Accept, Unfit, Train, IsFit))
            .with_rule(TransitionRule::always(Decline, NewRecruitment, Intake))
            .with_rule(TransitionRule::when(Train, Fit, Assess, IsFit))
            .with_rule(TransitionRule::unless(Train, Unfit, Motivated, IsFit))
            .with_rule(TransitionRule::when(Motivated, Yes, Train, HasMotivation))
            .with_rule(TransitionRule::unless(Motivated, No, Decline, HasMotivation))
            .with_rule(TransitionRule::when(Assess, Enough, TakeOverTheWorld, HasEnoughRecruits))
            .with_rule(TransitionRule::unless(Assess, NotEnough, Intake, HasEnoughRecruits))
            .on_enter(Intake, [RefillFocusFromPending, PublishSnapshot])
            .on_enter(Process, [PublishSnapshot])
            .on_enter(Accept, [PublishSnapshot])
            .on_enter(Decline, [PublishSnapshot, ClearFocus])
            .on_enter(Train, [TrainFocus, PublishSnapshot])
            .on_enter(Motivated, [PublishSnapshot])
            .on_enter(Assess, [CommitFocusToRecruits, PublishSnapshot])
            .on_enter(TakeOverTheWorld, [PublishSnapshot])
    }

    pub fn with_rule(mut self, rule: TransitionRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Drop every rule leaving `source`.
    pub fn without_rules_from(mut self, source: Stage) -> Self {
        self.rules.retain(|rule| rule.source != source);
        self
    }

    /// Replace the entry actions of `stage`; they run in the given order.
    pub fn on_enter(mut self, stage: Stage, actions: impl IntoIterator<Item = Action>) -> Self {
        self.entry_actions
            .insert(stage, actions.into_iter().collect());
        self
    }

    pub fn rules(&self) -> &[TransitionRule] {
        &self.rules
    }

    pub fn lookup(&self, source: Stage, trigger: Trigger) -> Option<&TransitionRule> {
        self.rules
            .iter()
            .find(|rule| rule.source == source && rule.trigger == trigger)
    }

    pub fn rules_from(&self, source: Stage) -> impl Iterator<Item = &TransitionRule> + '_ {
        self.rules.iter().filter(move |rule| rule.source == source)
    }

    /// The guard `source` branches on, or `None` for unconditional and
    /// terminal stages.
    pub fn branch_guard(&self, source: Stage) -> Option<Guard> {
        self.rules_from(source)
            .find_map(|rule| rule.condition.guard())
    }

    pub fn entry_actions(&self, stage: Stage) -> &[Action] {
        self.entry_actions
            .get(&stage)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn validate(&self) -> Validation<(), NonEmptyVec<TableViolation>> {
        validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::State;

    #[test]
    fn lookup_is_keyed_by_stage_and_trigger() {
        let table = TransitionTable::recruitment();
        let rule = table.lookup(Stage::Process, Trigger::Evil).unwrap();
        assert_eq!(rule.target, Stage::Accept);
        assert_eq!(rule.condition, Condition::When(Guard::IsEvil));

        assert!(table.lookup(Stage::Process, Trigger::Fit).is_none());
        assert!(table.lookup(Stage::TakeOverTheWorld, Trigger::Recruit).is_none());
    }

    #[test]
    fn every_non_terminal_stage_has_rules() {
        let table = TransitionTable::recruitment();
        for stage in Stage::ALL {
            let count = table.rules_from(stage).count();
            if stage.is_final() {
                assert_eq!(count, 0, "{stage} should be terminal");
            } else {
                assert!(count > 0, "{stage} has no rules");
            }
        }
    }

    #[test]
    fn branch_guards_match_pipeline() {
        let table = TransitionTable::recruitment();
        assert_eq!(table.branch_guard(Stage::Intake), Some(Guard::HasFocusApplicant));
        assert_eq!(table.branch_guard(Stage::Process), Some(Guard::IsEvil));
        assert_eq!(table.branch_guard(Stage::Accept), Some(Guard::IsFit));
        assert_eq!(table.branch_guard(Stage::Decline), None);
        assert_eq!(table.branch_guard(Stage::Train), Some(Guard::IsFit));
        assert_eq!(table.branch_guard(Stage::Motivated), Some(Guard::HasMotivation));
        assert_eq!(table.branch_guard(Stage::Assess), Some(Guard::HasEnoughRecruits));
        assert_eq!(table.branch_guard(Stage::TakeOverTheWorld), None);
    }

    #[test]
    fn every_stage_publishes_on_entry() {
        let table = TransitionTable::recruitment();
        for stage in Stage::ALL {
            let publishes = table
                .entry_actions(stage)
                .iter()
                .filter(|a| **a == Action::PublishSnapshot)
                .count();
            assert_eq!(publishes, 1, "{stage}");
        }
    }

    #[test]
    fn entry_action_order_is_preserved() {
        let table = TransitionTable::recruitment();
        assert_eq!(
            table.entry_actions(Stage::Decline),
            &[Action::PublishSnapshot, Action::ClearFocus]
        );
        assert_eq!(
            table.entry_actions(Stage::Train),
            &[Action::TrainFocus, Action::PublishSnapshot]
        );
        assert_eq!(
            table.entry_actions(Stage::Assess),
            &[Action::CommitFocusToRecruits, Action::PublishSnapshot]
        );
        assert!(TransitionTable::new().entry_actions(Stage::Intake).is_empty());
    }

    #[test]
    fn without_rules_from_removes_only_that_stage() {
        let table = TransitionTable::recruitment().without_rules_from(Stage::Decline);
        assert_eq!(table.rules_from(Stage::Decline).count(), 0);
        assert_eq!(table.rules_from(Stage::Intake).count(), 2);
    }
}
