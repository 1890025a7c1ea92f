//! Builder for constructing recruitment machines.

use super::engine::Machine;
use super::error::BuildError;
use crate::config::RecruitmentConfig;
use crate::core::Stage;
use crate::registry::{GuardRegistry, MotivationSource, RandomMotivation};
use crate::sink::{NullSink, StatusSink};
use crate::table::TransitionTable;
use stillwater::validation::Validation;

/// Builder for a [`Machine`] with a fluent API.
///
/// Every part is optional: the defaults are the recruitment table, the
/// default [`RecruitmentConfig`], a [`NullSink`], an entropy-seeded
/// [`RandomMotivation`] and [`Stage::Intake`] as the initial state.
///
/// # Example
///
/// ```rust
/// use domination::core::Stage;
/// use domination::machine::Machine;
/// use domination::sink::MemorySink;
///
/// let sink = MemorySink::new();
/// let machine = Machine::builder()
///     .sink(sink.clone())
///     .seed(42)
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.state(), Stage::Intake);
/// assert_eq!(sink.len(), 1);
/// ```
pub struct MachineBuilder {
    config: RecruitmentConfig,
    table: Option<TransitionTable>,
    initial: Stage,
    sink: Option<Box<dyn StatusSink + Send>>,
    motivation: Option<Box<dyn MotivationSource + Send>>,
    seed: Option<u64>,
}

impl MachineBuilder {
    pub fn new() -> Self {
        Self {
            config: RecruitmentConfig::default(),
            table: None,
            initial: Stage::Intake,
            sink: None,
            motivation: None,
            seed: None,
        }
    }

    pub fn config(mut self, config: RecruitmentConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the recruitment table. It is validated on `build`.
    pub fn table(mut self, table: TransitionTable) -> Self {
        self.table = Some(table);
        self
    }

    pub fn initial(mut self, stage: Stage) -> Self {
        self.initial = stage;
        self
    }

    pub fn sink<K>(mut self, sink: K) -> Self
    where
        K: StatusSink + Send + 'static,
    {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Inject the motivation source. Takes precedence over [`seed`](Self::seed).
    pub fn motivation<M>(mut self, motivation: M) -> Self
    where
        M: MotivationSource + Send + 'static,
    {
        self.motivation = Some(Box::new(motivation));
        self
    }

    /// Seed the default random motivation source for reproducible runs.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the machine and publish its initial snapshot.
    pub fn build(self) -> Result<Machine, BuildError> {
        self.config.validate()?;

        let table = self.table.unwrap_or_else(TransitionTable::recruitment);
        if let Validation::Failure(errors) = table.validate() {
            return Err(BuildError::InvalidTable {
                violations: errors.iter().cloned().collect(),
            });
        }

        let probability = self.config.motivation_probability;
        let motivation: Box<dyn MotivationSource + Send> = match (self.motivation, self.seed) {
            (Some(motivation), _) => motivation,
            (None, Some(seed)) => Box::new(RandomMotivation::seeded(probability, seed)?),
            (None, None) => Box::new(RandomMotivation::new(probability)?),
        };
        let sink = self.sink.unwrap_or_else(|| Box::new(NullSink));
        let guards = GuardRegistry::new(&self.config, motivation);

        Ok(Machine::new(
            self.initial,
            table,
            guards,
            sink,
            self.config.status_topic,
            self.config.history_capacity,
        ))
    }
}

impl Default for MachineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::registry::ScriptedMotivation;
    use crate::sink::MemorySink;
    use crate::table::{TableViolation, TransitionRule, Trigger};

    #[test]
    fn defaults_build() {
        let machine = MachineBuilder::new().build().unwrap();
        assert_eq!(machine.state(), Stage::Intake);
        assert!(machine.roster().is_idle());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let result = MachineBuilder::new()
            .config(RecruitmentConfig {
                motivation_probability: 2.0,
                ..Default::default()
            })
            .build();
        assert!(matches!(
            result,
            Err(BuildError::Config(ConfigError::InvalidProbability(_)))
        ));
    }

    #[test]
    fn invalid_table_reports_all_violations() {
        let table = TransitionTable::recruitment()
            .without_rules_from(Stage::Process)
            .with_rule(TransitionRule::always(
                Stage::TakeOverTheWorld,
                Trigger::Recruit,
                Stage::Intake,
            ));
        let result = MachineBuilder::new().table(table).build();

        match result {
            Err(BuildError::InvalidTable { violations }) => {
                assert_eq!(violations.len(), 2);
                assert!(violations.contains(&TableViolation::MissingRules {
                    stage: Stage::Process
                }));
                assert!(violations.contains(&TableViolation::TerminalHasRules {
                    stage: Stage::TakeOverTheWorld
                }));
            }
            Err(other) => panic!("expected InvalidTable, got {other}"),
            Ok(_) => panic!("expected InvalidTable, got a machine"),
        }
    }

    #[test]
    fn largest_history_capacity_builds() {
        let config = RecruitmentConfig::from_json_str(
            r#"{ "history_capacity": 18446744073709551615 }"#,
        )
        .unwrap();
        let mut machine = MachineBuilder::new().config(config).seed(1).build().unwrap();

        machine.step().unwrap();
        assert_eq!(machine.history().capacity(), usize::MAX);
        assert_eq!(machine.history().len(), 1);
    }

    #[test]
    fn custom_topic_is_used_for_announcement() {
        let sink = MemorySink::new();
        MachineBuilder::new()
            .config(RecruitmentConfig {
                status_topic: "hq/status".to_string(),
                ..Default::default()
            })
            .sink(sink.clone())
            .motivation(ScriptedMotivation::default())
            .build()
            .unwrap();

        assert_eq!(sink.messages()[0].topic, "hq/status");
    }

    #[test]
    fn each_machine_gets_its_own_id() {
        let a = MachineBuilder::new().seed(1).build().unwrap();
        let b = MachineBuilder::new().seed(1).build().unwrap();
        assert_ne!(a.machine_id(), b.machine_id());
    }
}
