//! End-to-end trajectories through the recruitment pipeline.

use domination::candidate::{Alignment, CandidateDescriptor};
use domination::core::Stage;
use domination::intake::parse_applicants;
use domination::machine::{Fired, Machine, StepResult};
use domination::registry::ScriptedMotivation;
use domination::sink::{MemorySink, StatusSnapshot};
use domination::table::Trigger;
use domination::RecruitmentConfig;

fn machine_with(sink: &MemorySink, motivation: ScriptedMotivation) -> Machine {
    Machine::builder()
        .sink(sink.clone())
        .motivation(motivation)
        .build()
        .unwrap()
}

fn states(machine: &mut Machine, steps: usize) -> Vec<Stage> {
    (0..steps).map(|_| machine.step().unwrap().state()).collect()
}

#[test]
fn evil_fit_applicant_is_recruited() {
    let sink = MemorySink::new();
    let mut machine = machine_with(&sink, ScriptedMotivation::default());
    machine.admit(CandidateDescriptor::new("Ann", 12, Alignment::Evil));

    assert_eq!(
        states(&mut machine, 4),
        vec![Stage::Process, Stage::Accept, Stage::Assess, Stage::Intake]
    );

    let roster = machine.roster();
    assert_eq!(roster.recruits().len(), 1);
    assert_eq!(roster.recruits()[0].name(), "Ann");
    assert!(roster.pending().is_empty());
    assert!(roster.focus().is_none());
}

#[test]
fn good_applicant_is_declined() {
    let sink = MemorySink::new();
    let mut machine = machine_with(&sink, ScriptedMotivation::default());
    machine.admit(CandidateDescriptor::new("Bob", 5, Alignment::Good));

    assert_eq!(
        states(&mut machine, 3),
        vec![Stage::Process, Stage::Decline, Stage::Intake]
    );
    assert!(machine.roster().recruits().is_empty());
    assert!(machine.roster().is_idle());

    // The decline snapshot is published before the focus is cleared.
    let decline = sink
        .snapshots()
        .into_iter()
        .find(|s| s.state == Stage::Decline)
        .unwrap();
    assert_eq!(decline.name.as_deref(), Some("Bob"));
}

#[test]
fn unfit_applicant_trains_until_fit() {
    let sink = MemorySink::new();
    let mut machine = machine_with(&sink, ScriptedMotivation::new([true, false]));
    machine.admit(CandidateDescriptor::new("Cid", 8, Alignment::Evil));

    assert_eq!(
        states(&mut machine, 7),
        vec![
            Stage::Process,
            Stage::Accept,
            Stage::Train,
            Stage::Motivated,
            Stage::Train,
            Stage::Assess,
            Stage::Intake,
        ]
    );

    let recruits = machine.roster().recruits();
    assert_eq!(recruits.len(), 1);
    assert_eq!(recruits[0].name(), "Cid");
    assert_eq!(recruits[0].strength(), 10);

    let trained: Vec<u32> = sink
        .snapshots()
        .iter()
        .filter(|s| s.state == Stage::Train)
        .filter_map(|s| s.strength)
        .collect();
    assert_eq!(trained, vec![9, 10]);
}

#[test]
fn unmotivated_applicant_is_declined() {
    let sink = MemorySink::new();
    let mut machine = machine_with(&sink, ScriptedMotivation::new([false]));
    machine.admit(CandidateDescriptor::new("Dee", 2, Alignment::Evil));

    assert_eq!(
        states(&mut machine, 6),
        vec![
            Stage::Process,
            Stage::Accept,
            Stage::Train,
            Stage::Motivated,
            Stage::Decline,
            Stage::Intake,
        ]
    );
    assert!(machine.roster().recruits().is_empty());
}

#[test]
fn three_recruits_take_over_the_world() {
    let applicants = parse_applicants(
        r#"[
            {"name": "Ann", "strength": 12, "alignment": "evil"},
            {"name": "Bob", "strength": 5, "alignment": "good"},
            {"name": "Eve", "strength": 10, "alignment": "evil"},
            {"name": "Fay", "strength": 15, "alignment": "evil"}
        ]"#,
    )
    .unwrap();

    let sink = MemorySink::new();
    let mut machine = machine_with(&sink, ScriptedMotivation::default());
    machine.admit_all(applicants);

    assert_eq!(machine.drive(1_000).unwrap(), Stage::TakeOverTheWorld);

    // Ann takes focus on admission; the rest are pulled last-in-first-out.
    let names: Vec<&str> = machine
        .roster()
        .recruits()
        .iter()
        .map(|c| c.name())
        .collect();
    assert_eq!(names, vec!["Ann", "Fay", "Eve"]);
    // Bob was never reached.
    assert_eq!(machine.roster().pending().len(), 1);
    assert_eq!(machine.roster().pending()[0].name(), "Bob");

    let published = sink.len();
    assert_eq!(machine.step().unwrap(), StepResult::Halted(Stage::TakeOverTheWorld));
    assert_eq!(sink.len(), published);
}

#[test]
fn one_snapshot_per_state_entry() {
    let sink = MemorySink::new();
    let mut machine = machine_with(&sink, ScriptedMotivation::default());

    // Idle polling publishes on every self-loop entry.
    states(&mut machine, 3);
    assert_eq!(sink.len(), 4);

    machine.admit(CandidateDescriptor::new("Ann", 12, Alignment::Evil));
    states(&mut machine, 4);

    let snapshots = sink.snapshots();
    assert_eq!(snapshots.len(), 8);
    assert_eq!(
        &snapshots[4..],
        &[
            StatusSnapshot {
                state: Stage::Process,
                name: Some("Ann".to_string()),
                strength: Some(12),
                alignment: Some(Alignment::Evil),
            },
            StatusSnapshot {
                state: Stage::Accept,
                name: Some("Ann".to_string()),
                strength: Some(12),
                alignment: Some(Alignment::Evil),
            },
            StatusSnapshot {
                state: Stage::Assess,
                name: None,
                strength: None,
                alignment: None,
            },
            StatusSnapshot {
                state: Stage::Intake,
                name: None,
                strength: None,
                alignment: None,
            },
        ]
    );
    assert!(sink.messages().iter().all(|m| m.topic == "wd/status"));
}

#[test]
fn explicit_triggers_follow_the_table() {
    let sink = MemorySink::new();
    let mut machine = machine_with(&sink, ScriptedMotivation::default());
    machine.admit(CandidateDescriptor::new("Ann", 12, Alignment::Evil));

    assert_eq!(machine.fire(Trigger::NoRecruit).unwrap(), Fired::Rejected);
    assert_eq!(
        machine.fire(Trigger::Recruit).unwrap(),
        Fired::Transitioned(Stage::Process)
    );
    assert_eq!(machine.fire(Trigger::Good).unwrap(), Fired::Rejected);
    assert_eq!(
        machine.fire(Trigger::Evil).unwrap(),
        Fired::Transitioned(Stage::Accept)
    );
    assert_eq!(machine.state(), Stage::Accept);
}

#[test]
fn thresholds_come_from_config() {
    let config = RecruitmentConfig::from_json_str(
        r#"{ "fitness_threshold": 3, "required_recruits": 1 }"#,
    )
    .unwrap();
    let sink = MemorySink::new();
    let mut machine = Machine::builder()
        .config(config)
        .sink(sink.clone())
        .motivation(ScriptedMotivation::default())
        .build()
        .unwrap();
    machine.admit(CandidateDescriptor::new("Gus", 3, Alignment::Evil));

    assert_eq!(
        states(&mut machine, 4),
        vec![
            Stage::Process,
            Stage::Accept,
            Stage::Assess,
            Stage::TakeOverTheWorld,
        ]
    );
}
