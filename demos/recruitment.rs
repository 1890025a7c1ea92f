//! Recruitment Pipeline
//!
//! This example drives the recruitment machine over a batch of applicants
//! and prints every status snapshot as a `topic payload` line on stdout.
//!
//! Key concepts:
//! - Loading applicants and configuration from JSON
//! - Best-effort status publishing over a fallible transport
//! - Driving the machine step by step until it halts
//!
//! Run with: cargo run --example recruitment [applicants.json] [config.json]
//! Set RUST_LOG=domination=debug to see every transition.

use domination::intake::{load_applicants, parse_applicants};
use domination::machine::Machine;
use domination::sink::{BestEffort, WriterTransport};
use domination::{RecruitmentConfig, State};
use std::error::Error;
use tracing_subscriber::EnvFilter;

const APPLICANTS: &str = r#"[
    {"name": "Ann", "strength": 12, "alignment": "evil"},
    {"name": "Bob", "strength": 5, "alignment": "good"},
    {"name": "Cid", "strength": 8, "alignment": "evil"},
    {"name": "Dee", "strength": 2, "alignment": "evil"},
    {"name": "Eve", "strength": 10, "alignment": "evil"},
    {"name": "Fay", "strength": 15, "alignment": "evil"}
]"#;

const STEP_BUDGET: usize = 500;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let applicants = match args.next() {
        Some(path) => load_applicants(path)?,
        None => parse_applicants(APPLICANTS)?,
    };
    let config = match args.next() {
        Some(path) => RecruitmentConfig::load(path)?,
        None => RecruitmentConfig::default(),
    };

    println!("=== Recruitment Pipeline ===\n");
    println!(
        "{} applicants, {} recruits required\n",
        applicants.len(),
        config.required_recruits
    );

    let mut machine = Machine::builder()
        .config(config)
        .sink(BestEffort::new(WriterTransport::new(std::io::stdout())))
        .build()?;
    machine.admit_all(applicants);

    let reached = machine.drive(STEP_BUDGET)?;

    println!("\n=== Outcome ===");
    println!("Final state: {}", reached.name());
    println!("Transitions: {}", machine.transitions_fired());
    for recruit in machine.roster().recruits() {
        println!("  recruited {} (strength {})", recruit.name(), recruit.strength());
    }
    if !reached.is_final() {
        println!(
            "Step budget exhausted with {} applicants still pending",
            machine.roster().pending().len()
        );
    }

    Ok(())
}
