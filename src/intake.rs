//! Applicant intake from JSON.
//!
//! Applicants arrive as a JSON array of descriptors:
//!
//! ```json
//! [
//!   { "name": "Ann", "strength": 12, "alignment": "evil" },
//!   { "name": "Bob", "strength": 5, "alignment": "good" }
//! ]
//! ```

use crate::candidate::CandidateDescriptor;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed applicant data: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn parse_applicants(json: &str) -> Result<Vec<CandidateDescriptor>, IntakeError> {
    Ok(serde_json::from_str(json)?)
}

pub fn read_applicants<R: Read>(reader: R) -> Result<Vec<CandidateDescriptor>, IntakeError> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn load_applicants(path: impl AsRef<Path>) -> Result<Vec<CandidateDescriptor>, IntakeError> {
    let file = std::fs::File::open(path)?;
    read_applicants(std::io::BufReader::new(file))
}
