//! Candidate model: one applicant or recruit moving through the pipeline.

use crate::config::DEFAULT_FITNESS_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Moral alignment of a candidate. Fixed at creation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Good,
    Evil,
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alignment::Good => write!(f, "good"),
            Alignment::Evil => write!(f, "evil"),
        }
    }
}

/// Intake record for one applicant, as handed over by a data source.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct CandidateDescriptor {
    pub name: String,
    pub strength: u32,
    pub alignment: Alignment,
}

impl CandidateDescriptor {
    pub fn new(name: impl Into<String>, strength: u32, alignment: Alignment) -> Self {
        Self {
            name: name.into(),
            strength,
            alignment,
        }
    }
}

/// An applicant under evaluation, or a committed recruit.
///
/// `name` and `alignment` never change after construction. `strength`
/// only changes through [`Candidate::train`].
///
/// # Example
///
/// ```rust
/// use domination::candidate::{Alignment, Candidate};
///
/// let mut cid = Candidate::new("Cid", 9, Alignment::Evil);
/// assert!(cid.is_evil());
/// assert!(!cid.is_fit());
///
/// cid.train();
/// assert_eq!(cid.strength(), 10);
/// assert!(cid.is_fit());
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Candidate {
    name: String,
    strength: u32,
    alignment: Alignment,
}

impl Candidate {
    pub fn new(name: impl Into<String>, strength: u32, alignment: Alignment) -> Self {
        Self {
            name: name.into(),
            strength,
            alignment,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn strength(&self) -> u32 {
        self.strength
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Fit under [`DEFAULT_FITNESS_THRESHOLD`].
    ///
    /// A machine built with a custom `fitness_threshold` judges fitness
    /// with [`is_fit_at`](Self::is_fit_at) instead, so the two can differ.
    pub fn is_fit(&self) -> bool {
        self.is_fit_at(DEFAULT_FITNESS_THRESHOLD)
    }

    /// Fit under a configured threshold.
    pub fn is_fit_at(&self, threshold: u32) -> bool {
        self.strength >= threshold
    }

    pub fn is_evil(&self) -> bool {
        self.alignment == Alignment::Evil
    }

    /// Increase strength by exactly one. No upper bound is enforced beyond
    /// the integer range, where strength saturates.
    pub fn train(&mut self) {
        self.strength = self.strength.saturating_add(1);
    }
}

impl From<CandidateDescriptor> for Candidate {
    fn from(descriptor: CandidateDescriptor) -> Self {
        Candidate::new(descriptor.name, descriptor.strength, descriptor.alignment)
    }
}
