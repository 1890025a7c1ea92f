//! Entropy behind the motivation guard.
//!
//! The motivation guard is the only nondeterministic decision in the
//! machine. Sources are injected so trajectories through the
//! train/motivated cycle can be replayed exactly.

use crate::config::ConfigError;
use rand::distributions::{Bernoulli, Distribution};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;

/// Answers "is the focus candidate still motivated?".
pub trait MotivationSource {
    fn is_motivated(&mut self) -> bool;
}

/// Draws from a Bernoulli distribution.
///
/// # Example
///
/// ```rust
/// use domination::registry::{MotivationSource, RandomMotivation};
///
/// let mut a = RandomMotivation::seeded(0.7, 42).unwrap();
/// let mut b = RandomMotivation::seeded(0.7, 42).unwrap();
/// for _ in 0..16 {
///     assert_eq!(a.is_motivated(), b.is_motivated());
/// }
/// ```
#[derive(Clone, Debug)]
pub struct RandomMotivation {
    rng: StdRng,
    distribution: Bernoulli,
}

impl RandomMotivation {
    /// Seeded from OS entropy.
    pub fn new(probability: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            rng: StdRng::from_entropy(),
            distribution: bernoulli(probability)?,
        })
    }

    /// Reproducible source for a fixed seed.
    pub fn seeded(probability: f64, seed: u64) -> Result<Self, ConfigError> {
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            distribution: bernoulli(probability)?,
        })
    }
}

fn bernoulli(probability: f64) -> Result<Bernoulli, ConfigError> {
    Bernoulli::new(probability).map_err(|_| ConfigError::InvalidProbability(probability))
}

impl MotivationSource for RandomMotivation {
    fn is_motivated(&mut self) -> bool {
        self.distribution.sample(&mut self.rng)
    }
}

/// Replays a fixed list of answers, then repeats a fallback answer.
#[derive(Clone, Debug, Default)]
pub struct ScriptedMotivation {
    answers: VecDeque<bool>,
    fallback: bool,
}

impl ScriptedMotivation {
    /// Script with `false` as the fallback once answers run out.
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            fallback: false,
        }
    }

    /// Always gives the same answer.
    pub fn constant(answer: bool) -> Self {
        Self {
            answers: VecDeque::new(),
            fallback: answer,
        }
    }

    pub fn with_fallback(mut self, fallback: bool) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl MotivationSource for ScriptedMotivation {
    fn is_motivated(&mut self) -> bool {
        self.answers.pop_front().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_sources_agree() {
        let mut a = RandomMotivation::seeded(0.7, 7).unwrap();
        let mut b = RandomMotivation::seeded(0.7, 7).unwrap();
        let left: Vec<bool> = (0..64).map(|_| a.is_motivated()).collect();
        let right: Vec<bool> = (0..64).map(|_| b.is_motivated()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn certain_probabilities_are_certain() {
        let mut never = RandomMotivation::seeded(0.0, 1).unwrap();
        let mut always = RandomMotivation::seeded(1.0, 1).unwrap();
        for _ in 0..32 {
            assert!(!never.is_motivated());
            assert!(always.is_motivated());
        }
    }

    #[test]
    fn invalid_probability_is_rejected() {
        assert!(matches!(
            RandomMotivation::seeded(1.2, 1),
            Err(ConfigError::InvalidProbability(p)) if p == 1.2
        ));
        assert!(RandomMotivation::new(-0.1).is_err());
    }

    #[test]
    fn script_replays_then_falls_back() {
        let mut script = ScriptedMotivation::new([true, false, true]).with_fallback(true);
        assert_eq!(script.remaining(), 3);
        assert!(script.is_motivated());
        assert!(!script.is_motivated());
        assert!(script.is_motivated());
        assert_eq!(script.remaining(), 0);
        assert!(script.is_motivated());
    }

    #[test]
    fn constant_script_never_changes() {
        let mut script = ScriptedMotivation::constant(false);
        assert!((0..8).all(|_| !script.is_motivated()));
    }
}
