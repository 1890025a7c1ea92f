//! Queue manager: the focus slot plus the `pending` and `recruits` queues.
//!
//! A candidate lives in exactly one place at a time: the focus slot,
//! `pending`, or `recruits`. Declined candidates are dropped.

use crate::candidate::Candidate;
use serde::Serialize;

#[derive(Clone, Debug, Default, Serialize)]
pub struct Roster {
    focus: Option<Candidate>,
    pending: Vec<Candidate>,
    recruits: Vec<Candidate>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand a new applicant over: it becomes the focus if the slot is
    /// empty, otherwise it joins `pending`.
    pub fn admit(&mut self, candidate: Candidate) {
        if self.focus.is_none() {
            self.focus = Some(candidate);
        } else {
            self.pending.push(candidate);
        }
    }

    /// Pull the most recently queued applicant into an empty focus slot.
    ///
    /// Returns `true` if a candidate was pulled. An occupied slot or an
    /// empty queue leaves everything untouched.
    pub fn refill_focus(&mut self) -> bool {
        if self.focus.is_some() {
            return false;
        }
        self.focus = self.pending.pop();
        self.focus.is_some()
    }

    /// Drop the focus candidate, returning it.
    pub fn clear_focus(&mut self) -> Option<Candidate> {
        self.focus.take()
    }

    /// Train the focus candidate, returning its new strength.
    pub fn train_focus(&mut self) -> Option<u32> {
        let candidate = self.focus.as_mut()?;
        candidate.train();
        Some(candidate.strength())
    }

    /// Move the focus candidate to the end of `recruits`.
    ///
    /// Returns the number of recruits after the commit, or `None` if no
    /// candidate was in focus.
    pub fn commit_focus(&mut self) -> Option<usize> {
        let candidate = self.focus.take()?;
        self.recruits.push(candidate);
        Some(self.recruits.len())
    }

    pub fn focus(&self) -> Option<&Candidate> {
        self.focus.as_ref()
    }

    pub fn has_focus(&self) -> bool {
        self.focus.is_some()
    }

    pub fn pending(&self) -> &[Candidate] {
        &self.pending
    }

    pub fn recruits(&self) -> &[Candidate] {
        &self.recruits
    }

    /// True when no applicant is in focus or waiting.
    pub fn is_idle(&self) -> bool {
        self.focus.is_none() && self.pending.is_empty()
    }
}
