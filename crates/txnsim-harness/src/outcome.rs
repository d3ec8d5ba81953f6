//! Per-request outcomes collected by the harness.

use std::time::Duration;

/// What happened to one logical request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Outcome {
    /// The request completed.
    Success {
        /// Status reported by the service.
        status: u16,
        /// Time from dispatch to completion.
        latency: Duration,
    },
    /// The request did not complete within the harness deadline.
    TimedOut,
    /// The service returned an error.
    Error {
        /// Rendered error.
        reason: String,
    },
}

impl Outcome {
    /// True for [`Outcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// True for [`Outcome::TimedOut`].
    pub fn is_timed_out(&self) -> bool {
        matches!(self, Outcome::TimedOut)
    }

    /// True for [`Outcome::Error`].
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error { .. })
    }
}

/// The outcomes of one harness run, indexed by request number.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Outcomes {
    outcomes: Vec<Outcome>,
}

impl Outcomes {
    /// Number of requests driven.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// True when no requests were driven.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// The outcome of request `i`, in dispatch order.
    pub fn get(&self, i: usize) -> Option<&Outcome> {
        self.outcomes.get(i)
    }

    /// Iterates outcomes in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter()
    }

    /// Outcomes as a slice.
    pub fn as_slice(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Number of completed requests.
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of requests that exceeded the deadline.
    pub fn timed_out_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_timed_out()).count()
    }

    /// Number of requests that errored.
    pub fn error_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_error()).count()
    }

    /// True when every request completed.
    pub fn all_success(&self) -> bool {
        self.outcomes.iter().all(Outcome::is_success)
    }

    /// Consumes the set, yielding the raw list.
    pub fn into_vec(self) -> Vec<Outcome> {
        self.outcomes
    }
}

impl From<Vec<Outcome>> for Outcomes {
    fn from(outcomes: Vec<Outcome>) -> Self {
        Self { outcomes }
    }
}
