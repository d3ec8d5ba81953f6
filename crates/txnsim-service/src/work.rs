//! Synthetic database work.

use std::time::{Duration, Instant};
use tracing::debug;

/// Occupies the calling scope's connection for a fixed duration.
///
/// The simulator is stateless and never touches the pool; it only burns time
/// on the tokio timer and reports how long it actually took.
#[derive(Debug, Clone, Copy)]
pub struct WorkSimulator {
    duration: Duration,
}

impl WorkSimulator {
    /// Creates a simulator with the given work duration.
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// The configured work duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Performs the simulated work, returning the elapsed time.
    pub async fn execute(&self) -> Result<Duration, WorkFailure> {
        debug!(duration_ms = self.duration.as_millis(), "simulated db work starting");
        let started = Instant::now();
        tokio::time::sleep(self.duration).await;
        let elapsed = started.elapsed();
        debug!(elapsed_ms = elapsed.as_millis(), "simulated db work finished");
        Ok(elapsed)
    }
}

/// A failure raised by a unit of work.
///
/// The simulator itself never fails; the type exists so callers running real
/// (or deliberately failing) work through a scope have an error to raise.
#[derive(Debug, Clone, thiserror::Error)]
#[error("simulated work failed: {reason}")]
pub struct WorkFailure {
    /// Human-readable description of the failure.
    pub reason: String,
}

impl WorkFailure {
    /// Creates a failure with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
