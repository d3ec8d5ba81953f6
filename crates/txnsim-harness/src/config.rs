//! Configuration for the concurrent client harness.

use std::time::Duration;

/// Configuration for [`ConcurrentHarness`](crate::ConcurrentHarness).
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// How many logical requests to drive.
    pub(crate) requests: usize,
    /// Dispatch offset between consecutive requests: request `i` is sent at
    /// `i * stagger`.
    pub(crate) stagger: Duration,
    /// Per-request completion budget. `None` waits as long as the request
    /// does, which against a hung service means forever.
    pub(crate) deadline: Option<Duration>,
}

impl HarnessConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> HarnessConfigBuilder {
        HarnessConfigBuilder::new()
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for harness configuration.
pub struct HarnessConfigBuilder {
    requests: usize,
    stagger: Duration,
    deadline: Option<Duration>,
}

impl HarnessConfigBuilder {
    /// Creates a builder with default values.
    pub fn new() -> Self {
        Self {
            requests: 4,
            stagger: Duration::from_millis(10),
            deadline: None,
        }
    }

    /// Sets the number of concurrent requests.
    ///
    /// Default: 4
    pub fn requests(mut self, requests: usize) -> Self {
        self.requests = requests;
        self
    }

    /// Sets the arrival skew between consecutive requests.
    ///
    /// Default: 10ms
    pub fn stagger(mut self, stagger: Duration) -> Self {
        self.stagger = stagger;
        self
    }

    /// Sets the per-request completion budget.
    ///
    /// A request that exceeds it is recorded as
    /// [`Outcome::TimedOut`](crate::Outcome::TimedOut) and its in-flight
    /// future is dropped.
    /// Default: None
    pub fn deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> HarnessConfig {
        HarnessConfig {
            requests: self.requests,
            stagger: self.stagger,
            deadline: self.deadline,
        }
    }
}

impl Default for HarnessConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
