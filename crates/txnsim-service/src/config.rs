//! Configuration for the demo request service.

use std::time::Duration;

/// Configuration for [`DemoService`](crate::DemoService).
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// How long the simulated db work holds a connection.
    pub(crate) work_duration: Duration,
    /// How long a nested request holds its outer connection before the child
    /// scope asks for a second one.
    pub(crate) pre_delay: Duration,
    /// Name of this service instance.
    pub(crate) name: String,
}

impl DemoConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> DemoConfigBuilder {
        DemoConfigBuilder::new()
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for service configuration.
pub struct DemoConfigBuilder {
    work_duration: Duration,
    pre_delay: Duration,
    name: String,
}

impl DemoConfigBuilder {
    /// Creates a builder with default values.
    pub fn new() -> Self {
        Self {
            work_duration: Duration::from_millis(3000),
            pre_delay: Duration::from_millis(100),
            name: "demo-service".to_string(),
        }
    }

    /// Sets the simulated work duration.
    ///
    /// Default: 3000ms
    pub fn work_duration(mut self, duration: Duration) -> Self {
        self.work_duration = duration;
        self
    }

    /// Sets the delay between opening the outer scope of a nested request and
    /// opening its child scope.
    ///
    /// Default: 100ms
    pub fn pre_delay(mut self, delay: Duration) -> Self {
        self.pre_delay = delay;
        self
    }

    /// Sets the name of this service instance.
    ///
    /// Default: "demo-service"
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> DemoConfig {
        DemoConfig {
            work_duration: self.work_duration,
            pre_delay: self.pre_delay,
            name: self.name,
        }
    }
}

impl Default for DemoConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
