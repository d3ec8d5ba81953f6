//! Configuration for the connection pool.

use crate::events::PoolEvent;
use std::time::Duration;
use txnsim_core::{EventListeners, FnListener};

/// Configuration for [`ConnectionPool`](crate::ConnectionPool).
#[derive(Clone)]
pub struct PoolConfig {
    /// Fixed number of connections, set at construction.
    pub(crate) capacity: usize,
    /// Maximum time to wait for a free connection. `None` waits unboundedly,
    /// which is the default: the reproduced defect is an unbounded hang.
    pub(crate) acquire_timeout: Option<Duration>,
    /// Name of this pool instance.
    pub(crate) name: String,
    /// Event listeners.
    pub(crate) event_listeners: EventListeners<PoolEvent>,
}

impl PoolConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> PoolConfigBuilder {
        PoolConfigBuilder::new()
    }
}

/// Builder for pool configuration.
pub struct PoolConfigBuilder {
    capacity: usize,
    acquire_timeout: Option<Duration>,
    name: String,
    event_listeners: EventListeners<PoolEvent>,
}

impl PoolConfigBuilder {
    /// Creates a builder with default values.
    pub fn new() -> Self {
        Self {
            capacity: 10,
            acquire_timeout: None,
            name: "connection-pool".to_string(),
            event_listeners: EventListeners::new(),
        }
    }

    /// Sets the pool capacity. Values below 1 are clamped to 1.
    ///
    /// Default: 10
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Sets the maximum time an acquirer waits for a free connection.
    ///
    /// If `None`, acquisition waits indefinitely.
    /// Default: None
    pub fn acquire_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Sets the name of this pool instance.
    ///
    /// Default: "connection-pool"
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Registers a callback invoked when a connection is acquired.
    ///
    /// # Callback Signature
    /// `Fn(usize)` - the number of connections in use after the acquisition,
    /// between 1 and the configured capacity.
    pub fn on_connection_acquired<F>(mut self, f: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let PoolEvent::ConnectionAcquired { in_use, .. } = event {
                f(*in_use);
            }
        }));
        self
    }

    /// Registers a callback invoked when an acquirer times out.
    ///
    /// # Callback Signature
    /// `Fn(usize)` - the pool capacity that was exhausted.
    pub fn on_acquire_rejected<F>(mut self, f: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let PoolEvent::AcquireRejected { capacity, .. } = event {
                f(*capacity);
            }
        }));
        self
    }

    /// Registers a callback invoked when a connection is released.
    ///
    /// # Callback Signature
    /// `Fn(Duration)` - how long the released connection was held.
    pub fn on_connection_released<F>(mut self, f: F) -> Self
    where
        F: Fn(Duration) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let PoolEvent::ConnectionReleased { held_for, .. } = event {
                f(*held_for);
            }
        }));
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> PoolConfig {
        PoolConfig {
            capacity: self.capacity,
            acquire_timeout: self.acquire_timeout,
            name: self.name,
            event_listeners: self.event_listeners,
        }
    }
}

impl Default for PoolConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
