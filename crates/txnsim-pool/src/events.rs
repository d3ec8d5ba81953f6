//! Event types emitted by the connection pool.

use std::time::{Duration, Instant};
use txnsim_core::SimEvent;

/// Events emitted by [`ConnectionPool`](crate::ConnectionPool).
#[derive(Debug, Clone)]
pub enum PoolEvent {
    /// A connection was handed to an acquirer.
    ConnectionAcquired {
        /// Name of the pool instance.
        name: String,
        /// When the event occurred.
        timestamp: Instant,
        /// Connections in use after this acquisition.
        in_use: usize,
        /// How long the acquirer waited for a free connection.
        waited: Duration,
    },
    /// An acquirer gave up because the configured timeout elapsed.
    AcquireRejected {
        /// Name of the pool instance.
        name: String,
        /// When the event occurred.
        timestamp: Instant,
        /// Fixed capacity of the pool.
        capacity: usize,
    },
    /// A connection was returned to the pool.
    ConnectionReleased {
        /// Name of the pool instance.
        name: String,
        /// When the event occurred.
        timestamp: Instant,
        /// Connections in use after this release.
        in_use: usize,
        /// How long the connection was held.
        held_for: Duration,
    },
}

impl SimEvent for PoolEvent {
    fn event_type(&self) -> &'static str {
        match self {
            PoolEvent::ConnectionAcquired { .. } => "connection_acquired",
            PoolEvent::AcquireRejected { .. } => "acquire_rejected",
            PoolEvent::ConnectionReleased { .. } => "connection_released",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            PoolEvent::ConnectionAcquired { timestamp, .. }
            | PoolEvent::AcquireRejected { timestamp, .. }
            | PoolEvent::ConnectionReleased { timestamp, .. } => *timestamp,
        }
    }

    fn instance_name(&self) -> &str {
        match self {
            PoolEvent::ConnectionAcquired { name, .. }
            | PoolEvent::AcquireRejected { name, .. }
            | PoolEvent::ConnectionReleased { name, .. } => name,
        }
    }
}
