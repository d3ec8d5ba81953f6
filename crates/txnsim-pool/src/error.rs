//! Error types for pool acquisition and release.

/// Errors surfaced by [`ConnectionPool`](crate::ConnectionPool).
#[derive(Debug, Clone, thiserror::Error)]
pub enum PoolError {
    /// No connection became free before the acquire timeout elapsed.
    ///
    /// Only returned when a timeout is configured; without one, acquisition
    /// waits unboundedly and never produces this error.
    #[error("connection pool exhausted: all {capacity} connections in use")]
    Exhausted {
        /// Fixed capacity of the pool.
        capacity: usize,
    },
    /// A handle was released that the pool does not currently consider held.
    ///
    /// This includes releasing the same handle twice. Always a logic bug in
    /// the caller, never an expected runtime condition.
    #[error("invalid release: connection {id} is not held by this pool")]
    InvalidRelease {
        /// Id of the offending handle.
        id: u64,
    },
}

/// Result type for pool operations.
pub type Result<T> = std::result::Result<T, PoolError>;
