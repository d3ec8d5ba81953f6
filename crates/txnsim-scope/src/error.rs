//! Error types for transaction scopes.

use crate::scope::ScopeState;
use txnsim_pool::PoolError;

/// Errors surfaced by [`TxnManager`](crate::TxnManager) and
/// [`TransactionScope`](crate::TransactionScope).
#[derive(Debug, thiserror::Error)]
pub enum ScopeError {
    /// Acquiring or releasing the scope's connection failed.
    #[error(transparent)]
    Pool(#[from] PoolError),
    /// An operation was attempted in a state that does not permit it.
    #[error("operation `{op}` is not valid in scope state {state:?}")]
    InvalidTransition {
        /// State the scope was in.
        state: ScopeState,
        /// The rejected operation.
        op: &'static str,
    },
    /// The wrapped unit of work failed. The scope still releases any
    /// connection it owns on its way out.
    #[error("unit of work failed: {0}")]
    Work(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type for scope operations.
pub type Result<T> = std::result::Result<T, ScopeError>;
