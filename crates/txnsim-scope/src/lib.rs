//! Transaction scopes with explicit propagation over a bounded pool.
//!
//! A [`TxnManager`] opens [`TransactionScope`]s against a shared
//! [`ConnectionPool`](txnsim_pool::ConnectionPool). Each scope walks the
//! lifecycle `Open → Acquiring → Held → Closed` (with `Failed` for
//! acquisition timeouts and failed units of work) and is bound to exactly
//! zero or one connections at a time.
//!
//! The interesting behavior is [`Propagation::RequiresNew`]: a child scope
//! opened with it never reuses the parent's connection, so a nested request
//! holds **two** units of pool capacity at once for the parent's entire
//! duration. That is the resource shape that exhausts a bounded pool under
//! concurrency.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use txnsim_pool::{ConnectionPool, PoolConfig};
//! use txnsim_scope::{ManagerConfig, Propagation, TxnManager};
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("boom")]
//! struct Boom;
//!
//! # async fn example() -> Result<(), txnsim_scope::ScopeError> {
//! let pool = Arc::new(ConnectionPool::new(
//!     PoolConfig::builder().capacity(2).build(),
//! ));
//! let manager = TxnManager::new(Arc::clone(&pool), ManagerConfig::default());
//!
//! let mut outer = manager.begin(Propagation::JoinExisting, None).await?;
//! // The child insists on its own connection: two units are now in use.
//! let mut inner = manager
//!     .begin(Propagation::RequiresNew, Some(&outer))
//!     .await?;
//! assert_eq!(pool.in_use(), 2);
//!
//! inner.run(async { Ok::<_, Boom>(()) }).await?;
//! inner.end()?;
//! outer.end()?;
//! assert_eq!(pool.in_use(), 0);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod scope;

pub use config::{ManagerConfig, ManagerConfigBuilder};
pub use error::{Result, ScopeError};
pub use events::ScopeEvent;
pub use scope::{Propagation, ScopeState, TransactionScope, TxnManager};
