//! Bounded connection pool for the txnsim simulator.
//!
//! The pool is a fixed number of connection units with blocking acquisition
//! and strict FIFO handoff: waiters are served in arrival order when a unit
//! is released, so contention scenarios play out the same way on every run.
//!
//! By default acquisition waits **unboundedly** — that is the behavior under
//! study. An acquire timeout can be configured (or passed per call) so tests
//! can observe [`PoolError::Exhausted`] instead of hanging.
//!
//! # Basic Example
//!
//! ```rust
//! use txnsim_pool::{ConnectionPool, PoolConfig};
//!
//! # async fn example() {
//! let pool = ConnectionPool::new(
//!     PoolConfig::builder()
//!         .capacity(5)
//!         .name("demo-pool")
//!         .build(),
//! );
//!
//! let handle = pool.acquire().await.expect("pool is idle");
//! assert_eq!(pool.in_use(), 1);
//! pool.release(handle).expect("handle is held");
//! assert_eq!(pool.in_use(), 0);
//! # }
//! ```
//!
//! # Example with Timeout
//!
//! ```rust
//! use txnsim_pool::{ConnectionPool, PoolConfig, PoolError};
//! use std::time::Duration;
//!
//! # async fn example() {
//! let pool = ConnectionPool::new(
//!     PoolConfig::builder()
//!         .capacity(1)
//!         .acquire_timeout(Some(Duration::from_millis(50)))
//!         .build(),
//! );
//!
//! let first = pool.acquire().await.expect("first unit is free");
//! // The only unit is held, so this times out instead of hanging.
//! let second = pool.acquire().await;
//! assert!(matches!(second, Err(PoolError::Exhausted { capacity: 1 })));
//! pool.release(first).expect("still held");
//! # }
//! ```
//!
//! # Example with Event Listeners
//!
//! ```rust
//! use txnsim_pool::{ConnectionPool, PoolConfig};
//!
//! let pool = ConnectionPool::new(
//!     PoolConfig::builder()
//!         .capacity(5)
//!         .name("watched-pool")
//!         .on_connection_acquired(|in_use| {
//!             println!("acquired ({in_use} in use)");
//!         })
//!         .on_acquire_rejected(|capacity| {
//!             println!("rejected (capacity {capacity})");
//!         })
//!         .on_connection_released(|held_for| {
//!             println!("released after {held_for:?}");
//!         })
//!         .build(),
//! );
//! # drop(pool);
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod pool;

pub use config::{PoolConfig, PoolConfigBuilder};
pub use error::{PoolError, Result};
pub use events::PoolEvent;
pub use pool::{ConnectionHandle, ConnectionPool, PoolStats};
