//! Concurrent client harness for the demo service.
//!
//! The harness dispatches N logical requests in parallel — each offset by a
//! small stagger to simulate realistic arrival skew — and records one
//! [`Outcome`] per request: completed, exceeded the deadline, or errored.
//! Driving the nested endpoint with more than half the pool's capacity in
//! concurrent callers is how the exhaustion scenario is observed.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use txnsim_harness::{ConcurrentHarness, HarnessConfig};
//! use txnsim_pool::{ConnectionPool, PoolConfig};
//! use txnsim_scope::{ManagerConfig, TxnManager};
//! use txnsim_service::{DemoConfig, DemoRequest, DemoService};
//!
//! # async fn example() {
//! let pool = Arc::new(ConnectionPool::new(
//!     PoolConfig::builder().capacity(4).build(),
//! ));
//! let manager = TxnManager::new(pool, ManagerConfig::default());
//! let service = DemoService::new(manager, DemoConfig::default());
//!
//! let harness = ConcurrentHarness::new(
//!     HarnessConfig::builder()
//!         .requests(4)
//!         .stagger(Duration::from_millis(10))
//!         .deadline(Some(Duration::from_secs(10)))
//!         .build(),
//! );
//!
//! // 4 nested requests need 8 connections; the pool has 4. Every outer
//! // scope holds a connection its child is queued behind, so all four
//! // requests run into the deadline.
//! let outcomes = harness.run_parallel(service, DemoRequest::Nested).await;
//! assert_eq!(outcomes.timed_out_count(), 4);
//! # }
//! ```

pub mod config;
pub mod harness;
pub mod outcome;

pub use config::{HarnessConfig, HarnessConfigBuilder};
pub use harness::ConcurrentHarness;
pub use outcome::{Outcome, Outcomes};
