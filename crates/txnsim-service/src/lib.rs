//! Request handlers that reproduce pool exhaustion via requires-new
//! propagation.
//!
//! [`DemoService`] is a leaf [`tower::Service`] with two request kinds. A
//! [`Plain`](DemoRequest::Plain) request opens one root scope, runs one unit
//! of simulated db work and returns. A [`Nested`](DemoRequest::Nested)
//! request opens a root scope and then a [`RequiresNew`][txnsim_scope::Propagation::RequiresNew]
//! child, so it holds **two** pool connections at once for the root's entire
//! duration. When outer scopes have consumed every connection, each child
//! acquisition waits on capacity its own parent will never release — the
//! handler hangs, which is exactly the defect under study.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tower::{Service, ServiceExt};
//! use txnsim_pool::{ConnectionPool, PoolConfig};
//! use txnsim_scope::{ManagerConfig, TxnManager};
//! use txnsim_service::{DemoConfig, DemoRequest, DemoService};
//! use std::time::Duration;
//!
//! # async fn example() {
//! let pool = Arc::new(ConnectionPool::new(
//!     PoolConfig::builder().capacity(2).build(),
//! ));
//! let manager = TxnManager::new(pool, ManagerConfig::default());
//! let mut service = DemoService::new(
//!     manager,
//!     DemoConfig::builder()
//!         .work_duration(Duration::from_millis(10))
//!         .build(),
//! );
//!
//! let response = service
//!     .ready()
//!     .await
//!     .expect("service is always ready")
//!     .call(DemoRequest::Nested)
//!     .await
//!     .expect("2 connections cover 1 nested request");
//! assert_eq!(response.status, 200);
//! # }
//! ```

pub mod config;
pub mod service;
pub mod work;

pub use config::{DemoConfig, DemoConfigBuilder};
pub use service::{DemoRequest, DemoResponse, DemoService};
pub use work::{WorkFailure, WorkSimulator};
