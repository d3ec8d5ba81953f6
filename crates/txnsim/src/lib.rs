//! Transaction-propagation pool-exhaustion simulator.
//!
//! `txnsim` reproduces a classic self-induced deadlock: request handlers open
//! an outer transaction scope holding one pooled connection, then run a
//! requires-new unit of work that must acquire a second connection while the
//! first is still held. With enough concurrent callers, every connection is
//! held by an outer scope that cannot progress until its child acquires one —
//! and the pool has nothing left to hand out.
//!
//! Each component is available as its own crate and as a feature here:
//!
//! - **Pool** (`pool` feature): bounded FIFO connection pool with blocking
//!   acquisition and optional timeouts
//! - **Scope** (`scope` feature): the transaction-scope state machine with
//!   `JoinExisting`/`RequiresNew` propagation
//! - **Service** (`service` feature): the plain and nested request handlers
//! - **Harness** (`harness` feature): the concurrent client driver that
//!   observes the exhaustion as timeouts
//!
//! # Usage
//!
//! Enable the components you need:
//!
//! ```toml
//! [dependencies]
//! txnsim = { version = "0.1", features = ["service"] }
//! ```
//!
//! Or everything:
//!
//! ```toml
//! [dependencies]
//! txnsim = { version = "0.1", features = ["full"] }
//! ```

pub use txnsim_core::{EventListener, EventListeners, FnListener, SimEvent};

#[cfg(feature = "pool")]
pub use txnsim_pool as pool;

#[cfg(feature = "scope")]
pub use txnsim_scope as scope;

#[cfg(feature = "service")]
pub use txnsim_service as service;

#[cfg(feature = "harness")]
pub use txnsim_harness as harness;
