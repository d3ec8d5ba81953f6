//! Shared plumbing for the txnsim crates.
//!
//! The simulator components (pool, scope manager, request service) all emit
//! lifecycle events through the same listener machinery so callers can watch
//! resource acquisition and scope transitions without the components taking a
//! hard dependency on any particular logging or metrics backend.
//!
//! # Example
//!
//! ```rust
//! use txnsim_core::{EventListeners, FnListener, SimEvent};
//! use std::time::Instant;
//!
//! #[derive(Debug)]
//! struct Tick {
//!     at: Instant,
//! }
//!
//! impl SimEvent for Tick {
//!     fn event_type(&self) -> &'static str {
//!         "tick"
//!     }
//!     fn timestamp(&self) -> Instant {
//!         self.at
//!     }
//!     fn instance_name(&self) -> &str {
//!         "clock"
//!     }
//! }
//!
//! let mut listeners = EventListeners::new();
//! listeners.add(FnListener::new(|event: &Tick| {
//!     println!("{} from {}", event.event_type(), event.instance_name());
//! }));
//! listeners.emit(&Tick { at: Instant::now() });
//! ```

pub mod events;

pub use events::{BoxedEventListener, EventListener, EventListeners, FnListener, SimEvent};
