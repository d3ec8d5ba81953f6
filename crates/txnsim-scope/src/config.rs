//! Configuration for the transaction manager.

use crate::events::ScopeEvent;
use crate::scope::ScopeState;
use txnsim_core::{EventListeners, FnListener};

/// Configuration for [`TxnManager`](crate::TxnManager).
#[derive(Clone)]
pub struct ManagerConfig {
    /// Name of this manager instance.
    pub(crate) name: String,
    /// Event listeners.
    pub(crate) event_listeners: EventListeners<ScopeEvent>,
}

impl ManagerConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ManagerConfigBuilder {
        ManagerConfigBuilder::new()
    }
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for manager configuration.
pub struct ManagerConfigBuilder {
    name: String,
    event_listeners: EventListeners<ScopeEvent>,
}

impl ManagerConfigBuilder {
    /// Creates a builder with default values.
    pub fn new() -> Self {
        Self {
            name: "txn-manager".to_string(),
            event_listeners: EventListeners::new(),
        }
    }

    /// Sets the name of this manager instance.
    ///
    /// Default: "txn-manager"
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Registers a callback invoked on every scope state transition.
    ///
    /// # Callback Signature
    /// `Fn(u64, ScopeState, ScopeState)` - the scope id, the state left, and
    /// the state entered.
    pub fn on_state_transition<F>(mut self, f: F) -> Self
    where
        F: Fn(u64, ScopeState, ScopeState) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let ScopeEvent::StateTransition {
                scope_id, from, to, ..
            } = event
            {
                f(*scope_id, *from, *to);
            }
        }));
        self
    }

    /// Registers a callback invoked when a joining scope borrows its parent's
    /// connection.
    ///
    /// # Callback Signature
    /// `Fn(u64, u64)` - the borrowing scope's id and its parent's id.
    pub fn on_connection_borrowed<F>(mut self, f: F) -> Self
    where
        F: Fn(u64, u64) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let ScopeEvent::ConnectionBorrowed {
                scope_id,
                parent_id,
                ..
            } = event
            {
                f(*scope_id, *parent_id);
            }
        }));
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> ManagerConfig {
        ManagerConfig {
            name: self.name,
            event_listeners: self.event_listeners,
        }
    }
}

impl Default for ManagerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
