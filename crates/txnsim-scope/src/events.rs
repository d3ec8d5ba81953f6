//! Event types emitted at scope transitions.

use crate::scope::ScopeState;
use std::time::Instant;
use txnsim_core::SimEvent;

/// Events emitted by [`TxnManager`](crate::TxnManager) scopes.
#[derive(Debug, Clone)]
pub enum ScopeEvent {
    /// A scope moved from one lifecycle state to another.
    StateTransition {
        /// Name of the manager instance.
        name: String,
        /// When the event occurred.
        timestamp: Instant,
        /// Id of the scope.
        scope_id: u64,
        /// State before the transition.
        from: ScopeState,
        /// State after the transition.
        to: ScopeState,
    },
    /// A joining scope recorded its parent's connection instead of acquiring
    /// one of its own.
    ConnectionBorrowed {
        /// Name of the manager instance.
        name: String,
        /// When the event occurred.
        timestamp: Instant,
        /// Id of the borrowing scope.
        scope_id: u64,
        /// Id of the parent scope that owns the connection.
        parent_id: u64,
    },
}

impl SimEvent for ScopeEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ScopeEvent::StateTransition { .. } => "state_transition",
            ScopeEvent::ConnectionBorrowed { .. } => "connection_borrowed",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            ScopeEvent::StateTransition { timestamp, .. }
            | ScopeEvent::ConnectionBorrowed { timestamp, .. } => *timestamp,
        }
    }

    fn instance_name(&self) -> &str {
        match self {
            ScopeEvent::StateTransition { name, .. }
            | ScopeEvent::ConnectionBorrowed { name, .. } => name,
        }
    }
}
