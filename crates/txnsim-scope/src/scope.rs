//! Transaction scopes and the manager that creates them.

use crate::config::ManagerConfig;
use crate::error::ScopeError;
use crate::events::ScopeEvent;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use txnsim_pool::{ConnectionHandle, ConnectionPool};

#[cfg(feature = "tracing")]
use tracing::debug;

/// How a new scope relates to the transaction of its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Join the parent's transaction if the parent holds a connection;
    /// otherwise start fresh with an independently acquired one.
    JoinExisting,
    /// Always start an independent transaction with its own connection,
    /// even while the parent is still holding one.
    RequiresNew,
}

/// Lifecycle states of a [`TransactionScope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeState {
    /// Created, no connection yet.
    Open,
    /// Waiting on the pool for a connection.
    Acquiring,
    /// Bound to a connection, able to run work.
    Held,
    /// Terminal: connection released (if owned).
    Closed,
    /// Terminal-ish: acquisition failed or the unit of work raised. The
    /// scope still must be ended to release an owned connection.
    Failed,
}

/// Whether and how a scope is bound to a pool connection.
#[derive(Debug, Clone, Copy)]
enum ConnSlot {
    /// No connection bound.
    None,
    /// A connection this scope acquired and must release.
    Owned(ConnectionHandle),
    /// The parent's connection; never released by this scope.
    Borrowed(ConnectionHandle),
}

struct ManagerShared {
    pool: Arc<ConnectionPool>,
    config: ManagerConfig,
    next_scope_id: AtomicU64,
}

/// Creates transaction scopes over a shared connection pool.
///
/// The manager owns nothing ambient: the pool is injected at construction
/// and parent linkage is an explicit argument to [`begin`](Self::begin), so
/// scope nesting is visible in the call site rather than hidden in
/// task-local state.
#[derive(Clone)]
pub struct TxnManager {
    shared: Arc<ManagerShared>,
}

impl TxnManager {
    /// Creates a manager over the given pool.
    pub fn new(pool: Arc<ConnectionPool>, config: ManagerConfig) -> Self {
        Self {
            shared: Arc::new(ManagerShared {
                pool,
                config,
                next_scope_id: AtomicU64::new(1),
            }),
        }
    }

    /// The pool this manager draws connections from.
    pub fn pool(&self) -> &Arc<ConnectionPool> {
        &self.shared.pool
    }

    /// Name of this manager instance.
    pub fn name(&self) -> &str {
        &self.shared.config.name
    }

    /// Opens a scope.
    ///
    /// With [`Propagation::JoinExisting`] and a parent currently holding a
    /// connection, the new scope borrows that connection and becomes `Held`
    /// without touching the pool. In every other case the scope acquires its
    /// own connection, blocking under the pool's timeout policy; a
    /// [`RequiresNew`](Propagation::RequiresNew) child therefore needs a
    /// second unit of capacity while its parent still holds the first.
    pub async fn begin(
        &self,
        propagation: Propagation,
        parent: Option<&TransactionScope>,
    ) -> Result<TransactionScope, ScopeError> {
        let id = self.shared.next_scope_id.fetch_add(1, Ordering::Relaxed);
        let mut scope = TransactionScope {
            shared: Arc::clone(&self.shared),
            id,
            propagation,
            parent_id: parent.map(TransactionScope::id),
            conn: ConnSlot::None,
            state: ScopeState::Open,
        };

        let inherited = match propagation {
            Propagation::JoinExisting => {
                parent.and_then(|p| p.held_handle().map(|handle| (p.id(), handle)))
            }
            Propagation::RequiresNew => None,
        };

        match inherited {
            Some((parent_id, handle)) => {
                scope.conn = ConnSlot::Borrowed(handle);
                scope.transition(ScopeState::Held);
                scope.shared.config.event_listeners.emit(
                    &ScopeEvent::ConnectionBorrowed {
                        name: scope.shared.config.name.clone(),
                        timestamp: Instant::now(),
                        scope_id: id,
                        parent_id,
                    },
                );

                #[cfg(feature = "tracing")]
                debug!(
                    manager = %self.shared.config.name,
                    scope = id,
                    parent = parent_id,
                    "scope joined parent transaction"
                );
            }
            None => {
                scope.transition(ScopeState::Acquiring);
                match self.shared.pool.acquire().await {
                    Ok(handle) => {
                        scope.conn = ConnSlot::Owned(handle);
                        scope.transition(ScopeState::Held);
                    }
                    Err(err) => {
                        scope.transition(ScopeState::Failed);
                        return Err(err.into());
                    }
                }
            }
        }

        Ok(scope)
    }
}

/// One logical unit of work bound to zero or one pool connections.
///
/// A scope either *owns* the connection it acquired or *borrows* its
/// parent's; only owned connections are released on `end`. Dropping a scope
/// without ending it releases an owned connection as a backstop, so a caller
/// future cancelled mid-request cannot leak pool capacity.
pub struct TransactionScope {
    shared: Arc<ManagerShared>,
    id: u64,
    propagation: Propagation,
    parent_id: Option<u64>,
    conn: ConnSlot,
    state: ScopeState,
}

impl TransactionScope {
    /// Monotonically increasing id, unique per manager.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ScopeState {
        self.state
    }

    /// Propagation mode this scope was opened with.
    pub fn propagation(&self) -> Propagation {
        self.propagation
    }

    /// Id of the parent scope, if this scope is nested.
    pub fn parent_id(&self) -> Option<u64> {
        self.parent_id
    }

    /// True when this scope was opened under a parent.
    pub fn is_nested(&self) -> bool {
        self.parent_id.is_some()
    }

    /// True when this scope acquired its own connection (as opposed to
    /// borrowing the parent's).
    pub fn owns_connection(&self) -> bool {
        matches!(self.conn, ConnSlot::Owned(_))
    }

    /// The connection this scope is bound to, while `Held`.
    pub fn held_handle(&self) -> Option<ConnectionHandle> {
        if self.state != ScopeState::Held {
            return None;
        }
        match self.conn {
            ConnSlot::Owned(handle) | ConnSlot::Borrowed(handle) => Some(handle),
            ConnSlot::None => None,
        }
    }

    /// Runs a unit of work inside this scope.
    ///
    /// Valid only while `Held`. A failing unit of work moves the scope to
    /// `Failed` and surfaces as [`ScopeError::Work`]; the scope is not
    /// closed either way — callers end it explicitly.
    pub async fn run<T, E, F>(&mut self, work: F) -> Result<T, ScopeError>
    where
        F: Future<Output = std::result::Result<T, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        if self.state != ScopeState::Held {
            return Err(ScopeError::InvalidTransition {
                state: self.state,
                op: "run",
            });
        }
        match work.await {
            Ok(value) => Ok(value),
            Err(err) => {
                self.transition(ScopeState::Failed);
                Err(ScopeError::Work(Box::new(err)))
            }
        }
    }

    /// Ends the scope, releasing its connection if owned.
    ///
    /// Valid from `Held` or `Failed`; runs on the success and failure exit
    /// paths alike. A borrowed connection stays with the parent.
    pub fn end(mut self) -> Result<(), ScopeError> {
        match self.state {
            ScopeState::Held | ScopeState::Failed => {
                if let ConnSlot::Owned(handle) =
                    std::mem::replace(&mut self.conn, ConnSlot::None)
                {
                    self.shared.pool.release(handle)?;
                }
                self.transition(ScopeState::Closed);
                Ok(())
            }
            state => Err(ScopeError::InvalidTransition { state, op: "end" }),
        }
    }

    fn transition(&mut self, to: ScopeState) {
        let from = self.state;
        self.state = to;
        self.shared
            .config
            .event_listeners
            .emit(&ScopeEvent::StateTransition {
                name: self.shared.config.name.clone(),
                timestamp: Instant::now(),
                scope_id: self.id,
                from,
                to,
            });

        #[cfg(feature = "tracing")]
        debug!(
            manager = %self.shared.config.name,
            scope = self.id,
            ?from,
            ?to,
            "scope state transition"
        );
    }
}

impl Drop for TransactionScope {
    fn drop(&mut self) {
        if matches!(self.state, ScopeState::Held | ScopeState::Failed) {
            if let ConnSlot::Owned(handle) = std::mem::replace(&mut self.conn, ConnSlot::None) {
                let _ = self.shared.pool.release(handle);
            }
            self.transition(ScopeState::Closed);
        }
    }
}
