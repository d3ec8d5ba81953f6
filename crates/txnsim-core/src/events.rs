//! Event system shared by the simulator components.
//!
//! Each component (pool, scope manager) defines its own event enum and emits
//! through an [`EventListeners`] collection configured at build time.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Trait implemented by events emitted by simulator components.
pub trait SimEvent: Send + Sync + fmt::Debug {
    /// A short machine-readable tag (e.g. "connection_acquired").
    fn event_type(&self) -> &'static str;

    /// When the event occurred.
    fn timestamp(&self) -> Instant;

    /// The configured name of the component instance that emitted the event.
    fn instance_name(&self) -> &str;
}

/// Trait for receiving simulator events.
pub trait EventListener<E: SimEvent>: Send + Sync {
    /// Called for every emitted event.
    fn on_event(&self, event: &E);
}

/// Type alias for shared, boxed listeners.
pub type BoxedEventListener<E> = Arc<dyn EventListener<E>>;

/// An ordered collection of listeners for one event type.
#[derive(Clone)]
pub struct EventListeners<E: SimEvent> {
    listeners: Vec<BoxedEventListener<E>>,
}

impl<E: SimEvent> EventListeners<E> {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Registers a listener.
    pub fn add<L>(&mut self, listener: L)
    where
        L: EventListener<E> + 'static,
    {
        self.listeners.push(Arc::new(listener));
    }

    /// Emits an event to every registered listener.
    ///
    /// A panicking listener does not prevent the remaining listeners from
    /// running.
    pub fn emit(&self, event: &E) {
        for listener in &self.listeners {
            let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                listener.on_event(event);
            }));
        }
    }

    /// True when no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }
}

impl<E: SimEvent> Default for EventListeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// A listener backed by a plain function.
pub struct FnListener<E, F>
where
    F: Fn(&E) + Send + Sync,
{
    f: F,
    _phantom: std::marker::PhantomData<E>,
}

impl<E, F> FnListener<E, F>
where
    F: Fn(&E) + Send + Sync,
{
    /// Wraps a function as a listener.
    pub fn new(f: F) -> Self {
        Self {
            f,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<E, F> EventListener<E> for FnListener<E, F>
where
    E: SimEvent,
    F: Fn(&E) + Send + Sync,
{
    fn on_event(&self, event: &E) {
        (self.f)(event)
    }
}
