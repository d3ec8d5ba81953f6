//! Bounded connection pool implementation.

use crate::config::PoolConfig;
use crate::error::PoolError;
use crate::events::PoolEvent;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

#[cfg(feature = "metrics")]
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
#[cfg(feature = "metrics")]
use std::sync::Once;

#[cfg(feature = "tracing")]
use tracing::{debug, warn};

#[cfg(feature = "metrics")]
static METRICS_INIT: Once = Once::new();

/// An exclusively-held unit of pool capacity.
///
/// The handle is a plain token: the pool tracks which ids are outstanding, so
/// releasing a handle twice (or a handle the pool never issued) fails with
/// [`PoolError::InvalidRelease`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionHandle {
    id: u64,
    acquired_at: Instant,
}

impl ConnectionHandle {
    /// Unique id of this handle within its pool.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// How long this connection has been held.
    pub fn held_for(&self) -> Duration {
        self.acquired_at.elapsed()
    }
}

/// A point-in-time snapshot of pool occupancy.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PoolStats {
    /// Fixed capacity.
    pub capacity: usize,
    /// Connections currently handed out.
    pub in_use: usize,
    /// Connections currently free.
    pub available: usize,
    /// Acquirers currently blocked waiting for a free connection.
    pub waiting: usize,
}

/// A bounded pool of connection units with strict FIFO handoff.
///
/// The semaphore carries the capacity count and the fair waiter queue; the
/// blocking wait never holds the handle-set mutex, so releases always make
/// progress while acquirers are parked.
pub struct ConnectionPool {
    semaphore: Semaphore,
    held: Mutex<HashSet<u64>>,
    next_id: AtomicU64,
    waiting: AtomicUsize,
    config: PoolConfig,
}

impl ConnectionPool {
    /// Creates a pool with the given configuration.
    pub fn new(config: PoolConfig) -> Self {
        #[cfg(feature = "metrics")]
        {
            METRICS_INIT.call_once(|| {
                describe_counter!(
                    "txnsim_pool_acquired_total",
                    "Total connections handed out by the pool"
                );
                describe_counter!(
                    "txnsim_pool_rejected_total",
                    "Total acquisitions that timed out"
                );
                describe_counter!(
                    "txnsim_pool_released_total",
                    "Total connections returned to the pool"
                );
                describe_gauge!("txnsim_pool_in_use", "Connections currently handed out");
                describe_histogram!(
                    "txnsim_pool_wait_duration_seconds",
                    "Time spent waiting for a free connection"
                );
            });
        }

        Self {
            semaphore: Semaphore::new(config.capacity),
            held: Mutex::new(HashSet::with_capacity(config.capacity)),
            next_id: AtomicU64::new(1),
            waiting: AtomicUsize::new(0),
            config,
        }
    }

    /// Fixed capacity of the pool.
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Name of this pool instance.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Connections currently handed out.
    pub fn in_use(&self) -> usize {
        self.config.capacity - self.semaphore.available_permits()
    }

    /// Connections currently free.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Acquirers currently blocked in [`acquire`](Self::acquire).
    pub fn waiting(&self) -> usize {
        self.waiting.load(Ordering::SeqCst)
    }

    /// Snapshot of current occupancy.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            capacity: self.capacity(),
            in_use: self.in_use(),
            available: self.available(),
            waiting: self.waiting(),
        }
    }

    /// Acquires a connection, waiting with the configured timeout policy.
    ///
    /// With no configured timeout this waits until a connection is free, no
    /// matter how long that takes.
    pub async fn acquire(&self) -> Result<ConnectionHandle, PoolError> {
        self.acquire_with(self.config.acquire_timeout).await
    }

    /// Acquires a connection with an explicit timeout policy, overriding the
    /// configured one. `None` waits unboundedly.
    pub async fn acquire_with(
        &self,
        timeout: Option<Duration>,
    ) -> Result<ConnectionHandle, PoolError> {
        let wait_started = Instant::now();
        let waiting = WaitGuard::enter(&self.waiting);

        // The semaphore queue is FIFO-fair: waiters are served in arrival
        // order when permits are released.
        let permit = match timeout {
            Some(limit) => match tokio::time::timeout(limit, self.semaphore.acquire()).await {
                Ok(acquired) => acquired.ok(),
                Err(_) => None,
            },
            None => self.semaphore.acquire().await.ok(),
        };

        let Some(permit) = permit else {
            drop(waiting);
            let event = PoolEvent::AcquireRejected {
                name: self.config.name.clone(),
                timestamp: Instant::now(),
                capacity: self.config.capacity,
            };
            self.config.event_listeners.emit(&event);

            #[cfg(feature = "metrics")]
            counter!("txnsim_pool_rejected_total", "pool" => self.config.name.clone()).increment(1);

            #[cfg(feature = "tracing")]
            warn!(
                pool = %self.config.name,
                capacity = self.config.capacity,
                waited_ms = wait_started.elapsed().as_millis(),
                "acquire timed out, pool exhausted"
            );

            return Err(PoolError::Exhausted {
                capacity: self.config.capacity,
            });
        };

        // The permit is consumed for the lifetime of the handle and restored
        // by release().
        permit.forget();
        drop(waiting);

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.held
            .lock()
            .expect("pool handle set lock poisoned")
            .insert(id);

        let waited = wait_started.elapsed();
        let in_use = self.in_use();
        let event = PoolEvent::ConnectionAcquired {
            name: self.config.name.clone(),
            timestamp: Instant::now(),
            in_use,
            waited,
        };
        self.config.event_listeners.emit(&event);

        #[cfg(feature = "metrics")]
        {
            counter!("txnsim_pool_acquired_total", "pool" => self.config.name.clone()).increment(1);
            gauge!("txnsim_pool_in_use", "pool" => self.config.name.clone()).set(in_use as f64);
            histogram!("txnsim_pool_wait_duration_seconds", "pool" => self.config.name.clone())
                .record(waited.as_secs_f64());
        }

        #[cfg(feature = "tracing")]
        debug!(
            pool = %self.config.name,
            connection = id,
            in_use,
            waited_ms = waited.as_millis(),
            "connection acquired"
        );

        Ok(ConnectionHandle {
            id,
            acquired_at: Instant::now(),
        })
    }

    /// Returns a connection to the pool, waking the longest-waiting acquirer
    /// if any.
    ///
    /// Fails with [`PoolError::InvalidRelease`] if the handle is not
    /// currently held, including on a second release of the same handle.
    pub fn release(&self, handle: ConnectionHandle) -> Result<(), PoolError> {
        let removed = self
            .held
            .lock()
            .expect("pool handle set lock poisoned")
            .remove(&handle.id);
        if !removed {
            #[cfg(feature = "tracing")]
            warn!(
                pool = %self.config.name,
                connection = handle.id,
                "release of a connection the pool does not hold"
            );
            return Err(PoolError::InvalidRelease { id: handle.id });
        }

        self.semaphore.add_permits(1);

        let in_use = self.in_use();
        let held_for = handle.acquired_at.elapsed();
        let event = PoolEvent::ConnectionReleased {
            name: self.config.name.clone(),
            timestamp: Instant::now(),
            in_use,
            held_for,
        };
        self.config.event_listeners.emit(&event);

        #[cfg(feature = "metrics")]
        {
            counter!("txnsim_pool_released_total", "pool" => self.config.name.clone()).increment(1);
            gauge!("txnsim_pool_in_use", "pool" => self.config.name.clone()).set(in_use as f64);
        }

        #[cfg(feature = "tracing")]
        debug!(
            pool = %self.config.name,
            connection = handle.id,
            in_use,
            held_ms = held_for.as_millis(),
            "connection released"
        );

        Ok(())
    }
}

/// Keeps the waiting count accurate on every exit path, including a caller
/// future dropped mid-wait.
struct WaitGuard<'a> {
    counter: &'a AtomicUsize,
}

impl<'a> WaitGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self { counter }
    }
}

impl Drop for WaitGuard<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}
