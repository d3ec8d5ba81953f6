//! Pool invariants under random load.
//!
//! Invariants tested:
//! - In-use count never exceeds capacity
//! - Every task completes when no timeout is configured (no lost wakeups)
//! - The pool returns to idle once all holders release

use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use txnsim_pool::{ConnectionPool, PoolConfig};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(30))]

    /// The pool never hands out more units than it has.
    #[test]
    fn in_use_never_exceeds_capacity(
        capacity in 1usize..=8,
        tasks in 1usize..=40,
        hold_ms in 1u64..=5,
    ) {
        let rt = Runtime::new().unwrap();
        rt.block_on(async {
            let pool = Arc::new(ConnectionPool::new(
                PoolConfig::builder().capacity(capacity).build(),
            ));
            let active = Arc::new(AtomicUsize::new(0));
            let peak = Arc::new(AtomicUsize::new(0));

            let mut handles = vec![];
            for _ in 0..tasks {
                let pool = Arc::clone(&pool);
                let active = Arc::clone(&active);
                let peak = Arc::clone(&peak);
                handles.push(tokio::spawn(async move {
                    let conn = pool.acquire().await.unwrap();
                    let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(hold_ms)).await;
                    active.fetch_sub(1, Ordering::SeqCst);
                    pool.release(conn).unwrap();
                }));
            }
            for handle in handles {
                handle.await.unwrap();
            }

            prop_assert!(
                peak.load(Ordering::SeqCst) <= capacity,
                "peak {} over capacity {}",
                peak.load(Ordering::SeqCst),
                capacity
            );
            prop_assert_eq!(pool.in_use(), 0);
            prop_assert_eq!(pool.available(), capacity);
            Ok(())
        })?;
    }

    /// An acquire/release round trip on an idle pool is a no-op.
    #[test]
    fn round_trip_restores_the_idle_count(capacity in 1usize..=16) {
        let rt = Runtime::new().unwrap();
        rt.block_on(async {
            let pool = ConnectionPool::new(
                PoolConfig::builder().capacity(capacity).build(),
            );
            let handle = pool.acquire().await.unwrap();
            prop_assert_eq!(pool.in_use(), 1);
            pool.release(handle).unwrap();
            prop_assert_eq!(pool.in_use(), 0);
            Ok(())
        })?;
    }
}
