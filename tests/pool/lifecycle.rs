use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use txnsim_pool::{ConnectionPool, PoolConfig, PoolError};

#[tokio::test]
async fn acquire_then_release_returns_pool_to_idle() {
    let pool = ConnectionPool::new(PoolConfig::builder().capacity(4).build());
    assert_eq!(pool.in_use(), 0);

    let handle = pool.acquire().await.unwrap();
    assert_eq!(pool.in_use(), 1);
    assert_eq!(pool.available(), 3);

    pool.release(handle).unwrap();
    assert_eq!(pool.in_use(), 0);
    assert_eq!(pool.available(), 4);
}

#[tokio::test]
async fn releasing_the_same_handle_twice_is_invalid() {
    let pool = ConnectionPool::new(PoolConfig::builder().capacity(2).build());

    let handle = pool.acquire().await.unwrap();
    pool.release(handle).unwrap();

    let second = pool.release(handle);
    assert!(matches!(second, Err(PoolError::InvalidRelease { id }) if id == handle.id()));
    // The bad release must not have minted extra capacity.
    assert_eq!(pool.available(), 2);
}

#[tokio::test]
async fn releasing_a_foreign_handle_is_invalid() {
    let issuing = ConnectionPool::new(PoolConfig::builder().capacity(1).name("issuing").build());
    let other = ConnectionPool::new(PoolConfig::builder().capacity(1).name("other").build());

    let handle = issuing.acquire().await.unwrap();
    assert!(matches!(
        other.release(handle),
        Err(PoolError::InvalidRelease { .. })
    ));
    issuing.release(handle).unwrap();
}

#[tokio::test]
async fn stats_track_occupancy() {
    let pool = ConnectionPool::new(PoolConfig::builder().capacity(3).build());
    let a = pool.acquire().await.unwrap();
    let b = pool.acquire().await.unwrap();

    let stats = pool.stats();
    assert_eq!(stats.capacity, 3);
    assert_eq!(stats.in_use, 2);
    assert_eq!(stats.available, 1);
    assert_eq!(stats.waiting, 0);

    pool.release(a).unwrap();
    pool.release(b).unwrap();
    assert_eq!(pool.stats().in_use, 0);
}

#[tokio::test]
async fn listeners_observe_acquire_and_release() {
    let acquired = Arc::new(AtomicUsize::new(0));
    let released = Arc::new(AtomicUsize::new(0));
    let a = Arc::clone(&acquired);
    let r = Arc::clone(&released);

    let pool = ConnectionPool::new(
        PoolConfig::builder()
            .capacity(2)
            .on_connection_acquired(move |_| {
                a.fetch_add(1, Ordering::SeqCst);
            })
            .on_connection_released(move |_held_for| {
                r.fetch_add(1, Ordering::SeqCst);
            })
            .build(),
    );

    let handle = pool.acquire().await.unwrap();
    pool.release(handle).unwrap();

    assert_eq!(acquired.load(Ordering::SeqCst), 1);
    assert_eq!(released.load(Ordering::SeqCst), 1);
}
