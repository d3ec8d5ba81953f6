use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use txnsim_pool::{ConnectionPool, PoolConfig, PoolError};

#[tokio::test]
async fn zero_timeout_fails_immediately_when_full() {
    let pool = ConnectionPool::new(
        PoolConfig::builder()
            .capacity(1)
            .acquire_timeout(Some(Duration::ZERO))
            .build(),
    );

    let held = pool.acquire_with(None).await.unwrap();
    let result = pool.acquire().await;
    assert!(matches!(result, Err(PoolError::Exhausted { capacity: 1 })));
    pool.release(held).unwrap();
}

#[tokio::test]
async fn timeout_elapses_close_to_the_configured_duration() {
    let pool = ConnectionPool::new(
        PoolConfig::builder()
            .capacity(1)
            .acquire_timeout(Some(Duration::from_millis(100)))
            .build(),
    );

    let held = pool.acquire().await.unwrap();

    let start = Instant::now();
    let result = pool.acquire().await;
    let elapsed = start.elapsed();

    assert!(matches!(result, Err(PoolError::Exhausted { .. })));
    assert!(elapsed >= Duration::from_millis(90));
    assert!(elapsed <= Duration::from_millis(300));
    pool.release(held).unwrap();
}

#[tokio::test]
async fn waiter_succeeds_when_a_unit_frees_up_in_time() {
    let pool = Arc::new(ConnectionPool::new(
        PoolConfig::builder()
            .capacity(1)
            .acquire_timeout(Some(Duration::from_secs(5)))
            .build(),
    ));

    let held = pool.acquire().await.unwrap();

    let waiter = {
        let pool = Arc::clone(&pool);
        tokio::spawn(async move {
            let conn = pool.acquire().await.unwrap();
            pool.release(conn).unwrap();
        })
    };

    sleep(Duration::from_millis(50)).await;
    pool.release(held).unwrap();
    waiter.await.unwrap();
    assert_eq!(pool.available(), 1);
}

#[tokio::test]
async fn per_call_timeout_overrides_the_unbounded_default() {
    // The pool itself has no timeout; the call-site one still fires.
    let pool = ConnectionPool::new(PoolConfig::builder().capacity(1).build());

    let held = pool.acquire().await.unwrap();
    let result = pool.acquire_with(Some(Duration::from_millis(50))).await;
    assert!(matches!(result, Err(PoolError::Exhausted { .. })));
    pool.release(held).unwrap();
}

#[tokio::test]
async fn without_timeout_the_wait_is_unbounded() {
    let pool = Arc::new(ConnectionPool::new(
        PoolConfig::builder().capacity(1).build(),
    ));

    let held = pool.acquire().await.unwrap();

    let waiter = {
        let pool = Arc::clone(&pool);
        tokio::spawn(async move { pool.acquire().await })
    };

    // Well past any reasonable scheduling delay, the waiter is still parked.
    sleep(Duration::from_millis(200)).await;
    assert!(!waiter.is_finished());
    assert_eq!(pool.waiting(), 1);

    pool.release(held).unwrap();
    let acquired = waiter.await.unwrap().unwrap();
    pool.release(acquired).unwrap();
}
