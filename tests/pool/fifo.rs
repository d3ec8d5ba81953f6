use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;
use txnsim_pool::{ConnectionPool, PoolConfig};

/// A released unit goes to the longest-waiting acquirer.
#[tokio::test]
async fn release_hands_to_longest_waiter() {
    let pool = Arc::new(ConnectionPool::new(
        PoolConfig::builder().capacity(1).build(),
    ));
    let order = Arc::new(Mutex::new(Vec::new()));

    let held = pool.acquire().await.unwrap();

    let mut waiters = vec![];
    for i in 0..2 {
        let pool = Arc::clone(&pool);
        let order = Arc::clone(&order);
        waiters.push(tokio::spawn(async move {
            let conn = pool.acquire().await.unwrap();
            order.lock().unwrap().push(i);
            pool.release(conn).unwrap();
        }));
        // Make the enqueue order unambiguous.
        sleep(Duration::from_millis(50)).await;
    }

    assert_eq!(pool.waiting(), 2);
    pool.release(held).unwrap();

    for waiter in waiters {
        waiter.await.unwrap();
    }
    assert_eq!(*order.lock().unwrap(), vec![0, 1]);
}

/// Five staggered waiters on one unit are served strictly in arrival order.
#[tokio::test]
async fn fifo_order_holds_across_many_waiters() {
    let pool = Arc::new(ConnectionPool::new(
        PoolConfig::builder().capacity(1).build(),
    ));
    let order = Arc::new(Mutex::new(Vec::new()));

    let held = pool.acquire().await.unwrap();

    let mut waiters = vec![];
    for i in 0..5 {
        let pool = Arc::clone(&pool);
        let order = Arc::clone(&order);
        waiters.push(tokio::spawn(async move {
            let conn = pool.acquire().await.unwrap();
            order.lock().unwrap().push(i);
            // Hold briefly so the next waiter visibly queues behind us.
            sleep(Duration::from_millis(5)).await;
            pool.release(conn).unwrap();
        }));
        sleep(Duration::from_millis(30)).await;
    }

    assert_eq!(pool.waiting(), 5);
    pool.release(held).unwrap();

    for waiter in waiters {
        waiter.await.unwrap();
    }
    assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3, 4]);
}
