//! Pool contention example: more workers than connections.
//! Run with: cargo run --example pool_contention

use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use txnsim_pool::{ConnectionPool, PoolConfig};

#[tokio::main]
async fn main() {
    let pool = Arc::new(ConnectionPool::new(
        PoolConfig::builder()
            .capacity(3)
            .acquire_timeout(Some(Duration::from_secs(1)))
            .name("example-pool")
            .on_connection_acquired(|in_use| {
                println!("  [POOL] acquired (in use: {in_use})");
            })
            .on_acquire_rejected(|capacity| {
                println!("  [POOL] rejected (capacity: {capacity})");
            })
            .build(),
    ));

    println!("Starting 10 workers against a pool of 3...\n");

    let mut handles = vec![];
    for i in 0..10 {
        let pool = Arc::clone(&pool);
        handles.push(tokio::spawn(async move {
            match pool.acquire().await {
                Ok(conn) => {
                    println!("worker {i} got connection {}", conn.id());
                    sleep(Duration::from_millis(100)).await;
                    pool.release(conn).expect("connection is held");
                    println!("worker {i} done");
                }
                Err(err) => println!("worker {i} failed: {err}"),
            }
        }));
    }

    for handle in handles {
        let _ = handle.await;
    }

    println!("\nPool back to idle: {:?}", pool.stats());
}
