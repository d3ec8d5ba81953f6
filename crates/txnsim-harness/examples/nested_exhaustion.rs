//! The headline scenario: outer scopes consume the pool, children starve.
//! Run with: cargo run --example nested_exhaustion

use std::sync::Arc;
use std::time::Duration;
use txnsim_harness::{ConcurrentHarness, HarnessConfig};
use txnsim_pool::{ConnectionPool, PoolConfig};
use txnsim_scope::{ManagerConfig, TxnManager};
use txnsim_service::{DemoConfig, DemoRequest, DemoService};

#[tokio::main]
async fn main() {
    let pool = Arc::new(ConnectionPool::new(
        PoolConfig::builder()
            .capacity(4)
            .name("exhaustion-pool")
            .on_connection_acquired(|in_use| println!("  [POOL] acquired (in use: {in_use})"))
            .on_connection_released(|held| println!("  [POOL] released after {held:?}"))
            .build(),
    ));
    let manager = TxnManager::new(Arc::clone(&pool), ManagerConfig::default());
    let service = DemoService::new(
        manager,
        DemoConfig::builder()
            .work_duration(Duration::from_millis(200))
            .pre_delay(Duration::from_millis(50))
            .build(),
    );

    let harness = ConcurrentHarness::new(
        HarnessConfig::builder()
            .requests(4)
            .stagger(Duration::from_millis(10))
            .deadline(Some(Duration::from_secs(1)))
            .build(),
    );

    println!("4 nested requests against 4 connections (8 needed)...\n");
    let outcomes = harness.run_parallel(service, DemoRequest::Nested).await;

    println!();
    for (i, outcome) in outcomes.iter().enumerate() {
        println!("request {i}: {outcome:?}");
    }
    println!(
        "\n{} succeeded, {} timed out, {} errored",
        outcomes.success_count(),
        outcomes.timed_out_count(),
        outcomes.error_count()
    );
    println!("pool after the run: {:?}", pool.stats());
}
