use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;
use txnsim_pool::{ConnectionPool, PoolConfig};
use txnsim_scope::{ManagerConfig, Propagation, ScopeError, ScopeState, TxnManager};

#[derive(Debug, thiserror::Error)]
#[error("deliberate failure")]
struct DeliberateFailure;

/// The full transition sequence of a root scope is observable in order.
#[tokio::test]
async fn root_scope_walks_the_expected_states() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let s = Arc::clone(&seen);

    let pool = Arc::new(ConnectionPool::new(
        PoolConfig::builder().capacity(1).build(),
    ));
    let manager = TxnManager::new(
        pool,
        ManagerConfig::builder()
            .on_state_transition(move |_, from, to| {
                s.lock().unwrap().push((from, to));
            })
            .build(),
    );

    let mut scope = manager.begin(Propagation::JoinExisting, None).await.unwrap();
    scope
        .run(async { Ok::<_, DeliberateFailure>(()) })
        .await
        .unwrap();
    scope.end().unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            (ScopeState::Open, ScopeState::Acquiring),
            (ScopeState::Acquiring, ScopeState::Held),
            (ScopeState::Held, ScopeState::Closed),
        ]
    );
}

/// A failing unit of work moves the scope to Failed; ending from Failed
/// still releases the owned connection.
#[tokio::test]
async fn failure_path_still_releases_the_connection() {
    let pool = Arc::new(ConnectionPool::new(
        PoolConfig::builder().capacity(1).build(),
    ));
    let manager = TxnManager::new(Arc::clone(&pool), ManagerConfig::default());

    let mut scope = manager.begin(Propagation::JoinExisting, None).await.unwrap();
    let result: Result<(), ScopeError> = scope.run(async { Err(DeliberateFailure) }).await;
    assert!(matches!(result, Err(ScopeError::Work(_))));
    assert_eq!(scope.state(), ScopeState::Failed);
    assert_eq!(pool.in_use(), 1);

    scope.end().unwrap();
    assert_eq!(pool.in_use(), 0);
}

/// A borrowed connection survives the borrower's failure untouched.
#[tokio::test]
async fn failed_borrower_leaves_the_parent_connection_alone() {
    let pool = Arc::new(ConnectionPool::new(
        PoolConfig::builder().capacity(2).build(),
    ));
    let manager = TxnManager::new(Arc::clone(&pool), ManagerConfig::default());

    let root = manager.begin(Propagation::JoinExisting, None).await.unwrap();
    let mut joiner = manager
        .begin(Propagation::JoinExisting, Some(&root))
        .await
        .unwrap();

    let result: Result<(), ScopeError> = joiner.run(async { Err(DeliberateFailure) }).await;
    assert!(result.is_err());
    joiner.end().unwrap();
    assert_eq!(pool.in_use(), 1, "parent's connection must stay held");

    root.end().unwrap();
    assert_eq!(pool.in_use(), 0);
}

/// A handler future cancelled while its child waits releases the outer
/// connection through the drop backstop.
#[tokio::test]
async fn cancelled_nested_flow_releases_everything() {
    let pool = Arc::new(ConnectionPool::new(
        PoolConfig::builder().capacity(1).build(),
    ));
    let manager = TxnManager::new(Arc::clone(&pool), ManagerConfig::default());

    let flow = {
        let manager = manager.clone();
        tokio::spawn(async move {
            let root = manager.begin(Propagation::JoinExisting, None).await.unwrap();
            // Capacity is 1 and we hold it: this waits forever.
            let _child = manager.begin(Propagation::RequiresNew, Some(&root)).await;
            unreachable!("the child acquisition can never complete");
        })
    };

    sleep(Duration::from_millis(100)).await;
    assert_eq!(pool.in_use(), 1);
    assert_eq!(pool.waiting(), 1);

    flow.abort();
    let _ = flow.await;
    sleep(Duration::from_millis(10)).await;

    assert_eq!(pool.in_use(), 0);
    assert_eq!(pool.waiting(), 0);
}
