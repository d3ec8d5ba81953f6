//! HTTP wiring for the pool-exhaustion scenario.
//!
//! Two endpoints share one bounded connection pool:
//! - `GET /` runs one unit of db work in a single root transaction
//! - `GET /nested` opens an outer transaction, then a requires-new child
//!   that needs a second connection while the outer holds its first
//!
//! With the default capacity of 6, four or more parallel calls to `/nested`
//! pile outer scopes onto the pool until child acquisitions stall; without an
//! acquire timeout those requests simply never answer. `GET /stats` shows the
//! occupancy while it happens.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::{Service, ServiceExt};
use txnsim_pool::{ConnectionPool, PoolConfig};
use txnsim_scope::{ManagerConfig, TxnManager};
use txnsim_service::{DemoConfig, DemoRequest, DemoService};

#[derive(Parser, Debug)]
#[command(name = "axum-nested-txn", about = "Nested-transaction pool exhaustion demo server")]
struct Args {
    /// Port to listen on
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Connection pool capacity
    #[arg(long, default_value_t = 6)]
    capacity: usize,

    /// Simulated db work duration in milliseconds
    #[arg(long, default_value_t = 3000)]
    work_ms: u64,

    /// Delay between opening the outer scope and its requires-new child
    #[arg(long, default_value_t = 100)]
    pre_delay_ms: u64,

    /// Pool acquire timeout in milliseconds; omit to wait forever, which is
    /// the faithful reproduction of the hang
    #[arg(long)]
    acquire_timeout_ms: Option<u64>,
}

#[derive(Clone)]
struct AppState {
    service: DemoService,
    pool: Arc<ConnectionPool>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let pool = Arc::new(ConnectionPool::new(
        PoolConfig::builder()
            .capacity(args.capacity)
            .acquire_timeout(args.acquire_timeout_ms.map(Duration::from_millis))
            .name("demo-db-pool")
            .on_acquire_rejected(|capacity| {
                tracing::warn!(capacity, "pool exhausted, acquisition rejected");
            })
            .build(),
    ));
    let manager = TxnManager::new(
        Arc::clone(&pool),
        ManagerConfig::builder().name("demo-txn").build(),
    );
    let service = DemoService::new(
        manager,
        DemoConfig::builder()
            .work_duration(Duration::from_millis(args.work_ms))
            .pre_delay(Duration::from_millis(args.pre_delay_ms))
            .build(),
    );

    let state = AppState { service, pool };
    let app = Router::new()
        .route("/", get(plain))
        .route("/nested", get(nested))
        .route("/stats", get(stats))
        .with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    let listener = TcpListener::bind(addr).await.expect("bind error");

    tracing::info!("Listening on http://{}", addr);
    tracing::info!(
        capacity = args.capacity,
        work_ms = args.work_ms,
        timeout_ms = ?args.acquire_timeout_ms,
        "pool configured"
    );
    tracing::info!("Try it:");
    tracing::info!("  curl http://{}/", addr);
    tracing::info!(
        "  for i in $(seq 4); do curl http://{}/nested & done   # watch it stall",
        addr
    );
    tracing::info!("  curl http://{}/stats", addr);

    axum::serve(listener, app).await.expect("server error");
}

async fn plain(State(state): State<AppState>) -> impl IntoResponse {
    dispatch(state.service, DemoRequest::Plain).await
}

async fn nested(State(state): State<AppState>) -> impl IntoResponse {
    dispatch(state.service, DemoRequest::Nested).await
}

async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.pool.stats())
}

async fn dispatch(mut service: DemoService, request: DemoRequest) -> (StatusCode, String) {
    let ready = match service.ready().await {
        Ok(ready) => ready,
        Err(err) => return (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    };
    match ready.call(request).await {
        Ok(response) => (StatusCode::OK, response.body.to_string()),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}
