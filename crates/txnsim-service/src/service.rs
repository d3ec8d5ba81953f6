//! The two request handlers backed by transaction scopes.

use crate::config::DemoConfig;
use crate::work::WorkSimulator;
use futures::future::BoxFuture;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::sleep;
use tower::Service;
use tracing::info;
use txnsim_scope::{Propagation, ScopeError, TxnManager};

/// The two request kinds the service handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoRequest {
    /// One root scope, one unit of work, one connection.
    Plain,
    /// A root scope plus a requires-new child: two connections held at once
    /// for the root's entire duration.
    Nested,
}

/// Response produced by a completed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoResponse {
    /// HTTP-style status code; always 200 for a completed request.
    pub status: u16,
    /// Short confirmation body.
    pub body: &'static str,
}

impl DemoResponse {
    fn plain() -> Self {
        Self {
            status: 200,
            body: "ok - also try /nested",
        }
    }

    fn nested() -> Self {
        Self {
            status: 200,
            body: "nested ok - call me several times in parallel",
        }
    }
}

/// Request handler for the plain and nested endpoints.
///
/// The pool and transaction manager are injected at construction; the service
/// holds no other state, so clones share the same pool and contend for the
/// same connections.
#[derive(Clone)]
pub struct DemoService {
    manager: TxnManager,
    work: WorkSimulator,
    pre_delay: Duration,
    name: String,
}

impl DemoService {
    /// Creates a service over the given transaction manager.
    pub fn new(manager: TxnManager, config: DemoConfig) -> Self {
        Self {
            manager,
            work: WorkSimulator::new(config.work_duration),
            pre_delay: config.pre_delay,
            name: config.name,
        }
    }

    /// The transaction manager this service opens scopes through.
    pub fn manager(&self) -> &TxnManager {
        &self.manager
    }

    async fn handle_plain(&self) -> Result<DemoResponse, ScopeError> {
        info!(service = %self.name, "plain request: opening root scope");
        let mut scope = self.manager.begin(Propagation::JoinExisting, None).await?;
        let worked = scope.run(self.work.execute()).await;
        scope.end()?;
        let elapsed = worked?;
        info!(
            service = %self.name,
            elapsed_ms = elapsed.as_millis(),
            "plain request: done"
        );
        Ok(DemoResponse::plain())
    }

    async fn handle_nested(&self) -> Result<DemoResponse, ScopeError> {
        info!(service = %self.name, "nested request: opening outer scope");
        let root = self.manager.begin(Propagation::JoinExisting, None).await?;

        // Hold the outer connection for a moment before the child needs a
        // second one, so concurrent callers stack up against the pool.
        sleep(self.pre_delay).await;

        let inner = match self
            .manager
            .begin(Propagation::RequiresNew, Some(&root))
            .await
        {
            Ok(mut child) => {
                let worked = child.run(self.work.execute()).await;
                child.end()?;
                worked.map(|_| ())
            }
            // Not caught or retried: the child's exhaustion is the request's
            // outcome. The outer scope still ends below.
            Err(err) => Err(err),
        };

        root.end()?;
        inner?;
        info!(service = %self.name, "nested request: done");
        Ok(DemoResponse::nested())
    }
}

impl Service<DemoRequest> for DemoService {
    type Response = DemoResponse;
    type Error = ScopeError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: DemoRequest) -> Self::Future {
        let service = self.clone();
        Box::pin(async move {
            match request {
                DemoRequest::Plain => service.handle_plain().await,
                DemoRequest::Nested => service.handle_nested().await,
            }
        })
    }
}
