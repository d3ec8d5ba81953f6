//! Concurrent request driver.

use crate::config::HarnessConfig;
use crate::outcome::{Outcome, Outcomes};
use std::time::Instant;
use tokio::time::sleep;
use tower::{Service, ServiceExt};
use tracing::debug;
use txnsim_service::{DemoRequest, DemoResponse};

/// Drives N logical requests concurrently and collects one [`Outcome`] per
/// request.
///
/// Every request runs on its own tokio task; the harness never serializes
/// dispatch, since a sequential driver could not exhaust the pool.
#[derive(Debug, Clone)]
pub struct ConcurrentHarness {
    config: HarnessConfig,
}

impl ConcurrentHarness {
    /// Creates a harness with the given configuration.
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    /// Dispatches the configured number of requests against `service`,
    /// request `i` offset by `i * stagger`, and waits for every outcome.
    ///
    /// With a deadline configured, a hung request is recorded as
    /// [`Outcome::TimedOut`] and its future dropped; without one the harness
    /// waits as long as the service does.
    pub async fn run_parallel<S>(&self, service: S, request: DemoRequest) -> Outcomes
    where
        S: Service<DemoRequest, Response = DemoResponse> + Clone + Send + 'static,
        S::Error: std::fmt::Display,
        S::Future: Send + 'static,
    {
        let mut tasks = Vec::with_capacity(self.config.requests);
        for i in 0..self.config.requests {
            let mut service = service.clone();
            let stagger = self.config.stagger * i as u32;
            let deadline = self.config.deadline;

            tasks.push(tokio::spawn(async move {
                if !stagger.is_zero() {
                    sleep(stagger).await;
                }
                debug!(request = i, ?deadline, "dispatching");
                let started = Instant::now();

                let call = async {
                    match service.ready().await {
                        Ok(ready) => ready.call(request).await,
                        Err(err) => Err(err),
                    }
                };

                let outcome = match deadline {
                    Some(limit) => match tokio::time::timeout(limit, call).await {
                        Ok(Ok(response)) => Outcome::Success {
                            status: response.status,
                            latency: started.elapsed(),
                        },
                        Ok(Err(err)) => Outcome::Error {
                            reason: err.to_string(),
                        },
                        Err(_) => Outcome::TimedOut,
                    },
                    None => match call.await {
                        Ok(response) => Outcome::Success {
                            status: response.status,
                            latency: started.elapsed(),
                        },
                        Err(err) => Outcome::Error {
                            reason: err.to_string(),
                        },
                    },
                };

                debug!(request = i, ?outcome, "finished");
                outcome
            }));
        }

        let mut outcomes = Vec::with_capacity(tasks.len());
        for task in tasks {
            outcomes.push(task.await.unwrap_or_else(|err| Outcome::Error {
                reason: format!("request task failed: {err}"),
            }));
        }
        Outcomes::from(outcomes)
    }
}

impl Default for ConcurrentHarness {
    fn default() -> Self {
        Self::new(HarnessConfig::default())
    }
}
