use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::core::constants::error_messages;
use crate::core::error::Result;
use crate::core::types::{EndpointSpec, FailureKind, ProbeOutcome, ResultSet};
use crate::probe::executor::{ExecuteProbe, HttpProbeExecutor};

/// Fans a list of specs out to one task each and collects every outcome.
///
/// Outcomes come back in input order: each task reports its spec's index
/// alongside the outcome and the dispatcher slots it in place.
pub struct Dispatcher<E> {
    executor: Arc<E>,
}

impl Dispatcher<HttpProbeExecutor> {
    /// Dispatcher backed by the real HTTP executor.
    pub fn http() -> Result<Self> {
        Ok(Self::new(HttpProbeExecutor::new()?))
    }
}

impl<E> Clone for Dispatcher<E> {
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
        }
    }
}

impl<E: ExecuteProbe + 'static> Dispatcher<E> {
    pub fn new(executor: E) -> Self {
        Self::from_arc(Arc::new(executor))
    }

    pub fn from_arc(executor: Arc<E>) -> Self {
        Self { executor }
    }

    /// Probe every spec concurrently, each bounded by `timeout`.
    ///
    /// Always returns exactly `specs.len()` outcomes. Specs without a URL or
    /// method are reported as invalid without being dispatched.
    pub async fn run(&self, specs: Vec<EndpointSpec>, timeout: Duration) -> ResultSet {
        let expected = specs.len();
        let started = Instant::now();
        let (tx, mut rx) = mpsc::unbounded_channel::<(usize, ProbeOutcome)>();
        let mut dispatched = 0;

        for (index, spec) in specs.iter().enumerate() {
            if !spec.is_valid() {
                debug!("✗ #{index} {spec:?} -> {}", error_messages::INVALID_REQUEST_CONFIG);
                let _ = tx.send((index, ProbeOutcome::invalid_config(spec.clone())));
                continue;
            }

            let executor = Arc::clone(&self.executor);
            let tx = tx.clone();
            let spec = spec.clone();
            dispatched += 1;
            tokio::spawn(async move {
                let outcome = executor.execute(spec, timeout).await;
                let _ = tx.send((index, outcome));
            });
        }
        // The channel closes once every task has reported or died.
        drop(tx);

        debug!("Dispatched {dispatched} of {expected} probe(s), timeout {timeout:?}");

        let mut slots: Vec<Option<ProbeOutcome>> = (0..expected).map(|_| None).collect();
        let mut received = 0;
        while let Some((index, outcome)) = rx.recv().await {
            if slots[index].replace(outcome).is_some() {
                warn!("Probe #{index} reported more than once; keeping the latest outcome");
            } else {
                received += 1;
            }
        }

        if received < expected {
            warn!(
                "{} probe(s) ended without reporting an outcome",
                expected - received
            );
        }

        let outcomes: Vec<ProbeOutcome> = slots
            .into_iter()
            .zip(specs)
            .map(|(slot, spec)| {
                slot.unwrap_or_else(|| {
                    ProbeOutcome::failure(
                        spec,
                        FailureKind::Transport,
                        error_messages::PROBE_TASK_LOST.to_string(),
                    )
                })
            })
            .collect();

        let results = ResultSet::new(outcomes);
        info!(
            "Probed {} endpoint(s) in {}ms: {} succeeded, {} unexpected status, {} failed",
            results.len(),
            started.elapsed().as_millis(),
            results.succeeded_count(),
            results.unexpected_status_count(),
            results.failed_count()
        );
        results
    }
}
