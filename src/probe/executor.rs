use async_trait::async_trait;
use log::debug;
use reqwest::Method;
use std::time::Duration;
use tokio::time::Instant;

use crate::core::constants::error_messages;
use crate::core::error::Result;
use crate::core::types::{EndpointSpec, FailureKind, ProbeOutcome};

/// Performs a single probe and classifies what happened.
///
/// Implementations must never panic or return early without an outcome:
/// every failure is folded into the returned [`ProbeOutcome`].
#[async_trait]
pub trait ExecuteProbe: Send + Sync {
    async fn execute(&self, spec: EndpointSpec, timeout: Duration) -> ProbeOutcome;
}

/// Probe executor backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpProbeExecutor {
    client: reqwest::Client,
}

impl HttpProbeExecutor {
    /// Build an executor with a plain client: no default headers, no cookie store.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ExecuteProbe for HttpProbeExecutor {
    async fn execute(&self, spec: EndpointSpec, timeout: Duration) -> ProbeOutcome {
        let method = match Method::from_bytes(spec.method.as_bytes()) {
            Ok(method) => method,
            Err(err) => {
                let message = format!("invalid method '{}': {err}", spec.method);
                debug!("✗ {spec} -> {message}");
                return ProbeOutcome::failure(spec, FailureKind::Request, message);
            }
        };

        let request = match self.client.request(method, &spec.url).build() {
            Ok(request) => request,
            Err(err) => {
                let message = describe_error(&err);
                debug!("✗ {spec} -> {message}");
                return ProbeOutcome::failure(spec, FailureKind::Request, message);
            }
        };

        // Only response headers are awaited; the body is dropped unread.
        let start = Instant::now();
        let response = tokio::time::timeout(timeout, self.client.execute(request)).await;

        let outcome = match response {
            Err(_elapsed) => ProbeOutcome::failure(
                spec,
                FailureKind::Timeout,
                format!(
                    "{} after {}ms",
                    error_messages::OPERATION_TIMED_OUT,
                    timeout.as_millis()
                ),
            ),
            Ok(Err(err)) if err.is_timeout() => {
                ProbeOutcome::failure(spec, FailureKind::Timeout, describe_error(&err))
            }
            Ok(Err(err)) => {
                ProbeOutcome::failure(spec, FailureKind::Transport, describe_error(&err))
            }
            Ok(Ok(res)) => {
                let elapsed = start.elapsed();
                let status_code = res.status().as_u16();
                drop(res);
                ProbeOutcome::responded(spec, status_code, elapsed)
            }
        };

        debug!("{} {outcome}", status_marker(&outcome));
        outcome
    }
}

/// Flatten an error and its source chain into one line.
pub fn describe_error(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}

fn status_marker(outcome: &ProbeOutcome) -> &'static str {
    if outcome.succeeded {
        "✓"
    } else {
        "✗"
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use tokio::net::TcpListener;

    /// A server that accepts connections and never answers.
    pub async fn silent_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        format!("http://{addr}/silent")
    }

    /// An address where nothing is listening.
    pub async fn refused_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}/refused")
    }
}
