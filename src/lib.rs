//! Concurrent HTTP endpoint prober.
//!
//! [`probe::Dispatcher`] probes every configured [`EndpointSpec`] in its own
//! task, bounds each request by the configured timeout and returns one
//! [`ProbeOutcome`] per spec, in input order. The `reporting` module renders
//! the resulting [`ResultSet`] into a GitHub issue and submits it.

pub mod config;
pub mod core;
pub mod probe;
pub mod reporting;
pub mod ui;

// Re-export commonly used items
pub use config::Config;
pub use crate::core::{EndpointSpec, FailureKind, ProbeOutcome, ProbeupError, Result, ResultSet};
pub use probe::{Dispatcher, ExecuteProbe, HttpProbeExecutor};
