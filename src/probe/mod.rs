//! Endpoint probing
//!
//! This module runs one HTTP probe per endpoint concurrently and
//! collects the classified outcomes.

pub mod dispatcher;
pub mod executor;

// Re-export commonly used items
pub use dispatcher::Dispatcher;
pub use executor::{ExecuteProbe, HttpProbeExecutor};
