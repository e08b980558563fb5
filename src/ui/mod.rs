//! User interface
//!
//! This module contains CLI parsing and result/issue output formatting.

pub mod cli;
pub mod output;

// Re-export commonly used items
pub use cli::{Cli, cli_to_config};
