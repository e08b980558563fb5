//! Reporting
//!
//! This module turns a result set into an issue (templating), submits it
//! to GitHub, and holds the structured logging helpers.

pub mod issue;
pub mod logging;
pub mod template;

// Re-export commonly used items
pub use issue::{Issue, IssueClient, IssueReceipt};
pub use template::{IssueTemplates, Template};
