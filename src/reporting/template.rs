//! Issue title and body rendering
//!
//! Templates are plain text (usually markdown) with `{{ name }}`
//! placeholders. Titles see `timestamp`; bodies see `results`, `total`,
//! `succeeded`, `unexpected` and `failed`.

use chrono::{DateTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::config::TemplateConfig;
use crate::core::constants::display;
use crate::core::error::{ProbeupError, Result};
use crate::core::types::{ProbeOutcome, ResultSet};
use crate::reporting::issue::Issue;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{ *([a-z_]+) *\}\}").expect("placeholder pattern is valid")
});

pub const DEFAULT_TITLE_TEMPLATE: &str = "Endpoint probe report {{ timestamp }}";

pub const DEFAULT_BODY_TEMPLATE: &str = "## Endpoint probe results

{{ results }}

**{{ succeeded }}** of **{{ total }}** endpoint(s) answered 200, \
**{{ unexpected }}** answered with another status, \
**{{ failed }}** could not be probed.
";

const TITLE_VARIABLES: [&str; 1] = ["timestamp"];
const BODY_VARIABLES: [&str; 5] = ["results", "total", "succeeded", "unexpected", "failed"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
}

impl Template {
    pub fn new<S: Into<String>>(source: S) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            ProbeupError::Template(format!(
                "Could not read template '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self::new(source))
    }

    /// Substitute every placeholder. Unknown names are an error rather than
    /// being left in the output.
    pub fn render(&self, variables: &HashMap<&str, String>) -> Result<String> {
        if let Some(unknown) = PLACEHOLDER
            .captures_iter(&self.source)
            .map(|caps| caps.get(1).map_or("", |m| m.as_str()))
            .find(|name| !variables.contains_key(name))
        {
            let mut known: Vec<&str> = variables.keys().copied().collect();
            known.sort_unstable();
            return Err(ProbeupError::Template(format!(
                "Unknown placeholder '{{{{ {unknown} }}}}'. Available: {}.",
                known.join(", ")
            )));
        }

        let rendered = PLACEHOLDER.replace_all(&self.source, |caps: &Captures| {
            variables
                .get(&caps[1])
                .cloned()
                .unwrap_or_default()
        });
        Ok(rendered.into_owned())
    }
}

/// Render an issue title; `timestamp` is RFC 3339 with nanoseconds.
pub fn render_title(template: &Template, now: DateTime<Utc>) -> Result<String> {
    let variables = HashMap::from([(
        TITLE_VARIABLES[0],
        now.to_rfc3339_opts(SecondsFormat::Nanos, true),
    )]);
    Ok(template.render(&variables)?.trim().to_string())
}

pub fn render_body(template: &Template, results: &ResultSet) -> Result<String> {
    let values = [
        results_table(results),
        results.len().to_string(),
        results.succeeded_count().to_string(),
        results.unexpected_status_count().to_string(),
        results.failed_count().to_string(),
    ];
    let variables: HashMap<&str, String> = BODY_VARIABLES.into_iter().zip(values).collect();
    template.render(&variables)
}

/// Markdown table with one row per outcome, in result order.
pub fn results_table(results: &ResultSet) -> String {
    if results.is_empty() {
        return "_No endpoints were configured._".to_string();
    }

    let mut table = String::from(
        "| # | Method | URL | Status | Duration (ms) | Result |\n\
         |---|--------|-----|--------|---------------|--------|\n",
    );
    for (i, outcome) in results.iter().enumerate() {
        table.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            i + 1,
            escape_cell(&outcome.spec.method),
            escape_cell(&outcome.spec.url),
            outcome.status(),
            outcome.duration_ms(),
            escape_cell(&verdict(outcome)),
        ));
    }
    table.truncate(table.trim_end().len());
    table
}

fn verdict(outcome: &ProbeOutcome) -> String {
    match (&outcome.failure, &outcome.error_message) {
        (Some(kind), Some(message)) => format!("{} {kind}: {message}", display::ERROR_EMOJI),
        (Some(kind), None) => format!("{} {kind}", display::ERROR_EMOJI),
        (None, _) if outcome.succeeded => format!("{} OK", display::SUCCESS_EMOJI),
        (None, _) => format!("{} Unexpected status", display::WARNING_EMOJI),
    }
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}

/// Title and body templates for one report.
#[derive(Debug, Clone)]
pub struct IssueTemplates {
    pub title: Template,
    pub body: Template,
}

impl Default for IssueTemplates {
    fn default() -> Self {
        Self {
            title: Template::new(DEFAULT_TITLE_TEMPLATE),
            body: Template::new(DEFAULT_BODY_TEMPLATE),
        }
    }
}

impl IssueTemplates {
    /// Load configured template files, using the built-in default for any not set.
    pub fn from_config(config: &TemplateConfig) -> Result<Self> {
        let title = match config.title {
            Some(ref path) => Template::from_file(path)?,
            None => Template::new(DEFAULT_TITLE_TEMPLATE),
        };
        let body = match config.body {
            Some(ref path) => Template::from_file(path)?,
            None => Template::new(DEFAULT_BODY_TEMPLATE),
        };
        Ok(Self { title, body })
    }

    pub fn render(&self, results: &ResultSet, now: DateTime<Utc>) -> Result<Issue> {
        Ok(Issue {
            title: render_title(&self.title, now)?,
            body: render_body(&self.body, results)?,
        })
    }
}
