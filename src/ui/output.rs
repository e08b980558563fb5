//! Output formatting and display logic for probeup

use crate::core::constants::{display, output_formats};
use crate::core::error::Result;
use crate::core::types::{ProbeOutcome, ResultSet};
use crate::reporting::issue::{Issue, IssueReceipt};

/// Numbered list of outcomes plus a one-line summary.
pub fn format_results_text(results: &ResultSet) -> String {
    let mut out = String::new();
    if results.is_empty() {
        out.push_str("No endpoints configured\n");
        return out;
    }

    out.push_str("> Results\n");
    for (i, outcome) in results.iter().enumerate() {
        out.push_str(&format!("{:4}. {} {}\n", i + 1, marker(outcome), outcome));
    }
    out.push_str(&format!(
        "> Summary: {} succeeded, {} unexpected status, {} failed\n",
        results.succeeded_count(),
        results.unexpected_status_count(),
        results.failed_count()
    ));
    out
}

pub fn format_results_json(results: &ResultSet) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// Print results in the requested output format
pub fn display_results(results: &ResultSet, output_format: &str) -> Result<()> {
    if output_format == output_formats::JSON {
        println!("{}", format_results_json(results)?);
    } else {
        print!("{}", format_results_text(results));
    }
    Ok(())
}

/// Print the dry-run preview of the issue that would be submitted
pub fn display_issue_preview(issue: &Issue) {
    println!("> Issue title\n{}\n", issue.title);
    println!("> Issue body\n{}", issue.body);
}

pub fn display_issue_receipt(receipt: &IssueReceipt) {
    println!("> Created issue #{}: {}", receipt.number, receipt.html_url);
}

fn marker(outcome: &ProbeOutcome) -> &'static str {
    if outcome.succeeded {
        display::SUCCESS_EMOJI
    } else if outcome.failed {
        display::ERROR_EMOJI
    } else {
        display::WARNING_EMOJI
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{EndpointSpec, FailureKind};
    use std::time::Duration;

    fn sample_results() -> ResultSet {
        ResultSet::new(vec![
            ProbeOutcome::responded(
                EndpointSpec::new("http://a/", "GET"),
                200,
                Duration::from_millis(5),
            ),
            ProbeOutcome::responded(
                EndpointSpec::new("http://b/", "GET"),
                404,
                Duration::from_millis(6),
            ),
            ProbeOutcome::failure(
                EndpointSpec::new("http://c/", "GET"),
                FailureKind::Transport,
                "connection refused".to_string(),
            ),
        ])
    }

    #[test]
    fn test_format_results_text() {
        let text = format_results_text(&sample_results());

        assert_eq!(
            text,
            "> Results\n   \
             1. ✅ 200 - GET http://a/ - 5ms\n   \
             2. ⚠️ 404 - GET http://b/ - 6ms\n   \
             3. ❌ GET http://c/ - connection refused\n\
             > Summary: 1 succeeded, 1 unexpected status, 1 failed\n"
        );
    }

    #[test]
    fn test_format_results_text_empty() {
        assert_eq!(
            format_results_text(&ResultSet::default()),
            "No endpoints configured\n"
        );
    }

    #[test]
    fn test_format_results_json() -> Result<()> {
        let json: serde_json::Value = serde_json::from_str(&format_results_json(&sample_results())?)?;

        assert_eq!(json.as_array().map(Vec::len), Some(3));
        assert_eq!(json[0]["status_code"], 200);
        assert_eq!(json[0]["succeeded"], true);
        assert_eq!(json[1]["failed"], false);
        assert_eq!(json[2]["failure"], "transport");
        assert_eq!(json[2]["duration_ms"], -1);
        assert_eq!(json[2]["spec"]["url"], "http://c/");

        Ok(())
    }
}
