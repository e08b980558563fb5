use crate::config::Config;
use crate::core::types::{ProbeOutcome, ResultSet};
use log::{debug, error, info, warn};

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    // try_init: a second initialization (tests, embedding) is not an error
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_module_path(false)
        .format_target(false)
        .try_init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    let timeout = config.timeout_duration().as_secs();
    let github = &config.global.github;

    info!(
        "Configuration: endpoints={}, timeout={timeout}s",
        config.requests.len()
    );
    if github.is_configured() {
        info!("Issue target: {}/{}", github.owner, github.repo);
    }
    debug!(
        "Notification: assignees={:?}, labels={:?}",
        config.notification.github.assignees, config.notification.github.labels
    );
}

/// Log dispatch start
pub fn log_probe_start(endpoint_count: usize) {
    info!("Starting probe of {endpoint_count} endpoint(s)");
}

/// Log a finished run, one debug line per outcome
pub fn log_probe_complete(results: &ResultSet, duration_ms: u128) {
    for outcome in results {
        log_outcome(outcome);
    }

    let failed = results.failed_count();
    if failed == 0 {
        info!(
            "✅ Probe complete: {}/{} endpoints answered 200 ({}ms)",
            results.succeeded_count(),
            results.len(),
            duration_ms
        );
    } else {
        warn!(
            "❌ Probe complete: {}/{} endpoints answered 200, {} unreachable ({}ms)",
            results.succeeded_count(),
            results.len(),
            failed,
            duration_ms
        );
    }
}

/// Log an individual outcome for debugging
pub fn log_outcome(outcome: &ProbeOutcome) {
    match (outcome.status_code, outcome.error_message.as_deref()) {
        (Some(status), _) if outcome.succeeded => debug!("✓ {} -> {status}", outcome.spec),
        (Some(status), _) => debug!("✗ {} -> {status}", outcome.spec),
        (None, Some(message)) => debug!("✗ {} -> {message}", outcome.spec),
        (None, None) => debug!("? {} -> unknown", outcome.spec),
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}
