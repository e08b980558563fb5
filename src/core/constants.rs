/// Application-wide constants to avoid magic values throughout the codebase.
///
/// Output format constants
pub mod output_formats {
    /// Text output format - human readable summary with emoji status markers
    pub const TEXT: &str = "text";
    /// JSON output format - structured output for automation
    pub const JSON: &str = "json";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 2] = [TEXT, JSON];
}

/// HTTP status code constants
pub mod http_status {
    /// HTTP 200 OK - the only status counted as a successful probe
    pub const OK: u16 = 200;
    /// Sentinel reported when no response was received
    pub const NO_RESPONSE: u16 = 0;
}

/// Timeout and duration constants
pub mod timeouts {
    /// Default per-request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 5;
    /// Maximum accepted timeout in seconds (24 hours)
    pub const MAX_TIMEOUT_SECONDS: u64 = 86400;
    /// Sentinel duration, in milliseconds, for attempts without a round trip
    pub const NO_ROUND_TRIP_MS: i64 = -1;
}

/// Configuration file and environment constants
pub mod files {
    /// Config file looked up in the working directory when `--config` is absent
    pub const DEFAULT_CONFIG_FILE: &str = "probeup.toml";
}

/// GitHub issue submission constants
pub mod github {
    /// Environment variable holding the API token
    pub const TOKEN_ENV: &str = "GH_TOKEN";
    /// Environment variable overriding the API base URL
    pub const API_URL_ENV: &str = "GITHUB_API_URL";
    /// Public GitHub REST API
    pub const DEFAULT_API_URL: &str = "https://api.github.com";
    /// Media type GitHub recommends for REST calls
    pub const ACCEPT: &str = "application/vnd.github+json";
    /// REST API version pinned in every request
    pub const API_VERSION: &str = "2022-11-28";
}

/// Error message constants
pub mod error_messages {
    /// Reported for specs missing a URL or method
    pub const INVALID_REQUEST_CONFIG: &str = "Invalid request config";
    /// Prefix for timeout failures
    pub const OPERATION_TIMED_OUT: &str = "operation timed out";
    /// Reported when a probe task ended without sending its outcome
    pub const PROBE_TASK_LOST: &str = "probe task ended without reporting an outcome";
}

/// Display and formatting constants
pub mod display {
    /// Emoji for a 200 response
    pub const SUCCESS_EMOJI: &str = "✅";
    /// Emoji for a non-200 response
    pub const WARNING_EMOJI: &str = "⚠️";
    /// Emoji for an attempt that never completed
    pub const ERROR_EMOJI: &str = "❌";
}
