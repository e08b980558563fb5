use std::fmt;

/// Error types for everything around the probe engine.
///
/// Probe failures themselves are never errors; they are recorded on
/// [`ProbeOutcome`](crate::core::types::ProbeOutcome). These variants cover
/// the collaborators that can end a run: config, templates and issue submission.
#[derive(Debug)]
pub enum ProbeupError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// HTTP client error
    Http(reqwest::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// JSON serialization error
    Json(serde_json::Error),

    /// Template loading or rendering error
    Template(String),

    /// Issue tracker rejected or could not receive the issue
    Issue(String),

    /// Required credential missing from the environment
    MissingCredential(String),
}

impl fmt::Display for ProbeupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeupError::Io(err) => write!(f, "IO error: {err}"),
            ProbeupError::Config(msg) => write!(f, "Configuration error: {msg}"),
            ProbeupError::Http(err) => write!(f, "HTTP error: {err}"),
            ProbeupError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            ProbeupError::Json(err) => write!(f, "JSON error: {err}"),
            ProbeupError::Template(msg) => write!(f, "Template error: {msg}"),
            ProbeupError::Issue(msg) => write!(f, "Issue submission error: {msg}"),
            ProbeupError::MissingCredential(name) => {
                write!(f, "Missing credential: environment variable {name} is not set")
            }
        }
    }
}

impl std::error::Error for ProbeupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProbeupError::Io(err) => Some(err),
            ProbeupError::Http(err) => Some(err),
            ProbeupError::TomlParsing(err) => Some(err),
            ProbeupError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ProbeupError {
    fn from(err: std::io::Error) -> Self {
        ProbeupError::Io(err)
    }
}

impl From<reqwest::Error> for ProbeupError {
    fn from(err: reqwest::Error) -> Self {
        ProbeupError::Http(err)
    }
}

impl From<toml::de::Error> for ProbeupError {
    fn from(err: toml::de::Error) -> Self {
        ProbeupError::TomlParsing(err)
    }
}

impl From<serde_json::Error> for ProbeupError {
    fn from(err: serde_json::Error) -> Self {
        ProbeupError::Json(err)
    }
}

/// Type alias for Results using ProbeupError
pub type Result<T> = std::result::Result<T, ProbeupError>;
