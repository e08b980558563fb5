//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::core::constants::{files, output_formats, timeouts};
use crate::core::error::{ProbeupError, Result};
use crate::core::types::EndpointSpec;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output format (text, json)
    pub output_format: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,

    /// Settings shared by every probe and the issue target
    pub global: GlobalConfig,

    /// Endpoints to probe, in report order
    pub requests: Vec<EndpointSpec>,

    /// Who gets notified about the report
    pub notification: NotificationConfig,

    /// Optional title/body template files
    pub templates: TemplateConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Per-request timeout in seconds
    pub timeout: Option<u64>,

    /// Repository that receives the report issue
    pub github: GithubTarget,
}

/// Repository coordinates on GitHub.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubTarget {
    pub owner: String,
    pub repo: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub github: GithubNotification,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubNotification {
    pub assignees: Vec<String>,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Path to the issue title template
    pub title: Option<String>,

    /// Path to the issue body template
    pub body: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_format: Some(output_formats::DEFAULT.to_string()),
            verbose: Some(false),
            global: GlobalConfig::default(),
            requests: Vec::new(),
            notification: NotificationConfig::default(),
            templates: TemplateConfig::default(),
        }
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            timeout: Some(timeouts::DEFAULT_TIMEOUT_SECONDS),
            github: GithubTarget::default(),
        }
    }
}

impl GithubTarget {
    pub fn is_configured(&self) -> bool {
        !self.owner.is_empty() && !self.repo.is_empty()
    }
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ProbeupError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::from_toml_str(&content).map_err(|e| match e {
            ProbeupError::TomlParsing(err) => ProbeupError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                err
            )),
            other => other,
        })?;

        Ok(config)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `probeup.toml` from the working directory, falling back to defaults
    /// when it does not exist. A file that exists but does not parse is an error.
    pub fn load_from_standard_locations() -> Result<Self> {
        let path = Path::new(files::DEFAULT_CONFIG_FILE);
        if path.exists() {
            return Self::load_from_file(path);
        }

        warn!(
            "No {} found in the working directory; using defaults",
            files::DEFAULT_CONFIG_FILE
        );
        Ok(Self::default())
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        if let Some(timeout) = cli_config.timeout {
            self.global.timeout = Some(timeout);
        }
        if cli_config.verbose {
            self.verbose = Some(true);
        }
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }
    }

    /// Endpoint specs in configured order
    pub fn endpoint_specs(&self) -> Vec<EndpointSpec> {
        self.requests.clone()
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(
            self.global
                .timeout
                .unwrap_or(timeouts::DEFAULT_TIMEOUT_SECONDS),
        )
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(timeout) = self.global.timeout {
            if timeout == 0 {
                return Err(ProbeupError::Config(
                    "Timeout cannot be 0. Expected a positive integer representing seconds."
                        .to_string(),
                ));
            }
            if timeout > timeouts::MAX_TIMEOUT_SECONDS {
                return Err(ProbeupError::Config(format!(
                    "Timeout of {timeout} seconds is extremely large (>24 hours). Consider using a smaller value."
                )));
            }
        }

        if let Some(ref format) = self.output_format
            && !output_formats::ALL.contains(&format.as_str())
        {
            return Err(ProbeupError::Config(format!(
                "Invalid output format '{format}'. Expected one of: {}.",
                output_formats::ALL.join(", ")
            )));
        }

        let github = &self.global.github;
        if github.owner.is_empty() != github.repo.is_empty() {
            return Err(ProbeupError::Config(
                "GitHub owner and repo must be set together.".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    pub timeout: Option<u64>,          // --timeout
    pub config_file: Option<String>,   // --config
    pub dry_run: bool,                 // --dry-run
    pub quiet: bool,                   // --quiet
    pub verbose: bool,                 // --verbose
    pub output_format: Option<String>, // --format
}
