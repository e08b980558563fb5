use clap::Parser;
use probeup::config::{CliConfig, Config};
use probeup::core::constants::output_formats;
use probeup::reporting::logging;
use probeup::reporting::{IssueClient, IssueTemplates};
use probeup::ui::output;
use probeup::ui::{Cli, cli_to_config};
use probeup::{Dispatcher, ResultSet};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run_probeup_logic(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Main probe-and-report logic extracted from main() for testing
pub async fn run_probeup_logic(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = cli_to_config(cli);

    let config = load_and_merge_config(&cli_config)?;

    let output_settings = setup_output_settings(&cli_config, &config);
    logging::init_logger(output_settings.verbose, output_settings.quiet);
    logging::log_config_info(&config);

    let results = probe_endpoints(&config).await?;

    if output_settings.should_show_results() {
        output::display_results(&results, &output_settings.output_format)?;
    }

    let templates = IssueTemplates::from_config(&config.templates).inspect_err(|e| {
        logging::log_error("Could not load issue templates", Some(e));
    })?;
    let issue = templates.render(&results, chrono::Utc::now())?;

    if cli_config.dry_run {
        if output_settings.should_show_issue() {
            output::display_issue_preview(&issue);
        }
        return Ok(0);
    }

    let client = IssueClient::from_env()?;
    let receipt = client
        .submit(
            &config.global.github,
            &config.notification.github,
            &issue,
        )
        .await
        .inspect_err(|e| {
            logging::log_error("Error on submitting issue", Some(e));
        })?;

    if output_settings.should_show_issue() {
        output::display_issue_receipt(&receipt);
    }

    Ok(0)
}

/// Load configuration from the given file or the working directory and merge CLI overrides
pub fn load_and_merge_config(
    cli_config: &CliConfig,
) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file)?
    } else {
        Config::load_from_standard_locations()?
    };

    // Merge CLI arguments with configuration (CLI takes precedence)
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}

/// Settings for output formatting and display
pub struct OutputSettings {
    pub quiet: bool,
    pub verbose: bool,
    pub output_format: String,
}

impl OutputSettings {
    pub fn should_show_results(&self) -> bool {
        !self.quiet
    }

    /// Issue previews and receipts would corrupt JSON output
    pub fn should_show_issue(&self) -> bool {
        !self.quiet && self.output_format == output_formats::TEXT
    }
}

/// Setup output settings based on CLI and config
pub fn setup_output_settings(cli_config: &CliConfig, config: &Config) -> OutputSettings {
    OutputSettings {
        quiet: cli_config.quiet,
        verbose: config.verbose.unwrap_or(false),
        output_format: config
            .output_format
            .as_deref()
            .unwrap_or(output_formats::DEFAULT)
            .to_string(),
    }
}

/// Probe every configured endpoint
pub async fn probe_endpoints(config: &Config) -> Result<ResultSet, Box<dyn std::error::Error>> {
    let specs = config.endpoint_specs();
    logging::log_probe_start(specs.len());

    let dispatcher = Dispatcher::http()?;
    let start_time = std::time::Instant::now();
    let results = dispatcher.run(specs, config.timeout_duration()).await;

    logging::log_probe_complete(&results, start_time.elapsed().as_millis());
    Ok(results)
}
