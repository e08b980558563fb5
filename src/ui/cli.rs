// Command-line interface definitions and parsing for probeup

use crate::config::CliConfig;
use crate::core::constants::output_formats;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use specific config file (default: probeup.toml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<String>,

    /// Per-request timeout in seconds (overrides the config file)
    #[arg(short = 't', long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Render the issue and print it instead of submitting it
    #[arg(long)]
    pub dry_run: bool,

    /// Output format [default: text]
    #[arg(long, value_name = "FORMAT", value_parser = output_formats::ALL)]
    pub format: Option<String>,

    /// Suppress result output and logging
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Convert parsed CLI arguments into the config overlay
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        timeout: cli.timeout,
        config_file: cli
            .config
            .as_ref()
            .map(|path| path.trim().to_string())
            .filter(|path| !path.is_empty()),
        dry_run: cli.dry_run,
        quiet: cli.quiet,
        verbose: cli.verbose,
        output_format: cli.format.clone(),
    }
}
