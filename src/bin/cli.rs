//! volby-scraper CLI
//!
//! Scrapes the results of every municipality in one territorial unit into a
//! semicolon-delimited CSV file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use volby_scraper::{
    error::{AppError, Result},
    models::Config,
    pipeline,
    services::HttpFetcher,
    utils::http,
};

/// volby-scraper - election results to CSV
#[derive(Parser, Debug)]
#[command(name = "volby-scraper", version, about = "Election results table scraper")]
struct Cli {
    /// Territorial unit URL, as linked from the national index page
    unit_url: String,

    /// Output file, must end with .csv
    output: PathBuf,

    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the national index page URL
    #[arg(long)]
    index_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Check the output name, then load and validate the configuration.
fn prepare_config(cli: &Cli) -> Result<Config> {
    pipeline::validate_output_path(&cli.output)?;

    let mut config = if cli.config.exists() {
        Config::load_or_default(&cli.config)
    } else {
        Config::default()
    };
    if let Some(index_url) = &cli.index_url {
        config.source.index_url = index_url.clone();
    }
    config.validate()?;
    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    let config = prepare_config(&cli)?;

    let client = http::create_async_client(&config.crawler)?;
    let fetcher = HttpFetcher::new(client);

    let summary = pipeline::run_pipeline(&config, &fetcher, &cli.unit_url, &cli.output).await?;

    match summary.written {
        Some(written) => println!(
            "Saved {} municipalities of {} to '{}'.",
            written.row_count, summary.unit.name, written.location
        ),
        None => log::warn!("Nothing to write for {}", summary.unit.name),
    }

    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_failure(&e);
            ExitCode::FAILURE
        }
    }
}

fn failure_reaches_log() -> bool {
    log::log_enabled!(log::Level::Error)
}

/// Log the fatal error, or print it when error logging is filtered out.
fn report_failure(err: &AppError) {
    if failure_reaches_log() {
        log::error!("{err}");
    } else {
        eprintln!("Error: {err}");
    }
}
