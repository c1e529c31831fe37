//! webb-scraping - Entry Point
//!
//! Scrapes one target and prints what was found.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use webb_scraping::{AstroClient, Config, ScrapeError, ScrapeSummary, Scraper, Target, formatters};

#[derive(Parser, Debug)]
#[command(name = "webb-scraping")]
#[command(about = "Aliases, JWST/HST coverage, papers and planet properties for a target")]
#[command(version)]
struct Cli {
    /// Target name (e.g. "GJ 357", "TRAPPIST-1", "TIC 307210830")
    name: String,

    /// Output format
    #[arg(long, default_value = "markdown")]
    format: Format,

    /// Also compute TSM and ESM
    #[arg(long)]
    metrics: bool,

    /// Log metric inputs and intermediates
    #[arg(long)]
    verbose: bool,

    /// Also read the JWST GTO/ERS program PDFs
    #[arg(long)]
    search_webb: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum Format {
    /// Human-readable Markdown
    #[default]
    Markdown,
    /// JSON report
    Json,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so the report on stdout stays clean.
    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        name = %cli.name,
        "Starting webb-scraping"
    );

    let config = Config::from_env()?;
    let client = AstroClient::new(config)?;
    let scraper = Scraper::new(Arc::new(client));

    let mut target = Target::new(cli.name);
    let summary = match scraper.scrape_all(&mut target).await {
        Ok(summary) => summary,
        Err(err) => {
            print_report(&target, None, Some(&err), cli.format)?;
            return Err(err.into());
        }
    };

    let mut outcome = Ok(());
    if cli.search_webb {
        outcome = scraper
            .search_webb(&mut target)
            .await
            .map(|search| tracing::info!(?search, "Searched JWST program listings"));
    }
    if cli.metrics && outcome.is_ok() {
        outcome = scraper.run_all_calculations(&mut target, cli.verbose).await;
    }

    print_report(&target, Some(&summary), outcome.as_ref().err(), cli.format)?;
    outcome.map_err(Into::into)
}

/// Print the report on stdout, including whatever was collected before a failure.
fn print_report(
    target: &Target,
    summary: Option<&ScrapeSummary>,
    failure: Option<&ScrapeError>,
    format: Format,
) -> anyhow::Result<()> {
    match format {
        Format::Markdown => {
            let mut report = formatters::format_target_markdown(target);
            if let Some(err) = failure {
                report.push_str(&formatters::format_failure_markdown(err));
            }
            println!("{report}");
        }
        Format::Json => {
            let report = formatters::target_report(target, summary, failure)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
