//! Boxoffice crawler main entry point
//!
//! This is the command-line interface for the alphabetical movie crawler.

use anyhow::Context;
use boxoffice_crawler::config::{load_config_with_hash, Config};
use boxoffice_crawler::crawler::crawl;
use boxoffice_crawler::output::print_summary;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Crawls the box office site alphabetically and appends genre and gross
/// figures for every movie to a CSV file.
#[derive(Parser, Debug)]
#[command(name = "boxoffice-crawler")]
#[command(version)]
#[command(about = "Alphabetical box office crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the resolved configuration and bucket plan without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if cli.dry_run {
        print_plan(&config);
        return Ok(());
    }

    tracing::info!(
        "Crawling {} into {}",
        config.crawler.base_url,
        config.output.csv_path
    );

    let summary = crawl(config).await.context("crawl failed")?;
    print_summary(&summary);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("boxoffice_crawler=info,warn"),
            1 => EnvFilter::new("boxoffice_crawler=debug,info"),
            2 => EnvFilter::new("boxoffice_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn print_plan(config: &Config) {
    println!("=== Boxoffice Crawler Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Base URL: {}", config.crawler.base_url);
    println!("  Bucket delay: {}ms", config.crawler.bucket_delay);
    println!("  Request delay: {}ms", config.crawler.request_delay);
    println!("  Request timeout: {}s", config.crawler.request_timeout);
    println!("  On row error: {:?}", config.crawler.on_row_error);

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);
    println!("  Header: {}", config.output.write_header);

    let buckets = config.crawler.bucket_list();
    println!("\nBuckets ({}): {}", buckets.len(), buckets.join(" "));
}
