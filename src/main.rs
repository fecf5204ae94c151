//! Bookstall main entry point
//!
//! Command-line interface for the catalog scraper: loads configuration,
//! opens a WebDriver session, runs the crawl, and exports the finished
//! dataset as CSV.

use bookstall::config::{load_config_with_hash, validate, Config};
use bookstall::crawler::crawl;
use bookstall::output::export_csv;
use bookstall::session::WebDriverSession;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Bookstall: a WebDriver-driven catalog scraper
///
/// Crawls a paginated book catalog page by page, visits every item's
/// detail page, and exports the extracted records as CSV. Requires a
/// running WebDriver server (geckodriver or chromedriver).
#[derive(Parser, Debug)]
#[command(name = "bookstall")]
#[command(version = "1.0.0")]
#[command(about = "Scrape a paginated book catalog through a browser", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Override the first listing page to crawl
    #[arg(long, value_name = "URL")]
    start_url: Option<String>,

    /// Override the CSV output path
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,

    /// Keep only records whose title contains this substring
    #[arg(long, value_name = "SUBSTRING")]
    filter: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    run(cli).await?;

    Ok(())
}

/// Loads configuration, applies CLI overrides, and dispatches the mode
async fn run(cli: Cli) -> bookstall::Result<()> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No config file given, using built-in defaults");
            Config::default()
        }
    };

    if let Some(start_url) = cli.start_url {
        config.catalog.start_url = start_url;
    }
    if let Some(out) = &cli.out {
        config.output.csv_path = out.display().to_string();
    }
    // Overrides bypass the file parser, so validate the merged result too
    validate(&config)?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config, cli.filter.as_deref()).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("bookstall=info,warn"),
            1 => EnvFilter::new("bookstall=debug,info"),
            2 => EnvFilter::new("bookstall=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would run
fn handle_dry_run(config: &Config) {
    println!("=== Bookstall Dry Run ===\n");

    println!("WebDriver:");
    println!("  Endpoint: {}", config.webdriver.endpoint);
    println!(
        "  Page load timeout: {}ms",
        config.webdriver.page_load_timeout_ms
    );
    println!("  Settle delay: {}ms", config.webdriver.settle_delay_ms);

    println!("\nCatalog:");
    println!("  Start URL: {}", config.catalog.start_url);

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, filter: Option<&str>) -> bookstall::Result<()> {
    tracing::info!(start_url = %config.catalog.start_url, "starting crawl");

    let mut session = WebDriverSession::connect(&config.webdriver).await?;

    // The session must be torn down whether or not the crawl succeeded
    let outcome = crawl(&config.catalog.start_url, &mut session).await;
    if let Err(e) = session.close().await {
        tracing::warn!("failed to close webdriver session: {}", e);
    }

    let result = match outcome {
        Ok(set) => set,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    let exported = match filter {
        Some(needle) => {
            let filtered = result.filter_by_title(needle);
            tracing::info!(
                kept = filtered.len(),
                total = result.len(),
                "applied title filter"
            );
            filtered
        }
        None => result,
    };

    let path = Path::new(&config.output.csv_path);
    export_csv(&exported, path)?;

    println!("✓ {} records exported to {}", exported.len(), path.display());

    Ok(())
}
