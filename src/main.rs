//! Petscout main entry point
//!
//! This is the command-line interface for the Petscout adoption-site scraper.

use anyhow::Context;
use clap::Parser;
use petscout::config::{load_config_with_hash, Config, SessionKind};
use petscout::crawler::{user_agent_string, HttpFetcher};
use petscout::output::{print_statistics, write_report};
use petscout::provider::Classifier;
use petscout::scrape_site;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Petscout: an adoption-site crawler and animal-record extractor
///
/// Petscout walks a pet-adoption website breadth-first, finds embedded
/// listing widgets, and extracts one record per animal page it can read.
/// The records are written as JSON; logs go to stderr.
#[derive(Parser, Debug)]
#[command(name = "petscout")]
#[command(version)]
#[command(about = "An adoption-site crawler and animal-record extractor", long_about = None)]
struct Cli {
    /// Root URL of the adoption site
    #[arg(value_name = "ROOT_URL")]
    root_url: String,

    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the JSON report here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and classify the root page without crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Print run statistics after the scrape
    #[arg(long)]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load(&cli)?;

    if cli.dry_run {
        handle_dry_run(&cli, &config).await
    } else {
        handle_scrape(&cli, &config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("petscout=info,warn"),
            1 => EnvFilter::new("petscout=debug,info"),
            2 => EnvFilter::new("petscout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file, or falls back to defaults
fn load(cli: &Cli) -> anyhow::Result<Config> {
    let Some(path) = &cli.config else {
        tracing::info!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);
    Ok(config)
}

/// Handles the --dry-run mode: shows the effective settings and the root page's provider
async fn handle_dry_run(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    println!("=== Petscout Dry Run ===\n");

    println!("Scraper Configuration:");
    println!("  Element wait: {}ms", config.scraper.element_wait_ms);
    match config.scraper.max_pages {
        Some(limit) => println!("  Max pages: {}", limit),
        None => println!("  Max pages: unlimited"),
    }

    println!("\nFetch:");
    println!("  Request timeout: {}s", config.fetch.request_timeout_secs);
    println!("  Connect timeout: {}s", config.fetch.connect_timeout_secs);
    println!("  User agent: {}", user_agent_string(&config.user_agent));

    println!("\nSession:");
    match config.session.kind {
        SessionKind::WebDriver => {
            println!("  Kind: webdriver");
            println!("  Endpoint: {}", config.session.webdriver_url);
            println!("  Browser: {}", config.session.browser_name);
            println!("  Arguments: {}", config.session.browser_args.join(" "));
        }
        SessionKind::Static => println!("  Kind: static"),
    }

    println!("\nOutput:");
    match report_path(cli, config) {
        Some(path) => println!("  Report: {}", path.display()),
        None => println!("  Report: stdout"),
    }

    let fetcher = HttpFetcher::new(&config.user_agent, &config.fetch)
        .context("Failed to build HTTP client")?;
    let provider = Classifier::new(fetcher).classify(&cli.root_url).await;

    println!("\n✓ Configuration is valid");
    println!("✓ Root page {} uses provider: {}", cli.root_url, provider);

    Ok(())
}

/// Handles the main scrape operation
async fn handle_scrape(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let report = scrape_site(&cli.root_url, config)
        .await
        .with_context(|| format!("Scrape of {} failed", cli.root_url))?;

    let path = report_path(cli, config);
    write_report(&report, path.as_deref()).context("Failed to write report")?;

    if cli.stats {
        print_statistics(&report.stats);
    }

    Ok(())
}

/// `--output` wins over `[output] report-path`
fn report_path(cli: &Cli, config: &Config) -> Option<PathBuf> {
    cli.output
        .clone()
        .or_else(|| config.output.report_path.as_ref().map(PathBuf::from))
}
