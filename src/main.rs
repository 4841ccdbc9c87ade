//! Berita Harvester main entry point
//!
//! This is the command-line interface for the listing harvester. Results are
//! printed to stdout as JSON envelopes; logs go to stderr.

use anyhow::Context;
use berita_harvester::article::scrape_article;
use berita_harvester::config::{load_config, validate, Config};
use berita_harvester::harvest::{build_http_client, page_url, run_harvest, HarvestPlan};
use berita_harvester::output::{write_json, ArticleResponse, ListingResponse};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Berita Harvester: concurrent news listing harvester
///
/// Fetches every page of a paginated article listing with bounded
/// concurrency and prints the articles newest first.
#[derive(Parser, Debug)]
#[command(name = "berita-harvester")]
#[command(version)]
#[command(about = "Concurrent news listing harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Harvest the listing and print all articles, newest first
    List(ListArgs),

    /// Scrape a single article page
    Read {
        /// Absolute URL of the article
        url: String,
    },
}

#[derive(Args, Debug, Default)]
struct ListArgs {
    /// Listing root URL (page N is fetched from <BASE_URL>/laman/N)
    #[arg(long)]
    base_url: Option<String>,

    /// First page to fetch
    #[arg(long)]
    first_page: Option<u32>,

    /// Last page to fetch (inclusive)
    #[arg(long)]
    last_page: Option<u32>,

    /// Maximum number of pages fetched at the same time
    #[arg(long)]
    max_concurrent: Option<u32>,

    /// Give up on a single page after this many milliseconds
    #[arg(long)]
    page_timeout_ms: Option<u64>,

    /// Validate config and show what would be fetched without fetching
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
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    match cli.command {
        Command::List(args) => {
            let config = apply_overrides(config, &args);
            validate(&config).context("Invalid harvest settings")?;

            if args.dry_run {
                handle_dry_run(&config);
            } else {
                handle_list(&config).await?;
            }
        }
        Command::Read { url } => handle_read(&config, &url).await?,
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("berita_harvester=info,warn"),
            1 => EnvFilter::new("berita_harvester=debug,info"),
            2 => EnvFilter::new("berita_harvester=trace,debug"),
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

/// Applies command-line values on top of the file configuration
fn apply_overrides(mut config: Config, args: &ListArgs) -> Config {
    if let Some(base_url) = &args.base_url {
        config.source.base_url = base_url.clone();
    }
    if let Some(first_page) = args.first_page {
        config.harvest.first_page = first_page;
    }
    if let Some(last_page) = args.last_page {
        config.harvest.last_page = last_page;
    }
    if let Some(max_concurrent) = args.max_concurrent {
        config.harvest.max_concurrent = max_concurrent;
    }
    if let Some(page_timeout_ms) = args.page_timeout_ms {
        config.harvest.page_timeout_ms = Some(page_timeout_ms);
    }
    config
}

/// Handles `list --dry-run`: shows the plan without fetching
fn handle_dry_run(config: &Config) {
    let plan = HarvestPlan::from_config(&config.harvest);

    println!("=== Berita Harvester Dry Run ===\n");

    println!("Source:");
    println!("  Base URL: {}", config.source.base_url);
    println!("  Origin: {}", config.source.origin);

    println!("\nHarvest:");
    println!(
        "  Pages: {}..={} ({} pages)",
        plan.first_page,
        plan.last_page,
        plan.page_count()
    );
    println!("  Max concurrent: {}", plan.max_concurrent);
    match plan.page_timeout {
        Some(timeout) => println!("  Page timeout: {:?}", timeout),
        None => println!("  Page timeout: none"),
    }
    println!("  First URL: {}", page_url(&config.source.base_url, plan.first_page));
    println!("  Last URL: {}", page_url(&config.source.base_url, plan.last_page));

    println!("\n✓ Configuration is valid");
}

/// Handles `list`: harvests and prints the listing envelope
async fn handle_list(config: &Config) -> anyhow::Result<()> {
    let start_time = Instant::now();

    let result = run_harvest(config).await.context("Harvest could not start")?;
    if result.is_no_data() {
        tracing::warn!("No articles found on any page");
    }

    let envelope = ListingResponse::from_result(result, start_time.elapsed());
    write_json(&mut std::io::stdout().lock(), &envelope)?;
    Ok(())
}

/// Handles `read`: scrapes one article and prints its envelope
async fn handle_read(config: &Config, url: &str) -> anyhow::Result<()> {
    let start_time = Instant::now();

    let client = build_http_client(&config.user_agent)?;
    let detail = scrape_article(&client, url)
        .await
        .with_context(|| format!("Error scraping URL: {}", url))?;

    let envelope = ArticleResponse::success(detail, start_time.elapsed());
    write_json(&mut std::io::stdout().lock(), &envelope)?;
    Ok(())
}
