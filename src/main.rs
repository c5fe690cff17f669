//! Vestnik main entry point

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use vestnik::config::load_config;
use vestnik::crawler::Crawler;
use vestnik::output::{export_corpus, load_statistics, print_statistics};
use vestnik::storage::open_storage;

/// Vestnik: a focused news crawler
///
/// Vestnik crawls a small set of known news domains, keeps one document per
/// URL fresh via content hashing and a recrawl interval, and classifies
/// every page as an article or a navigation page.
#[derive(Parser, Debug)]
#[command(name = "vestnik")]
#[command(version)]
#[command(about = "A focused news crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show statistics from the database and exit
    #[arg(long, conflicts_with = "export_corpus")]
    stats: bool,

    /// Export the article corpus to the given directory and exit
    #[arg(long, value_name = "DIR", conflicts_with = "stats")]
    export_corpus: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.stats {
        handle_stats(&config)?;
    } else if let Some(dir) = &cli.export_corpus {
        handle_export(&config, dir)?;
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("vestnik=info,warn"),
            1 => EnvFilter::new("vestnik=debug,info"),
            2 => EnvFilter::new("vestnik=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Handles the --stats mode: shows document and frontier counts
fn handle_stats(config: &vestnik::Config) -> Result<()> {
    let storage = open_storage(std::path::Path::new(&config.db.path))?;
    let stats = load_statistics(&storage)?;
    print_statistics(&stats);
    Ok(())
}

/// Handles the --export-corpus mode: writes corpus.txt and urls.txt
fn handle_export(
    config: &vestnik::Config,
    dir: &std::path::Path,
) -> Result<()> {
    let storage = open_storage(std::path::Path::new(&config.db.path))?;
    let report = export_corpus(&storage, dir)?;
    println!("Exported {} documents to {}", report.documents, dir.display());
    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: vestnik::Config) -> Result<()> {
    let shutdown = Arc::new(AtomicBool::new(false));

    // Ctrl-C raises the flag; the loop finishes the in-flight item and
    // exits with success.
    let flag = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, finishing current item");
            flag.store(true, Ordering::Relaxed);
        }
    });

    let mut crawler = match Crawler::new(config, shutdown) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to start crawler: {}", e);
            return Err(e.into());
        }
    };

    match crawler.run().await {
        Ok(()) => {
            tracing::info!("Crawl finished");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
