//! watchfinder-scraper - Watch listing scraper for watchfinder.com
//!
//! Collects product links with a headless browser, then extracts each
//! product over plain HTTP into a CSV table.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use watchfinder_scraper::commands::{ExtractCommand, LinksCommand, ScrapeCommand};
use watchfinder_scraper::config::{Config, OutputFormat};

#[derive(Parser)]
#[command(
    name = "watchfinder-scraper",
    version,
    about = "Watch listing scraper for watchfinder.com",
    long_about = "Sweeps collection listing pages in a headless browser, extracts every product page, and writes the results as CSV."
)]
struct Cli {
    /// Collections to sweep (comma-separated)
    #[arg(long, value_delimiter = ',', global = true)]
    collections: Option<Vec<String>>,

    /// Listing pages per collection
    #[arg(short, long, global = true, env = "WATCHFINDER_PAGES")]
    pages: Option<u32>,

    /// Wait after each listing navigation in milliseconds
    #[arg(long, global = true)]
    settle_delay: Option<u64>,

    /// Show the browser window
    #[arg(long, global = true)]
    headed: bool,

    /// Chrome/Chromium executable
    #[arg(long, global = true, env = "WATCHFINDER_CHROME")]
    chrome: Option<PathBuf>,

    /// Proxy URL for detail requests (e.g., socks5://host:port)
    #[arg(long, global = true, env = "WATCHFINDER_PROXY")]
    proxy: Option<String>,

    /// Directory for the result table
    #[arg(short, long, global = true, env = "WATCHFINDER_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format for printed records
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect links, extract every watch, and write the CSV
    #[command(alias = "s")]
    Scrape,

    /// Only collect and print product links
    #[command(alias = "l")]
    Links,

    /// Extract specific product pages (URL, site path, or saved .html file)
    #[command(alias = "e")]
    Extract {
        #[arg(required = true)]
        targets: Vec<String>,
    },

    /// Print the listing URLs a sweep would visit
    Collections,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(collections) = cli.collections {
        config.collections = collections;
    }
    if let Some(pages) = cli.pages {
        config.pages_per_collection = pages;
    }
    if let Some(delay) = cli.settle_delay {
        config.settle_delay_ms = delay;
    }
    if cli.headed {
        config.headless = false;
    }
    if let Some(chrome) = cli.chrome {
        config.chrome_executable = Some(chrome);
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    match cli.command {
        Commands::Scrape => {
            let outcome = ScrapeCommand::new(config).execute().await?;
            println!("{}", outcome.render());
        }

        Commands::Links => {
            let output = LinksCommand::new(config).execute().await?;
            println!("{}", output);
        }

        Commands::Extract { targets } => {
            let output = ExtractCommand::new(config).execute(&targets).await?;
            println!("{}", output);
        }

        Commands::Collections => {
            for url in LinksCommand::new(config).listing_urls() {
                println!("{}", url);
            }
        }
    }

    Ok(())
}
