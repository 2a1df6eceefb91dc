//! Leadsift main entry point
//!
//! Command-line interface for the leadsift contact crawler: run the HTTP
//! service or execute a one-shot crawl.

use clap::{Parser, Subcommand};
use leadsift::config::load_config_with_hash;
use leadsift::crawler::Crawler;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Leadsift: a bounded-depth contact crawler
///
/// Leadsift walks a site from a seed URL, collects contact information
/// (emails, phone numbers, social-profile links) into one deduplicated
/// record, and exports records as delimited text.
#[derive(Parser, Debug)]
#[command(name = "leadsift")]
#[command(version)]
#[command(about = "A bounded-depth contact crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG", default_value = "leadsift.toml")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP service
    Serve,

    /// Run a one-shot crawl and print the aggregate record as JSON
    Crawl {
        /// Seed URL to start crawling from
        #[arg(long)]
        url: String,

        /// Maximum link-hop depth (the seed is depth 0)
        #[arg(long, default_value_t = 1)]
        depth: u32,

        /// Also write the record as a comma-delimited file at this path
        #[arg(long, value_name = "PATH")]
        csv: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    match cli.command {
        Commands::Serve => {
            leadsift::server::serve(config).await?;
        }
        Commands::Crawl { url, depth, csv } => {
            let crawler = Crawler::new(config.crawler.clone(), &config.user_agent)?;
            let result = crawler.crawl(&url, depth).await?;

            if let Some(path) = csv {
                leadsift::export::write_csv(&result, &path)?;
                tracing::info!("Wrote comma-delimited export to {}", path.display());
            }

            println!("{}", serde_json::to_string_pretty(&result)?);
        }
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
            0 => EnvFilter::new("leadsift=info,warn"),
            1 => EnvFilter::new("leadsift=debug,info"),
            2 => EnvFilter::new("leadsift=trace,debug"),
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
