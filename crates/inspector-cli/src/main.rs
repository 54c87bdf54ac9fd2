mod scan;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "inspector-cli")]
#[command(about = "Scan marketplace listings for fraud and review-manipulation signals")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract, acquire reviews and score a listing; prints JSON.
    Scan {
        url: String,
        /// Send the scan to the analysis backend (`INSPECTOR_ANALYSIS_URL`).
        #[arg(long)]
        analyze: bool,
        /// Drive a headless Chromium tab instead of a static fetch.
        #[arg(long)]
        browser: bool,
    },
    /// Scroll to and expand the listing's reviews; prints `{"opened": ..}`.
    OpenReviews {
        url: String,
        #[arg(long)]
        browser: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = inspector_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scan {
            url,
            analyze,
            browser,
        } => scan::run_scan(&config, &url, analyze, browser).await,
        Commands::OpenReviews { url, browser } => {
            scan::run_open_reviews(&config, &url, browser).await
        }
    }
}
