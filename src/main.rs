use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing::info;
use url::Url;

use shelfwatch::alerts::AlertRegistry;
use shelfwatch::config::AppConfig;
use shelfwatch::extractor::PriceExtractor;
use shelfwatch::history::PriceLedger;
use shelfwatch::models::{PriceAlert, PriceObservation};
use shelfwatch::scraper::BrowserSession;
use shelfwatch::sentiment::{self, SentimentStrategy};
use shelfwatch::storage::JsonStore;
use shelfwatch::tracker::ProductTracker;

#[derive(Parser)]
#[command(name = "shelfwatch", about = "Product price tracking and review sentiment analysis")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scrape a product page once and record the current price
    Track {
        /// Product page URL
        url: String,
    },
    /// Show the change between the two most recent recorded prices
    Delta,
    /// Register a price-threshold alert
    Alert {
        /// Target price that should trigger the alert
        target: Decimal,
        /// Contact address for the alert
        email: String,
    },
    /// Aggregate sentiment over a batch of review texts
    Analyze {
        /// JSON file holding an array of review strings
        reviews: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("shelfwatch=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env().context("failed to load configuration")?;

    let ledger = PriceLedger::new(Box::new(JsonStore::<PriceObservation>::new(
        &config.storage.history_path,
    )));

    match cli.command {
        Command::Track { url } => {
            Url::parse(&url).with_context(|| format!("invalid URL: {}", url))?;

            let session = BrowserSession::launch(&config.scraper)?;
            let extractor = PriceExtractor::with_timeout(std::time::Duration::from_millis(
                config.scraper.locator_timeout_ms,
            ));
            let tracker = ProductTracker::new(extractor, ledger);

            match tracker.track_once(&session, &url)? {
                Some(observation) => {
                    println!("Price tracked at {}: {}", observation.timestamp, observation.price)
                }
                None => println!("No price available"),
            }
        }
        Command::Delta => match ledger.delta()? {
            Some(delta) => println!("{}", serde_json::to_string_pretty(&delta)?),
            None => println!("Not enough price history to compute a change"),
        },
        Command::Alert { target, email } => {
            let registry = AlertRegistry::new(Box::new(JsonStore::<PriceAlert>::new(
                &config.storage.alerts_path,
            )));
            let alert = registry.register(target, &email)?;
            println!("Alert registered for {} at {}", alert.email, alert.target_price);
        }
        Command::Analyze { reviews } => {
            let raw = std::fs::read_to_string(&reviews)
                .with_context(|| format!("failed to read {}", reviews.display()))?;
            let texts: Vec<String> =
                serde_json::from_str(&raw).context("reviews file must be a JSON array of strings")?;

            info!(count = texts.len(), "aggregating review batch");
            let reports = sentiment::aggregate(&texts, &SentimentStrategy::all());
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }

    Ok(())
}
