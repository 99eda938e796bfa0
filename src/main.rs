//! Scraper driver.
//!
//! Runs one sequential pass over the requested sources and either prints
//! the batches as JSON or writes them under `--json-output-dir`.
//!
//! ```sh
//! news_scrapers -s inshorts -s hindustan_times --mode live -j ./json
//! ```

use clap::Parser;
use news_scrapers::config::load_config;
use news_scrapers::models::ScrapeBatch;
use news_scrapers::outputs::json;
use news_scrapers::utils::ensure_writable_dir;
use news_scrapers::{Scraper, ScraperConfig, SourceId};
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;

use cli::Cli;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_scrapers starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Configuration ----
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ScraperConfig::default(),
    };
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    info!(mode = ?config.mode, timeout_secs = config.timeout_secs, "Effective configuration");

    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(path = %dir, error = %e, "JSON output directory is not writable");
            return Err(e);
        }
    }

    let scraper = Scraper::from_config(&config)?;
    let sources: Vec<String> = if args.sources.is_empty() {
        scraper.registry().sources().map(|id| id.to_string()).collect()
    } else {
        args.sources.clone()
    };

    // ---- Scrape sequentially ----
    let mut batches = Vec::new();
    for source_id in &sources {
        let Ok(id) = source_id.parse::<SourceId>() else {
            error!(source = %source_id, "Unknown source; skipping");
            continue;
        };
        match scraper.scrape(source_id).await {
            Ok(articles) => batches.push(ScrapeBatch::new(id, articles)),
            Err(e) => error!(source = %source_id, error = %e, "Scrape failed; skipping"),
        }
    }

    // ---- Output ----
    let total: usize = batches.iter().map(|b| b.articles.len()).sum();
    match &args.json_output_dir {
        Some(dir) => {
            for batch in &batches {
                if let Err(e) = json::write_batch(batch, dir).await {
                    error!(source = %batch.source, error = %e, "Failed to write JSON batch");
                }
            }
        }
        None => println!("{}", serde_json::to_string_pretty(&batches)?),
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        sources = batches.len(),
        articles = total,
        "Execution complete"
    );

    Ok(())
}
