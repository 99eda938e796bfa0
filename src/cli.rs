//! Command-line interface for the scraper driver.
//!
//! All options can also come from a YAML config file (`--config`); flags
//! given here take precedence over the file.

use clap::Parser;
use news_scrapers::FetchMode;

/// Command-line arguments for the scraper driver.
///
/// # Examples
///
/// ```sh
/// # Scrape every source from the mock feeds and print JSON
/// news_scrapers
///
/// # Scrape one live source and write it under ./json
/// news_scrapers -s hindustan_times --mode live -j ./json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Source to scrape; repeat for several. Defaults to every registered source
    #[arg(short, long = "source")]
    pub sources: Vec<String>,

    /// Where articles come from (overrides the config file)
    #[arg(long, value_enum, env = "NEWS_SCRAPERS_MODE")]
    pub mode: Option<FetchMode>,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output directory for JSON batches; prints to stdout when omitted
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// Per-request timeout in seconds (overrides the config file)
    #[arg(long)]
    pub timeout: Option<u64>,
}
