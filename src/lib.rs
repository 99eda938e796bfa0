//! # News Scrapers
//!
//! Fetches news articles from web sources and returns them as uniform
//! [`Article`](models::Article) records for an aggregator to store.
//!
//! ## Architecture
//!
//! Each call to [`Scraper::scrape`](registry::Scraper::scrape) is one
//! bounded pass over one source:
//! 1. **Dispatch**: the source id is resolved in the [`registry`]
//! 2. **Fetching**: the page is downloaded through the [`transport`] retry layers
//! 3. **Extraction**: the source's [`Extractor`](scrapers::Extractor) reads up to 20 containers
//!
//! Failures never abort the pass; they only reduce the number of records.
//!
//! ## Usage
//!
//! ```ignore
//! let scraper = Scraper::from_config(&ScraperConfig::default())?;
//! let articles = scraper.scrape("inshorts").await?;
//! ```

pub mod config;
pub mod dates;
pub mod error;
pub mod models;
pub mod outputs;
pub mod registry;
pub mod scrapers;
pub mod transport;
pub mod utils;

pub use config::{FetchMode, ScraperConfig};
pub use error::ScrapeError;
pub use models::{Article, SourceId};
pub use registry::{Scraper, SourceRegistry};
