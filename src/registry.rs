//! Source registry and the scrape entry point.
//!
//! The registry maps each [`SourceId`] to a [`SourceFetcher`], either a live
//! page plus its [`Extractor`] or a [`MockFeed`], chosen once from
//! [`FetchMode`]. [`Scraper`] owns the registry and the shared transport and
//! is what an aggregator calls.

use crate::config::{FetchMode, ScraperConfig};
use crate::error::{ExtractError, ScrapeError};
use crate::models::{Article, SourceId};
use crate::scrapers::Extractor;
use crate::scrapers::hindustan_times::HindustanTimesExtractor;
use crate::scrapers::inshorts::InShortsExtractor;
use crate::scrapers::mock::MockFeed;
use crate::transport::{FetchAsync, HttpFetcher, RetryFetch};
use crate::utils::truncate_for_log;
use futures::stream::{self, StreamExt};
use scraper::Html;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// A live source: the page to fetch and how to read it.
pub struct LiveSource {
    extractor: Box<dyn Extractor>,
}

impl LiveSource {
    pub fn new(extractor: Box<dyn Extractor>) -> Self {
        LiveSource { extractor }
    }

    /// Fetch the page and extract its articles.
    ///
    /// A fetch that fails on every attempt yields no articles.
    pub async fn scrape<F: FetchAsync>(&self, fetcher: &RetryFetch<F>, timeout: Duration) -> Vec<Article> {
        let url = self.extractor.page_url();
        let Some(body) = fetcher.fetch_document(url, timeout).await else {
            warn!(source = %self.extractor.source(), %url, "No document; skipping source");
            return Vec::new();
        };
        debug!(bytes = body.len(), preview = %truncate_for_log(&body, 120), "Fetched document");
        let document = Html::parse_document(&body);
        self.extractor.extract(&document)
    }
}

impl fmt::Debug for LiveSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveSource")
            .field("source", &self.extractor.source())
            .field("page_url", &self.extractor.page_url())
            .finish()
    }
}

/// How one source produces its articles.
#[derive(Debug)]
pub enum SourceFetcher {
    Live(LiveSource),
    Mock(MockFeed),
}

impl SourceFetcher {
    pub fn source(&self) -> SourceId {
        match self {
            SourceFetcher::Live(live) => live.extractor.source(),
            SourceFetcher::Mock(feed) => feed.source(),
        }
    }

    pub async fn fetch<F: FetchAsync>(&self, fetcher: &RetryFetch<F>, timeout: Duration) -> Vec<Article> {
        match self {
            SourceFetcher::Live(live) => live.scrape(fetcher, timeout).await,
            SourceFetcher::Mock(feed) => feed.generate(),
        }
    }
}

/// Static mapping from source identifier to its fetch function.
#[derive(Debug)]
pub struct SourceRegistry {
    sources: BTreeMap<SourceId, SourceFetcher>,
}

impl SourceRegistry {
    pub fn new(mode: FetchMode) -> Result<Self, ExtractError> {
        let mut sources = BTreeMap::new();
        for id in SourceId::ALL {
            let fetcher = match mode {
                FetchMode::Mock => SourceFetcher::Mock(MockFeed::new(id)),
                FetchMode::Live => SourceFetcher::Live(LiveSource::new(live_extractor(id)?)),
            };
            sources.insert(id, fetcher);
        }
        Ok(SourceRegistry { sources })
    }

    /// Look up a source by its wire name. Unknown names give `None`.
    pub fn resolve(&self, source_id: &str) -> Option<&SourceFetcher> {
        let id = source_id.parse::<SourceId>().ok()?;
        self.sources.get(&id)
    }

    pub fn sources(&self) -> impl Iterator<Item = SourceId> + '_ {
        self.sources.keys().copied()
    }
}

fn live_extractor(id: SourceId) -> Result<Box<dyn Extractor>, ExtractError> {
    Ok(match id {
        SourceId::InShorts => Box::new(InShortsExtractor::new()?),
        SourceId::HindustanTimes => Box::new(HindustanTimesExtractor::new()?),
    })
}

/// One bounded fetch-and-parse pass per call, over a shared transport.
#[derive(Debug)]
pub struct Scraper<F = HttpFetcher> {
    fetcher: RetryFetch<F>,
    registry: SourceRegistry,
    timeout: Duration,
}

impl Scraper<HttpFetcher> {
    pub fn from_config(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        let http = HttpFetcher::new(config.status_retry())?;
        let fetcher = RetryFetch::new(http, config.max_attempts, config.base_delay());
        let registry = SourceRegistry::new(config.mode)?;
        Ok(Scraper::new(fetcher, registry, config.timeout()))
    }
}

impl<F: FetchAsync> Scraper<F> {
    pub fn new(fetcher: RetryFetch<F>, registry: SourceRegistry, timeout: Duration) -> Self {
        Scraper {
            fetcher,
            registry,
            timeout,
        }
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Scrape one source by wire name.
    ///
    /// # Errors
    ///
    /// The only error returned is [`ScrapeError::UnknownSource`], meaning
    /// `source_id` names no registered source (a caller mistake, not a
    /// network problem). A fetch that fails after all retries, or a page
    /// that yields nothing, is `Ok` with an empty `Vec`; bad containers are
    /// skipped, so a partial page is `Ok` with fewer articles.
    #[instrument(level = "info", skip(self))]
    pub async fn scrape(&self, source_id: &str) -> Result<Vec<Article>, ScrapeError> {
        let Some(source) = self.registry.resolve(source_id) else {
            warn!("Unknown source");
            return Err(ScrapeError::UnknownSource(source_id.to_string()));
        };

        info!(name = source.source().display_name(), "Starting scrape");
        let articles = source.fetch(&self.fetcher, self.timeout).await;
        info!(count = articles.len(), "Scraped articles");
        Ok(articles)
    }

    /// Scrape every registered source, one after another.
    pub async fn scrape_all(&self) -> Vec<(SourceId, Vec<Article>)> {
        stream::iter(self.registry.sources.values())
            .then(|source| async move {
                let articles = source.fetch(&self.fetcher, self.timeout).await;
                info!(source = %source.source(), count = articles.len(), "Scraped articles");
                (source.source(), articles)
            })
            .collect()
            .await
    }
}
