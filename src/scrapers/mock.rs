//! Synthetic feeds used instead of live sites.
//!
//! A [`MockFeed`] answers the same way a live source does, with a fixed set
//! of ten articles and no network traffic. It is selected through
//! `FetchMode::Mock`.

use crate::models::{Article, SourceId};
use chrono::{Duration, Utc};
use rand::{Rng, rng};
use tracing::{info, instrument};

/// Number of articles every mock feed produces.
pub const MOCK_ARTICLE_COUNT: usize = 10;

#[derive(Debug, Clone, Copy)]
pub struct MockFeed {
    source: SourceId,
}

impl MockFeed {
    pub fn new(source: SourceId) -> Self {
        MockFeed { source }
    }

    pub fn source(&self) -> SourceId {
        self.source
    }

    /// Generate the feed's articles, numbered from 1.
    #[instrument(level = "info", skip(self), fields(source = %self.source))]
    pub fn generate(&self) -> Vec<Article> {
        let mut rng = rng();
        let articles: Vec<Article> = (1..=MOCK_ARTICLE_COUNT)
            .filter_map(|i| {
                let (title, summary, url) = self.templates(i);
                let published_at = Utc::now() - Duration::hours(rng.random_range(1..=48));
                Article::new(&title, &summary, &url, self.source, published_at)
            })
            .collect();

        info!(count = articles.len(), "Generated mock articles");
        articles
    }

    fn templates(&self, i: usize) -> (String, String, String) {
        match self.source {
            SourceId::InShorts => (
                format!("InShorts Breaking News {i}: Important Development in Technology"),
                format!(
                    "This is a mock summary for InShorts article {i}. It contains important information about recent developments in the technology sector."
                ),
                format!("https://inshorts.com/news/article-{i}"),
            ),
            SourceId::HindustanTimes => (
                format!("HT News Update {i}: Major Political Development"),
                format!(
                    "This is a mock summary for Hindustan Times article {i}. It covers significant political developments and their implications."
                ),
                format!("https://hindustantimes.com/news/article-{i}"),
            ),
        }
    }
}
