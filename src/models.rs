//! Data models for scraped news articles.
//!
//! This module defines the records handed to the aggregator:
//! - [`SourceId`]: Identifier of a news provider
//! - [`Article`]: One extracted article
//! - [`ScrapeBatch`]: All articles produced by one pass over one source
//!
//! Records are created fresh on every scrape and never mutated afterwards.

use crate::error::UnknownSourceError;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A news provider known to the registry.
///
/// The serialized form is the stable wire name used by the aggregator
/// (`"inshorts"`, `"hindustan_times"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SourceId {
    #[serde(rename = "inshorts")]
    InShorts,
    #[serde(rename = "hindustan_times")]
    HindustanTimes,
}

impl SourceId {
    /// Every registered source, in dispatch order.
    pub const ALL: [SourceId; 2] = [SourceId::InShorts, SourceId::HindustanTimes];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceId::InShorts => "inshorts",
            SourceId::HindustanTimes => "hindustan_times",
        }
    }

    /// Human-readable name for log lines.
    pub fn display_name(&self) -> &'static str {
        match self {
            SourceId::InShorts => "InShorts",
            SourceId::HindustanTimes => "Hindustan Times",
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceId {
    type Err = UnknownSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SourceId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownSourceError(s.to_string()))
    }
}

/// A single news article as extracted from a source.
///
/// # Fields
///
/// * `title` - Headline; never empty
/// * `summary` - Short description; any fallback is chosen by the extractor
/// * `url` - Link to the full story; may be empty
/// * `source` - Originating feed
/// * `published_at` - Publication time, possibly approximate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub summary: String,
    pub url: String,
    pub source: SourceId,
    pub published_at: DateTime<Utc>,
}

impl Article {
    /// Build an article, trimming text fields.
    ///
    /// Returns `None` when the title is blank. The summary is stored as given.
    pub fn new(
        title: &str,
        summary: &str,
        url: &str,
        source: SourceId,
        published_at: DateTime<Utc>,
    ) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        Some(Article {
            title: title.to_string(),
            summary: summary.trim().to_string(),
            url: url.trim().to_string(),
            source,
            published_at,
        })
    }
}

/// The articles collected from one source in one pass.
///
/// This is the envelope the driver serializes to disk; the core itself
/// only returns `Vec<Article>`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ScrapeBatch {
    pub source: SourceId,
    /// The date of the pass in `YYYY-MM-DD` format.
    pub local_date: String,
    /// The local time of the pass.
    pub local_time: String,
    pub articles: Vec<Article>,
}

impl ScrapeBatch {
    pub fn new(source: SourceId, articles: Vec<Article>) -> Self {
        let now = Local::now();
        ScrapeBatch {
            source,
            local_date: now.date_naive().to_string(),
            local_time: now.time().to_string(),
            articles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_id_round_trips_through_str() {
        for id in SourceId::ALL {
            assert_eq!(id.as_str().parse::<SourceId>(), Ok(id));
        }
        assert_eq!(
            "bbc".parse::<SourceId>(),
            Err(UnknownSourceError("bbc".to_string()))
        );
    }

    #[test]
    fn test_article_rejects_blank_title() {
        assert!(Article::new("   ", "summary", "", SourceId::InShorts, Utc::now()).is_none());
    }

    #[test]
    fn test_article_keeps_summary_as_given() {
        let article = Article::new(
            " Markets rally ",
            "  ",
            "https://example.com/a",
            SourceId::HindustanTimes,
            Utc::now(),
        )
        .unwrap();
        assert_eq!(article.title, "Markets rally");
        assert_eq!(article.summary, "");
    }

    #[test]
    fn test_article_serializes_to_record_shape() {
        let published_at = DateTime::parse_from_rfc3339("2025-05-06T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let article = Article::new("Title", "Summary", "/a", SourceId::HindustanTimes, published_at)
            .unwrap();

        let value = serde_json::to_value(&article).unwrap();
        assert_eq!(value["source"], "hindustan_times");
        assert_eq!(value["published_at"], "2025-05-06T10:00:00Z");
        assert_eq!(value["url"], "/a");
        assert_eq!(value.as_object().unwrap().len(), 5);
    }

    #[test]
    fn test_batch_serialization() {
        let batch = ScrapeBatch {
            source: SourceId::InShorts,
            local_date: "2025-05-06".to_string(),
            local_time: "20:30:00".to_string(),
            articles: vec![],
        };

        let json = serde_json::to_string(&batch).unwrap();
        assert!(json.contains("2025-05-06"));
        assert!(json.contains("\"inshorts\""));
    }
}
