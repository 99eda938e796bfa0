//! Error types for the scraping core.
//!
//! None of these reach the aggregator as a batch failure except
//! [`ScrapeError::UnknownSource`]. Transport errors are retried and then
//! collapsed into "no document"; extraction errors drop a single container.

use thiserror::Error;

/// Failure of a single HTTP attempt.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("could not read body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Failure to turn one container into an article.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractError {
    #[error("invalid selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },

    #[error("malformed link {href:?}: {reason}")]
    Link { href: String, reason: String },
}

/// A source name that matches no [`crate::models::SourceId`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown source {0:?}")]
pub struct UnknownSourceError(pub String);

/// Error surfaced by [`crate::registry::Scraper`].
///
/// `scrape` itself only fails with `UnknownSource`; the other variants come
/// from building the scraper.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("no scraper registered for source {0:?}")]
    UnknownSource(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let e = FetchError::Status {
            url: "https://example.com".to_string(),
            status: 404,
        };
        assert_eq!(e.to_string(), "https://example.com answered with status 404");
    }

    #[test]
    fn test_unknown_source_message() {
        let e = ScrapeError::UnknownSource("bbc".to_string());
        assert_eq!(e.to_string(), "no scraper registered for source \"bbc\"");
    }
}
