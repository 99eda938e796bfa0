//! Per-source article extraction.
//!
//! Every source implements [`Extractor`]: it names the CSS selector of its
//! article containers and turns one container into an [`Article`]. The shared
//! [`Extractor::extract`] loop applies the rules common to all sources:
//!
//! 1. Only the first [`MAX_CONTAINERS`] containers in document order are read
//! 2. A container missing a required field is skipped
//! 3. An error inside one container is logged and skipped
//!
//! # Supported Sources
//!
//! | Source | Module | Summary fallback |
//! |--------|--------|------------------|
//! | InShorts | [`inshorts`] | none, container dropped |
//! | Hindustan Times | [`hindustan_times`] | title |
//!
//! [`mock`] holds the synthetic feeds selected by `FetchMode::Mock`.

use crate::dates::parse_date;
use crate::error::ExtractError;
use crate::models::{Article, SourceId};
use chrono::{DateTime, Duration, Utc};
use rand::{Rng, rng};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, error, info};
use url::Url;

pub mod hindustan_times;
pub mod inshorts;
pub mod mock;

/// Upper bound on containers read from one document.
pub const MAX_CONTAINERS: usize = 20;

/// Source-specific extraction from a parsed page.
pub trait Extractor: Send + Sync {
    fn source(&self) -> SourceId;

    /// Page the containers are read from; relative links resolve against it.
    fn page_url(&self) -> &str;

    /// Selector matching one article container.
    fn container_selector(&self) -> &Selector;

    /// Turn one container into an article, or `Ok(None)` when a required
    /// field is missing.
    fn extract_one(&self, container: ElementRef<'_>) -> Result<Option<Article>, ExtractError>;

    /// Extract up to [`MAX_CONTAINERS`] articles from `document`.
    fn extract(&self, document: &Html) -> Vec<Article> {
        let source = self.source();
        let mut articles = Vec::new();

        for (index, container) in document
            .select(self.container_selector())
            .take(MAX_CONTAINERS)
            .enumerate()
        {
            match self.extract_one(container) {
                Ok(Some(article)) => articles.push(article),
                Ok(None) => debug!(%source, index, "Container missing required fields; skipped"),
                Err(e) => error!(%source, index, error = %e, "Error extracting article data"),
            }
        }

        info!(%source, count = articles.len(), "Extracted articles");
        articles
    }
}

/// Parse a selector literal.
///
/// Selector literals are fixed per source, so a failure here is a bug in
/// that source's module; it surfaces as an [`ExtractError`] rather than a panic.
pub(crate) fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

/// First descendant of `container` matching `css`.
pub(crate) fn find<'a>(container: ElementRef<'a>, css: &Selector) -> Option<ElementRef<'a>> {
    container.select(css).next()
}

/// Whitespace-normalized text content of an element.
pub(crate) fn text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve an `href` against the page it came from.
///
/// A missing `href` gives an empty string, which callers accept.
pub(crate) fn resolve_href(page_url: &str, href: Option<&str>) -> Result<String, ExtractError> {
    let Some(href) = href.map(str::trim).filter(|h| !h.is_empty()) else {
        return Ok(String::new());
    };
    let link_error = |reason: String| ExtractError::Link {
        href: href.to_string(),
        reason,
    };
    let base = Url::parse(page_url).map_err(|e| link_error(e.to_string()))?;
    let resolved = base.join(href).map_err(|e| link_error(e.to_string()))?;
    Ok(resolved.to_string())
}

/// Publication time of a container.
///
/// Uses the first date found in `time[datetime]`, `[itemprop=datePublished]`
/// or `span.dateTime`. A full RFC 3339 timestamp keeps its time and offset;
/// anything else has its leading date run through [`parse_date`]. Without a
/// date, the time is approximated as now minus 1 to 24 hours.
pub(crate) fn published_at(container: ElementRef<'_>, date_selector: &Selector) -> DateTime<Utc> {
    let raw = find(container, date_selector).map(|el| {
        el.value()
            .attr("datetime")
            .or_else(|| el.value().attr("content"))
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| text_of(el))
    });

    match raw {
        Some(raw) if !raw.is_empty() => match DateTime::parse_from_rfc3339(&raw) {
            Ok(dt) => dt.with_timezone(&Utc),
            Err(_) => parse_date(raw.get(..10).unwrap_or(&raw)),
        },
        _ => Utc::now() - Duration::hours(rng().random_range(1..=24)),
    }
}

/// Selector used by [`published_at`].
pub(crate) const DATE_SELECTOR: &str =
    "time[datetime], [itemprop=\"datePublished\"], span.dateTime";

#[cfg(test)]
mod tests {
    use super::*;

    struct ListExtractor {
        containers: Selector,
        title: Selector,
    }

    impl ListExtractor {
        fn new() -> Self {
            ListExtractor {
                containers: selector("li.item").unwrap(),
                title: selector("b").unwrap(),
            }
        }
    }

    impl Extractor for ListExtractor {
        fn source(&self) -> SourceId {
            SourceId::InShorts
        }

        fn page_url(&self) -> &str {
            "https://example.com/news/"
        }

        fn container_selector(&self) -> &Selector {
            &self.containers
        }

        fn extract_one(&self, container: ElementRef<'_>) -> Result<Option<Article>, ExtractError> {
            if container.value().attr("data-broken").is_some() {
                return Err(ExtractError::Link {
                    href: "::".to_string(),
                    reason: "broken".to_string(),
                });
            }
            let Some(title) = find(container, &self.title) else {
                return Ok(None);
            };
            Ok(Article::new(&text_of(title), "", "", self.source(), Utc::now()))
        }
    }

    fn list_page(items: &[&str]) -> Html {
        let body: String = items.iter().map(|i| format!("<li class=\"item\" {i}</li>")).collect();
        Html::parse_document(&format!("<html><body><ul>{body}</ul></body></html>"))
    }

    #[test]
    fn test_caps_at_first_twenty_in_document_order() {
        let items: Vec<String> = (1..=25).map(|i| format!("><b>Story {i}</b>")).collect();
        let refs: Vec<&str> = items.iter().map(String::as_str).collect();
        let articles = ListExtractor::new().extract(&list_page(&refs));

        assert_eq!(articles.len(), MAX_CONTAINERS);
        assert_eq!(articles[0].title, "Story 1");
        assert_eq!(articles[19].title, "Story 20");
    }

    #[test]
    fn test_skips_missing_fields_and_errors_without_aborting() {
        let page = list_page(&[
            "><b>First</b>",
            ">no title here",
            "data-broken=\"1\"><b>Broken</b>",
            "><b>Last</b>",
        ]);
        let titles: Vec<String> = ListExtractor::new()
            .extract(&page)
            .into_iter()
            .map(|a| a.title)
            .collect();

        assert_eq!(titles, vec!["First", "Last"]);
    }

    #[test]
    fn test_empty_document_yields_no_articles() {
        let page = Html::parse_document("<html><body></body></html>");
        assert!(ListExtractor::new().extract(&page).is_empty());
    }

    #[test]
    fn test_text_of_collapses_whitespace() {
        let page = Html::parse_fragment("<p>  Hello\n   <i>big</i>   world </p>");
        let p = page.select(&selector("p").unwrap()).next().unwrap();
        assert_eq!(text_of(p), "Hello big world");
    }

    #[test]
    fn test_resolve_href() {
        let page = "https://www.hindustantimes.com/latest-news";
        assert_eq!(
            resolve_href(page, Some("/india-news/story-1.html")).unwrap(),
            "https://www.hindustantimes.com/india-news/story-1.html"
        );
        assert_eq!(
            resolve_href(page, Some("https://other.example/x")).unwrap(),
            "https://other.example/x"
        );
        assert_eq!(resolve_href(page, None).unwrap(), "");
        assert_eq!(resolve_href(page, Some("  ")).unwrap(), "");
        assert!(resolve_href(page, Some("http://[::1")).is_err());
    }

    #[test]
    fn test_published_at_keeps_offset_across_midnight() {
        let date = selector(DATE_SELECTOR).unwrap();
        let item = selector("div").unwrap();
        let page = Html::parse_fragment(
            "<div><time datetime=\"2025-05-06T01:00:00+05:30\">6 May</time></div>",
        );
        let container = page.select(&item).next().unwrap();

        assert_eq!(published_at(container, &date).to_rfc3339(), "2025-05-05T19:30:00+00:00");
    }

    #[test]
    fn test_published_at_reads_markup_or_approximates() {
        let date = selector(DATE_SELECTOR).unwrap();
        let item = selector("div").unwrap();

        let dated = Html::parse_fragment(
            "<div><time datetime=\"2025-05-06T08:15:00+05:30\">6 May</time></div>",
        );
        let container = dated.select(&item).next().unwrap();
        assert_eq!(published_at(container, &date).to_rfc3339(), "2025-05-06T02:45:00+00:00");

        let date_only = Html::parse_fragment("<div><span class=\"dateTime\">06/05/2025 10:30 IST</span></div>");
        let container = date_only.select(&item).next().unwrap();
        assert_eq!(published_at(container, &date).to_rfc3339(), "2025-05-06T00:00:00+00:00");

        let undated = Html::parse_fragment("<div><span>no date</span></div>");
        let container = undated.select(&item).next().unwrap();
        let ts = published_at(container, &date);
        let now = Utc::now();
        assert!(ts <= now - Duration::minutes(59));
        assert!(ts >= now - Duration::hours(25));
    }
}
