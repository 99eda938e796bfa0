//! Hindustan Times article extractor.
//!
//! Reads the story blocks on the
//! [latest news](https://www.hindustantimes.com/latest-news) page. Only the
//! headline and a link element are required: a story without a teaser uses
//! its headline as the summary, and a link without `href` gives an empty URL.

use super::{DATE_SELECTOR, Extractor, find, published_at, resolve_href, selector, text_of};
use crate::error::ExtractError;
use crate::models::{Article, SourceId};
use scraper::{ElementRef, Selector};

pub const PAGE_URL: &str = "https://www.hindustantimes.com/latest-news";

#[derive(Debug)]
pub struct HindustanTimesExtractor {
    stories: Selector,
    headline: Selector,
    teaser: Selector,
    link: Selector,
    date: Selector,
}

impl HindustanTimesExtractor {
    pub fn new() -> Result<Self, ExtractError> {
        Ok(HindustanTimesExtractor {
            stories: selector("div.cartHolder")?,
            headline: selector("h3.hdg3")?,
            teaser: selector("p.anch")?,
            link: selector("a")?,
            date: selector(DATE_SELECTOR)?,
        })
    }
}

impl Extractor for HindustanTimesExtractor {
    fn source(&self) -> SourceId {
        SourceId::HindustanTimes
    }

    fn page_url(&self) -> &str {
        PAGE_URL
    }

    fn container_selector(&self) -> &Selector {
        &self.stories
    }

    fn extract_one(&self, story: ElementRef<'_>) -> Result<Option<Article>, ExtractError> {
        let (Some(title), Some(link)) = (find(story, &self.headline), find(story, &self.link))
        else {
            return Ok(None);
        };

        let title = text_of(title);
        let summary = find(story, &self.teaser)
            .map(text_of)
            .filter(|teaser| !teaser.is_empty())
            .unwrap_or_else(|| title.clone());
        let url = resolve_href(PAGE_URL, link.value().attr("href"))?;

        Ok(Article::new(
            &title,
            &summary,
            &url,
            self.source(),
            published_at(story, &self.date),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const FIXTURE: &str = r#"
        <html><body>
          <div class="cartHolder">
            <h3 class="hdg3"><a href="/india-news/budget-session-101.html">Budget session begins</a></h3>
            <p class="anch">Parliament convenes for a three-week sitting.</p>
            <span class="dateTime">06/05/2025</span>
          </div>
          <div class="cartHolder">
            <h3 class="hdg3"><a href="/cities/delhi-rain-102.html">Heavy rain lashes Delhi</a></h3>
          </div>
          <div class="cartHolder">
            <p class="anch">Teaser without headline.</p>
            <a href="/orphan">orphan</a>
          </div>
          <div class="cartHolder">
            <h3 class="hdg3">Link without target</h3>
            <a>more</a>
          </div>
        </body></html>
    "#;

    fn extract(html: &str) -> Vec<Article> {
        HindustanTimesExtractor::new()
            .unwrap()
            .extract(&Html::parse_document(html))
    }

    #[test]
    fn test_extracts_stories() {
        let articles = extract(FIXTURE);
        assert_eq!(articles.len(), 3);

        assert_eq!(articles[0].title, "Budget session begins");
        assert_eq!(articles[0].summary, "Parliament convenes for a three-week sitting.");
        assert_eq!(
            articles[0].url,
            "https://www.hindustantimes.com/india-news/budget-session-101.html"
        );
        assert_eq!(articles[0].published_at.to_rfc3339(), "2025-05-06T00:00:00+00:00");
        assert!(articles.iter().all(|a| a.source == SourceId::HindustanTimes));
    }

    #[test]
    fn test_missing_teaser_falls_back_to_title() {
        let articles = extract(FIXTURE);
        assert_eq!(articles[1].title, "Heavy rain lashes Delhi");
        assert_eq!(articles[1].summary, articles[1].title);
    }

    #[test]
    fn test_blank_teaser_falls_back_to_title() {
        let html = r#"<div class="cartHolder">
            <h3 class="hdg3"><a href="/a.html">Election dates announced</a></h3>
            <p class="anch">   </p>
        </div>"#;
        let articles = extract(html);
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].summary, "Election dates announced");
    }

    #[test]
    fn test_missing_href_keeps_record_with_empty_url() {
        let articles = extract(FIXTURE);
        assert_eq!(articles[2].title, "Link without target");
        assert_eq!(articles[2].url, "");
    }

    #[test]
    fn test_missing_link_drops_story() {
        let html = r#"<div class="cartHolder"><h3 class="hdg3">No link at all</h3></div>"#;
        assert!(extract(html).is_empty());
    }
}
