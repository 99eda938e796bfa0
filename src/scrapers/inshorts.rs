//! InShorts article extractor.
//!
//! Reads the news cards on [InShorts](https://inshorts.com/en/read). A card
//! must carry a headline, a non-blank body and a link; cards missing any of
//! the three are dropped.

use super::{DATE_SELECTOR, Extractor, find, published_at, resolve_href, selector, text_of};
use crate::error::ExtractError;
use crate::models::{Article, SourceId};
use scraper::{ElementRef, Selector};

pub const PAGE_URL: &str = "https://inshorts.com/en/read";

#[derive(Debug)]
pub struct InShortsExtractor {
    cards: Selector,
    headline: Selector,
    body: Selector,
    link: Selector,
    date: Selector,
}

impl InShortsExtractor {
    pub fn new() -> Result<Self, ExtractError> {
        Ok(InShortsExtractor {
            cards: selector("div.news-card")?,
            headline: selector("span[itemprop=\"headline\"]")?,
            body: selector("div[itemprop=\"articleBody\"]")?,
            link: selector("a.clickable")?,
            date: selector(DATE_SELECTOR)?,
        })
    }
}

impl Extractor for InShortsExtractor {
    fn source(&self) -> SourceId {
        SourceId::InShorts
    }

    fn page_url(&self) -> &str {
        PAGE_URL
    }

    fn container_selector(&self) -> &Selector {
        &self.cards
    }

    fn extract_one(&self, card: ElementRef<'_>) -> Result<Option<Article>, ExtractError> {
        let (Some(title), Some(body), Some(link)) = (
            find(card, &self.headline),
            find(card, &self.body),
            find(card, &self.link),
        ) else {
            return Ok(None);
        };

        let summary = text_of(body);
        if summary.is_empty() {
            return Ok(None);
        }

        let url = resolve_href(PAGE_URL, link.value().attr("href"))?;
        Ok(Article::new(
            &text_of(title),
            &summary,
            &url,
            self.source(),
            published_at(card, &self.date),
        ))
    }
}
