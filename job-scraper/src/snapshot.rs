//! Static HTML backend for [`Page`] and [`Card`], so the extractor can be
//! exercised without a browser.

use crate::api::{Card, Page};
use crate::types::{Error, Result};
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};

pub struct Snapshot {
    document: Html,
}

impl Snapshot {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    pub fn page(&self) -> SnapshotPage<'_> {
        SnapshotPage(&self.document)
    }
}

#[derive(Clone, Copy)]
pub struct SnapshotPage<'a>(&'a Html);

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|_| Error::InvalidSelector(selector.to_owned()))
}

/// Text content with whitespace runs collapsed, close to what a browser renders
fn visible_text(el: ElementRef) -> String {
    el.text()
        .flat_map(|t| t.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait(?Send)]
impl<'a> Page for SnapshotPage<'a> {
    type Card = ElementRef<'a>;

    async fn find_cards(&self, selector: &str) -> Result<Vec<ElementRef<'a>>> {
        let selector = parse_selector(selector)?;
        Ok(self.0.select(&selector).collect())
    }
}

#[async_trait(?Send)]
impl<'a> Card for ElementRef<'a> {
    async fn find_text(&self, selector: &str) -> Result<Option<String>> {
        let selector = parse_selector(selector)?;
        Ok(self.select(&selector).next().map(visible_text))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn test_visible_text_collapses_whitespace() {
        let snapshot = Snapshot::parse(
            "<div class=\"card\"><p class=\"desc\">\n   Build\n  <b>great</b>   things \n</p></div>",
        );
        let page = snapshot.page();
        let cards = page.find_cards(".card").await.unwrap();
        assert_eq!(cards.len(), 1);
        let text = cards[0].find_text(".desc").await.unwrap();
        assert_eq!(text.as_deref(), Some("Build great things"));
    }

    #[tokio::test]
    async fn test_first_match_wins() {
        let snapshot = Snapshot::parse(
            "<div class=\"card\"><span class=\"tag\">first</span><span class=\"tag\">second</span></div>",
        );
        let page = snapshot.page();
        let cards = page.find_cards(".card").await.unwrap();
        let text = cards[0].find_text(".tag").await.unwrap();
        assert_eq!(text.as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn test_lookup_is_scoped_to_card() {
        let snapshot = Snapshot::parse(
            "<div class=\"card\"><span>a</span></div><div class=\"card\"></div><em class=\"x\">outside</em>",
        );
        let page = snapshot.page();
        let cards = page.find_cards(".card").await.unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1].find_text(".x").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_invalid_selector() {
        let snapshot = Snapshot::parse("<div></div>");
        let err = snapshot.page().find_cards("div[").await.unwrap_err();
        match err {
            Error::InvalidSelector(selector) => assert_eq!(selector, "div["),
            other => panic!("unexpected error: {}", other),
        }
    }
}
