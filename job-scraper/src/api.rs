use crate::types::Result;
use async_trait::async_trait;

/// A rendered document that job posting cards can be selected from
#[async_trait(?Send)]
pub trait Page {
    type Card: Card;

    /// All elements matching `selector`, in document order
    async fn find_cards(&self, selector: &str) -> Result<Vec<Self::Card>>;
}

/// A single job posting card
#[async_trait(?Send)]
pub trait Card {
    /// Visible text of the first descendant matching `selector`,
    /// `None` when nothing matches
    async fn find_text(&self, selector: &str) -> Result<Option<String>>;
}
