use crate::api::{Card, Page};
use crate::types::{Error, FieldName, JobPosting, Result};

pub const CARD_SELECTOR: &str = r#"[data-testid="slider_container"]"#;

/// How a single field is looked up inside a card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelector {
    pub field: FieldName,
    pub selector: String,
    pub required: bool,
}

impl FieldSelector {
    pub fn required(field: FieldName, selector: &str) -> Self {
        Self {
            field,
            selector: selector.to_owned(),
            required: true,
        }
    }

    pub fn optional(field: FieldName, selector: &str) -> Self {
        Self {
            field,
            selector: selector.to_owned(),
            required: false,
        }
    }
}

pub fn default_field_selectors() -> Vec<FieldSelector> {
    vec![
        FieldSelector::required(FieldName::Title, r#"[id^="jobTitle"]"#),
        FieldSelector::optional(FieldName::Company, r#"[data-testid="company-name"]"#),
        FieldSelector::optional(FieldName::Location, r#"[data-testid="text-location"]"#),
        FieldSelector::optional(
            FieldName::SalaryRange,
            r#"[data-testid="attribute_snippet_testid"]"#,
        ),
        FieldSelector::optional(FieldName::Description, r#"[data-testid="jobsnippet_footer"]"#),
    ]
}

#[derive(Debug, Clone)]
pub struct Extractor {
    card_selector: String,
    fields: Vec<FieldSelector>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self {
            card_selector: CARD_SELECTOR.to_owned(),
            fields: default_field_selectors(),
        }
    }
}

impl Extractor {
    /// Fails when `fields` has no title entry, a posting cannot exist without one
    pub fn new(card_selector: &str, fields: Vec<FieldSelector>) -> Result<Self> {
        if !fields.iter().any(|f| f.field == FieldName::Title) {
            return Err(Error::MissingFieldSelector(FieldName::Title));
        }
        Ok(Self {
            card_selector: card_selector.to_owned(),
            fields,
        })
    }

    /// Extract one posting per card, in document order
    pub async fn extract<P: Page>(&self, page: &P) -> Result<Vec<JobPosting>> {
        let cards = page.find_cards(&self.card_selector).await?;
        log::info!(
            "found {} job posting cards for selector: {}",
            cards.len(),
            self.card_selector
        );
        let mut postings = Vec::with_capacity(cards.len());
        for (index, card) in cards.iter().enumerate() {
            let posting = self.extract_card(card, index).await?;
            log::debug!("card #{}: {:?}", index, posting);
            postings.push(posting);
        }
        Ok(postings)
    }

    async fn extract_card<C: Card>(&self, card: &C, index: usize) -> Result<JobPosting> {
        let mut title = None;
        let mut company = None;
        let mut location = None;
        let mut salary_range = None;
        let mut description = None;
        for field in &self.fields {
            let value = lookup(card, field, index).await?;
            match field.field {
                FieldName::Title => title = value,
                FieldName::Company => company = value,
                FieldName::Location => location = value,
                FieldName::SalaryRange => salary_range = value,
                FieldName::Description => description = value,
            }
        }
        let title = title.ok_or(Error::MissingRequiredField {
            field: FieldName::Title,
            index,
        })?;
        Ok(JobPosting::new(
            title,
            company,
            location,
            salary_range,
            description,
        ))
    }
}

/// Look up a single field, failing only when a required field is missing
async fn lookup<C: Card>(card: &C, field: &FieldSelector, index: usize) -> Result<Option<String>> {
    match card.find_text(&field.selector).await? {
        Some(text) => Ok(Some(text)),
        None if field.required => Err(Error::MissingRequiredField {
            field: field.field,
            index,
        }),
        None => {
            log::debug!("card #{}: no match for optional field {}", index, field.field);
            Ok(None)
        }
    }
}
