use serde::{Deserialize, Serialize};
use thiserror::Error;
use thirtyfour::error::WebDriverError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("WebDriver error: '{0}'")]
    WebDriver(#[from] WebDriverError),
    #[error("Invalid css selector: '{0}'")]
    InvalidSelector(String),
    #[error("Field mapping has no selector for '{0}'")]
    MissingFieldSelector(FieldName),
    #[error("Required field '{field}' not found in card #{index}")]
    MissingRequiredField { field: FieldName, index: usize },
    #[error("File error: '{0}'")]
    IoError(#[from] std::io::Error),
    #[error("Json error: '{0}'")]
    Json(#[from] serde_json::Error),
}

/// Fields of a job posting card, in the order they are extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    Title,
    Company,
    Location,
    SalaryRange,
    Description,
}

impl FieldName {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Title => "title",
            FieldName::Company => "company",
            FieldName::Location => "location",
            FieldName::SalaryRange => "salary_range",
            FieldName::Description => "description",
        }
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct JobPosting {
    pub title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    pub description: Option<String>,
}

impl JobPosting {
    pub fn new(
        title: String,
        company: Option<String>,
        location: Option<String>,
        salary_range: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            title,
            company,
            location,
            salary_range,
            description,
        }
    }
}
