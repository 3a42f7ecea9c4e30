pub mod api;
pub mod browser;
pub mod extractor;
pub mod proxy;
#[cfg(test)]
mod snapshot;
pub mod types;

pub use browser::{scrape_url, scrape_with, BrowserConfig, BrowserSession, Session};
pub use extractor::{Extractor, FieldSelector};
pub use proxy::ProxyConfig;
pub use types::{Error, FieldName, JobPosting, Result};
