//! Storage of the host platform: the actor input record and the output dataset.
//!
//! Locally everything lives under a storage directory
//! (`key_value_stores/<store>/<key>.json`, `datasets/<dataset>/000000001.json`, ...),
//! on the platform the same operations go through the HTTP API.

mod local;
mod platform;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use local::LocalStorage;
pub use platform::{PlatformStorage, DEFAULT_API_BASE_URL};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Request error: '{0}'")]
    Request(#[from] reqwest::Error),
    #[error("Request to '{url}' not successful, status code: {status}")]
    RequestNotOk { url: String, status: u16 },
    #[error("File error: '{0}'")]
    IoError(#[from] std::io::Error),
    #[error("Json error: '{0}'")]
    Json(#[from] serde_json::Error),
}

pub const DEFAULT_STORE_ID: &str = "default";
pub const DEFAULT_DATASET_ID: &str = "default";
pub const DEFAULT_INPUT_KEY: &str = "INPUT";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StartUrl {
    pub url: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ActorInput {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub start_urls: Vec<StartUrl>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<StartUrl>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<StartUrl>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ActorInput {
    /// Only the first start url is scraped
    pub fn first_url(&self) -> Option<&str> {
        self.start_urls.first().map(|start| start.url.as_str())
    }
}

pub enum Storage {
    Local(LocalStorage),
    Platform(PlatformStorage),
}

impl Storage {
    /// The actor input, `None` when no input record exists
    pub async fn get_input(&self) -> Result<Option<ActorInput>> {
        match self {
            Storage::Local(local) => local.get_input().await,
            Storage::Platform(platform) => platform.get_input().await,
        }
    }

    /// Push all items to the dataset as a single batch
    pub async fn push_data<T: Serialize>(&self, items: &[T]) -> Result<()> {
        if items.is_empty() {
            log::info!("no items to push to the dataset");
            return Ok(());
        }
        match self {
            Storage::Local(local) => local.push_data(items).await,
            Storage::Platform(platform) => platform.push_data(items).await,
        }?;
        log::info!("pushed {} items to the dataset", items.len());
        Ok(())
    }
}
