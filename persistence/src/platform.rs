use crate::{ActorInput, Error, Result, DEFAULT_DATASET_ID, DEFAULT_INPUT_KEY, DEFAULT_STORE_ID};
use reqwest::{Client, StatusCode};
use serde::Serialize;

pub const DEFAULT_API_BASE_URL: &str = "https://api.apify.com";

/// Key-value store and dataset access through the platform HTTP API
#[derive(Debug, Clone)]
pub struct PlatformStorage {
    client: Client,
    base_url: String,
    token: String,
    store_id: String,
    dataset_id: String,
    input_key: String,
}

impl PlatformStorage {
    pub fn new(base_url: &str, token: String) -> Self {
        Self::with_client(base_url, token, Client::new())
    }

    pub fn with_client(base_url: &str, token: String, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            token,
            store_id: DEFAULT_STORE_ID.to_owned(),
            dataset_id: DEFAULT_DATASET_ID.to_owned(),
            input_key: DEFAULT_INPUT_KEY.to_owned(),
        }
    }

    pub fn with_ids(mut self, store_id: String, dataset_id: String, input_key: String) -> Self {
        self.store_id = store_id;
        self.dataset_id = dataset_id;
        self.input_key = input_key;
        self
    }

    fn input_url(&self) -> String {
        format!(
            "{}/v2/key-value-stores/{}/records/{}",
            self.base_url, self.store_id, self.input_key
        )
    }

    fn dataset_items_url(&self) -> String {
        format!("{}/v2/datasets/{}/items", self.base_url, self.dataset_id)
    }

    pub(crate) async fn get_input(&self) -> Result<Option<ActorInput>> {
        let url = self.input_url();
        log::debug!("GET {}", url);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            log::debug!("no input record at {}", url);
            return Ok(None);
        }
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            log::error!(
                "Request not successful, status code: {}, body: {}",
                status,
                resp.text().await.unwrap_or_else(|_| "empty".to_owned())
            );
            return Err(Error::RequestNotOk { url, status });
        }
        Ok(Some(resp.json().await?))
    }

    pub(crate) async fn push_data<T: Serialize>(&self, items: &[T]) -> Result<()> {
        let url = self.dataset_items_url();
        log::debug!("POST {} ({} items)", url, items.len());
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(items)
            .send()
            .await?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            log::error!(
                "Request not successful, status code: {}, body: {}",
                status,
                resp.text().await.unwrap_or_else(|_| "empty".to_owned())
            );
            return Err(Error::RequestNotOk { url, status });
        }
        Ok(())
    }
}
