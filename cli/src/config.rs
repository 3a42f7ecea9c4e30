use job_scraper::browser::DEFAULT_WEBDRIVER_URL;
use job_scraper::proxy::{DEFAULT_PROXY_HOST, DEFAULT_PROXY_PORT, DEFAULT_PROXY_USERNAME};
use job_scraper::{BrowserConfig, ProxyConfig};
use persistence::{LocalStorage, PlatformStorage, Storage, DEFAULT_API_BASE_URL};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
    #[error("APIFY_TOKEN must be set when running on the platform")]
    MissingToken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    Local {
        dir: PathBuf,
    },
    Platform {
        base_url: String,
        token: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub browser: BrowserConfig,
    pub storage: StorageConfig,
    pub store_id: String,
    pub dataset_id: String,
    pub input_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let proxy = match var("APIFY_PROXY_PASSWORD") {
            Some(password) => {
                let port = match var("APIFY_PROXY_PORT") {
                    Some(port) => port.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                        name: "APIFY_PROXY_PORT",
                        value: port,
                    })?,
                    None => DEFAULT_PROXY_PORT,
                };
                Some(ProxyConfig {
                    host: var("APIFY_PROXY_HOSTNAME").unwrap_or_else(|| DEFAULT_PROXY_HOST.to_owned()),
                    port,
                    username: DEFAULT_PROXY_USERNAME.to_owned(),
                    password,
                })
            }
            None => {
                log::warn!("APIFY_PROXY_PASSWORD not set, connecting without proxy");
                None
            }
        };
        let browser = BrowserConfig {
            webdriver_url: var("WEBDRIVER_URL").unwrap_or_else(|| DEFAULT_WEBDRIVER_URL.to_owned()),
            proxy,
            ..Default::default()
        };

        let at_home = var("APIFY_IS_AT_HOME")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let storage = if at_home {
            StorageConfig::Platform {
                base_url: var("APIFY_API_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned()),
                token: var("APIFY_TOKEN").ok_or(ConfigError::MissingToken)?,
            }
        } else {
            StorageConfig::Local {
                dir: var("APIFY_LOCAL_STORAGE_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("./storage")),
            }
        };

        Ok(Self {
            browser,
            storage,
            store_id: var("APIFY_DEFAULT_KEY_VALUE_STORE_ID")
                .unwrap_or_else(|| persistence::DEFAULT_STORE_ID.to_owned()),
            dataset_id: var("APIFY_DEFAULT_DATASET_ID")
                .unwrap_or_else(|| persistence::DEFAULT_DATASET_ID.to_owned()),
            input_key: var("APIFY_INPUT_KEY")
                .unwrap_or_else(|| persistence::DEFAULT_INPUT_KEY.to_owned()),
        })
    }

    pub fn storage(&self) -> Storage {
        let store_id = self.store_id.clone();
        let dataset_id = self.dataset_id.clone();
        let input_key = self.input_key.clone();
        match &self.storage {
            StorageConfig::Local { dir } => Storage::Local(
                LocalStorage::new(dir.clone()).with_ids(store_id, dataset_id, input_key),
            ),
            StorageConfig::Platform { base_url, token } => Storage::Platform(
                PlatformStorage::new(base_url, token.clone()).with_ids(store_id, dataset_id, input_key),
            ),
        }
    }
}
