use crate::config::Config;
use job_scraper::Extractor;
use persistence::Storage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Scraping failed: {0}")]
    Scraper(#[from] job_scraper::Error),
    #[error("Storage error: {0}")]
    Storage(#[from] persistence::Error),
}

/// Read the input, scrape the first start url and push all postings at once.
/// Returns the number of pushed postings.
pub async fn scrape(config: &Config, storage: &Storage) -> Result<usize, Error> {
    let input = storage.get_input().await?.unwrap_or_default();
    let url = match input.first_url() {
        Some(url) => url,
        None => {
            log::info!("No start URLs specified in actor input, exiting...");
            return Ok(0);
        }
    };
    let extractor = Extractor::default();
    let postings = job_scraper::scrape_url(&config.browser, url, &extractor).await?;
    log::info!("scraped {} job postings from {}", postings.len(), url);
    storage.push_data(&postings).await?;
    Ok(postings.len())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::StorageConfig;
    use std::path::Path;

    fn local_config(dir: &Path) -> Config {
        let mut config = Config::from_lookup(|_| None).unwrap();
        config.storage = StorageConfig::Local {
            dir: dir.to_path_buf(),
        };
        // nothing listens here, any attempt to start a browser fails fast
        config.browser.webdriver_url = "http://127.0.0.1:9".to_owned();
        config
    }

    fn write_input(dir: &Path, input: &str) {
        let path = dir.join("key_value_stores/default/INPUT.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, input).unwrap();
    }

    #[tokio::test]
    async fn test_missing_input_exits_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let config = local_config(dir.path());
        let pushed = scrape(&config, &config.storage()).await.unwrap();
        assert_eq!(pushed, 0);
        assert!(!dir.path().join("datasets").exists());
    }

    #[tokio::test]
    async fn test_empty_start_urls_exits_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        write_input(dir.path(), r#"{"start_urls": []}"#);
        let config = local_config(dir.path());
        let pushed = scrape(&config, &config.storage()).await.unwrap();
        assert_eq!(pushed, 0);
        assert!(!dir.path().join("datasets").exists());
    }

    #[tokio::test]
    async fn test_driver_failure_pushes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        write_input(dir.path(), r#"{"start_urls": [{"url": "https://jobs.example"}]}"#);
        let config = local_config(dir.path());
        let err = scrape(&config, &config.storage()).await.unwrap_err();
        assert!(matches!(err, Error::Scraper(_)));
        assert!(!dir.path().join("datasets").exists());
    }
}
