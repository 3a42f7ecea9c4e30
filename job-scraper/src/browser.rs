use crate::api::{Card, Page};
use crate::extractor::Extractor;
use crate::proxy::{ProxyAuthExtension, ProxyConfig};
use crate::types::{JobPosting, Result};
use async_trait::async_trait;
use std::path::Path;
use thirtyfour::prelude::*;

pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.0.0 Safari/537.36";

#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub webdriver_url: String,
    pub headless: bool,
    pub window_size: (u32, u32),
    pub user_agent: String,
    pub proxy: Option<ProxyConfig>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_owned(),
            headless: true,
            window_size: (1920, 1080),
            user_agent: USER_AGENT.to_owned(),
            proxy: None,
        }
    }
}

impl BrowserConfig {
    /// Chrome command line arguments, `extension` being the unpacked proxy auth extension
    pub fn chrome_args(&self, extension: Option<&Path>) -> Vec<String> {
        let mut args = Vec::with_capacity(7);
        if self.headless {
            // the legacy headless mode does not load extensions
            args.push("--headless=new".to_owned());
        }
        args.push(format!(
            "--window-size={},{}",
            self.window_size.0, self.window_size.1
        ));
        args.push("--no-sandbox".to_owned());
        args.push("--disable-dev-shm-usage".to_owned());
        args.push(format!("--user-agent={}", self.user_agent));
        if let Some(proxy) = &self.proxy {
            args.push(format!("--proxy-server={}", proxy.server_arg()));
            if let Some(extension) = extension {
                args.push(format!("--load-extension={}", extension.display()));
            }
        }
        args
    }
}

/// A Chrome session driven over WebDriver
pub struct BrowserSession {
    driver: WebDriver,
    // kept alive until the browser is gone
    _proxy_extension: Option<ProxyAuthExtension>,
}

impl BrowserSession {
    pub async fn start(config: &BrowserConfig) -> Result<Self> {
        let proxy_extension = match &config.proxy {
            Some(proxy) => Some(ProxyAuthExtension::write(proxy).await?),
            None => None,
        };
        let mut caps = DesiredCapabilities::chrome();
        for arg in config.chrome_args(proxy_extension.as_ref().map(ProxyAuthExtension::path)) {
            caps.add_chrome_arg(&arg)?;
        }
        log::info!(
            "starting chrome session via {}, proxy: {}",
            config.webdriver_url,
            config
                .proxy
                .as_ref()
                .map(|p| p.server_arg())
                .unwrap_or_else(|| "none".to_owned())
        );
        let driver = WebDriver::new(&config.webdriver_url, caps).await?;
        Ok(Self {
            driver,
            _proxy_extension: proxy_extension,
        })
    }
}

/// What the scrape bracket needs from a browser session
#[async_trait(?Send)]
pub trait Session: Sized {
    type Page: Page;

    async fn goto(&self, url: &str) -> Result<()>;

    fn page(&self) -> &Self::Page;

    async fn close(self) -> Result<()>;
}

#[async_trait(?Send)]
impl Session for BrowserSession {
    type Page = WebDriver;

    async fn goto(&self, url: &str) -> Result<()> {
        log::info!("navigating to {}", url);
        self.driver.goto(url).await?;
        Ok(())
    }

    fn page(&self) -> &WebDriver {
        &self.driver
    }

    async fn close(self) -> Result<()> {
        log::debug!("closing chrome session");
        self.driver.quit().await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl Page for WebDriver {
    type Card = WebElement;

    async fn find_cards(&self, selector: &str) -> Result<Vec<WebElement>> {
        Ok(self.find_all(By::Css(selector)).await?)
    }
}

#[async_trait(?Send)]
impl Card for WebElement {
    async fn find_text(&self, selector: &str) -> Result<Option<String>> {
        // find_all instead of find: an empty result is the normal "absent" case
        let first = self.find_all(By::Css(selector)).await?.into_iter().next();
        match first {
            Some(el) => Ok(Some(el.text().await?)),
            None => Ok(None),
        }
    }
}

/// Start a session, scrape `url` and close the session again.
pub async fn scrape_url(
    config: &BrowserConfig,
    url: &str,
    extractor: &Extractor,
) -> Result<Vec<JobPosting>> {
    let session = BrowserSession::start(config).await?;
    scrape_with(session, url, extractor).await
}

/// Navigate and extract, then close `session` whether or not that succeeded.
/// A navigation or extraction error takes precedence over a close error.
pub async fn scrape_with<S: Session>(
    session: S,
    url: &str,
    extractor: &Extractor,
) -> Result<Vec<JobPosting>> {
    let result = scrape_session(&session, url, extractor).await;
    let closed = session.close().await;
    if let Err(e) = &closed {
        log::error!("failed to close browser session: {}", e);
    }
    let postings = result?;
    closed?;
    Ok(postings)
}

async fn scrape_session<S: Session>(
    session: &S,
    url: &str,
    extractor: &Extractor,
) -> Result<Vec<JobPosting>> {
    session.goto(url).await?;
    extractor.extract(session.page()).await
}
