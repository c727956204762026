use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use thiserror::Error;
use url::Url;
use webdriver::capabilities::Capabilities;

use crate::page::BrowserPage;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("invalid WebDriver endpoint {url}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("failed to connect to WebDriver at {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: fantoccini::error::NewSessionError,
    },

    #[error("browser session error: {0}")]
    Session(#[from] fantoccini::error::CmdError),
}

#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub webdriver_url: String,
    pub headless: bool,
    pub user_agent: String,
}

/// One WebDriver session, shared by the whole run.
pub struct Browser {
    client: Client,
}

impl Browser {
    /// Connect to a running WebDriver service (e.g. chromedriver) with the
    /// configured chrome options.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError`] if the endpoint is not a valid URL or the
    /// session cannot be established. This is a fatal setup error: without a
    /// browser nothing can be scraped.
    pub async fn connect(config: &BrowserConfig) -> Result<Browser, BrowserError> {
        Url::parse(&config.webdriver_url).map_err(|e| BrowserError::InvalidEndpoint {
            url: config.webdriver_url.clone(),
            reason: e.to_string(),
        })?;

        let mut args = vec![
            "--disable-blink-features=AutomationControlled".to_string(),
            format!("--user-agent={}", config.user_agent),
        ];
        if config.headless {
            args.push("--headless=new".to_string());
            args.push("--disable-gpu".to_string());
        }

        let mut caps = Capabilities::new();
        caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));

        tracing::debug!(endpoint = %config.webdriver_url, headless = config.headless, "connecting to WebDriver");

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(&config.webdriver_url)
            .await
            .map_err(|source| BrowserError::Connect {
                url: config.webdriver_url.clone(),
                source,
            })?;

        Ok(Browser { client })
    }

    /// Page handle for the session's single tab.
    #[must_use]
    pub fn page(&self) -> BrowserPage {
        BrowserPage::new(self.client.clone())
    }

    /// Close the underlying browser session.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::Session`] if the session refuses to close;
    /// callers typically log and move on.
    pub async fn close(self) -> Result<(), BrowserError> {
        self.client.close().await?;
        Ok(())
    }
}
