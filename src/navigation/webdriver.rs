use crate::config::SuiteConfig;
use crate::data::{PageData, PageKind};
use crate::error::{CheckError, Result};
use crate::navigation::{Navigator, validate_url};
use crate::parsers::Extractor;
use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder};
use std::time::Duration;
use tokio::time::timeout;

/// Common WebDriver endpoints tried when the configured one is unreachable
const FALLBACK_WEBDRIVER_URLS: [&str; 2] = [
    "http://localhost:9515", // ChromeDriver default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// Navigator backed by a live WebDriver session
pub struct WebDriverNavigator {
    client: Client,
    extractor: Extractor,
    page_load_timeout: Duration,
}

impl WebDriverNavigator {
    /// Open a WebDriver session using the suite configuration
    pub async fn connect(config: &SuiteConfig) -> Result<Self> {
        let extractor = Extractor::new(&config.selectors)?;
        let client = connect_to_webdriver(&config.webdriver_url).await?;

        Ok(Self {
            client,
            extractor,
            page_load_timeout: Duration::from_secs(config.page_load_timeout_secs),
        })
    }

    /// End the WebDriver session
    pub async fn close(self) -> Result<()> {
        self.client
            .close()
            .await
            .map_err(|e| CheckError::WebDriver(e.to_string()))
    }

    async fn load_source(&self, url: &str) -> Result<String> {
        self.client
            .goto(url)
            .await
            .map_err(|e| navigation_error(e, "accessing", url))?;

        self.client
            .source()
            .await
            .map_err(|e| navigation_error(e, "getting source for", url))
    }
}

#[async_trait]
impl Navigator for WebDriverNavigator {
    async fn navigate_and_extract(&self, url: &str, kind: PageKind) -> Result<PageData> {
        validate_url(url)?;

        let started = std::time::Instant::now();
        ::log::debug!("NAVIGATE: {} ({})", url, kind);

        let source = match timeout(self.page_load_timeout, self.load_source(url)).await {
            Ok(result) => result?,
            Err(_) => {
                ::log::error!("Timeout loading: {}", url);
                return Err(CheckError::extraction(
                    url,
                    format!(
                        "page did not load within {} seconds",
                        self.page_load_timeout.as_secs()
                    ),
                ));
            }
        };

        let page = self.extractor.extract(&source, url, kind)?;
        ::log::debug!(
            "Extracted {} in {:.2} seconds",
            url,
            started.elapsed().as_secs_f64()
        );
        Ok(page)
    }
}

/// Connects to the WebDriver instance, falling back to common local endpoints
async fn connect_to_webdriver(webdriver_url: &str) -> Result<Client> {
    match ClientBuilder::native().connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            return Ok(client);
        }
        Err(e) => {
            ::log::error!(
                "Failed to connect to WebDriver at {}: {}",
                webdriver_url,
                e
            );
        }
    }

    for url in FALLBACK_WEBDRIVER_URLS.iter() {
        if *url == webdriver_url {
            continue;
        }

        ::log::info!("Trying fallback WebDriver URL: {}", url);
        if let Ok(client) = ClientBuilder::native().connect(url).await {
            ::log::debug!("Connected to fallback WebDriver at {}", url);
            return Ok(client);
        }
    }

    ::log::error!(
        "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
    );
    Err(CheckError::WebDriver(format!(
        "failed to connect to any WebDriver server (tried {})",
        webdriver_url
    )))
}

/// Maps a WebDriver command failure to an extraction failure for `url`
fn navigation_error(error: fantoccini::error::CmdError, context: &str, url: &str) -> CheckError {
    if error.to_string().contains("Unable to find session") {
        ::log::warn!("Lost session while {} {}", context, url);
    } else {
        ::log::error!("Failed {} {}: {}", context, url, error);
    }
    CheckError::extraction(url, format!("{} page: {}", context, error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallbacks_are_local_browser_drivers() {
        for url in FALLBACK_WEBDRIVER_URLS {
            let parsed = url::Url::parse(url).unwrap();
            assert!(matches!(parsed.host_str(), Some("localhost") | Some("127.0.0.1")));
            assert!(matches!(parsed.port(), Some(4444) | Some(9515)), "{}", url);
        }
    }

    #[tokio::test]
    #[ignore] // Requires a running WebDriver server
    async fn test_navigate_and_extract_live_page() {
        let mut config = SuiteConfig::default();
        config.apply_env();

        let navigator = WebDriverNavigator::connect(&config)
            .await
            .expect("Failed to connect to WebDriver");
        let page = navigator
            .navigate_and_extract("https://example.com/", PageKind::Base)
            .await
            .expect("Failed to extract page");
        assert_eq!(page.base_data().title(), "Example Domain");

        navigator.close().await.expect("Failed to close session");
    }
}
