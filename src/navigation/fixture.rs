use crate::config::SelectorConfig;
use crate::data::{PageData, PageKind};
use crate::error::{CheckError, Result};
use crate::navigation::{Navigator, validate_url};
use crate::parsers::Extractor;
use crate::utils::sanitize_filename;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Serves saved HTML instead of driving a browser.
///
/// Pages registered in memory win; otherwise the page is read from
/// `<dir>/<sanitized url>.html` when a directory is set.
pub struct FixtureNavigator {
    pages: HashMap<String, String>,
    dir: Option<PathBuf>,
    extractor: Extractor,
}

impl FixtureNavigator {
    pub fn new(selectors: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            pages: HashMap::new(),
            dir: None,
            extractor: Extractor::new(selectors)?,
        })
    }

    /// Read pages from `dir` on demand
    pub fn from_dir(dir: impl AsRef<Path>, selectors: &SelectorConfig) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(CheckError::Config(format!(
                "fixtures directory {} does not exist",
                dir.display()
            )));
        }
        let mut navigator = Self::new(selectors)?;
        navigator.dir = Some(dir.to_path_buf());
        Ok(navigator)
    }

    /// Register the HTML served for `url`
    pub fn with_page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), html.into());
        self
    }

    /// Path a saved page for `url` is expected at
    pub fn fixture_path(dir: &Path, url: &str) -> PathBuf {
        dir.join(format!("{}.html", sanitize_filename(url)))
    }

    async fn load_source(&self, url: &str) -> Result<String> {
        if let Some(html) = self.pages.get(url) {
            return Ok(html.clone());
        }

        let Some(dir) = &self.dir else {
            return Err(CheckError::extraction(url, "no fixture registered"));
        };

        let path = Self::fixture_path(dir, url);
        ::log::trace!("Reading fixture {}", path.display());
        tokio::fs::read_to_string(&path).await.map_err(|e| {
            CheckError::extraction(url, format!("cannot read {}: {}", path.display(), e))
        })
    }
}

#[async_trait]
impl Navigator for FixtureNavigator {
    async fn navigate_and_extract(&self, url: &str, kind: PageKind) -> Result<PageData> {
        validate_url(url)?;
        let source = self.load_source(url).await?;
        self.extractor.extract(&source, url, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CheckErrorKind;

    const URL: &str = "https://example.com/brand/acme";
    const HTML: &str = r#"<html><head><title>Acme</title></head><body>
        <h1>Acme Products</h1>
        <div class="brand-image"><img src="/img/acme.jpg"></div>
    </body></html>"#;

    #[tokio::test]
    async fn test_serves_registered_page() {
        let navigator = FixtureNavigator::new(&SelectorConfig::default())
            .unwrap()
            .with_page(URL, HTML);
        let page = navigator
            .navigate_and_extract(URL, PageKind::Brand)
            .await
            .unwrap();
        assert_eq!(page.url(), URL);
        assert_eq!(page.header1(), Some("Acme Products"));
    }

    #[tokio::test]
    async fn test_unknown_page_fails_extraction() {
        let navigator = FixtureNavigator::new(&SelectorConfig::default()).unwrap();
        let err = navigator
            .navigate_and_extract(URL, PageKind::Brand)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), CheckErrorKind::ExtractionFailed);
        assert!(err.to_string().contains(URL));
    }

    #[tokio::test]
    async fn test_reads_page_from_dir() {
        let dir = std::env::temp_dir().join(format!("brand-checks-fixtures-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(FixtureNavigator::fixture_path(&dir, URL), HTML).unwrap();

        let navigator = FixtureNavigator::from_dir(&dir, &SelectorConfig::default()).unwrap();
        let page = navigator
            .navigate_and_extract(URL, PageKind::Base)
            .await
            .unwrap();
        assert_eq!(page.kind(), PageKind::Base);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_dir_is_config_error() {
        let err = FixtureNavigator::from_dir("/nonexistent/fixtures", &SelectorConfig::default())
            .err()
            .unwrap();
        assert_eq!(err.kind(), CheckErrorKind::Config);
    }
}
