//! Bridge between scenario steps and rendered pages.
//!
//! A [`Navigator`] visits a URL and hands back a complete [`PageData`]
//! snapshot, or fails with `ExtractionFailed`. Steps only ever see this trait.

pub mod fixture;
pub mod webdriver;

use crate::data::{PageData, PageKind};
use crate::error::{CheckError, Result};
use async_trait::async_trait;
use url::Url;

pub use fixture::FixtureNavigator;
pub use webdriver::WebDriverNavigator;

#[async_trait]
pub trait Navigator: Send + Sync {
    /// Visit `url` and extract a snapshot of `kind`.
    ///
    /// Blocks the calling step until the page is extracted or the call fails.
    async fn navigate_and_extract(&self, url: &str, kind: PageKind) -> Result<PageData>;
}

/// Rejects anything that is not an absolute URL before a page is visited
pub fn validate_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url)
        .map_err(|e| CheckError::extraction(url, format!("invalid url: {}", e)))?;
    if parsed.cannot_be_a_base() {
        return Err(CheckError::extraction(url, "url is not a page address"));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CheckErrorKind;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://example.com/brand/acme").is_ok());
        assert_eq!(
            validate_url("/brand/acme").unwrap_err().kind(),
            CheckErrorKind::ExtractionFailed
        );
        assert_eq!(
            validate_url("mailto:sales@example.com").unwrap_err().kind(),
            CheckErrorKind::ExtractionFailed
        );
    }
}
