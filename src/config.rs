use crate::data::PageKind;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Configuration for a suite run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Upper bound for loading one page and reading its source
    #[serde(default = "default_page_load_timeout_secs")]
    pub page_load_timeout_secs: u64,

    /// Serve pages from saved HTML files instead of a browser
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixtures_dir: Option<PathBuf>,

    /// CSS selectors mapping page regions to fields
    #[serde(default)]
    pub selectors: SelectorConfig,
}

/// Hand-mapped CSS selectors for each extracted field
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub canonical: String,
    pub title: String,
    pub meta_description: String,
    pub breadcrumbs: String,
    pub breadcrumb_links: String,
    pub header1: String,
    pub description: String,
    pub specs: String,
    pub pricing: String,
    pub rating: String,
    /// Matches when the site marks the brand or item as identified
    pub identified: String,
    /// The subject image checked for the placeholder
    pub image: String,
    /// File name of the "not available" placeholder image
    pub placeholder_image: String,
    /// Regions that must exist or the extraction fails
    pub required_regions: RequiredRegions,
}

/// Selectors that must match at least once, per page kind.
///
/// A page missing any of them did not render and yields `ExtractionFailed`
/// instead of a snapshot full of empty fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequiredRegions {
    pub base: Vec<String>,
    pub brand: Vec<String>,
    pub brand_item: Vec<String>,
}

impl RequiredRegions {
    pub fn for_kind(&self, kind: PageKind) -> &[String] {
        match kind {
            PageKind::Base => &self.base,
            PageKind::Brand => &self.brand,
            PageKind::BrandItem => &self.brand_item,
        }
    }
}

impl Default for RequiredRegions {
    fn default() -> Self {
        Self {
            base: vec!["title".to_string()],
            brand: vec!["h1".to_string(), ".brand-image img".to_string()],
            brand_item: vec![
                "h1".to_string(),
                ".item-image img".to_string(),
                ".pricing".to_string(),
            ],
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            canonical: "link[rel=canonical]".to_string(),
            title: "title".to_string(),
            meta_description: "meta[name=description]".to_string(),
            breadcrumbs: ".breadcrumbs".to_string(),
            breadcrumb_links: ".breadcrumbs a[href]".to_string(),
            header1: "h1".to_string(),
            description: ".seo-paragraph".to_string(),
            specs: ".specs li".to_string(),
            pricing: ".pricing".to_string(),
            rating: ".user-rating".to_string(),
            identified: ".identified".to_string(),
            image: ".brand-image img, .item-image img".to_string(),
            placeholder_image: "na.gif".to_string(),
            required_regions: RequiredRegions::default(),
        }
    }
}

impl SuiteConfig {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Override the WebDriver URL with the `WEBDRIVER_URL` environment variable if set
    pub fn apply_env(&mut self) {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                ::log::debug!("WEBDRIVER_URL overrides {}", self.webdriver_url);
                self.webdriver_url = webdriver_url;
            }
        }
    }
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            page_load_timeout_secs: default_page_load_timeout_secs(),
            fixtures_dir: None,
            selectors: SelectorConfig::default(),
        }
    }
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_page_load_timeout_secs() -> u64 {
    45
}
