//! Behavior-driven content checks for brand and brand-item pages.
//!
//! Feature files describe which pages to visit and what to expect of them.
//! Each page visit produces an immutable [`PageData`] snapshot; `Then` steps
//! validate it through the fluent checks in [`assertions`].

pub mod assertions;
pub mod config;
pub mod data;
pub mod error;
pub mod gherkin;
pub mod navigation;
pub mod parsers;
pub mod results;
pub mod runner;
pub mod steps;
pub mod utils;

// Re-export commonly used types for convenience
pub use assertions::{PageDataAssert, assert_that};
pub use data::{PageData, PageKind};
pub use error::{CheckError, CheckErrorKind, Result};
pub use results::RunSummary;

use config::SuiteConfig;
use navigation::{FixtureNavigator, Navigator, WebDriverNavigator};
use runner::Runner;
use std::path::{Path, PathBuf};

/// Main builder for a suite run over one or more feature paths
pub struct Suite {
    features: Vec<PathBuf>,
    config: SuiteConfig,
    name_filter: Option<String>,
    tag_filter: Option<String>,
    fail_fast: bool,
}

impl Suite {
    /// Create a new Suite builder; each path is a `.feature` file or a directory of them
    pub fn new(features: Vec<PathBuf>) -> Self {
        let mut config = SuiteConfig::default();
        config.apply_env();
        Self {
            features,
            config,
            name_filter: None,
            tag_filter: None,
            fail_fast: false,
        }
    }

    /// Set the configuration
    pub fn with_config(mut self, config: SuiteConfig) -> Self {
        self.config = config;
        self.config.apply_env();
        self
    }

    /// Load configuration from a file
    pub fn with_config_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let config = SuiteConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a string
    pub fn with_config_str(self, config_str: &str) -> Result<Self> {
        let config = SuiteConfig::from_json(config_str)?;
        Ok(self.with_config(config))
    }

    /// Override the WebDriver URL
    pub fn with_webdriver_url(mut self, url: impl Into<String>) -> Self {
        self.config.webdriver_url = url.into();
        self
    }

    /// Serve pages from saved HTML instead of a browser
    pub fn with_fixtures_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.fixtures_dir = Some(dir.into());
        self
    }

    pub fn with_name_filter(mut self, filter: Option<String>) -> Self {
        self.name_filter = filter;
        self
    }

    pub fn with_tag_filter(mut self, tag: Option<String>) -> Self {
        self.tag_filter = tag;
        self
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Load the features, open a navigator, and run every selected scenario
    pub async fn run(self) -> Result<RunSummary> {
        let mut features = Vec::new();
        for path in &self.features {
            features.extend(gherkin::load_features(path)?);
        }
        let scenario_count: usize = features.iter().map(|f| f.scenarios.len()).sum();
        ::log::info!(
            "Loaded {} features with {} scenarios",
            features.len(),
            scenario_count
        );

        match &self.config.fixtures_dir {
            Some(dir) => {
                ::log::info!("Serving pages from fixtures in {}", dir.display());
                let navigator = FixtureNavigator::from_dir(dir, &self.config.selectors)?;
                Ok(self.run_with(&navigator, &features).await)
            }
            None => {
                ::log::info!("Using WebDriver at {}", self.config.webdriver_url);
                let navigator = WebDriverNavigator::connect(&self.config).await?;
                let summary = self.run_with(&navigator, &features).await;
                if let Err(e) = navigator.close().await {
                    ::log::warn!("Failed to close WebDriver session: {}", e);
                }
                Ok(summary)
            }
        }
    }

    async fn run_with(&self, navigator: &dyn Navigator, features: &[gherkin::Feature]) -> RunSummary {
        Runner::new(navigator)
            .with_name_filter(self.name_filter.clone())
            .with_tag_filter(self.tag_filter.clone())
            .with_fail_fast(self.fail_fast)
            .run(features)
            .await
    }
}
