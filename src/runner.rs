use crate::gherkin::{Feature, Scenario};
use crate::navigation::Navigator;
use crate::results::{RunSummary, ScenarioOutcome, ScenarioStatus};
use crate::steps::{ContextState, ScenarioContext, Step};

/// Runs scenarios one after another against a single navigator.
///
/// Scenarios never run concurrently: each one owns a fresh
/// [`ScenarioContext`] for its whole duration.
pub struct Runner<'a> {
    navigator: &'a dyn Navigator,
    name_filter: Option<String>,
    tag_filter: Option<String>,
    fail_fast: bool,
}

impl<'a> Runner<'a> {
    pub fn new(navigator: &'a dyn Navigator) -> Self {
        Self {
            navigator,
            name_filter: None,
            tag_filter: None,
            fail_fast: false,
        }
    }

    /// Only run scenarios whose name contains `filter`
    pub fn with_name_filter(mut self, filter: Option<String>) -> Self {
        self.name_filter = filter;
        self
    }

    /// Only run scenarios carrying `tag`
    pub fn with_tag_filter(mut self, tag: Option<String>) -> Self {
        self.tag_filter = tag;
        self
    }

    /// Stop after the first failed scenario
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    fn selected(&self, scenario: &Scenario) -> bool {
        let name_ok = self
            .name_filter
            .as_deref()
            .is_none_or(|filter| scenario.name.contains(filter));
        let tag_ok = self
            .tag_filter
            .as_deref()
            .is_none_or(|tag| scenario.has_tag(tag));
        name_ok && tag_ok
    }

    pub async fn run(&self, features: &[Feature]) -> RunSummary {
        let mut summary = RunSummary::default();

        for feature in features {
            ::log::info!("Feature: {} ({})", feature.name, feature.path.display());

            for scenario in feature.scenarios.iter().filter(|s| self.selected(s)) {
                let outcome = self.run_scenario(&feature.name, scenario).await;
                let failed = !outcome.passed();
                summary.outcomes.push(outcome);

                if failed && self.fail_fast {
                    ::log::warn!("Stopping after first failed scenario");
                    return summary;
                }
            }
        }

        ::log::info!(
            "{} scenarios: {} passed, {} failed",
            summary.outcomes.len(),
            summary.passed(),
            summary.failed()
        );
        summary
    }

    /// Run one scenario, stopping at its first failing step
    pub async fn run_scenario(&self, feature: &str, scenario: &Scenario) -> ScenarioOutcome {
        ::log::info!("Scenario: {}", scenario.name);
        let mut ctx = ScenarioContext::new();
        let mut status = ScenarioStatus::Passed;
        let mut skipped_steps = 0;

        for (index, line) in scenario.steps.iter().enumerate() {
            ::log::debug!("  {:?} {}", line.keyword, line.text);

            let result = match Step::resolve(&line.text) {
                Ok(step) => step.execute(&mut ctx, self.navigator).await,
                Err(e) => Err(e),
            };

            if let Err(e) = result {
                ::log::error!("  Step failed at line {}: {}", line.line, e);
                status = ScenarioStatus::Failed {
                    step: line.text.clone(),
                    line: line.line,
                    message: e.to_string(),
                };
                skipped_steps = scenario.steps.len() - index - 1;
                break;
            }
        }

        // no snapshot may leak into the next scenario, pass or fail
        ctx.clear();
        debug_assert_eq!(ctx.state(), ContextState::Idle);

        ScenarioOutcome {
            feature: feature.to_string(),
            scenario: scenario.name.clone(),
            status,
            skipped_steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SelectorConfig;
    use crate::gherkin::parse_feature;
    use crate::navigation::FixtureNavigator;

    const ACME: &str = "https://example.com/brand/acme";
    const ACME_HTML: &str = r#"
        <html><head><title>Acme</title></head><body>
            <div class="breadcrumbs"><a href="/">Home</a></div>
            <h1>Acme Products</h1>
            <div class="brand-image"><img src="/img/na.gif"></div>
            <span class="identified"></span>
        </body></html>
    "#;

    const FEATURE: &str = r#"
Feature: Brand pages

  @smoke
  Scenario: Acme is identified
    Given I navigate to the brand page "https://example.com/brand/acme"
    Then the brand identification should be visible
    And the brand header one should be "Acme Products"

  Scenario: Acme uses a placeholder image
    Given I navigate to the brand page "https://example.com/brand/acme"
    Then the brand page should not be a placeholder image url ending in na.gif
    And the brand identification should be visible

  Scenario: No carry-over from earlier scenarios
    Then the brand identification should be visible

  Scenario: Breadcrumbs
    Given I want to check the breadcrumbs of "https://example.com/brand/acme"

  Scenario: Undefined step
    Given I do something nobody defined
"#;

    fn navigator() -> FixtureNavigator {
        FixtureNavigator::new(&SelectorConfig::default())
            .unwrap()
            .with_page(ACME, ACME_HTML)
    }

    #[tokio::test]
    async fn test_run_feature() {
        let feature = parse_feature(FEATURE, "brands.feature").unwrap();
        let nav = navigator();
        let summary = Runner::new(&nav).run(&[feature]).await;

        assert_eq!(summary.outcomes.len(), 5);
        assert_eq!(summary.passed(), 2);
        assert_eq!(summary.failed(), 3);
        assert!(!summary.is_success());

        let names: Vec<_> = summary.failures().map(|o| o.scenario.as_str()).collect();
        assert_eq!(
            names,
            [
                "Acme uses a placeholder image",
                "No carry-over from earlier scenarios",
                "Undefined step"
            ]
        );
    }

    #[tokio::test]
    async fn test_failure_stops_scenario() {
        let feature = parse_feature(FEATURE, "brands.feature").unwrap();
        let nav = navigator();
        let outcome = Runner::new(&nav)
            .run_scenario(&feature.name, &feature.scenarios[1])
            .await;

        assert_eq!(outcome.skipped_steps, 1);
        match outcome.status {
            ScenarioStatus::Failed { line, message, .. } => {
                assert_eq!(line, 12);
                assert!(message.contains("na.gif"));
                assert!(message.contains(ACME));
            }
            ScenarioStatus::Passed => panic!("scenario should fail"),
        }
    }

    #[tokio::test]
    async fn test_no_state_carries_over() {
        let feature = parse_feature(FEATURE, "brands.feature").unwrap();
        let nav = navigator();
        let summary = Runner::new(&nav).run(&[feature]).await;

        match &summary.outcomes[2].status {
            ScenarioStatus::Failed { message, .. } => {
                assert!(message.contains("no brand page snapshot"));
            }
            ScenarioStatus::Passed => panic!("scenario should not see earlier snapshots"),
        }
    }

    #[tokio::test]
    async fn test_filters_and_fail_fast() {
        let feature = parse_feature(FEATURE, "brands.feature").unwrap();
        let nav = navigator();

        let summary = Runner::new(&nav)
            .with_tag_filter(Some("@smoke".to_string()))
            .run(std::slice::from_ref(&feature))
            .await;
        assert_eq!(summary.outcomes.len(), 1);
        assert!(summary.is_success());

        let summary = Runner::new(&nav)
            .with_name_filter(Some("Breadcrumbs".to_string()))
            .run(std::slice::from_ref(&feature))
            .await;
        assert_eq!(summary.outcomes.len(), 1);
        assert!(summary.is_success());

        let summary = Runner::new(&nav)
            .with_fail_fast(true)
            .run(std::slice::from_ref(&feature))
            .await;
        assert_eq!(summary.outcomes.len(), 2);
        assert_eq!(summary.failed(), 1);
    }
}
