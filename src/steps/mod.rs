//! Scenario step vocabulary.
//!
//! Step text is matched exactly against anchored patterns; the Gherkin
//! keyword (`Given`, `Then`, ...) plays no part in matching. `Given` steps
//! visit a page and store the snapshot in the [`ScenarioContext`]; `Then`
//! steps run checks against a stored snapshot.

pub mod context;

#[cfg(test)]
mod tests;

use crate::assertions::{PageDataAssert, assert_that};
use crate::data::{PageData, PageKind};
use crate::error::{CheckError, Result};
use crate::navigation::Navigator;
use regex::{Captures, Regex};
use std::fmt;
use std::sync::LazyLock;

pub use context::{ContextState, ScenarioContext};

/// Which snapshot a `Then` step reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Brand,
    Item,
    /// Whatever page was visited last
    Page,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Target::Brand => "brand",
            Target::Item => "brand item",
            Target::Page => "current",
        };
        f.write_str(name)
    }
}

/// A validation run by a `Then` step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    Identified,
    NotNaGif,
    Header1,
    Header1EqualTo(String),
    Description,
    DescriptionEqualTo(String),
    Specs,
    SpecIncluded(String),
    Pricing,
    Rating,
    Title,
    TitleEqualTo(String),
    CanonicalEqualTo(String),
    MetaDescription,
    Breadcrumbs,
}

impl Check {
    fn apply(&self, v: &PageDataAssert<'_>) -> Result<()> {
        let result = match self {
            Check::Identified => v.is_identified(),
            Check::NotNaGif => v.is_not_na_gif(),
            Check::Header1 => v.has_header1(),
            Check::Header1EqualTo(expected) => v.has_header1_equal_to(expected),
            Check::Description => v.has_description(),
            Check::DescriptionEqualTo(expected) => v.has_description_equal_to(expected),
            Check::Specs => v.has_specs(),
            Check::SpecIncluded(spec) => v.has_spec(spec),
            Check::Pricing => v.has_pricing(),
            Check::Rating => v.has_rating(),
            Check::Title => v.has_title(),
            Check::TitleEqualTo(expected) => v.has_title_equal_to(expected),
            Check::CanonicalEqualTo(expected) => v.has_canonical_equal_to(expected),
            Check::MetaDescription => v.has_meta_description(),
            Check::Breadcrumbs => v.has_breadcrumbs(),
        };
        result.map(|_| ())
    }
}

/// One step definition, parsed from scenario text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Visit `url` as a plain page, require breadcrumbs, then drop the snapshot
    CheckBreadcrumbsOf(String),
    /// Visit `url` and keep a snapshot of `kind`
    Visit { url: String, kind: PageKind },
    Then { target: Target, check: Check },
}

type StepBuilder = fn(&Captures<'_>) -> Step;

fn arg(caps: &Captures<'_>) -> String {
    caps.get(1).map(|m| m.as_str().to_string()).unwrap_or_default()
}

fn def(pattern: &'static str, build: StepBuilder) -> (&'static str, StepBuilder) {
    (pattern, build)
}

static VOCABULARY: LazyLock<Vec<(Regex, StepBuilder)>> = LazyLock::new(|| {
    let table = [
        def(r#"^I want to check the breadcrumbs of "([^"]*)"$"#, |c| {
            Step::CheckBreadcrumbsOf(arg(c))
        }),
        def(r#"^I want to check the page "([^"]*)"$"#, |c| Step::Visit {
            url: arg(c),
            kind: PageKind::Base,
        }),
        def(r#"^I navigate to the brand page "([^"]*)"$"#, |c| Step::Visit {
            url: arg(c),
            kind: PageKind::Brand,
        }),
        def(r#"^I navigate to the brand item page "([^"]*)"$"#, |c| Step::Visit {
            url: arg(c),
            kind: PageKind::BrandItem,
        }),
        def(r"^the brand identification should be visible$", |_| {
            then(Target::Brand, Check::Identified)
        }),
        def(r"^the item identification should be visible$", |_| {
            then(Target::Item, Check::Identified)
        }),
        def(
            r"^the brand page should not be a placeholder image url ending in na\.gif$",
            |_| then(Target::Brand, Check::NotNaGif),
        ),
        def(
            r"^the item page should not be a placeholder image url ending in na\.gif$",
            |_| then(Target::Item, Check::NotNaGif),
        ),
        def(r"^the brand header one should not be empty$", |_| {
            then(Target::Brand, Check::Header1)
        }),
        def(r#"^the brand header one should be "([^"]*)"$"#, |c| {
            then(Target::Brand, Check::Header1EqualTo(arg(c)))
        }),
        def(r"^the brand description should not be empty$", |_| {
            then(Target::Brand, Check::Description)
        }),
        def(r#"^the brand description should be "([^"]*)"$"#, |c| {
            then(Target::Brand, Check::DescriptionEqualTo(arg(c)))
        }),
        def(r"^the item header one should not be empty$", |_| {
            then(Target::Item, Check::Header1)
        }),
        def(r#"^the item header one should be "([^"]*)"$"#, |c| {
            then(Target::Item, Check::Header1EqualTo(arg(c)))
        }),
        def(r"^the item description should not be empty$", |_| {
            then(Target::Item, Check::Description)
        }),
        def(r#"^the item description should be "([^"]*)"$"#, |c| {
            then(Target::Item, Check::DescriptionEqualTo(arg(c)))
        }),
        def(r"^the item specs should not be empty$", |_| {
            then(Target::Item, Check::Specs)
        }),
        def(r#"^the item specs should include "([^"]*)"$"#, |c| {
            then(Target::Item, Check::SpecIncluded(arg(c)))
        }),
        def(r"^the item pricing should not be empty$", |_| {
            then(Target::Item, Check::Pricing)
        }),
        def(r"^the item rating should not be empty$", |_| {
            then(Target::Item, Check::Rating)
        }),
        def(r"^the page title should not be empty$", |_| {
            then(Target::Page, Check::Title)
        }),
        def(r#"^the page title should be "([^"]*)"$"#, |c| {
            then(Target::Page, Check::TitleEqualTo(arg(c)))
        }),
        def(r#"^the page canonical should be "([^"]*)"$"#, |c| {
            then(Target::Page, Check::CanonicalEqualTo(arg(c)))
        }),
        def(r"^the page meta description should not be empty$", |_| {
            then(Target::Page, Check::MetaDescription)
        }),
        def(r"^the page should have breadcrumbs$", |_| {
            then(Target::Page, Check::Breadcrumbs)
        }),
    ];

    table
        .into_iter()
        .map(|(pattern, build)| (Regex::new(pattern).unwrap(), build))
        .collect()
});

fn then(target: Target, check: Check) -> Step {
    Step::Then { target, check }
}

impl Step {
    /// Match step text against the vocabulary
    pub fn parse(text: &str) -> Option<Step> {
        VOCABULARY
            .iter()
            .find_map(|(regex, build)| regex.captures(text).map(|caps| build(&caps)))
    }

    /// Like [`Step::parse`] but fails with `UndefinedStep`
    pub fn resolve(text: &str) -> Result<Step> {
        Self::parse(text).ok_or_else(|| CheckError::UndefinedStep(text.to_string()))
    }

    /// Run the step against the scenario context.
    ///
    /// Failures are returned as-is; the caller stops the scenario.
    pub async fn execute(&self, ctx: &mut ScenarioContext, navigator: &dyn Navigator) -> Result<()> {
        match self {
            Step::CheckBreadcrumbsOf(url) => {
                ctx.set_test_url(url);
                let page = navigator.navigate_and_extract(url, PageKind::Base).await?;
                ctx.store(page);
                let result = match ctx.snapshot(PageKind::Base) {
                    Some(page) => assert_that(page).has_breadcrumbs().map(|_| ()),
                    None => Err(no_snapshot(Target::Page, self)),
                };
                ctx.take(PageKind::Base);
                result
            }
            Step::Visit { url, kind } => {
                ctx.set_test_url(url);
                let page = navigator.navigate_and_extract(url, *kind).await?;
                ::log::debug!("Stored {} snapshot for {}", kind, url);
                ctx.store(page);
                Ok(())
            }
            Step::Then { target, check } => {
                let page = snapshot_for(ctx, *target).ok_or_else(|| no_snapshot(*target, self))?;
                check.apply(&assert_that(page))
            }
        }
    }
}

fn snapshot_for(ctx: &ScenarioContext, target: Target) -> Option<&PageData> {
    match target {
        Target::Brand => ctx.snapshot(PageKind::Brand),
        Target::Item => ctx.snapshot(PageKind::BrandItem),
        Target::Page => ctx.latest(),
    }
}

fn no_snapshot(target: Target, step: &Step) -> CheckError {
    CheckError::NoSnapshot {
        kind: target.to_string(),
        step: format!("{:?}", step),
    }
}
