//! Reader for the subset of Gherkin used by the feature files:
//! `Feature`, `Background`, `Scenario`, `Scenario Outline` with `Examples`,
//! `@tags` and `#` comments.

use crate::error::{CheckError, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Given,
    When,
    Then,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepLine {
    pub keyword: Keyword,
    /// Step text without the keyword
    pub text: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub tags: Vec<String>,
    pub line: usize,
    pub steps: Vec<StepLine>,
}

impl Scenario {
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.trim_start_matches('@');
        self.tags.iter().any(|t| t == tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    pub name: String,
    pub path: PathBuf,
    pub scenarios: Vec<Scenario>,
}

enum Section {
    None,
    Background,
    Scenario,
    Outline,
    Examples,
}

struct Outline {
    name: String,
    tags: Vec<String>,
    line: usize,
    steps: Vec<StepLine>,
    header: Option<Vec<String>>,
    rows: usize,
}

struct FeatureParser<'a> {
    path: &'a Path,
    name: Option<String>,
    feature_tags: Vec<String>,
    pending_tags: Vec<String>,
    background: Vec<StepLine>,
    scenarios: Vec<Scenario>,
    outline: Option<Outline>,
    section: Section,
    last_keyword: Option<Keyword>,
}

impl<'a> FeatureParser<'a> {
    fn new(path: &'a Path) -> Self {
        Self {
            path,
            name: None,
            feature_tags: Vec::new(),
            pending_tags: Vec::new(),
            background: Vec::new(),
            scenarios: Vec::new(),
            outline: None,
            section: Section::None,
            last_keyword: None,
        }
    }

    fn error(&self, line: usize, message: impl Into<String>) -> CheckError {
        CheckError::FeatureParse {
            path: self.path.to_path_buf(),
            line,
            message: message.into(),
        }
    }

    fn take_tags(&mut self) -> Vec<String> {
        let mut tags = self.feature_tags.clone();
        tags.append(&mut self.pending_tags);
        tags
    }

    fn finish_outline(&mut self) -> Result<()> {
        if let Some(outline) = self.outline.take() {
            if outline.rows == 0 {
                return Err(self.error(outline.line, "scenario outline has no examples"));
            }
        }
        Ok(())
    }

    fn parse_line(&mut self, number: usize, line: &str) -> Result<()> {
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        if line.starts_with('@') {
            self.pending_tags.extend(
                line.split_whitespace()
                    .map(|t| t.trim_start_matches('@').to_string()),
            );
            return Ok(());
        }

        if let Some(name) = line.strip_prefix("Feature:") {
            if self.name.is_some() {
                return Err(self.error(number, "only one Feature per file"));
            }
            self.name = Some(name.trim().to_string());
            self.feature_tags = std::mem::take(&mut self.pending_tags);
            return Ok(());
        }

        if self.name.is_none() {
            return Err(self.error(number, "expected 'Feature:'"));
        }

        if line.starts_with("Background:") {
            self.finish_outline()?;
            if !self.scenarios.is_empty() {
                return Err(self.error(number, "Background must come before scenarios"));
            }
            self.section = Section::Background;
            self.last_keyword = None;
            return Ok(());
        }

        if let Some(name) = line
            .strip_prefix("Scenario Outline:")
            .or_else(|| line.strip_prefix("Scenario Template:"))
        {
            self.finish_outline()?;
            let tags = self.take_tags();
            self.outline = Some(Outline {
                name: name.trim().to_string(),
                tags,
                line: number,
                steps: self.background.clone(),
                header: None,
                rows: 0,
            });
            self.section = Section::Outline;
            self.last_keyword = None;
            return Ok(());
        }

        if let Some(name) = line
            .strip_prefix("Scenario:")
            .or_else(|| line.strip_prefix("Example:"))
        {
            self.finish_outline()?;
            let tags = self.take_tags();
            self.scenarios.push(Scenario {
                name: name.trim().to_string(),
                tags,
                line: number,
                steps: self.background.clone(),
            });
            self.section = Section::Scenario;
            self.last_keyword = None;
            return Ok(());
        }

        if line.starts_with("Examples:") || line.starts_with("Scenarios:") {
            if self.outline.is_none() {
                return Err(self.error(number, "Examples outside of a Scenario Outline"));
            }
            if let Some(outline) = self.outline.as_mut() {
                outline.header = None;
            }
            self.section = Section::Examples;
            return Ok(());
        }

        if line.starts_with('|') {
            return self.parse_row(number, line);
        }

        if let Some((keyword, text)) = self.split_step(number, line)? {
            let step = StepLine {
                keyword,
                text,
                line: number,
            };
            match self.section {
                Section::Background => self.background.push(step),
                Section::Scenario => {
                    if let Some(scenario) = self.scenarios.last_mut() {
                        scenario.steps.push(step);
                    }
                }
                Section::Outline => {
                    if let Some(outline) = self.outline.as_mut() {
                        outline.steps.push(step);
                    }
                }
                Section::None | Section::Examples => {
                    return Err(self.error(number, "step outside of a scenario"));
                }
            }
            return Ok(());
        }

        // free-form description text under Feature
        if matches!(self.section, Section::None) {
            return Ok(());
        }
        Err(self.error(number, format!("unexpected line '{}'", line)))
    }

    fn split_step(&mut self, number: usize, line: &str) -> Result<Option<(Keyword, String)>> {
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => return Ok(None),
        };

        let keyword = match word {
            "Given" => Keyword::Given,
            "When" => Keyword::When,
            "Then" => Keyword::Then,
            "And" | "But" | "*" => match self.last_keyword {
                Some(keyword) => keyword,
                None => return Err(self.error(number, format!("'{}' without a preceding step", word))),
            },
            _ => return Ok(None),
        };

        self.last_keyword = Some(keyword);
        Ok(Some((keyword, rest.to_string())))
    }

    fn parse_row(&mut self, number: usize, line: &str) -> Result<()> {
        if !matches!(self.section, Section::Examples) {
            return Err(self.error(number, "table rows are only supported under Examples"));
        }

        let cells = split_row(line);
        let Some(outline) = self.outline.as_mut() else {
            return Err(self.error(number, "Examples outside of a Scenario Outline"));
        };

        let Some(header) = &outline.header else {
            outline.header = Some(cells);
            return Ok(());
        };

        if cells.len() != header.len() {
            let expected = header.len();
            return Err(self.error(
                number,
                format!("expected {} cells but found {}", expected, cells.len()),
            ));
        }

        outline.rows += 1;
        let substitute = |text: &str| {
            header
                .iter()
                .zip(&cells)
                .fold(text.to_string(), |acc, (name, value)| {
                    acc.replace(&format!("<{}>", name), value)
                })
        };

        let scenario = Scenario {
            name: format!("{} (example {})", substitute(&outline.name), outline.rows),
            tags: outline.tags.clone(),
            line: number,
            steps: outline
                .steps
                .iter()
                .map(|step| StepLine {
                    keyword: step.keyword,
                    text: substitute(&step.text),
                    line: step.line,
                })
                .collect(),
        };
        self.scenarios.push(scenario);
        Ok(())
    }

    fn finish(mut self) -> Result<Feature> {
        self.finish_outline()?;
        let name = match self.name.take() {
            Some(name) => name,
            None => return Err(self.error(0, "missing 'Feature:'")),
        };
        Ok(Feature {
            name,
            path: self.path.to_path_buf(),
            scenarios: self.scenarios,
        })
    }
}

fn split_row(line: &str) -> Vec<String> {
    let inner = line.trim().trim_start_matches('|').trim_end_matches('|');
    inner.split('|').map(|cell| cell.trim().to_string()).collect()
}

/// Parse feature text; `path` is only used in error messages
pub fn parse_feature(source: &str, path: impl AsRef<Path>) -> Result<Feature> {
    let mut parser = FeatureParser::new(path.as_ref());
    for (index, line) in source.lines().enumerate() {
        parser.parse_line(index + 1, line.trim())?;
    }
    parser.finish()
}

/// Load every `.feature` file under `path`, which may be a file or a directory
pub fn load_features(path: impl AsRef<Path>) -> Result<Vec<Feature>> {
    let path = path.as_ref();
    let mut files = Vec::new();
    collect_feature_files(path, &mut files)?;
    files.sort();

    let mut features = Vec::with_capacity(files.len());
    for file in files {
        ::log::debug!("Loading feature file {}", file.display());
        let source = fs::read_to_string(&file)?;
        features.push(parse_feature(&source, &file)?);
    }
    Ok(features)
}

fn collect_feature_files(path: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    if path.is_file() {
        files.push(path.to_path_buf());
        return Ok(());
    }

    for entry in fs::read_dir(path)? {
        let entry_path = entry?.path();
        if entry_path.is_dir() {
            collect_feature_files(&entry_path, files)?;
        } else if entry_path.extension().is_some_and(|ext| ext == "feature") {
            files.push(entry_path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CheckErrorKind;

    const FEATURE: &str = r#"
@brands
Feature: Brand pages
  Brand pages must render their content.

  Background:
    Given I want to check the breadcrumbs of "https://example.com/brand/acme"

  # identification
  @smoke
  Scenario: Acme is identified
    Given I navigate to the brand page "https://example.com/brand/acme"
    Then the brand identification should be visible
    And the brand page should not be a placeholder image url ending in na.gif

  Scenario Outline: Brand <name> has a header
    Given I navigate to the brand page "<url>"
    Then the brand header one should be "<header>"

    Examples:
      | name | url                              | header        |
      | acme | https://example.com/brand/acme   | Acme Products |
      | zeta | https://example.com/brand/zeta   | Zeta          |
"#;

    #[test]
    fn test_parse_feature() {
        let feature = parse_feature(FEATURE, "brands.feature").unwrap();
        assert_eq!(feature.name, "Brand pages");
        assert_eq!(feature.scenarios.len(), 3);

        let first = &feature.scenarios[0];
        assert_eq!(first.name, "Acme is identified");
        assert_eq!(first.tags, vec!["brands", "smoke"]);
        assert!(first.has_tag("@smoke"));
        assert_eq!(first.steps.len(), 4);
        assert_eq!(first.steps[0].keyword, Keyword::Given);
        assert_eq!(first.steps[3].keyword, Keyword::Then);
        assert_eq!(
            first.steps[3].text,
            "the brand page should not be a placeholder image url ending in na.gif"
        );
    }

    #[test]
    fn test_outline_expansion() {
        let feature = parse_feature(FEATURE, "brands.feature").unwrap();
        let zeta = &feature.scenarios[2];
        assert_eq!(zeta.name, "Brand zeta has a header (example 2)");
        assert_eq!(zeta.tags, vec!["brands"]);
        assert_eq!(
            zeta.steps[1].text,
            r#"I navigate to the brand page "https://example.com/brand/zeta""#
        );
        assert_eq!(zeta.steps[2].text, r#"the brand header one should be "Zeta""#);
    }

    #[test]
    fn test_missing_feature_header() {
        let err = parse_feature("Scenario: x\n", "bad.feature").unwrap_err();
        assert_eq!(err.kind(), CheckErrorKind::FeatureParse);
        assert!(err.to_string().starts_with("bad.feature:1:"));
    }

    #[test]
    fn test_and_without_previous_step() {
        let err = parse_feature("Feature: f\nScenario: s\nAnd something\n", "f.feature")
            .unwrap_err();
        assert_eq!(err.kind(), CheckErrorKind::FeatureParse);
    }

    #[test]
    fn test_outline_without_examples() {
        let source = "Feature: f\nScenario Outline: s\nGiven I want to check the page \"<u>\"\n";
        let err = parse_feature(source, "f.feature").unwrap_err();
        assert!(err.to_string().contains("no examples"));
    }

    #[test]
    fn test_mismatched_row() {
        let source = "Feature: f\nScenario Outline: s\nGiven x\nExamples:\n| a | b |\n| 1 |\n";
        let err = parse_feature(source, "f.feature").unwrap_err();
        assert_eq!(err.kind(), CheckErrorKind::FeatureParse);
    }
}
