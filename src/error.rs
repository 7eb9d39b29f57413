use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while extracting pages, validating them, or running scenarios
#[derive(Debug, Error)]
pub enum CheckError {
    /// A required text field was blank at assertion time
    #[error("{field} is empty for page {url}")]
    FieldEmpty { field: String, url: String },

    /// A text field differs from the expected literal
    #[error("{field} for page {url} is '{actual}' but expected '{expected}'")]
    FieldMismatch {
        field: String,
        url: String,
        actual: String,
        expected: String,
    },

    /// A boolean flag did not hold the required polarity
    #[error("{condition} for page {url}")]
    BooleanInvariantViolated { condition: String, url: String },

    /// Navigation or extraction could not produce a complete record
    #[error("failed to extract page {url}: {reason}")]
    ExtractionFailed { url: String, reason: String },

    /// The page kind does not carry the requested field
    #[error("{field} is not available on a {kind} page for page {url}")]
    FieldUnsupported {
        field: String,
        kind: String,
        url: String,
    },

    /// A step needed a snapshot that no earlier step produced
    #[error("no {kind} page snapshot available for step '{step}'")]
    NoSnapshot { kind: String, step: String },

    /// No step definition matches the step text
    #[error("undefined step: {0}")]
    UndefinedStep(String),

    #[error("{}:{line}: {message}", .path.display())]
    FeatureParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("invalid selector for {field} '{selector}': {message}")]
    InvalidSelector {
        field: String,
        selector: String,
        message: String,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("webdriver error: {0}")]
    WebDriver(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Discriminant of [`CheckError`], handy for matching in tests and reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckErrorKind {
    FieldEmpty,
    FieldMismatch,
    BooleanInvariantViolated,
    ExtractionFailed,
    FieldUnsupported,
    NoSnapshot,
    UndefinedStep,
    FeatureParse,
    InvalidSelector,
    Config,
    WebDriver,
    Io,
}

impl CheckError {
    pub fn kind(&self) -> CheckErrorKind {
        match self {
            CheckError::FieldEmpty { .. } => CheckErrorKind::FieldEmpty,
            CheckError::FieldMismatch { .. } => CheckErrorKind::FieldMismatch,
            CheckError::BooleanInvariantViolated { .. } => CheckErrorKind::BooleanInvariantViolated,
            CheckError::ExtractionFailed { .. } => CheckErrorKind::ExtractionFailed,
            CheckError::FieldUnsupported { .. } => CheckErrorKind::FieldUnsupported,
            CheckError::NoSnapshot { .. } => CheckErrorKind::NoSnapshot,
            CheckError::UndefinedStep(_) => CheckErrorKind::UndefinedStep,
            CheckError::FeatureParse { .. } => CheckErrorKind::FeatureParse,
            CheckError::InvalidSelector { .. } => CheckErrorKind::InvalidSelector,
            CheckError::Config(_) => CheckErrorKind::Config,
            CheckError::WebDriver(_) => CheckErrorKind::WebDriver,
            CheckError::Io(_) => CheckErrorKind::Io,
        }
    }

    /// Shorthand for an extraction failure on `url`
    pub fn extraction(url: &str, reason: impl Into<String>) -> Self {
        CheckError::ExtractionFailed {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for CheckError {
    fn from(e: serde_json::Error) -> Self {
        CheckError::Config(e.to_string())
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, CheckError>;
