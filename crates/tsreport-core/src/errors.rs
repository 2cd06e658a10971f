//! Structured error types for the reporting pipeline.

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`ReportError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (paths, keys, offsets, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Records the input file the error refers to.
    pub fn with_path(self, path: &Path) -> Self {
        self.with_context("path", path.display().to_string())
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for tree-sequence reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum ReportError {
    /// Invalid report variant or input pattern.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Failure while listing input files.
    #[error("enumerate error: {0}")]
    Enumerate(ErrorInfo),
    /// Input file could not be loaded as a tree sequence.
    #[error("load error: {0}")]
    Load(ErrorInfo),
    /// Provenance record or filename did not yield the expected parameters.
    #[error("metadata error: {0}")]
    Metadata(ErrorInfo),
    /// The selected sample set was empty.
    #[error("empty sample set: {0}")]
    EmptySampleSet(ErrorInfo),
    /// The statistic could not be computed for the supplied sample groups.
    #[error("statistic error: {0}")]
    Statistic(ErrorInfo),
    /// Writing the report failed.
    #[error("io error: {0}")]
    Io(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl ReportError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            ReportError::Config(info)
            | ReportError::Enumerate(info)
            | ReportError::Load(info)
            | ReportError::Metadata(info)
            | ReportError::EmptySampleSet(info)
            | ReportError::Statistic(info)
            | ReportError::Io(info) => info,
        }
    }

    /// Whether the error concerns a single input file only.
    ///
    /// Run-level failures (configuration, enumeration, output) are never
    /// skippable.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            ReportError::Load(_)
                | ReportError::Metadata(_)
                | ReportError::EmptySampleSet(_)
                | ReportError::Statistic(_)
        )
    }

    /// Attaches the input path to the error context.
    pub fn at_path(self, path: &Path) -> Self {
        let attach = |info: ErrorInfo| info.with_path(path);
        match self {
            ReportError::Config(info) => ReportError::Config(attach(info)),
            ReportError::Enumerate(info) => ReportError::Enumerate(attach(info)),
            ReportError::Load(info) => ReportError::Load(attach(info)),
            ReportError::Metadata(info) => ReportError::Metadata(attach(info)),
            ReportError::EmptySampleSet(info) => ReportError::EmptySampleSet(attach(info)),
            ReportError::Statistic(info) => ReportError::Statistic(attach(info)),
            ReportError::Io(info) => ReportError::Io(attach(info)),
        }
    }
}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::Io(
            ErrorInfo::new("IO001", "failed to write report output")
                .with_context("source", err.to_string()),
        )
    }
}
