use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, ReportError};
use crate::filename::FilenameField;
use crate::samples::SamplePolicy;

/// How a variant obtains simulation parameters for each file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Extraction {
    /// Parse the provenance record at `record_index` as a mapping literal.
    Provenance {
        #[serde(default)]
        record_index: usize,
    },
    /// Read numeric parameters from positional segments of the file name.
    Filename {
        #[serde(default = "default_delimiter")]
        delimiter: String,
        fields: Vec<FilenameField>,
    },
}

fn default_delimiter() -> String {
    "_".to_string()
}

impl Default for Extraction {
    fn default() -> Self {
        Extraction::Provenance { record_index: 0 }
    }
}

/// One column of the emitted report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Column {
    /// A named simulation parameter.
    Param {
        key: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        header: Option<String>,
    },
    /// Branch-mode diversity over the selected sample set.
    Diversity {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        header: Option<String>,
    },
    /// Maximum number of roots over all local trees.
    MaxRoots {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        header: Option<String>,
    },
}

impl Column {
    pub fn param(key: &str, header: &str) -> Self {
        Column::Param {
            key: key.to_string(),
            header: Some(header.to_string()),
        }
    }

    pub fn diversity() -> Self {
        Column::Diversity { header: None }
    }

    pub fn max_roots() -> Self {
        Column::MaxRoots { header: None }
    }

    /// Name printed for this column in the header line.
    pub fn header(&self) -> &str {
        match self {
            Column::Param { key, header } => header.as_deref().unwrap_or(key),
            Column::Diversity { header } => header.as_deref().unwrap_or("div"),
            Column::MaxRoots { header } => header.as_deref().unwrap_or("mroots"),
        }
    }
}

/// Declarative description of one report: which files, how parameters are
/// extracted, which samples are used and which columns are printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantConfig {
    pub name: String,
    /// Glob pattern, relative to the report root.
    pub pattern: String,
    #[serde(default)]
    pub extraction: Extraction,
    #[serde(default)]
    pub samples: SamplePolicy,
    pub columns: Vec<Column>,
}

impl VariantConfig {
    /// Whether any column requires scanning local trees for root counts.
    pub fn scans_roots(&self) -> bool {
        self.columns
            .iter()
            .any(|column| matches!(column, Column::MaxRoots { .. }))
    }

    /// Parameter keys referenced by the columns, in column order.
    pub fn required_keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().filter_map(|column| match column {
            Column::Param { key, .. } => Some(key.as_str()),
            _ => None,
        })
    }

    /// Space-separated header line.
    pub fn header_line(&self) -> String {
        self.columns
            .iter()
            .map(Column::header)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn validate(&self) -> Result<(), ReportError> {
        let invalid = |message: &str| {
            ReportError::Config(ErrorInfo::new("CFG001", message).with_context("variant", &self.name))
        };
        if self.pattern.trim().is_empty() {
            return Err(invalid("variant pattern is empty"));
        }
        if self.columns.is_empty() {
            return Err(invalid("variant declares no columns"));
        }
        for column in &self.columns {
            let header = column.header();
            if header.is_empty() || header.chars().any(char::is_whitespace) {
                return Err(ReportError::Config(
                    ErrorInfo::new(
                        "CFG001",
                        "column headers must be non-empty and contain no whitespace",
                    )
                    .with_context("variant", &self.name)
                    .with_context("header", format!("{header:?}")),
                ));
            }
        }
        if let Extraction::Filename { delimiter, fields } = &self.extraction {
            if delimiter.is_empty() {
                return Err(invalid("filename delimiter is empty"));
            }
            if fields.is_empty() {
                return Err(invalid("filename extraction declares no fields"));
            }
        }
        Ok(())
    }
}

/// Loads and validates a variant from a YAML file.
pub fn load_variant(path: &Path) -> Result<VariantConfig, ReportError> {
    let raw = fs::read_to_string(path).map_err(|err| {
        ReportError::Config(
            ErrorInfo::new("CFG002", "failed to read variant file")
                .with_path(path)
                .with_context("source", err.to_string()),
        )
    })?;
    let variant: VariantConfig = serde_yaml::from_str(&raw).map_err(|err| {
        ReportError::Config(
            ErrorInfo::new("CFG003", "failed to parse variant file")
                .with_path(path)
                .with_context("source", err.to_string()),
        )
    })?;
    variant.validate()?;
    Ok(variant)
}

/// Serialises a variant as YAML, the format accepted by [`load_variant`].
pub fn variant_to_yaml(variant: &VariantConfig) -> Result<String, ReportError> {
    serde_yaml::to_string(variant).map_err(|err| {
        ReportError::Config(
            ErrorInfo::new("CFG004", "failed to serialise variant")
                .with_context("variant", &variant.name)
                .with_context("source", err.to_string()),
        )
    })
}

fn overlapping_columns() -> Vec<Column> {
    vec![
        Column::param("N", "N"),
        Column::param("psurvival", "p"),
        Column::param("recrate", "recrate"),
        Column::diversity(),
    ]
}

fn survival_roots_columns() -> Vec<Column> {
    vec![
        Column::param("psurvival", "p"),
        Column::diversity(),
        Column::max_roots(),
    ]
}

/// The report variants shipped with the tool.
pub fn builtin_variants() -> Vec<VariantConfig> {
    vec![
        VariantConfig {
            name: "overlapping".to_string(),
            pattern: "output/*.trees".to_string(),
            extraction: Extraction::default(),
            samples: SamplePolicy::All,
            columns: overlapping_columns(),
        },
        VariantConfig {
            name: "overlapping-alive".to_string(),
            pattern: "output/*.trees".to_string(),
            extraction: Extraction::default(),
            samples: SamplePolicy::flagged(),
            columns: overlapping_columns(),
        },
        VariantConfig {
            name: "moran".to_string(),
            pattern: "moran/*.trees".to_string(),
            extraction: Extraction::default(),
            samples: SamplePolicy::All,
            columns: vec![Column::diversity()],
        },
        VariantConfig {
            name: "survival-roots".to_string(),
            pattern: "*.trees".to_string(),
            extraction: Extraction::default(),
            samples: SamplePolicy::flagged(),
            columns: survival_roots_columns(),
        },
        VariantConfig {
            name: "filename-roots".to_string(),
            pattern: "*.trees".to_string(),
            extraction: Extraction::Filename {
                delimiter: default_delimiter(),
                fields: vec![FilenameField {
                    index: 1,
                    key: "psurvival".to_string(),
                }],
            },
            samples: SamplePolicy::flagged(),
            columns: survival_roots_columns(),
        },
    ]
}

/// Looks up a built-in variant by name.
pub fn builtin_variant(name: &str) -> Result<VariantConfig, ReportError> {
    let variants = builtin_variants();
    let known = variants
        .iter()
        .map(|variant| variant.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    variants
        .iter()
        .find(|variant| variant.name == name)
        .cloned()
        .ok_or_else(|| {
            ReportError::Config(
                ErrorInfo::new("CFG005", "unknown report variant")
                    .with_context("variant", name)
                    .with_hint(format!("known variants: {known}")),
            )
        })
}
