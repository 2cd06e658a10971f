use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, ReportError};
use crate::params::{ParamValue, Parameters};

/// Positional filename segment interpreted as a numeric parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilenameField {
    /// Zero-based segment index after splitting the file stem.
    pub index: usize,
    /// Parameter name the segment is stored under.
    pub key: String,
}

/// Derives parameters from the stem of `path` (base name without its
/// extension), split on `delimiter`.
///
/// `prefix_0.35_suffix.trees` split on `_` gives `["prefix", "0.35",
/// "suffix"]`; a field with index 1 reads `0.35`.
pub fn parse_filename(
    path: &Path,
    delimiter: &str,
    fields: &[FilenameField],
) -> Result<Parameters, ReportError> {
    let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
        return Err(ReportError::Metadata(
            ErrorInfo::new("META003", "file name is not valid UTF-8").with_path(path),
        ));
    };
    let segments: Vec<&str> = stem.split(delimiter).collect();

    let mut params = Parameters::new();
    for field in fields {
        let Some(segment) = segments.get(field.index) else {
            return Err(ReportError::Metadata(
                ErrorInfo::new("META003", "file name has too few segments")
                    .with_context("stem", stem)
                    .with_context("segments", segments.len().to_string())
                    .with_context("index", field.index.to_string())
                    .with_hint(format!(
                        "expected names like prefix{delimiter}<{}>{delimiter}suffix.trees",
                        field.key
                    )),
            ));
        };
        let value = segment.parse::<f64>().map_err(|_| {
            ReportError::Metadata(
                ErrorInfo::new("META003", "file name segment is not numeric")
                    .with_context("stem", stem)
                    .with_context("segment", *segment)
                    .with_context("key", field.key.as_str()),
            )
        })?;
        params.insert(field.key.clone(), ParamValue::Float(value));
    }
    Ok(params)
}
