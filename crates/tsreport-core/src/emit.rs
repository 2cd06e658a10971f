use std::io::Write;

use crate::errors::ReportError;
use crate::params::format_float;
use crate::record::SimulationRecord;
use crate::variant::{Column, VariantConfig};

/// Sequential writer for one report run.
///
/// Owns the output sink for the run's duration and flushes after every line,
/// so rows emitted before a fatal error are always visible.
pub struct ReportWriter<W: Write> {
    out: W,
    header: String,
    columns: Vec<Column>,
    rows: usize,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(out: W, variant: &VariantConfig) -> Self {
        Self {
            out,
            header: variant.header_line(),
            columns: variant.columns.clone(),
            rows: 0,
        }
    }

    pub fn write_header(&mut self) -> Result<(), ReportError> {
        let header = self.header.clone();
        self.write_line(&header)
    }

    /// Writes one data row for `record`.
    pub fn write_record(&mut self, record: &SimulationRecord) -> Result<(), ReportError> {
        let mut cells = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            cells.push(render_cell(column, record)?);
        }
        self.write_line(&cells.join(" "))?;
        self.rows += 1;
        Ok(())
    }

    /// Number of data rows written so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) -> Result<(), ReportError> {
        writeln!(self.out, "{line}")?;
        self.out.flush()?;
        Ok(())
    }
}

fn render_cell(column: &Column, record: &SimulationRecord) -> Result<String, ReportError> {
    match column {
        Column::Param { key, .. } => Ok(record
            .parameters
            .require(key)
            .map_err(|err| err.at_path(&record.source_path))?
            .to_string()),
        Column::Diversity { .. } => Ok(format_float(record.diversity)),
        // A sequence without trees has no root count.
        Column::MaxRoots { .. } => Ok(record
            .max_roots
            .map(|roots| roots.to_string())
            .unwrap_or_else(|| "-".to_string())),
    }
}
