//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::{CsvWriteOptions, ErrorMarker, LineTerminator};
use rpn_sheets_core::{CellOutcome, EvaluatedGrid};
use tracing::info;

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write an evaluated grid to a CSV file
    pub fn write_file<P: AsRef<Path>>(
        grid: &EvaluatedGrid,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        Self::write(grid, file, options)?;
        info!("Wrote {} rows to {}", grid.row_count(), path.display());
        Ok(())
    }

    /// Write an evaluated grid to a writer
    ///
    /// Rows keep their own lengths, so a ragged input produces ragged output.
    pub fn write<W: Write>(
        grid: &EvaluatedGrid,
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(terminator)
            .flexible(true)
            .from_writer(writer);

        for row in grid.rows() {
            let record: Vec<String> = row
                .iter()
                .map(|outcome| format_outcome(outcome, &options.error_marker))
                .collect();
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

/// Format a number for output
///
/// Integral values below 1e15 are written without a fractional part,
/// everything else uses the shortest representation that round-trips.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

fn format_outcome(outcome: &CellOutcome, marker: &ErrorMarker) -> String {
    match (outcome, marker) {
        (CellOutcome::Number(n), _) => format_number(*n),
        (CellOutcome::Error(_), ErrorMarker::Uniform(text)) => text.clone(),
        (CellOutcome::Error(e), ErrorMarker::Detailed) => e.as_str().to_string(),
    }
}
