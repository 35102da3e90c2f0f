//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::CsvReadOptions;
use rpn_sheets_core::Grid;
use tracing::info;

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into a grid
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Grid> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let grid = Self::read(file, options)?;
        info!(
            "Loaded {} rows ({} cells) from {}",
            grid.row_count(),
            grid.cell_count(),
            path.display()
        );
        Ok(grid)
    }

    /// Read CSV from a reader into a grid
    ///
    /// Every record becomes one row and every field is kept as raw text.
    /// Records may have different numbers of fields. A blank line between
    /// records becomes a row holding one empty cell, so row numbers in
    /// references match line numbers; blank lines after the last record
    /// are dropped.
    pub fn read<R: Read>(mut reader: R, options: &CsvReadOptions) -> CsvResult<Grid> {
        let mut input = Vec::new();
        reader.read_to_end(&mut input)?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .trim(if options.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .from_reader(input.as_slice());

        let mut rows = Vec::new();
        let mut record = csv::StringRecord::new();
        let mut consumed = 0;
        while csv_reader.read_record(&mut record)? {
            let end = csv_reader.position().byte() as usize;
            let after_cr = consumed > 0 && input[consumed - 1] == b'\r';
            let blank = leading_blank_lines(&input[consumed..end], after_cr);
            rows.extend((0..blank).map(|_| vec![String::new()]));
            consumed = end;

            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Grid::new(rows))
    }
}

/// Count the line breaks the csv parser skipped before a record
///
/// `\r\n` is one break. When the previous record ended on `\r`, a leading
/// `\n` completes that terminator rather than starting a blank line.
fn leading_blank_lines(consumed: &[u8], after_cr: bool) -> usize {
    let mut bytes = match consumed {
        [b'\n', rest @ ..] if after_cr => rest,
        _ => consumed,
    };

    let mut count = 0;
    loop {
        bytes = match bytes {
            [b'\r', b'\n', rest @ ..] | [b'\r', rest @ ..] | [b'\n', rest @ ..] => rest,
            _ => return count,
        };
        count += 1;
    }
}
