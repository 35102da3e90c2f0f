//! # rpn-sheets-csv
//!
//! CSV loader and result writer for rpn-sheets.
//!
//! [`CsvReader`] turns delimited text into a [`Grid`](rpn_sheets_core::Grid)
//! of raw cell text, keeping ragged rows as they are. [`CsvWriter`] writes an
//! [`EvaluatedGrid`](rpn_sheets_core::EvaluatedGrid) back out with the same
//! shape, one number or error marker per cell.

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, CsvWriteOptions, ErrorMarker, LineTerminator};
pub use reader::CsvReader;
pub use writer::{format_number, CsvWriter};
