//! # rpn-sheets
//!
//! Evaluate grids of postfix (Reverse-Polish) expressions that reference
//! other cells by coordinate.
//!
//! Every cell of the input holds either a number or a whitespace-separated
//! postfix expression such as `A1 2 *`. Evaluation produces a grid of the
//! same shape holding a number or an error marker per cell.
//!
//! ## Features
//!
//! - Load grids from CSV or TSV text, ragged rows included
//! - Recursive reference resolution with cycle detection
//! - Per-cell errors that never stop the rest of the grid
//! - Write results back as CSV with uniform or per-kind error markers
//!
//! ## Example
//!
//! ```rust
//! use rpn_sheets::prelude::*;
//!
//! let grid = Grid::from_rows(vec![
//!     vec!["5", "A1 2 *"],
//!     vec!["10 2 -", "A2 B1 +"],
//! ]);
//!
//! let calc = grid.calculate();
//! assert_eq!(calc.results.get_at(1, 1), Some(&CellOutcome::Number(18.0)));
//!
//! // Save to file
//! // calc.results.save("output.csv").unwrap();
//! ```

pub mod calculation;
pub mod prelude;

// Re-export calculation types
pub use calculation::{
    calculate_cell, Calculation, CalculationOptions, CalculationStats, GridCalculationExt,
};

// Re-export core types
pub use rpn_sheets_core::{
    CellAddress, CellError, CellOutcome, Error, EvaluatedGrid, Grid, Result,
};

// Re-export formula types
pub use rpn_sheets_formula::{
    evaluate, evaluate_cell, reduce, resolve, tokenize, CellContent, CellReference,
    CompletionPolicy, EvaluationState, FormulaError, FormulaResult, Operator, Token,
};

// Re-export I/O types
pub use rpn_sheets_csv::{
    CsvError, CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter, ErrorMarker, LineTerminator,
};

use std::path::Path;

fn is_tsv(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("tsv"))
        .unwrap_or(false)
}

/// Extension trait for Grid to add file input
pub trait GridExt {
    /// Open a grid from a `.csv` or `.tsv` file
    fn open<P: AsRef<Path>>(path: P) -> Result<Grid>;
}

impl GridExt for Grid {
    fn open<P: AsRef<Path>>(path: P) -> Result<Grid> {
        let path = path.as_ref();
        let options = if is_tsv(path) {
            CsvReadOptions::tsv()
        } else {
            CsvReadOptions::default()
        };

        CsvReader::read_file(path, &options).map_err(|e| Error::other(e.to_string()))
    }
}

/// Extension trait for EvaluatedGrid to add file output
pub trait EvaluatedGridExt {
    /// Save results to a `.csv` or `.tsv` file with the default `#ERR` marker
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()>;
}

impl EvaluatedGridExt for EvaluatedGrid {
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let options = if is_tsv(path) {
            CsvWriteOptions::tsv()
        } else {
            CsvWriteOptions::default()
        };

        CsvWriter::write_file(self, path, &options).map_err(|e| Error::other(e.to_string()))
    }
}
