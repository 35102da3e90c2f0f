//! Grid types
//!
//! A [`Grid`] holds the raw text of every cell as loaded, row by row.
//! Rows may differ in length. Once built, a grid is never mutated; the
//! evaluator borrows it for the whole pass.
//!
//! An [`EvaluatedGrid`] is the result of evaluating a grid and always has
//! the same shape as its source.

use crate::cell::{CellAddress, CellOutcome};

/// Immutable table of raw cell text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    /// Create a grid from owned rows
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Create a grid from anything that yields rows of string-like cells
    pub fn from_rows<R, C, S>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Raw text of the cell at `addr`, or `None` if it lies outside the grid
    pub fn get(&self, addr: &CellAddress) -> Option<&str> {
        self.get_at(addr.row as usize, addr.col as usize)
    }

    /// Raw text of the cell at 0-based `(row, col)`
    pub fn get_at(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of cells in `row` (0 for rows past the end)
    pub fn row_len(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Vec::len)
    }

    /// Length of the longest row
    pub fn max_row_len(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Total number of cells across all rows
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Check if the grid has no cells at all
    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    /// Iterate over rows as slices of raw text
    pub fn rows(&self) -> impl Iterator<Item = &[String]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Iterate over all cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (CellAddress, &str)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, text)| (CellAddress::new(r as u32, c as u32), text.as_str()))
        })
    }
}

/// Same-shaped table of evaluation results
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluatedGrid {
    rows: Vec<Vec<CellOutcome>>,
}

impl EvaluatedGrid {
    /// Create an evaluated grid from owned rows
    pub fn new(rows: Vec<Vec<CellOutcome>>) -> Self {
        Self { rows }
    }

    /// Outcome of the cell at `addr`
    pub fn get(&self, addr: &CellAddress) -> Option<&CellOutcome> {
        self.get_at(addr.row as usize, addr.col as usize)
    }

    /// Outcome of the cell at 0-based `(row, col)`
    pub fn get_at(&self, row: usize, col: usize) -> Option<&CellOutcome> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of cells in `row`
    pub fn row_len(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Vec::len)
    }

    /// Iterate over rows
    pub fn rows(&self) -> impl Iterator<Item = &[CellOutcome]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Count the cells that failed to evaluate
    pub fn error_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|outcome| outcome.is_error())
            .count()
    }

    /// Check that this grid has exactly the row and column layout of `grid`
    pub fn has_shape_of(&self, grid: &Grid) -> bool {
        self.rows.len() == grid.row_count()
            && self
                .rows
                .iter()
                .enumerate()
                .all(|(r, row)| row.len() == grid.row_len(r))
    }

    /// Consume into the underlying rows
    pub fn into_rows(self) -> Vec<Vec<CellOutcome>> {
        self.rows
    }
}
