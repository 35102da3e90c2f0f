//! # rpn-sheets-core
//!
//! Core data structures for the rpn-sheets postfix grid evaluator.
//!
//! This crate provides the fundamental types used throughout rpn-sheets:
//! - [`Grid`] - The immutable table of raw cell text being evaluated
//! - [`EvaluatedGrid`] - The same-shaped table of results
//! - [`CellAddress`] - Cell addressing in `A1` notation
//! - [`CellOutcome`] and [`CellError`] - Per-cell results and error kinds
//!
//! ## Example
//!
//! ```rust
//! use rpn_sheets_core::{CellAddress, Grid};
//!
//! let grid = Grid::from_rows(vec![
//!     vec!["5", "A1 2 *"],
//!     vec!["3 4 +"],
//! ]);
//!
//! let addr = CellAddress::parse("B1").unwrap();
//! assert_eq!(grid.get(&addr), Some("A1 2 *"));
//! assert_eq!(grid.row_len(1), 1);
//! ```

pub mod cell;
pub mod error;
pub mod grid;

// Re-exports for convenience
pub use cell::{CellAddress, CellError, CellOutcome};
pub use error::{Error, Result};
pub use grid::{EvaluatedGrid, Grid};
