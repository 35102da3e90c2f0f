//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellOutcome`] - The evaluated result of a cell
//! - [`CellError`] - The kind of failure recorded for a cell

mod address;
mod value;

pub use address::CellAddress;
pub use value::{CellError, CellOutcome};
