//! # rpn-sheets-formula
//!
//! Postfix expression evaluation for rpn-sheets.
//!
//! This crate provides:
//! - Tokenization and classification of cell text (text → [`Token`]s)
//! - Recursive cell-reference resolution with cycle detection
//! - Stack-based reduction of postfix token sequences
//!
//! ## Example
//!
//! ```rust
//! use rpn_sheets_core::Grid;
//! use rpn_sheets_formula::{evaluate_cell, EvaluationState};
//!
//! let grid = Grid::from_rows(vec![vec!["5", "A1 2 *"]]);
//! let mut state = EvaluationState::new();
//!
//! let value = evaluate_cell("A1 2 *", &grid, &mut state).unwrap();
//! assert_eq!(value, 10.0);
//! ```

pub mod error;
pub mod evaluator;
pub mod resolver;
pub mod token;

pub use error::{FormulaError, FormulaResult};
pub use evaluator::{evaluate, evaluate_cell, reduce};
pub use resolver::{resolve, CompletionPolicy, EvaluationState};
pub use token::{tokenize, CellContent, CellReference, Operator, Token};
