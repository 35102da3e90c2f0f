//! Formula error types

use rpn_sheets_core::CellError;
use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur while evaluating a single cell
///
/// Every variant is local to the cell being evaluated; none of them stop
/// the rest of the grid from being evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    /// Token is not a number, operator, or reference
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Reference points outside the grid
    #[error("Invalid cell reference: {0}")]
    InvalidCellReference(String),

    /// Referenced cell is neither a number, a reference, nor an expression
    #[error("Invalid cell content in {reference}: '{content}'")]
    InvalidCellContent { reference: String, content: String },

    /// Reference is already being resolved on the current path
    #[error("Cyclic reference detected: {0}")]
    CyclicReference(String),

    /// Operator applied with fewer than two operands on the stack
    #[error("Stack underflow at operator '{operator}'")]
    StackUnderflow { operator: char },

    /// Expression did not reduce to exactly one value
    #[error("Malformed expression: {remaining} values left on the stack")]
    MalformedExpression { remaining: usize },

    /// Division by a zero right-hand operand
    #[error("Division by zero")]
    DivisionByZero,
}

impl FormulaError {
    /// The error kind recorded in the result grid
    pub fn cell_error(&self) -> CellError {
        match self {
            FormulaError::InvalidToken(_) => CellError::Token,
            FormulaError::InvalidCellReference(_) => CellError::Ref,
            FormulaError::InvalidCellContent { .. } => CellError::Value,
            FormulaError::CyclicReference(_) => CellError::Cycle,
            FormulaError::StackUnderflow { .. } | FormulaError::MalformedExpression { .. } => {
                CellError::Expr
            }
            FormulaError::DivisionByZero => CellError::Div0,
        }
    }
}
