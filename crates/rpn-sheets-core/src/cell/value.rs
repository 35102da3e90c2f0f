//! Cell outcome types

use std::fmt;

/// The evaluated result of a single cell
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellOutcome {
    /// The cell reduced to a number
    Number(f64),

    /// The cell failed to evaluate
    Error(CellError),
}

impl CellOutcome {
    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellOutcome::Number(n) => Some(*n),
            CellOutcome::Error(_) => None,
        }
    }

    /// Check if the cell contains an error
    pub fn is_error(&self) -> bool {
        matches!(self, CellOutcome::Error(_))
    }

    /// Get the error if this is one
    pub fn get_error(&self) -> Option<CellError> {
        match self {
            CellOutcome::Error(e) => Some(*e),
            CellOutcome::Number(_) => None,
        }
    }
}

impl From<f64> for CellOutcome {
    fn from(n: f64) -> Self {
        CellOutcome::Number(n)
    }
}

impl From<CellError> for CellOutcome {
    fn from(e: CellError) -> Self {
        CellOutcome::Error(e)
    }
}

/// Kinds of per-cell evaluation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellError {
    /// #TOKEN! - A token is not a number, operator, or reference
    Token,
    /// #REF! - Reference outside the grid
    Ref,
    /// #VALUE! - Referenced cell holds unusable content
    Value,
    /// #CYCLE! - Reference chain revisits a cell on the active path
    Cycle,
    /// #EXPR! - Postfix sequence does not reduce to exactly one value
    Expr,
    /// #DIV/0! - Division by zero
    Div0,
}

impl CellError {
    /// Get the display string for this error
    pub fn as_str(&self) -> &'static str {
        match self {
            CellError::Token => "#TOKEN!",
            CellError::Ref => "#REF!",
            CellError::Value => "#VALUE!",
            CellError::Cycle => "#CYCLE!",
            CellError::Expr => "#EXPR!",
            CellError::Div0 => "#DIV/0!",
        }
    }

    /// Parse an error string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "#TOKEN!" => Some(CellError::Token),
            "#REF!" => Some(CellError::Ref),
            "#VALUE!" => Some(CellError::Value),
            "#CYCLE!" => Some(CellError::Cycle),
            "#EXPR!" => Some(CellError::Expr),
            "#DIV/0!" => Some(CellError::Div0),
            _ => None,
        }
    }
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
