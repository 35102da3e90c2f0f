//! Prelude module - common imports for rpn-sheets users
//!
//! ```rust
//! use rpn_sheets::prelude::*;
//! ```

pub use crate::{
    // Calculation types
    Calculation,
    CalculationOptions,
    CalculationStats,
    // Cell types
    CellAddress,
    CellError,
    CellOutcome,
    CompletionPolicy,
    // I/O types
    CsvReader,
    CsvWriter,
    // Error types
    Error,
    EvaluatedGrid,
    // Extension traits
    EvaluatedGridExt,
    FormulaError,
    // Main types
    Grid,
    GridCalculationExt,
    GridExt,
    Result,
};
