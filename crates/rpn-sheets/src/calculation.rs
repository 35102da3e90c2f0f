//! Grid calculation engine
//!
//! Evaluates every cell of a [`Grid`] in row-major order. Each cell gets its
//! own [`EvaluationState`], so nothing learned while evaluating one cell is
//! carried into the next. A failing cell records an error marker and the
//! pass moves on; one bad cell never stops the grid.
//!
//! # Example
//!
//! ```rust
//! use rpn_sheets::prelude::*;
//!
//! let grid = Grid::from_rows(vec![vec!["5", "A1 2 *", "5 0 /"]]);
//! let calc = grid.calculate();
//!
//! assert_eq!(calc.results.get_at(0, 1), Some(&CellOutcome::Number(10.0)));
//! assert_eq!(calc.results.get_at(0, 2), Some(&CellOutcome::Error(CellError::Div0)));
//! assert_eq!(calc.stats.errors, 1);
//! ```

use crate::{
    evaluate_cell, CellAddress, CellError, CellOutcome, CompletionPolicy, EvaluatedGrid,
    EvaluationState, FormulaError, FormulaResult, Grid,
};
use tracing::{debug, info};

/// Options for grid calculation
#[derive(Debug, Clone, Default)]
pub struct CalculationOptions {
    /// How references already resolved for the current cell are re-read
    pub completion: CompletionPolicy,
}

/// Statistics from a calculation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalculationStats {
    /// Number of cells evaluated
    pub cells_calculated: usize,
    /// Number of cells that produced a number
    pub numbers: usize,
    /// Number of cells that produced an error marker
    pub errors: usize,
    /// Number of cells whose error was a cyclic reference
    pub circular_references: usize,
}

/// Result of calculating a grid
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    /// One outcome per input cell, same shape as the input
    pub results: EvaluatedGrid,
    /// Summary counts
    pub stats: CalculationStats,
}

/// Extension trait adding calculation to [`Grid`]
pub trait GridCalculationExt {
    /// Evaluate every cell with default options
    fn calculate(&self) -> Calculation;

    /// Evaluate every cell with the given options
    fn calculate_with_options(&self, options: &CalculationOptions) -> Calculation;
}

impl GridCalculationExt for Grid {
    fn calculate(&self) -> Calculation {
        self.calculate_with_options(&CalculationOptions::default())
    }

    fn calculate_with_options(&self, options: &CalculationOptions) -> Calculation {
        CalculationEngine::new(self, options).calculate_all()
    }
}

/// Evaluate the single cell at `addr` as a top-level cell
///
/// Fails with [`FormulaError::InvalidCellReference`] if `addr` is outside
/// the grid.
pub fn calculate_cell(
    grid: &Grid,
    addr: &CellAddress,
    options: &CalculationOptions,
) -> FormulaResult<f64> {
    let raw = grid
        .get(addr)
        .ok_or_else(|| FormulaError::InvalidCellReference(addr.to_string()))?;
    let mut state = EvaluationState::with_policy(options.completion);
    evaluate_cell(raw, grid, &mut state)
}

/// Calculation engine state
struct CalculationEngine<'a> {
    grid: &'a Grid,
    options: &'a CalculationOptions,
}

impl<'a> CalculationEngine<'a> {
    fn new(grid: &'a Grid, options: &'a CalculationOptions) -> Self {
        Self { grid, options }
    }

    fn calculate_all(&self) -> Calculation {
        let mut stats = CalculationStats::default();

        let rows = self
            .grid
            .rows()
            .enumerate()
            .map(|(r, row)| {
                row.iter()
                    .enumerate()
                    .map(|(c, raw)| {
                        let addr = CellAddress::new(r as u32, c as u32);
                        let outcome = self.calculate_cell(&addr, raw);
                        stats.record(&outcome);
                        outcome
                    })
                    .collect()
            })
            .collect();

        info!(
            "Calculated {} cells ({} errors, {} cyclic)",
            stats.cells_calculated, stats.errors, stats.circular_references
        );

        Calculation {
            results: EvaluatedGrid::new(rows),
            stats,
        }
    }

    fn calculate_cell(&self, addr: &CellAddress, raw: &str) -> CellOutcome {
        debug!("Evaluating {addr}: '{raw}'");

        // Fresh state per top-level cell
        let mut state = EvaluationState::with_policy(self.options.completion);

        match evaluate_cell(raw, self.grid, &mut state) {
            Ok(value) => {
                debug!("{addr} = {value}");
                CellOutcome::Number(value)
            }
            Err(e) => {
                debug!("{addr} failed: {e}");
                CellOutcome::Error(e.cell_error())
            }
        }
    }
}

impl CalculationStats {
    fn record(&mut self, outcome: &CellOutcome) {
        self.cells_calculated += 1;
        match outcome {
            CellOutcome::Number(_) => self.numbers += 1,
            CellOutcome::Error(e) => {
                self.errors += 1;
                if *e == CellError::Cycle {
                    self.circular_references += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> CellOutcome {
        CellOutcome::Number(n)
    }

    fn err(e: CellError) -> CellOutcome {
        CellOutcome::Error(e)
    }

    #[test]
    fn test_simple_calculation() {
        let grid = Grid::from_rows(vec![vec!["3 4 +", "10 2 /", "5 0 /"]]);
        let calc = grid.calculate();

        assert_eq!(
            calc.results.into_rows(),
            vec![vec![num(7.0), num(5.0), err(CellError::Div0)]]
        );
        assert_eq!(calc.stats.cells_calculated, 3);
        assert_eq!(calc.stats.numbers, 2);
        assert_eq!(calc.stats.errors, 1);
    }

    #[test]
    fn test_chain_calculation() {
        let grid = Grid::from_rows(vec![
            vec!["5", "A1 2 *"],
            vec!["B1 10 +", "A2 A1 *"],
        ]);
        let calc = grid.calculate();

        assert_eq!(calc.results.get_at(0, 1), Some(&num(10.0)));
        assert_eq!(calc.results.get_at(1, 0), Some(&num(20.0)));
        assert_eq!(calc.results.get_at(1, 1), Some(&num(100.0)));
        assert_eq!(calc.stats.errors, 0);
    }

    #[test]
    fn test_circular_reference_detection() {
        // A1 = B1, B1 = A1
        let grid = Grid::from_rows(vec![vec!["B1", "A1"], vec!["A2 1 +"]]);
        let calc = grid.calculate();

        assert_eq!(calc.results.get_at(0, 0), Some(&err(CellError::Cycle)));
        assert_eq!(calc.results.get_at(0, 1), Some(&err(CellError::Cycle)));
        assert_eq!(calc.results.get_at(1, 0), Some(&err(CellError::Cycle)));
        assert_eq!(calc.stats.circular_references, 3);
        assert_eq!(calc.stats.errors, 3);
    }

    #[test]
    fn test_error_does_not_stop_grid() {
        let grid = Grid::from_rows(vec![vec!["Z99", "1 2 +", "oops", "4"]]);
        let calc = grid.calculate();

        assert_eq!(
            calc.results.into_rows(),
            vec![vec![
                err(CellError::Ref),
                num(3.0),
                err(CellError::Token),
                num(4.0),
            ]]
        );
    }

    #[test]
    fn test_cells_do_not_share_state() {
        // B1 and C1 both depend on A1; if state leaked between cells the
        // second would see A1 as completed or in progress
        let grid = Grid::from_rows(vec![vec!["2", "A1 A1 *", "A1 B1 +"]]);

        for completion in [CompletionPolicy::Rewalk, CompletionPolicy::Cache] {
            let calc = grid.calculate_with_options(&CalculationOptions { completion });
            assert_eq!(
                calc.results.into_rows(),
                vec![vec![num(2.0), num(4.0), num(6.0)]]
            );
        }
    }

    #[test]
    fn test_calculate_single_cell() {
        let grid = Grid::from_rows(vec![vec!["5", "A1 2 *"]]);
        let options = CalculationOptions::default();

        assert_eq!(
            calculate_cell(&grid, &CellAddress::new(0, 1), &options),
            Ok(10.0)
        );
        assert_eq!(
            calculate_cell(&grid, &CellAddress::new(3, 0), &options),
            Err(FormulaError::InvalidCellReference("A4".into()))
        );
    }
}
