//! Example: evaluate a small grid and print the results as CSV

use rpn_sheets::prelude::*;
use rpn_sheets::CsvWriteOptions;

fn main() -> Result<()> {
    let grid = Grid::from_rows(vec![
        vec!["5", "A1 2 *", "3 4 +"],
        vec!["10 2 -", "B1 A2 /"],
        vec!["C3", "5 0 /"],
    ]);

    let calc = grid.calculate();

    println!(
        "Calculated {} cells ({} errors)",
        calc.stats.cells_calculated, calc.stats.errors
    );

    CsvWriter::write(&calc.results, std::io::stdout(), &CsvWriteOptions::default())
        .map_err(|e| Error::other(e.to_string()))?;

    Ok(())
}
