//! rpn CLI - evaluate grids of postfix expressions

use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};
use rpn_sheets::prelude::*;
use rpn_sheets::{CellContent, CsvReadOptions, CsvWriteOptions, ErrorMarker};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rpn")]
#[command(author, version, about = "Evaluate CSV grids of postfix expressions")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate every cell and write the results as CSV
    #[command(alias = "e")]
    Eval {
        /// Input grid file (csv, tsv)
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Field delimiter (default: tab for .tsv, comma otherwise)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Write a code per failure kind (#DIV/0!, #REF!, ...) instead of one marker
        #[arg(long, conflicts_with = "error_marker")]
        detailed_errors: bool,

        /// Marker written for failed cells
        #[arg(long, default_value = "#ERR")]
        error_marker: String,

        /// Cache values of references already resolved within a cell
        #[arg(long)]
        cache: bool,
    },

    /// Show information about a grid
    Info {
        /// Input grid file
        input: PathBuf,

        /// Field delimiter (default: tab for .tsv, comma otherwise)
        #[arg(short, long)]
        delimiter: Option<char>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Eval {
            input,
            output,
            delimiter,
            detailed_errors,
            error_marker,
            cache,
        } => {
            let marker = if detailed_errors {
                ErrorMarker::Detailed
            } else {
                ErrorMarker::Uniform(error_marker)
            };
            let completion = if cache {
                CompletionPolicy::Cache
            } else {
                CompletionPolicy::Rewalk
            };
            eval(&input, output.as_deref(), delimiter, marker, completion)
        }
        Commands::Info { input, delimiter } => show_info(&input, delimiter),
    }
}

fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_logging(verbose: u8) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn delimiter_byte(delimiter: Option<char>, input: &Path) -> Result<u8> {
    match delimiter {
        Some(c) => {
            ensure!(c.is_ascii(), "Delimiter must be an ASCII character, got '{}'", c);
            Ok(c as u8)
        }
        None => {
            let is_tsv = input
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("tsv"))
                .unwrap_or(false);
            Ok(if is_tsv { b'\t' } else { b',' })
        }
    }
}

fn load(input: &Path, delimiter: u8) -> Result<Grid> {
    let options = CsvReadOptions {
        delimiter,
        ..Default::default()
    };
    CsvReader::read_file(input, &options)
        .with_context(|| format!("Failed to open '{}'", input.display()))
}

fn eval(
    input: &Path,
    output: Option<&Path>,
    delimiter: Option<char>,
    error_marker: ErrorMarker,
    completion: CompletionPolicy,
) -> Result<()> {
    let delimiter = delimiter_byte(delimiter, input)?;
    let grid = load(input, delimiter)?;

    if grid.is_empty() {
        warn!("Grid in '{}' appears to be empty", input.display());
    }

    let calc = grid.calculate_with_options(&CalculationOptions { completion });

    info!(
        cells = calc.stats.cells_calculated,
        errors = calc.stats.errors,
        cyclic = calc.stats.circular_references,
        "Evaluated '{}'",
        input.display()
    );

    let options = CsvWriteOptions {
        delimiter,
        error_marker,
        ..Default::default()
    };

    if let Some(output_path) = output {
        CsvWriter::write_file(&calc.results, output_path, &options)
            .with_context(|| format!("Failed to write '{}'", output_path.display()))?;
        info!(
            "Wrote {} rows to '{}'",
            calc.results.row_count(),
            output_path.display()
        );
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        CsvWriter::write(&calc.results, &mut handle, &options)
            .context("Failed to write to stdout")?;
        handle.flush().context("Failed to write to stdout")?;
    }

    Ok(())
}

fn show_info(input: &Path, delimiter: Option<char>) -> Result<()> {
    let delimiter = delimiter_byte(delimiter, input)?;
    let grid = load(input, delimiter)?;

    let (mut numbers, mut references, mut expressions, mut other) = (0, 0, 0, 0);
    for (_, raw) in grid.cells() {
        match CellContent::classify(raw) {
            CellContent::Number(_) => numbers += 1,
            CellContent::Reference(_) => references += 1,
            CellContent::Expression(_) => expressions += 1,
            CellContent::Other => other += 1,
        }
    }

    println!("File: {}", input.display());
    println!(
        "Grid: {} rows x {} columns (widest row)",
        grid.row_count(),
        grid.max_row_len()
    );
    println!("Cells: {}", grid.cell_count());
    println!("  Numbers:     {}", numbers);
    println!("  References:  {}", references);
    println!("  Expressions: {}", expressions);
    println!("  Other:       {}", other);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(0), "warn");
        assert_eq!(log_level(1), "info");
        assert_eq!(log_level(2), "debug");
        assert_eq!(log_level(3), "trace");
        assert_eq!(log_level(9), "trace");
    }

    #[test]
    fn test_delimiter_byte() {
        let csv = Path::new("grid.csv");
        let tsv = Path::new("grid.TSV");

        assert_eq!(delimiter_byte(None, csv).unwrap(), b',');
        assert_eq!(delimiter_byte(None, tsv).unwrap(), b'\t');
        assert_eq!(delimiter_byte(Some(';'), tsv).unwrap(), b';');
        assert!(delimiter_byte(Some('é'), csv).is_err());
    }

    #[test]
    fn test_cli_parses_eval_flags() {
        let cli =
            Cli::try_parse_from(["rpn", "-vv", "eval", "in.csv", "--detailed-errors"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Commands::Eval { detailed_errors: true, cache: false, .. }
        ));

        let conflict = Cli::try_parse_from([
            "rpn",
            "eval",
            "in.csv",
            "--detailed-errors",
            "--error-marker",
            "X",
        ]);
        assert!(conflict.is_err());
    }
}
