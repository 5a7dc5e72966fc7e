//! Flatcalc - evaluate a plaintext spreadsheet into a file of values

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use flatcalc_core::storage::{parse_sheet, write_sheet};

/// Evaluate a plaintext spreadsheet.
///
/// Each input line is a row of comma-separated cells. A cell is blank, a
/// number, a reference such as `B3`, or `<a> <b> <op>` with op one of
/// `+ - * /`. The output holds every cell's value, each followed by a comma.
#[derive(Parser, Debug)]
#[command(version, about, long_about)]
struct Args {
    /// Sheet to evaluate
    input: PathBuf,

    /// Where to write the evaluated rows
    output: PathBuf,
}

fn run(args: &Args) -> anyhow::Result<()> {
    let mut sheet = parse_sheet(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    sheet.build_cell_graph()?;
    sheet.build_dependency_graph();
    sheet.validate()?;
    sheet.evaluate()?;

    write_sheet(&args.output, &sheet)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    log::debug!("evaluated {} cells", sheet.grid().len());
    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
