//! Command-line surface (spec.md §6).

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ncsat",
    about = "Solve non-consecutive Sudoku puzzles, or raw DIMACS CNF, via DPLL."
)]
pub struct Cli {
    /// Input file: a puzzle grid, or (with --sat) a DIMACS CNF document.
    /// A `.gz` suffix is decompressed transparently.
    #[arg(long = "in", value_name = "PATH")]
    pub input: PathBuf,

    /// Interpret --in as DIMACS CNF and print SAT/UNSAT instead of a grid.
    #[arg(long)]
    pub sat: bool,

    /// Under --sat, also print the satisfying model when SAT.
    #[arg(long, requires = "sat")]
    pub model: bool,

    /// Branching heuristic: "dlis" (default) or "vsids".
    #[arg(long, default_value = "dlis")]
    pub heuristic: HeuristicArg,

    /// Print solve-time statistics to stderr: clause/variable counts,
    /// elapsed time, and decision/propagation/conflict counters.
    #[arg(long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum HeuristicArg {
    Dlis,
    Vsids,
}

impl From<HeuristicArg> for ncsat::Heuristic {
    fn from(value: HeuristicArg) -> Self {
        match value {
            HeuristicArg::Dlis => ncsat::Heuristic::Dlis,
            HeuristicArg::Vsids => ncsat::Heuristic::Vsids,
        }
    }
}
