//! `ncsat` executable: wires the CLI surface onto the `ncsat` library.
//!
//! The gzip-transparent file open lives here because spec.md §1 scopes it
//! out of the core crate ("command-line driver, DIMACS parsing glue, ...
//! file I/O wrappers" are external collaborators); grid and DIMACS parsing
//! themselves are owned by `ncsat` (`encoder::encode_str`/`dimacs::parse`).

mod cli;

use clap::Parser;
use cli::Cli;
use cpu_time::ProcessTime;
use flate2::read::GzDecoder;
use ncsat::{
    decode_grid, encode_str, parse_dimacs, solve_with_stats, Error as NcsatError, SolverOpts,
    Stats, Verdict,
};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use thiserror::Error;

#[cfg(feature = "logging")]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}
#[cfg(not(feature = "logging"))]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Ncsat(#[from] NcsatError),
}

fn open_input(path: &Path) -> Result<Box<dyn Read>, CliError> {
    let file = File::open(path).map_err(|source| CliError::Open {
        path: path.display().to_string(),
        source,
    })?;
    if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        Ok(Box::new(GzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}

fn read_to_string(mut reader: impl Read, path: &Path) -> Result<String, CliError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|source| CliError::Open {
            path: path.display().to_string(),
            source,
        })?;
    Ok(text)
}

fn print_stats_if_verbose(verbose: bool, stats: &Stats, elapsed: std::time::Duration) {
    if verbose {
        eprintln!(
            "clauses={} vars={} decisions={} propagations={} conflicts={} elapsed={elapsed:?}",
            stats.clauses, stats.num_vars, stats.decisions, stats.propagations, stats.conflicts,
        );
    }
}

fn run() -> Result<(), CliError> {
    #[cfg(feature = "logging")]
    env_logger::init();

    let cli = Cli::parse();
    let reader = open_input(&cli.input)?;
    let opts = SolverOpts {
        heuristic: cli.heuristic.into(),
        ..SolverOpts::default()
    };

    let start = ProcessTime::now();

    if cli.sat {
        let dimacs = parse_dimacs(reader).map_err(NcsatError::from)?;
        let (verdict, stats) = solve_with_stats(dimacs.clauses, dimacs.num_vars, opts);
        log_info!("solve took {:?}", start.elapsed());
        print_stats_if_verbose(cli.verbose, &stats, start.elapsed());
        match verdict {
            Verdict::Sat(model) => {
                println!("SAT");
                if cli.model {
                    let rendered: Vec<String> = model.iter().map(i32::to_string).collect();
                    println!("{}", rendered.join(" "));
                }
            }
            Verdict::Unsat => println!("UNSAT"),
        }
    } else {
        let text = read_to_string(reader, &cli.input)?;
        let (clauses, num_vars) = encode_str(&text).map_err(NcsatError::from)?;
        let side = (num_vars as f64).cbrt().round() as usize;
        let (verdict, stats) = solve_with_stats(clauses, num_vars, opts);
        log_info!("solve took {:?}", start.elapsed());
        print_stats_if_verbose(cli.verbose, &stats, start.elapsed());
        match verdict {
            Verdict::Sat(model) => {
                let decoded = decode_grid(&model, side).map_err(NcsatError::from)?;
                for row in decoded {
                    let rendered: Vec<String> = row.iter().map(i32::to_string).collect();
                    println!("{}", rendered.join(" "));
                }
            }
            Verdict::Unsat => println!("UNSAT"),
        }
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("ncsat: {err}");
        std::process::exit(1);
    }
}
