//! Non-consecutive Sudoku encoder and DPLL/2WL SAT solver core.
//!
//! The solver (`solver` module) is the load-bearing piece: an iterative
//! DPLL engine over two-watched-literal clauses, no clause learning, no
//! restarts. The encoder (`encoder` module) maps non-consecutive Sudoku
//! grids onto CNF instances the solver consumes. `dimacs` and `decoder`
//! are the ambient glue that let both be driven from plain files and
//! produce plain grids; see `ncsat-bin` for the executable that wires
//! them together.

pub mod clause;
pub mod decoder;
pub mod dimacs;
pub mod encoder;
pub mod error;
pub mod heuristic;
pub mod lbool;
pub mod lit;
pub mod solver;
pub mod trail;
pub mod watch;

pub use decoder::decode_grid;
pub use dimacs::{parse as parse_dimacs, Dimacs};
pub use encoder::{encode_grid, encode_path, encode_str, Grid};
pub use error::{DecodeError, DimacsError, EncodeError, Error};
pub use heuristic::Heuristic;
pub use solver::{solve, solve_with_stats, SolverOpts, Stats, Verdict};
