//! Error taxonomy for the `ncsat` crate.
//!
//! One `thiserror` enum per concern (DIMACS parsing, encoding) plus an
//! aggregate [`Error`] that wraps each with `#[from]`, following the
//! per-module-then-aggregate layering in `alexykn-sps2`'s `errors` crate
//! rather than a single flat enum.

use thiserror::Error;

/// Failures while parsing a DIMACS CNF document (spec.md §4.3).
#[derive(Debug, Error)]
pub enum DimacsError {
    #[error("line {line}: expected 'p cnf <vars> <clauses>' header, found {found:?}")]
    MissingHeader { line: usize, found: String },

    #[error("line {line}: malformed header field {field:?}")]
    BadHeaderField { line: usize, field: String },

    #[error("line {line}: literal {value:?} is not a valid nonzero integer")]
    BadLiteral { line: usize, value: String },

    #[error(
        "expected {expected} clauses per header, found {found}"
    )]
    ClauseCountMismatch { expected: usize, found: usize },

    #[error("clause on line {line} references variable {var}, outside declared range 1..={max}")]
    VariableOutOfRange { line: usize, var: i64, max: usize },

    #[error("I/O error reading DIMACS input: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while encoding a non-consecutive Sudoku grid into CNF
/// (spec.md §4.1).
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("grid side length {0} is not a perfect square (required for box constraints)")]
    NotPerfectSquare(usize),

    #[error("grid side length must be at least 1, got {0}")]
    EmptySide(usize),

    #[error("clue at row {row}, col {col} has value {value}, outside 1..={max}")]
    ClueOutOfRange {
        row: usize,
        col: usize,
        value: i32,
        max: usize,
    },

    #[error("row {row} has {cols} columns, expected {expected}")]
    ColCountMismatch { row: usize, cols: usize, expected: usize },

    #[error("line {line}: token {token:?} is not a valid integer")]
    BadToken { line: usize, token: String },

    #[error("I/O error reading puzzle grid: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while decoding a solver model back into a grid (spec.md §4.4).
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("model has {found} entries, expected at least {expected} for a {side}x{side} grid")]
    ModelTooShort {
        found: usize,
        expected: usize,
        side: usize,
    },

    #[error("cell ({row}, {col}) has no true value assigned among 1..={side}")]
    CellUnassigned { row: usize, col: usize, side: usize },

    #[error("cell ({row}, {col}) has multiple true values assigned: {first} and {second}")]
    CellOverassigned {
        row: usize,
        col: usize,
        first: i32,
        second: i32,
    },
}

/// The crate-wide error type returned by its public, fallible entry points.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Dimacs(#[from] DimacsError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
