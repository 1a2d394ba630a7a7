//! DIMACS CNF parsing (spec.md §4.3).
//!
//! Accepts the standard format: blank lines and `c`-prefixed comment lines
//! are ignored, a single `p cnf <vars> <clauses>` header declares the
//! problem size, and every following `0`-terminated run of nonzero signed
//! integers is one clause. Clauses may span multiple lines, matching the
//! permissive reading used by most DIMACS producers (and accepted by
//! `original_source/solPab.py`'s own loader).

use crate::error::DimacsError;
use std::io::{BufRead, BufReader, Read};

pub struct Dimacs {
    pub num_vars: usize,
    pub clauses: Vec<Vec<i32>>,
}

/// Parse a complete DIMACS document from any reader (a plain file, or a
/// `flate2` decoder wrapping a gzip file — the caller picks, this function
/// only needs `Read`).
pub fn parse<R: Read>(reader: R) -> Result<Dimacs, DimacsError> {
    let reader = BufReader::new(reader);
    let mut num_vars = None;
    let mut declared_clauses = None;
    let mut clauses = Vec::new();
    let mut current: Vec<i32> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('c') {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix('p') {
            let fields: Vec<&str> = rest.split_whitespace().collect();
            if fields.len() != 3 || fields[0] != "cnf" {
                return Err(DimacsError::MissingHeader {
                    line: line_no,
                    found: trimmed.to_string(),
                });
            }
            let v = fields[1]
                .parse::<usize>()
                .map_err(|_| DimacsError::BadHeaderField {
                    line: line_no,
                    field: fields[1].to_string(),
                })?;
            let c = fields[2]
                .parse::<usize>()
                .map_err(|_| DimacsError::BadHeaderField {
                    line: line_no,
                    field: fields[2].to_string(),
                })?;
            num_vars = Some(v);
            declared_clauses = Some(c);
            continue;
        }

        let max_var = num_vars.unwrap_or(0) as i64;
        for token in trimmed.split_whitespace() {
            let value = token
                .parse::<i32>()
                .map_err(|_| DimacsError::BadLiteral {
                    line: line_no,
                    value: token.to_string(),
                })?;
            if value == 0 {
                clauses.push(std::mem::take(&mut current));
                continue;
            }
            if max_var > 0 && (value as i64).abs() > max_var {
                return Err(DimacsError::VariableOutOfRange {
                    line: line_no,
                    var: value as i64,
                    max: max_var as usize,
                });
            }
            current.push(value);
        }
    }

    if !current.is_empty() {
        clauses.push(current);
    }

    let num_vars = num_vars.ok_or(DimacsError::MissingHeader {
        line: 0,
        found: "<eof>".to_string(),
    })?;

    if let Some(expected) = declared_clauses {
        if expected != clauses.len() {
            return Err(DimacsError::ClauseCountMismatch {
                expected,
                found: clauses.len(),
            });
        }
    }

    Ok(Dimacs { num_vars, clauses })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_document() {
        let doc = "c a comment\np cnf 3 2\n1 -2 0\n2 3 0\n";
        let parsed = parse(doc.as_bytes()).unwrap();
        assert_eq!(parsed.num_vars, 3);
        assert_eq!(parsed.clauses, vec![vec![1, -2], vec![2, 3]]);
    }

    #[test]
    fn clause_may_span_multiple_lines() {
        let doc = "p cnf 3 1\n1 -2\n3 0\n";
        let parsed = parse(doc.as_bytes()).unwrap();
        assert_eq!(parsed.clauses, vec![vec![1, -2, 3]]);
    }

    #[test]
    fn rejects_missing_header() {
        let doc = "1 -2 0\n";
        assert!(matches!(
            parse(doc.as_bytes()),
            Err(DimacsError::MissingHeader { .. })
        ));
    }

    #[test]
    fn rejects_clause_count_mismatch() {
        let doc = "p cnf 2 5\n1 2 0\n";
        assert!(matches!(
            parse(doc.as_bytes()),
            Err(DimacsError::ClauseCountMismatch {
                expected: 5,
                found: 1
            })
        ));
    }

    #[test]
    fn rejects_out_of_range_variable() {
        let doc = "p cnf 2 1\n1 5 0\n";
        assert!(matches!(
            parse(doc.as_bytes()),
            Err(DimacsError::VariableOutOfRange { .. })
        ));
    }

    #[test]
    fn empty_clause_is_preserved() {
        let doc = "p cnf 1 1\n0\n";
        let parsed = parse(doc.as_bytes()).unwrap();
        assert_eq!(parsed.clauses, vec![Vec::<i32>::new()]);
    }
}
