//! Branching heuristics.
//!
//! Two interchangeable strategies, both from spec.md §4.2 and both grounded
//! in the original distillation: the MOMS/DLIS-style "shortest unsatisfied
//! clause, most frequent literal" heuristic matches
//! `original_source/encoder.py`'s sibling solver's `choose_branch_literal`
//! exactly (restrict to minimum-unassigned-length clauses, tally literal
//! occurrences, pick the max); VSIDS matches
//! `original_source/solPab.py`'s `_bump_activity`/`_decay_activities`
//! constants (decay 0.95, rescale ceiling `1e100`).
//!
//! Neither changes the SAT/UNSAT verdict, only which branch is tried first
//! (spec.md: "Behavioral equivalence ... is required regardless of choice").

use crate::clause::Clause;
use crate::lbool::Lbool;
use crate::lit::{Lit, Var};
use crate::trail::Trail;

/// Which branching strategy `Solver::solve` should use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Heuristic {
    /// Shortest-unsatisfied-clause literal tally (default; spec.md's "DLIS/MOM-style").
    #[default]
    Dlis,
    /// Variable State Independent Decaying Sum.
    Vsids,
}

/// Rescale ceiling for VSIDS activity, per spec.md §3 ("e.g., 1e100").
const ACTIVITY_CEILING: f64 = 1e100;
const ACTIVITY_RESCALE: f64 = 1e-100;

/// VSIDS bookkeeping: one activity score per variable, a global bump
/// increment, and a decay factor applied to the increment (not the scores)
/// on every conflict — the standard "increment divided by decay" EVSIDS
/// variant, same as `original_source/solPab.py`.
pub struct Vsids {
    activity: Vec<f64>,
    increment: f64,
    decay: f64,
}

impl Vsids {
    pub fn new(num_vars: usize, decay: f64) -> Self {
        Vsids {
            activity: vec![0.0; num_vars],
            increment: 1.0,
            decay,
        }
    }

    /// Bump every variable occurring in `clause` (spec.md: "bump the
    /// activity of variables appearing in the conflict's clauses").
    pub fn bump_clause(&mut self, clause: &Clause) {
        for &lit in clause.as_slice() {
            self.bump_var(lit.var());
        }
    }

    pub fn bump_var(&mut self, var: Var) {
        self.activity[var.idx()] += self.increment;
        if self.activity[var.idx()] > ACTIVITY_CEILING {
            for a in &mut self.activity {
                *a *= ACTIVITY_RESCALE;
            }
            self.increment *= ACTIVITY_RESCALE;
        }
    }

    /// Called once per conflict: shrink the decay-adjusted increment so
    /// future bumps count for relatively more than older ones.
    pub fn decay_increment(&mut self) {
        self.increment /= self.decay;
    }

    fn best_unassigned(&self, trail: &Trail) -> Option<Var> {
        let mut best: Option<(Var, f64)> = None;
        for (idx, &act) in self.activity.iter().enumerate() {
            let var = Var::new(idx as u32);
            if trail.value_var(var).is_undef() {
                match best {
                    Some((_, best_act)) if best_act >= act => {}
                    _ => best = Some((var, act)),
                }
            }
        }
        best.map(|(v, _)| v)
    }
}

/// Pick the next decision literal (polarity chosen positive-first, per
/// spec.md's "Branch with the chosen literal's polarity first" for DLIS;
/// VSIDS has no polarity preference of its own so this build also defaults
/// to positive, matching spec.md's "convention: positive" used elsewhere).
pub fn pick_literal(
    heuristic: Heuristic,
    clauses: &[Clause],
    trail: &Trail,
    vsids: &mut Option<Vsids>,
) -> Option<Lit> {
    match heuristic {
        Heuristic::Dlis => pick_dlis(clauses, trail),
        Heuristic::Vsids => {
            let vsids = vsids
                .as_mut()
                .expect("VSIDS heuristic selected without VSIDS state");
            vsids.best_unassigned(trail).map(|v| Lit::new(v, true))
        }
    }
}

fn clause_status(clause: &Clause, trail: &Trail) -> ClauseStatus {
    let mut unassigned = 0usize;
    for &lit in clause.as_slice() {
        match trail.value(lit) {
            Lbool::True => return ClauseStatus::Satisfied,
            Lbool::Undef => unassigned += 1,
            Lbool::False => {}
        }
    }
    ClauseStatus::Open(unassigned)
}

enum ClauseStatus {
    Satisfied,
    Open(usize),
}

fn pick_dlis(clauses: &[Clause], trail: &Trail) -> Option<Lit> {
    let mut min_len: Option<usize> = None;
    for clause in clauses {
        if let ClauseStatus::Open(n) = clause_status(clause, trail) {
            if n > 0 && min_len.map_or(true, |m| n < m) {
                min_len = Some(n);
            }
        }
    }
    let min_len = min_len?;

    let mut counts: std::collections::HashMap<Lit, usize> = std::collections::HashMap::new();
    for clause in clauses {
        if let ClauseStatus::Open(n) = clause_status(clause, trail) {
            if n != min_len {
                continue;
            }
            for &lit in clause.as_slice() {
                if trail.value(lit).is_undef() {
                    *counts.entry(lit).or_insert(0) += 1;
                }
            }
        }
    }

    // Deterministic tie-break: highest count, then lowest literal code, by
    // scanning clauses/literals in a fixed order and keeping the first
    // strictly-better candidate.
    let mut best: Option<(Lit, usize)> = None;
    for clause in clauses {
        if let ClauseStatus::Open(n) = clause_status(clause, trail) {
            if n != min_len {
                continue;
            }
            for &lit in clause.as_slice() {
                if !trail.value(lit).is_undef() {
                    continue;
                }
                let count = counts[&lit];
                match best {
                    Some((_, best_count)) if best_count >= count => {}
                    _ => best = Some((lit, count)),
                }
            }
        }
    }
    best.map(|(lit, _)| lit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::Lits;

    fn lits(raw: &[i32]) -> Lits {
        raw.iter().map(|&r| Lit::from_dimacs(r)).collect()
    }

    #[test]
    fn dlis_prefers_most_frequent_literal_in_shortest_clause() {
        let clauses = vec![
            Clause::new(lits(&[1, 2, 3])),
            Clause::new(lits(&[1, 2])),
            Clause::new(lits(&[-1, 2])),
        ];
        let trail = Trail::new(3);
        let lit = pick_dlis(&clauses, &trail).unwrap();
        // shortest clauses (len 2) are [1,2] and [-1,2]; literal 2 occurs in
        // both, 1 and -1 occur once each, so 2 must win.
        assert_eq!(lit.to_dimacs(), 2);
    }

    #[test]
    fn dlis_skips_satisfied_clauses() {
        let clauses = vec![Clause::new(lits(&[1, 2])), Clause::new(lits(&[3, 4]))];
        let mut trail = Trail::new(4);
        trail.push(Lit::from_dimacs(1));
        let lit = pick_dlis(&clauses, &trail).unwrap();
        assert!([3, 4, -3, -4].contains(&lit.to_dimacs()));
    }

    #[test]
    fn vsids_rescales_past_ceiling() {
        let mut v = Vsids::new(2, 0.95);
        v.activity[0] = ACTIVITY_CEILING * 2.0;
        v.bump_var(Var::new(1));
        assert!(v.activity[0] < 1.0);
    }
}
