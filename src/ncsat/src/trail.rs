//! The assignment trail.
//!
//! Follows the `trail` / `trail_lim` split used throughout the pack's
//! MiniSat-family solvers (e.g. `Lipen-sat-nexus`'s `Solver`): `trail` is the
//! chronological sequence of assigned literals, and `trail_lim[i]` is the
//! trail length at the moment decision level `i + 1` was opened. Popping
//! back to a level is then "truncate the trail to `trail_lim[level]`"
//! rather than scanning for a per-entry level tag.

use crate::lbool::Lbool;
use crate::lit::{Lit, Var};

pub struct Trail {
    /// Chronological record of assigned literals.
    entries: Vec<Lit>,
    /// `trail_lim[i]` = length of `entries` when decision level `i + 1` began.
    lim: Vec<usize>,
    /// Per-variable assignment, `Undef` until decided or propagated.
    assigns: Vec<Lbool>,
    /// Per-variable decision level at which it was assigned; meaningless
    /// while the variable is unassigned.
    levels: Vec<i32>,
}

impl Trail {
    pub fn new(num_vars: usize) -> Self {
        Trail {
            entries: Vec::with_capacity(num_vars),
            lim: Vec::new(),
            assigns: vec![Lbool::Undef; num_vars],
            levels: vec![0; num_vars],
        }
    }

    #[inline]
    pub fn decision_level(&self) -> usize {
        self.lim.len()
    }

    #[inline]
    pub fn value(&self, lit: Lit) -> Lbool {
        self.assigns[lit.var().idx()].under(lit)
    }

    #[inline]
    pub fn value_var(&self, var: Var) -> Lbool {
        self.assigns[var.idx()]
    }

    #[inline]
    pub fn level_of(&self, var: Var) -> i32 {
        self.levels[var.idx()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn num_assigned(&self) -> usize {
        self.entries.len()
    }

    /// Open a new decision level. Must be called before the first
    /// assignment that belongs to that level.
    pub fn new_level(&mut self) {
        self.lim.push(self.entries.len());
    }

    /// Assign `lit` true at the current decision level. The variable must
    /// currently be unassigned; callers check `value()` first.
    pub fn push(&mut self, lit: Lit) {
        let var = lit.var();
        debug_assert!(self.assigns[var.idx()].is_undef());
        self.assigns[var.idx()] = Lbool::from_bool(lit.is_positive());
        self.levels[var.idx()] = self.decision_level() as i32;
        self.entries.push(lit);
    }

    /// Undo every assignment made at a decision level strictly greater than
    /// `target_level`, restoring those variables to `Undef`. Returns the
    /// literals undone, in reverse (most-recent-first) trail order — useful
    /// for heuristics that want to touch freed variables.
    pub fn undo_to(&mut self, target_level: usize) {
        if target_level >= self.lim.len() {
            return;
        }
        let cut = self.lim[target_level];
        while self.entries.len() > cut {
            let lit = self.entries.pop().unwrap();
            self.assigns[lit.var().idx()] = Lbool::Undef;
        }
        self.lim.truncate(target_level);
    }

    #[inline]
    pub fn iter_from(&self, pos: usize) -> impl Iterator<Item = Lit> + '_ {
        self.entries[pos..].iter().copied()
    }
}
