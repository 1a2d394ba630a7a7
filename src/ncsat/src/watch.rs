//! Per-literal watch lists.
//!
//! `watches[lit.code()]` holds the ids of every clause of length >= 2
//! currently watching `lit` — i.e. clauses that must be examined when `lit`
//! becomes false. Order within a list is not semantic (spec.md §9:
//! "swap-with-last is acceptable").

use crate::clause::ClauseId;
use crate::lit::Lit;

#[derive(Default)]
pub struct Watches {
    by_lit: Vec<Vec<ClauseId>>,
}

impl Watches {
    pub fn new(num_vars: usize) -> Self {
        Watches {
            by_lit: vec![Vec::new(); num_vars * 2],
        }
    }

    #[inline]
    pub fn add(&mut self, lit: Lit, clause: ClauseId) {
        self.by_lit[lit.code()].push(clause);
    }

    /// Remove `clause` from `lit`'s watch list. `clause` must currently be
    /// present; removal is swap-with-last (order is not semantic).
    #[inline]
    pub fn remove(&mut self, lit: Lit, clause: ClauseId) {
        let list = &mut self.by_lit[lit.code()];
        let pos = list
            .iter()
            .position(|&c| c == clause)
            .expect("watch invariant violated: clause not in its own watch list");
        list.swap_remove(pos);
    }

    /// Take the full watch list for `lit`, leaving an empty list behind.
    /// The caller re-populates it (directly or via [`Watches::add`]) while
    /// scanning, which is how MiniSat-family solvers avoid re-entrancy
    /// issues when a clause being scanned re-adds itself to the very list
    /// being iterated.
    #[inline]
    pub fn take(&mut self, lit: Lit) -> Vec<ClauseId> {
        std::mem::take(&mut self.by_lit[lit.code()])
    }

    #[inline]
    pub fn list(&self, lit: Lit) -> &[ClauseId] {
        &self.by_lit[lit.code()]
    }

    /// Install `list` as `lit`'s watch list, replacing whatever [`Watches::take`]
    /// left behind (normally empty, since callers repopulate via [`Watches::add`]
    /// for moved watches and pass the rest back here).
    #[inline]
    pub fn restore(&mut self, lit: Lit, list: Vec<ClauseId>) {
        self.by_lit[lit.code()] = list;
    }
}
