use std::fmt;

use crate::solver::{literal::Literal, variable::VariableValue};

/// Clause reference type; position of the clause in the clause store
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ClauseRef {
    repr: usize,
}

impl ClauseRef {
    /// New clause reference
    #[must_use]
    pub const fn from_idx(idx: usize) -> Self {
        ClauseRef { repr: idx }
    }

    /// Index
    #[must_use]
    pub const fn idx(&self) -> usize {
        self.repr
    }
}

impl fmt::Display for ClauseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.repr)
    }
}

/// A non-empty disjunction of literals with two watch slots.
///
/// The watch slots are positions into `literals`. They start at the first and
/// the last position (both at 0 for a unit clause) and only move during
/// propagation; the literals themselves never change.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Clause {
    literals: Vec<Literal>,
    watches: [usize; 2],
}

impl Clause {
    /// New clause watching its first and last literal; `literals` must be non-empty
    #[must_use]
    pub fn new(literals: Vec<Literal>) -> Self {
        debug_assert!(!literals.is_empty());
        let last = literals.len().saturating_sub(1);
        Self {
            literals,
            watches: [0, last],
        }
    }

    /// Literals in their original order
    #[must_use]
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    /// Whether clause has exactly one literal
    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    /// Positions held by the two watch slots
    #[must_use]
    pub const fn watch_positions(&self) -> [usize; 2] {
        self.watches
    }

    /// Literal held by watch slot `slot` (0 or 1)
    #[must_use]
    pub fn watched(&self, slot: usize) -> Literal {
        self.literals[self.watches[slot]]
    }

    /// Both watched literals; equal for a unit clause
    #[must_use]
    pub fn watched_literals(&self) -> [Literal; 2] {
        [self.watched(0), self.watched(1)]
    }

    /// The distinct literals the clause must be registered under in the watch index
    pub(crate) fn watch_keys(&self) -> impl Iterator<Item = Literal> + '_ {
        let skip_second = self.watches[0] == self.watches[1];
        self.watched_literals()
            .into_iter()
            .take(if skip_second { 1 } else { 2 })
    }

    /// Slot whose literal is `literal`, checking slot 0 first
    pub(crate) fn slot_of(&self, literal: Literal) -> Option<usize> {
        (0..2).find(|&slot| self.watched(slot) == literal)
    }

    /// Moves watch slot `slot` to `position`
    pub(crate) fn move_watch(&mut self, slot: usize, position: usize) {
        debug_assert!(position < self.literals.len());
        self.watches[slot] = position;
    }

    /// First position, left to right, that is not watched and whose literal is not false
    pub(crate) fn find_replacement(&self, values: &[VariableValue]) -> Option<usize> {
        (0..self.literals.len()).find(|&k| {
            k != self.watches[0] && k != self.watches[1] && !self.literals[k].is_false(values)
        })
    }

    /// Whether clause is satisfied
    #[must_use]
    pub fn is_satisfied(&self, values: &[VariableValue]) -> bool {
        self.literals.iter().any(|literal| literal.is_true(values))
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for literal in &self.literals {
            write!(f, "{literal} ")?;
        }
        write!(f, "0")
    }
}
