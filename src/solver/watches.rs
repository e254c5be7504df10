use crate::solver::{clause::ClauseRef, literal::Literal};

/// Maintains which clauses watch each literal, indexed by literal code
#[derive(Clone, Debug, Default)]
pub struct Watches {
    lists: Vec<Vec<ClauseRef>>,
}

impl Watches {
    /// Ensures there is a list for every literal of `num_variables` variables
    pub fn resize(&mut self, num_variables: usize) {
        if self.lists.len() < 2 * num_variables {
            self.lists.resize(2 * num_variables, Vec::new());
        }
    }

    /// Clauses watching `literal`, in insertion order
    #[must_use]
    pub fn watched_by(&self, literal: Literal) -> &[ClauseRef] {
        &self.lists[literal.repr()]
    }

    /// Appends `clause_ref` to the list of `literal`
    pub fn watch(&mut self, literal: Literal, clause_ref: ClauseRef) {
        self.lists[literal.repr()].push(clause_ref);
    }

    /// Takes the list of `literal`, leaving it empty until [`Watches::restore`]
    pub(crate) fn take(&mut self, literal: Literal) -> Vec<ClauseRef> {
        std::mem::take(&mut self.lists[literal.repr()])
    }

    /// Puts back a list taken with [`Watches::take`]
    pub(crate) fn restore(&mut self, literal: Literal, watches: Vec<ClauseRef>) {
        let list = &mut self.lists[literal.repr()];
        debug_assert!(list.is_empty());
        *list = watches;
    }
}
