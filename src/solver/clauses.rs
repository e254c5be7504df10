use crate::solver::{
    clause::{Clause, ClauseRef},
    literal::Literal,
    variable::VariableValue,
};

/// Class managing the creation and access of clauses
#[derive(Clone, Debug, Default)]
pub struct Clauses {
    /// Stores all clauses in registration order
    container: Vec<Clause>,
}

impl Clauses {
    /// Move clause into container
    pub fn add_clause(&mut self, literals: Vec<Literal>) -> ClauseRef {
        let clause_ref = ClauseRef::from_idx(self.container.len());
        self.container.push(Clause::new(literals));
        clause_ref
    }

    /// Iterate over all clauses with their references
    pub fn iter(&self) -> impl Iterator<Item = (ClauseRef, &Clause)> {
        self.container
            .iter()
            .enumerate()
            .map(|(idx, clause)| (ClauseRef::from_idx(idx), clause))
    }

    /// Whether every clause has a true literal
    #[must_use]
    pub fn all_satisfied(&self, variable_values: &[VariableValue]) -> bool {
        self.container
            .iter()
            .all(|clause| clause.is_satisfied(variable_values))
    }
}

/// Clause at given index
impl std::ops::Index<ClauseRef> for Clauses {
    type Output = Clause;

    fn index(&self, index: ClauseRef) -> &Self::Output {
        &self.container[index.idx()]
    }
}
impl std::ops::IndexMut<ClauseRef> for Clauses {
    fn index_mut(&mut self, index: ClauseRef) -> &mut Self::Output {
        &mut self.container[index.idx()]
    }
}
