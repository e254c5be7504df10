use crate::{
    misc::log::targets,
    solver::{
        Conflict,
        literal::Literal,
        variable::{Variable, VariableValue},
    },
};

/// A literal assigned true, with the decision level active when it was pushed
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TrailEntry {
    pub literal: Literal,
    pub level: usize,
}

/// Current assignment and the chronological record of how it was built
#[derive(Clone, Debug, Default)]
pub struct Trail {
    /// Current variable assignments (variables can be unset, false, or true)
    values: Vec<VariableValue>,
    /// Assigned literals in the order they became true
    entries: Vec<TrailEntry>,
    /// Current decision level
    level: usize,
    /// Points to the next literal in `entries` to propagate
    propagation_head: usize,
}

impl Trail {
    /// Ensures there is a value for `num_variables` variables
    pub fn resize(&mut self, num_variables: usize) {
        if self.values.len() < num_variables {
            self.values.resize(num_variables, VariableValue::Unset);
            self.entries
                .reserve(num_variables.saturating_sub(self.entries.len()));
        }
    }

    /// Current variable assignments
    #[must_use]
    pub fn values(&self) -> &[VariableValue] {
        &self.values
    }

    /// Trail entries in chronological order
    #[must_use]
    pub fn entries(&self) -> &[TrailEntry] {
        &self.entries
    }

    /// Assigned literals in chronological order
    pub fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.entries.iter().map(|entry| entry.literal)
    }

    /// Number of assigned literals
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Current decision level
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Opens a new decision level and returns it
    pub fn new_level(&mut self) -> usize {
        self.level += 1;
        self.level
    }

    /// Lowers the current level to `level` once nothing above it is assigned
    pub(crate) fn lower_level(&mut self, level: usize) {
        debug_assert!(self.entries.last().is_none_or(|entry| entry.level <= level));
        self.level = self.level.min(level);
    }

    /// Value of `literal` under the current assignment
    #[must_use]
    pub fn value_of(&self, literal: Literal) -> VariableValue {
        literal.value(&self.values)
    }

    /// Value of `variable` under the current assignment; unset if unknown
    #[must_use]
    pub fn value_of_variable(&self, variable: Variable) -> VariableValue {
        self.values.get(variable).copied().unwrap_or_default()
    }

    /// Lowest variable that is currently unset
    #[must_use]
    pub fn first_unset(&self) -> Option<Variable> {
        self.values.iter().position(|value| value.is_unset())
    }

    /// Makes `literal` true at the current level.
    ///
    /// Fails if the complement is already true. Pushing a literal that is
    /// already true leaves the trail untouched.
    pub fn push(&mut self, literal: Literal) -> Result<(), Conflict> {
        match self.value_of(literal) {
            VariableValue::False => {
                log::trace!(target: targets::TRAIL, "Rejected {literal} at level {}", self.level);
                Err(Conflict::Assignment(literal))
            }
            VariableValue::True => Ok(()),
            VariableValue::Unset => {
                self.values[literal.var()] = VariableValue::from_bool(literal.polarity());
                self.entries.push(TrailEntry {
                    literal,
                    level: self.level,
                });
                log::trace!(target: targets::TRAIL, "Assigned {literal} at level {}", self.level);
                Ok(())
            }
        }
    }

    /// Unassigns every entry recorded at a level of at least `level`, newest
    /// first, and lowers the current level to `level`; returns the number of
    /// unassigned literals
    pub fn pop_to(&mut self, level: usize) -> usize {
        let len_before = self.entries.len();
        while let Some(&entry) = self.entries.last() {
            if entry.level < level {
                break;
            }
            self.values[entry.literal.var()] = VariableValue::Unset;
            self.entries.pop();
        }
        self.level = self.level.min(level);
        self.propagation_head = self.propagation_head.min(self.entries.len());

        let popped = len_before - self.entries.len();
        if popped > 0 {
            log::trace!(target: targets::TRAIL, "Unassigned {popped} literals down to level {level}");
        }
        popped
    }

    /// Next literal that has been pushed but not yet propagated
    pub(crate) fn next_to_propagate(&mut self) -> Option<Literal> {
        let entry = self.entries.get(self.propagation_head)?;
        self.propagation_head += 1;
        Some(entry.literal)
    }

    /// Marks every pushed literal as propagated
    pub(crate) fn skip_propagation(&mut self) {
        self.propagation_head = self.entries.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(var: Variable, polarity: bool) -> Literal {
        Literal::from_var_with_polarity(var, polarity)
    }

    #[test]
    fn push_rejects_complement() {
        let mut trail = Trail::default();
        trail.resize(2);
        assert_eq!(trail.push(lit(0, true)), Ok(()));
        assert_eq!(
            trail.push(lit(0, false)),
            Err(Conflict::Assignment(lit(0, false)))
        );
        assert_eq!(trail.len(), 1);
    }

    #[test]
    fn push_twice_is_recorded_once() {
        let mut trail = Trail::default();
        trail.resize(1);
        assert_eq!(trail.push(lit(0, false)), Ok(()));
        assert_eq!(trail.push(lit(0, false)), Ok(()));
        assert_eq!(trail.literals().collect::<Vec<_>>(), vec![lit(0, false)]);
    }

    #[test]
    fn pop_to_removes_levels_at_or_above() {
        let mut trail = Trail::default();
        trail.resize(4);
        trail.push(lit(0, true)).unwrap();
        trail.new_level();
        trail.push(lit(1, false)).unwrap();
        trail.new_level();
        trail.push(lit(2, true)).unwrap();
        trail.push(lit(3, true)).unwrap();

        assert_eq!(trail.pop_to(2), 2);
        assert_eq!(trail.level(), 2);
        assert!(trail.value_of_variable(2).is_unset());
        assert!(trail.value_of_variable(3).is_unset());
        assert_eq!(trail.value_of(lit(1, false)), VariableValue::True);
        assert_eq!(trail.value_of(lit(0, true)), VariableValue::True);

        // Idempotent
        assert_eq!(trail.pop_to(2), 0);
        assert_eq!(trail.len(), 2);

        assert_eq!(trail.pop_to(1), 1);
        assert_eq!(trail.level(), 1);
        assert_eq!(trail.literals().collect::<Vec<_>>(), vec![lit(0, true)]);
    }

    #[test]
    fn pop_to_resets_propagation_head() {
        let mut trail = Trail::default();
        trail.resize(2);
        trail.new_level();
        trail.push(lit(0, true)).unwrap();
        trail.push(lit(1, true)).unwrap();
        assert_eq!(trail.next_to_propagate(), Some(lit(0, true)));
        assert_eq!(trail.next_to_propagate(), Some(lit(1, true)));
        assert_eq!(trail.next_to_propagate(), None);

        trail.pop_to(1);
        trail.push(lit(1, false)).unwrap();
        assert_eq!(trail.next_to_propagate(), Some(lit(1, false)));
    }
}
