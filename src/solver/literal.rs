use std::{fmt, ops::Not};

use crate::solver::variable::{Variable, VariableValue};

/// Literal type
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Literal {
    /// Literal code; positive and negative literals are consecutive;
    /// `[0,     1, 2,     3, 4,     5, ...]`
    /// `[0, not 0, 1, not 1, 2, not 2, ...]`
    repr: usize,
}

impl Literal {
    /// Invalid literal
    const INVALID: usize = usize::MAX;

    /// Constructs a literal from a variable (0..n)
    /// with polarity (+ : true, - : false)
    #[must_use]
    pub const fn from_var_with_polarity(variable: Variable, polarity: bool) -> Self {
        Literal {
            repr: 2 * variable + !polarity as usize,
        }
    }

    /// Constructs a literal from its code
    #[must_use]
    pub const fn from_code(code: usize) -> Self {
        Literal { repr: code }
    }

    /// Constructs a literal from a non-zero DIMACS integer
    #[must_use]
    pub fn from_dimacs(value: i64) -> Option<Self> {
        if value == 0 {
            return None;
        }
        let var = usize::try_from(value.unsigned_abs() - 1).ok()?;
        Some(Self::from_var_with_polarity(var, value > 0))
    }

    /// Access representation for indexing
    #[must_use]
    pub const fn repr(&self) -> usize {
        self.repr
    }
    /// The variable used in the literal for indexing purposes
    #[must_use]
    pub const fn var(&self) -> Variable {
        self.repr >> 1
    }
    /// The polarity of the literal (+ : true, - : false)
    #[must_use]
    pub const fn polarity(&self) -> bool {
        (self.repr & 1) == 0
    }
    /// Whether is valid
    #[must_use]
    pub const fn valid(&self) -> bool {
        self.repr != Self::INVALID
    }
    /// Value of the literal under `model`; unset if `model` has no entry for its variable
    #[must_use]
    pub fn value(&self, model: &[VariableValue]) -> VariableValue {
        match model.get(self.var()) {
            None | Some(VariableValue::Unset) => VariableValue::Unset,
            Some(&value) if value == self.polarity() => VariableValue::True,
            Some(_) => VariableValue::False,
        }
    }
    /// Whether literal evaluates to true
    #[must_use]
    pub fn is_true(&self, model: &[VariableValue]) -> bool {
        self.value(model).is_true()
    }
    /// Whether literal evaluates to false
    #[must_use]
    pub fn is_false(&self, model: &[VariableValue]) -> bool {
        self.value(model).is_false()
    }
    /// Whether literal evaluates to undetermined value
    #[must_use]
    pub fn is_unset(&self, model: &[VariableValue]) -> bool {
        self.value(model).is_unset()
    }
}

impl Default for Literal {
    fn default() -> Self {
        Self {
            repr: Self::INVALID,
        }
    }
}

/// Implement negation for literals
impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        Literal {
            repr: self.repr ^ 1,
        }
    }
}

/// DIMACS notation, i.e. `3` or `-3` for variable `2`
impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.valid() {
            return write!(f, "?");
        }
        if self.polarity() {
            write!(f, "{}", self.var() + 1)
        } else {
            write!(f, "-{}", self.var() + 1)
        }
    }
}
