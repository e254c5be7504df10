use std::time::Instant;

use crate::{
    error::SolveError,
    misc::log::targets,
    parsing::ClauseReceiver,
    solver::{
        clause::ClauseRef,
        clauses::Clauses,
        literal::Literal,
        options::{PROGRESS_INTERVAL, SolverOptions},
        trail::{Trail, TrailEntry},
        variable::{Variable, VariableValue},
        watches::Watches,
    },
};

pub mod clause;
pub mod clauses;
pub mod literal;
pub mod options;
mod propagation;
pub mod trail;
pub mod variable;
pub mod watches;

/// Verbosity level enum
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum VerbosityLevel {
    #[default]
    OnlyResult = 0,
    All = 1,
}

/// Enum representing the solver status exit codes
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SolverExitCode {
    Unknown = 0,
    Sat = 10,
    Unsat = 20,
}

/// Why the current partial assignment cannot be extended
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Conflict {
    /// Every literal of the clause is false
    Clause(ClauseRef),
    /// The complement of the literal is already true
    Assignment(Literal),
}

/// Solver statistics
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct SolverStatistics {
    /// Number of variables
    pub num_variables: usize,
    /// Number of clauses
    pub num_clauses: usize,
    /// Number of literals in clauses
    pub num_literals_in_clauses: usize,
    /// Number of made decisions
    pub num_decisions: usize,
    /// Number of total conflicts
    pub num_conflicts: usize,
    /// Number of propagated literals
    pub num_propagations: usize,
    /// Number of conflicts resolved by chronological backtracking
    pub num_backtracks: usize,
    /// Highest decision level reached
    pub max_decision_level: usize,
}

/// A branching choice that may still be flipped
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Decision {
    /// Branch variable
    variable: Variable,
    /// Level opened by the decision
    level: usize,
    /// Whether the negative literal is being tried
    flipped: bool,
}

/// Solver class
pub struct Solver {
    // -- Representation of the SAT problem instance
    /// All clauses
    clauses: Clauses,
    /// Whether an empty clause was added
    has_empty_clause: bool,

    // -- Solver data structures
    /// Maintains which clauses watch each literal
    watches: Watches,
    /// Current assignment and the order it was made in
    trail: Trail,
    /// Stack of open decisions, innermost last
    decisions: Vec<Decision>,

    // -- Solver state
    /// Configuration
    options: SolverOptions,
    /// Solver statistics
    stats: SolverStatistics,
}

impl Solver {
    /// Create a new solver
    #[must_use]
    pub fn new(logging_level: VerbosityLevel) -> Self {
        Self::with_options(SolverOptions::with_verbosity(logging_level))
    }

    /// Create a new solver with the given options
    #[must_use]
    pub fn with_options(options: SolverOptions) -> Self {
        Self {
            clauses: Clauses::default(),
            has_empty_clause: false,
            watches: Watches::default(),
            trail: Trail::default(),
            decisions: Vec::new(),
            options,
            stats: SolverStatistics::default(),
        }
    }

    /// Create a solver holding `clauses`; fails on the first empty clause
    pub fn from_clauses<C: AsRef<[Literal]>>(
        options: SolverOptions,
        clauses: impl IntoIterator<Item = C>,
    ) -> Result<Self, SolveError> {
        let mut solver = Self::with_options(options);
        for clause in clauses {
            solver.add_clause(clause.as_ref())?;
        }
        Ok(solver)
    }

    /// Number of variables
    #[must_use]
    pub const fn num_variables(&self) -> usize {
        self.stats.num_variables
    }

    /// Number of clauses
    #[must_use]
    pub const fn num_clauses(&self) -> usize {
        self.stats.num_clauses
    }

    /// Solver statistics
    #[must_use]
    pub const fn statistics(&self) -> &SolverStatistics {
        &self.stats
    }

    /// All clauses
    #[must_use]
    pub const fn clauses(&self) -> &Clauses {
        &self.clauses
    }

    /// Contains the model if SAT; unset variables may take any value
    #[must_use]
    pub fn model(&self) -> &[VariableValue] {
        self.trail.values()
    }

    /// Literals assigned true, in the order they were assigned
    pub fn trail(&self) -> impl Iterator<Item = Literal> + '_ {
        self.trail.literals()
    }

    /// Trail literals with the decision level they were assigned at
    #[must_use]
    pub fn trail_entries(&self) -> &[TrailEntry] {
        self.trail.entries()
    }

    /// Value of `literal` under the current assignment
    #[must_use]
    pub fn value_of(&self, literal: Literal) -> VariableValue {
        self.trail.value_of(literal)
    }

    /// Returns the current decision level
    #[must_use]
    pub const fn decision_level(&self) -> usize {
        self.trail.level()
    }

    /// Grows all variable-indexed tables to hold `num_variables` variables
    fn ensure_variables(&mut self, num_variables: usize) {
        if num_variables > self.stats.num_variables {
            self.stats.num_variables = num_variables;
            self.trail.resize(num_variables);
            self.watches.resize(num_variables);
        }
    }

    /// Pre-sizes the tables for `num_variables` variables
    pub fn create_variables(&mut self, num_variables: usize) {
        self.ensure_variables(num_variables);
    }

    /// Registers a clause, watching its first and last literal.
    ///
    /// Any current assignment is discarded. An empty clause makes the
    /// instance unsatisfiable without search and is reported as an error.
    pub fn add_clause(&mut self, literals: &[Literal]) -> Result<ClauseRef, SolveError> {
        if literals.is_empty() {
            log::info!(target: targets::CLAUSE_DB, "Empty clause {} added", self.num_clauses());
            self.has_empty_clause = true;
            return Err(SolveError::EmptyClause {
                index: self.num_clauses(),
            });
        }
        debug_assert!(literals.iter().all(Literal::valid));

        self.reset();
        let max_var = literals.iter().map(Literal::var).max().unwrap_or_default();
        self.ensure_variables(max_var + 1);

        let clause_ref = self.clauses.add_clause(literals.to_vec());
        for literal in self.clauses[clause_ref].watch_keys() {
            self.watches.watch(literal, clause_ref);
        }
        self.stats.num_clauses += 1;
        self.stats.num_literals_in_clauses += literals.len();
        log::trace!(target: targets::CLAUSE_DB, "Added clause {clause_ref}: {}", self.clauses[clause_ref]);
        Ok(clause_ref)
    }

    /// Opens a new decision level and assigns `literal` there
    pub fn decide(&mut self, literal: Literal) -> Result<(), Conflict> {
        let level = self.trail.new_level();
        self.stats.num_decisions += 1;
        self.stats.max_decision_level = self.stats.max_decision_level.max(level);
        log::debug!(target: targets::SEARCH, "Decided {literal} at level {level}");
        self.assign(literal)
    }

    /// Assigns `literal` at the current level and propagates its consequences
    pub fn assign(&mut self, literal: Literal) -> Result<(), Conflict> {
        self.ensure_variables(literal.var() + 1);
        self.trail.push(literal)?;
        self.propagate()
    }

    /// Undoes every assignment made at `level` or above
    pub fn backtrack_to(&mut self, level: usize) {
        self.trail.pop_to(level);
        self.decisions.retain(|decision| decision.level < level);
    }

    /// Discards the complete assignment, including level 0
    fn reset(&mut self) {
        self.backtrack_to(0);
    }

    /// Solves the loaded problem instance
    pub fn solve(&mut self) -> SolverExitCode {
        let start_time = Instant::now();
        self.reset();
        self.stats.num_decisions = 0;
        self.stats.num_conflicts = 0;
        self.stats.num_propagations = 0;
        self.stats.num_backtracks = 0;
        self.stats.max_decision_level = 0;

        let status = self.search(start_time);
        log::info!(
            target: targets::SEARCH,
            "Finished with {status:?} after {} decisions and {} conflicts",
            self.stats.num_decisions,
            self.stats.num_conflicts
        );
        status
    }

    /// Depth-first search over an explicit stack of decisions
    fn search(&mut self, start_time: Instant) -> SolverExitCode {
        if self.has_empty_clause {
            return SolverExitCode::Unsat;
        }

        // Unit clauses hold at level 0
        if self.propagate_unit_clauses().is_err() {
            return SolverExitCode::Unsat;
        }

        loop {
            if self.limit_reached(start_time) {
                return SolverExitCode::Unknown;
            }

            if self.clauses.all_satisfied(self.trail.values()) {
                return SolverExitCode::Sat;
            }

            let branched = match self.pick_branch_variable() {
                Some(variable) => {
                    let level = self.decision_level() + 1;
                    self.decisions.push(Decision {
                        variable,
                        level,
                        flipped: false,
                    });
                    self.log_progress();
                    self.decide(Literal::from_var_with_polarity(variable, true))
                        .is_ok()
                }
                // Complete assignment without a satisfied formula
                None => false,
            };

            if !branched && !self.flip_last_decision() {
                return SolverExitCode::Unsat;
            }
        }
    }

    /// Pushes and propagates the literal of every unit clause
    fn propagate_unit_clauses(&mut self) -> Result<(), Conflict> {
        let units: Vec<Literal> = self
            .clauses
            .iter()
            .filter(|(_, clause)| clause.is_unit())
            .map(|(_, clause)| clause.literals()[0])
            .collect();
        for literal in units {
            self.assign(literal)?;
        }
        Ok(())
    }

    /// Undoes decisions until one can be flipped to its negative literal
    /// without conflict; false if no decision remains
    fn flip_last_decision(&mut self) -> bool {
        self.stats.num_backtracks += 1;
        while let Some(decision) = self.decisions.last_mut() {
            let Decision {
                variable,
                level,
                flipped,
            } = *decision;
            decision.flipped = true;

            self.trail.pop_to(level);
            if flipped {
                // Both polarities failed; nothing is assigned at `level` any more
                self.decisions.pop();
                self.trail.lower_level(level - 1);
                continue;
            }

            log::debug!(target: targets::SEARCH, "Flipped variable {} at level {level}", variable + 1);
            if self
                .assign(Literal::from_var_with_polarity(variable, false))
                .is_ok()
            {
                return true;
            }
        }
        false
    }

    /// Lowest-numbered variable with both literals unassigned
    fn pick_branch_variable(&self) -> Option<Variable> {
        self.trail.first_unset()
    }

    /// Whether the configured decision or time limit is exhausted
    fn limit_reached(&self, start_time: Instant) -> bool {
        let decisions_exhausted = self
            .options
            .decision_limit
            .is_some_and(|limit| self.stats.num_decisions >= limit);
        let time_exhausted = self
            .options
            .time_limit
            .is_some_and(|limit| start_time.elapsed() >= limit);
        if decisions_exhausted || time_exhausted {
            log::info!(target: targets::SEARCH, "Search limit reached");
        }
        decisions_exhausted || time_exhausted
    }

    /// Print a progress line every `PROGRESS_INTERVAL` decisions
    fn log_progress(&self) {
        if self.options.verbosity == VerbosityLevel::All
            && self.stats.num_decisions > 0
            && self.stats.num_decisions % PROGRESS_INTERVAL == 0
        {
            println!(
                "| {:>12} | {:>12} | {:>12} | {:>8} | {:>12} |",
                self.stats.num_decisions,
                self.stats.num_conflicts,
                self.stats.num_propagations,
                self.decision_level(),
                self.trail.len()
            );
        }
    }
}

/// Adding clauses to a solver
impl ClauseReceiver for Solver {
    fn create_variables(&mut self, num_variables: usize) {
        Solver::create_variables(self, num_variables);
    }

    fn add_clause(&mut self, literals: &[Literal]) -> bool {
        Solver::add_clause(self, literals).is_ok()
    }
}
