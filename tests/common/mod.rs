#![allow(dead_code)]

use dpllsat_rs::{
    parsing::ClauseReceiver,
    solver::{Solver, literal::Literal, variable::VariableValue},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Mock for solver type
#[derive(Clone, Debug, Default)]
pub struct SolverMock {
    pub num_variables: usize,
    pub num_clauses: usize,
    pub clauses: Vec<Vec<Literal>>,
}

impl ClauseReceiver for SolverMock {
    fn create_variables(&mut self, num_variables: usize) {
        self.num_variables = num_variables;
    }

    fn add_clause(&mut self, literals: &[Literal]) -> bool {
        self.num_clauses += 1;
        self.clauses.push(Vec::from(literals));
        !literals.is_empty()
    }
}

/// Literal from a DIMACS integer
pub fn lit(value: i64) -> Literal {
    Literal::from_dimacs(value).expect("non-zero literal")
}

/// Clauses from DIMACS integers
pub fn clauses(dimacs: &[&[i64]]) -> Vec<Vec<Literal>> {
    dimacs
        .iter()
        .map(|clause| clause.iter().map(|&value| lit(value)).collect())
        .collect()
}

/// Whether every clause has a literal true under `model`
pub fn satisfies(model: &[VariableValue], clauses: &[Vec<Literal>]) -> bool {
    clauses
        .iter()
        .all(|clause| clause.iter().any(|literal| literal.is_true(model)))
}

/// Check SAT model
pub fn check_model(solver: &Solver, clauses: &[Vec<Literal>]) {
    assert!(satisfies(solver.model(), clauses));
    for literal in solver.trail() {
        assert!(literal.is_true(solver.model()));
    }
}

/// Whether the two watches of every clause are consistent with the assignment:
/// a false watch is only allowed next to a true one
pub fn watches_consistent(solver: &Solver) -> bool {
    solver.clauses().iter().all(|(_, clause)| {
        let [first, second] = clause.watched_literals();
        let first = solver.value_of(first);
        let second = solver.value_of(second);
        (!first.is_false() || second.is_true()) && (!second.is_false() || first.is_true())
    })
}

/// Decide satisfiability by enumerating all assignments
pub fn brute_force(num_variables: usize, clauses: &[Vec<Literal>]) -> bool {
    (0u64..1 << num_variables).any(|bits| {
        let model: Vec<VariableValue> = (0..num_variables)
            .map(|var| VariableValue::from_bool(bits >> var & 1 == 1))
            .collect();
        satisfies(&model, clauses)
    })
}

/// Uniform random `k`-CNF over `num_variables` variables
pub fn random_cnf(
    rng: &mut StdRng,
    num_variables: usize,
    num_clauses: usize,
    k: usize,
) -> Vec<Vec<Literal>> {
    (0..num_clauses)
        .map(|_| {
            (0..k)
                .map(|_| {
                    Literal::from_var_with_polarity(
                        rng.random_range(0..num_variables),
                        rng.random_bool(0.5),
                    )
                })
                .collect()
        })
        .collect()
}

/// Seeded generator
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Pigeonhole formula; unsatisfiable whenever `pigeons > holes`
pub fn pigeonhole(pigeons: usize, holes: usize) -> Vec<Vec<Literal>> {
    let var = |pigeon: usize, hole: usize| pigeon * holes + hole;
    let mut clauses: Vec<Vec<Literal>> = (0..pigeons)
        .map(|pigeon| {
            (0..holes)
                .map(|hole| Literal::from_var_with_polarity(var(pigeon, hole), true))
                .collect()
        })
        .collect();
    for hole in 0..holes {
        for first in 0..pigeons {
            for second in first + 1..pigeons {
                clauses.push(vec![
                    Literal::from_var_with_polarity(var(first, hole), false),
                    Literal::from_var_with_polarity(var(second, hole), false),
                ]);
            }
        }
    }
    clauses
}
