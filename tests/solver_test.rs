use std::time::Duration;

use dpllsat_rs::{
    error::SolveError,
    parsing::parse_cnf,
    solver::{
        Solver, SolverExitCode, VerbosityLevel, literal::Literal, options::SolverOptions,
        variable::VariableValue,
    },
};

use crate::common::{SolverMock, check_model, clauses, lit};

mod common;

fn solver_for(clauses: &[Vec<Literal>]) -> Solver {
    Solver::from_clauses(SolverOptions::default(), clauses).unwrap()
}

fn codes(solver: &Solver) -> Vec<usize> {
    solver.trail().map(|literal| literal.repr()).collect()
}

fn solve_file(filename: &str) -> (Solver, SolverMock, SolverExitCode) {
    let mut solver = Solver::new(VerbosityLevel::OnlyResult);
    parse_cnf(filename, &mut solver).unwrap();
    let mut mock_solver = SolverMock::default();
    parse_cnf(filename, &mut mock_solver).unwrap();
    let res = solver.solve();
    (solver, mock_solver, res)
}

#[test]
fn test_solve_small_sat_instance() {
    let (solver, mock_solver, res) = solve_file("res/success/small_sat.cnf");
    assert_eq!(res, SolverExitCode::Sat);
    check_model(&solver, &mock_solver.clauses);
}

#[test]
fn test_solve_compressed_sat_instances() {
    for filename in ["res/success/small_sat.cnf.xz", "res/success/small_sat.cnf.gz"] {
        let (solver, mock_solver, res) = solve_file(filename);
        assert_eq!(res, SolverExitCode::Sat);
        check_model(&solver, &mock_solver.clauses);
    }
}

#[test]
fn test_solve_pigeonhole_unsat() {
    let (solver, _, res) = solve_file("res/success/pigeonhole_3_2.cnf");
    assert_eq!(res, SolverExitCode::Unsat);
    assert!(solver.statistics().num_conflicts > 0);
    assert!(solver.statistics().max_decision_level <= solver.num_variables());
}

#[test]
fn test_empty_input_is_sat() {
    let mut solver = Solver::new(VerbosityLevel::OnlyResult);
    assert_eq!(solver.solve(), SolverExitCode::Sat);
    assert_eq!(solver.trail().count(), 0);
    assert_eq!(solver.decision_level(), 0);
}

#[test]
fn test_single_positive_unit() {
    let mut solver = solver_for(&clauses(&[&[1]]));
    assert_eq!(solver.solve(), SolverExitCode::Sat);
    assert_eq!(codes(&solver), vec![0]);
    assert_eq!(solver.value_of(lit(1)), VariableValue::True);
    assert_eq!(solver.num_variables(), 1);
    assert_eq!(solver.decision_level(), 0);
}

#[test]
fn test_single_negative_unit() {
    let mut solver = solver_for(&clauses(&[&[-1]]));
    assert_eq!(solver.solve(), SolverExitCode::Sat);
    assert_eq!(codes(&solver), vec![1]);
    assert_eq!(solver.model(), &[VariableValue::False]);
    assert_eq!(solver.decision_level(), 0);
}

#[test]
fn test_complementary_units_are_unsat() {
    let mut solver = solver_for(&clauses(&[&[1], &[-1]]));
    assert_eq!(solver.solve(), SolverExitCode::Unsat);
    assert_eq!(solver.statistics().num_decisions, 0);
    assert!(solver.statistics().max_decision_level <= solver.num_variables());
}

#[test]
fn test_independent_units() {
    let mut solver = solver_for(&clauses(&[&[1], &[2]]));
    assert_eq!(solver.solve(), SolverExitCode::Sat);
    assert_eq!(codes(&solver), vec![0, 2]);
}

#[test]
fn test_repeated_unit_is_on_trail_once() {
    let mut solver = solver_for(&clauses(&[&[2], &[2], &[1, 2]]));
    assert_eq!(solver.solve(), SolverExitCode::Sat);
    assert_eq!(codes(&solver), vec![2]);
}

#[test]
fn test_decision_then_propagation() {
    let formula = clauses(&[&[1, 2], &[-1, 2]]);
    let mut solver = solver_for(&formula);
    assert_eq!(solver.solve(), SolverExitCode::Sat);
    assert_eq!(codes(&solver), vec![0, 2]);
    assert_eq!(solver.decision_level(), 1);
    check_model(&solver, &formula);
}

#[test]
fn test_unit_forces_conflict_at_level_zero() {
    let mut solver = solver_for(&clauses(&[&[1, 2], &[-1, 2], &[-2]]));
    assert_eq!(solver.solve(), SolverExitCode::Unsat);
    assert_eq!(solver.statistics().num_decisions, 0);
}

#[test]
fn test_chained_unit_propagation() {
    let n = 12;
    let mut formula: Vec<Vec<Literal>> = (1..n).map(|i| vec![lit(-i), lit(i + 1)]).collect();
    formula.push(vec![lit(1)]);

    let mut solver = solver_for(&formula);
    assert_eq!(solver.solve(), SolverExitCode::Sat);
    let expected: Vec<Literal> = (1..=n).map(lit).collect();
    assert_eq!(solver.trail().collect::<Vec<_>>(), expected);
    assert!(solver.trail_entries().iter().all(|entry| entry.level == 0));
    assert_eq!(solver.statistics().num_decisions, 0);
}

#[test]
fn test_cycle_of_implications() {
    let formula: Vec<Vec<Literal>> = (1..8)
        .map(|i| vec![Literal::from_code(2 * i - 1), Literal::from_code(2 * i)])
        .collect();
    let mut solver = solver_for(&formula);
    assert_eq!(solver.solve(), SolverExitCode::Sat);
    assert_eq!(codes(&solver), vec![0, 2, 4, 6, 8, 10, 12, 14]);
    assert_eq!(solver.decision_level(), 1);
}

#[test]
fn test_backtracking_flips_decision() {
    // Choosing 1 forces both 2 and -2
    let formula = clauses(&[&[-1, 2], &[-1, -2], &[1, 3]]);
    let mut solver = solver_for(&formula);
    assert_eq!(solver.solve(), SolverExitCode::Sat);
    assert_eq!(solver.value_of(lit(1)), VariableValue::False);
    assert_eq!(solver.value_of(lit(3)), VariableValue::True);
    assert_eq!(solver.statistics().num_conflicts, 1);
    assert_eq!(solver.statistics().num_backtracks, 1);
    check_model(&solver, &formula);
}

#[test]
fn test_all_polarities_fail_is_unsat() {
    let formula = clauses(&[&[1, 2], &[1, -2], &[-1, 2], &[-1, -2]]);
    let mut solver = solver_for(&formula);
    assert_eq!(solver.solve(), SolverExitCode::Unsat);
    assert_eq!(solver.decision_level(), 0);
    assert!(solver.statistics().max_decision_level <= 2);
    // Flipping the root decision and exhausting it form a single backtrack
    assert_eq!(solver.statistics().num_conflicts, 2);
    assert_eq!(solver.statistics().num_backtracks, 1);
}

#[test]
fn test_value_of_unknown_variable_is_unset() {
    let solver = Solver::new(VerbosityLevel::OnlyResult);
    assert_eq!(solver.value_of(lit(3)), VariableValue::Unset);
    assert_eq!(solver.value_of(lit(-3)), VariableValue::Unset);

    let solver = solver_for(&clauses(&[&[1]]));
    assert_eq!(solver.value_of(lit(-7)), VariableValue::Unset);
}

#[test]
fn test_empty_clause_short_circuits() {
    let mut solver = Solver::new(VerbosityLevel::OnlyResult);
    solver.add_clause(&[lit(1)]).unwrap();
    assert_eq!(
        solver.add_clause(&[]),
        Err(SolveError::EmptyClause { index: 1 })
    );
    assert_eq!(solver.solve(), SolverExitCode::Unsat);
    assert_eq!(solver.trail().count(), 0);
    assert_eq!(solver.statistics().num_propagations, 0);
}

#[test]
fn test_from_clauses_rejects_empty_clause() {
    let formula = vec![vec![lit(1)], vec![]];
    assert!(matches!(
        Solver::from_clauses(SolverOptions::default(), &formula),
        Err(SolveError::EmptyClause { index: 1 })
    ));
}

#[test]
fn test_empty_clause_file_is_unsat() {
    let (solver, mock_solver, res) = solve_file("res/success/empty_clause.cnf");
    assert_eq!(res, SolverExitCode::Unsat);
    assert_eq!(mock_solver.num_clauses, 2);
    assert_eq!(solver.trail().count(), 0);
}

#[test]
fn test_decision_limit_gives_unknown() {
    let (mut solver, _, res) = solve_file("res/success/pigeonhole_3_2.cnf");
    assert_eq!(res, SolverExitCode::Unsat);

    let formula = common::pigeonhole(5, 4);
    let mut limited =
        Solver::from_clauses(SolverOptions::default().decision_limit(1), &formula).unwrap();
    assert_eq!(limited.solve(), SolverExitCode::Unknown);
    assert_eq!(limited.statistics().num_decisions, 1);

    // Solving again starts from scratch
    assert_eq!(solver.solve(), SolverExitCode::Unsat);
}

#[test]
fn test_time_limit_gives_unknown() {
    let mut solver =
        Solver::with_options(SolverOptions::default().time_limit(Duration::ZERO));
    parse_cnf("res/success/small_sat.cnf", &mut solver).unwrap();
    assert_eq!(solver.solve(), SolverExitCode::Unknown);
}

#[test]
fn test_solve_twice_gives_same_trail() {
    let (mut solver, _, res) = solve_file("res/success/small_sat.cnf");
    assert_eq!(res, SolverExitCode::Sat);
    let first = codes(&solver);
    assert_eq!(solver.solve(), SolverExitCode::Sat);
    assert_eq!(codes(&solver), first);
}

#[test]
fn test_backtrack_to_restores_lower_levels() {
    let formula = clauses(&[&[1, 2, 3, 4], &[-1, 5]]);
    let mut solver = solver_for(&formula);
    solver.decide(lit(1)).unwrap();
    solver.decide(lit(-2)).unwrap();
    solver.decide(lit(-3)).unwrap();
    assert_eq!(solver.decision_level(), 3);
    assert_eq!(codes(&solver), vec![0, 8, 3, 5]);

    solver.backtrack_to(2);
    assert_eq!(solver.decision_level(), 2);
    assert_eq!(solver.value_of(lit(1)), VariableValue::True);
    assert_eq!(solver.value_of(lit(5)), VariableValue::True);
    assert_eq!(solver.value_of(lit(2)), VariableValue::Unset);
    assert_eq!(solver.value_of(lit(3)), VariableValue::Unset);
    assert!(common::watches_consistent(&solver));
}

#[test]
fn test_assign_reports_conflicting_literal() {
    let mut solver = solver_for(&clauses(&[&[1, 2]]));
    solver.decide(lit(1)).unwrap();
    assert!(solver.assign(lit(-1)).is_err());
    assert_eq!(solver.value_of(lit(1)), VariableValue::True);
}
