//! A DPLL satisfiability solver with two watched literals and chronological backtracking.
//!
//! Clauses are registered with a [`Solver`](solver::Solver), either directly or
//! through the DIMACS front end in [`parsing`], and [`Solver::solve`](solver::Solver::solve)
//! decides satisfiability. The trail of a satisfiable run is the witness.

use std::time::Instant;

use crate::{
    error::ParseError,
    helper::{duration_in_seconds, per_second},
    parsing::parse_cnf,
    solver::{Solver, SolverExitCode, VerbosityLevel, options::SolverOptions},
};

pub mod error;
mod helper;
pub mod misc;
pub mod parsing;
pub mod solver;

/// Print stats on the loaded CNF instance
fn print_stats(solver: &Solver, start_time: Instant, parse_end_time: Instant) {
    print!(
        "
============================[ Problem Statistics ]=============================
|                                                                             |
|  Number of variables:  {:>12}                                         |
|  Number of clauses:    {:>12}                                         |
|  Number of literals:   {:>12}                                         |
|  Parse time:           {:>12.6}                                         |
|                                                                             |",
        solver.num_variables(),
        solver.num_clauses(),
        solver.statistics().num_literals_in_clauses,
        duration_in_seconds(start_time, parse_end_time)
    );
}

/// Print search statistics header
fn print_search_stats_banner() {
    print!(
        "
============================[ Search Statistics ]==============================
|    Decisions |    Conflicts | Propagations |    Level |     Assigned |
===============================================================================
"
    );
}

/// Print stats after finished with solving
fn print_post_solve_stats(solver: &Solver, start_time: Instant, end_time: Instant) {
    let total_time = duration_in_seconds(start_time, end_time);
    let stats = solver.statistics();
    print!(
        "============================[      Summary      ]==============================
|                                                                             |
|  #Decisions:           {:>12}                                         |
|  #Conflicts:           {:>12} ({:>12.3}/sec)                      |
|  #Backtracks:          {:>12}                                         |
|  #Propagations:        {:>12} ({:>12.3}/sec)                      |
|  Max decision level:   {:>12}                                         |
|  Total time:           {:>12.6}                                         |
|                                                                             |
===============================================================================
",
        stats.num_decisions,
        stats.num_conflicts,
        per_second(stats.num_conflicts, total_time),
        stats.num_backtracks,
        stats.num_propagations,
        per_second(stats.num_propagations, total_time),
        stats.max_decision_level,
        total_time
    );
}

/// Print result
fn print_result(solver: &Solver, exit_code: SolverExitCode) {
    println!();
    match exit_code {
        // Unknown
        SolverExitCode::Unknown => {
            println!("UNKNOWN");
        }
        // SAT; unset variables are reported as false
        SolverExitCode::Sat => {
            print!("SAT");
            for (var, val) in solver.model().iter().enumerate() {
                if val.is_true() {
                    print!(" {}", var + 1);
                } else {
                    print!(" -{}", var + 1);
                }
            }
            println!();
        }
        // UNSAT
        SolverExitCode::Unsat => {
            println!("UNSAT");
        }
    }
}

/// Solves a CNF instance in a `.cnf`, `.cnf.xz`, or `.cnf.gz` file
pub fn solve_cnf_instance(
    filename: &str,
    options: SolverOptions,
) -> Result<SolverExitCode, ParseError> {
    // Create solver and parse clauses
    let start_time = Instant::now();
    let mut solver = Solver::with_options(options);
    parse_cnf(filename, &mut solver)?;
    if options.verbosity == VerbosityLevel::All {
        let parse_end_time = Instant::now();
        print_stats(&solver, start_time, parse_end_time);
        print_search_stats_banner();
    }

    // Solve
    let exit_code = solver.solve();

    // End time recording; print elapsed time
    if options.verbosity == VerbosityLevel::All {
        let end_time = Instant::now();
        print_post_solve_stats(&solver, start_time, end_time);
    }

    // Print model
    print_result(&solver, exit_code);

    // Return unknown (0), sat (10), or unsat (20)
    Ok(exit_code)
}
