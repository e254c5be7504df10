use std::{path::PathBuf, process::ExitCode, time::Duration};

use clap::Parser;
use dpllsat_rs::{
    solve_cnf_instance,
    solver::{VerbosityLevel, options::SolverOptions},
};

/// Decides satisfiability of a DIMACS CNF formula
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// A `.cnf`, `.cnf.xz`, or `.cnf.gz` file
    file: PathBuf,

    /// Only print the result
    #[arg(short, long)]
    quiet: bool,

    /// Give up after this many decisions
    #[arg(long, value_name = "DECISIONS")]
    decision_limit: Option<usize>,

    /// Give up after this many seconds
    #[arg(long, value_name = "SECONDS")]
    time_limit: Option<f64>,
}

impl Args {
    fn options(&self) -> SolverOptions {
        let verbosity = if self.quiet {
            VerbosityLevel::OnlyResult
        } else {
            VerbosityLevel::All
        };
        SolverOptions {
            verbosity,
            decision_limit: self.decision_limit,
            time_limit: self
                .time_limit
                .filter(|seconds| seconds.is_finite() && *seconds >= 0.0)
                .map(Duration::from_secs_f64),
        }
    }
}

/// Main
fn main() -> ExitCode {
    #[cfg(feature = "log")]
    env_logger::init();

    let args = Args::parse();
    let filename = args.file.to_string_lossy();

    // Run solver
    match solve_cnf_instance(&filename, args.options()) {
        Ok(exit_code) => ExitCode::from(exit_code as u8),
        Err(err) => {
            eprintln!("{err}.");
            ExitCode::from(1)
        }
    }
}
