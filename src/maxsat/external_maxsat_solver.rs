use super::{
    buffered_maxsat_solver::{BufferedMaxSatSolver, WcnfInstanceRead},
    Literal, MaxSatSolver, MaxSatSolverFactory, SolvingResult,
};
use anyhow::Result;
use std::{
    io::{Cursor, Read, Write},
    process::{Command, Stdio},
};

/// A MaxSAT solver which execution is made by a system command.
///
/// The system command is composed by an executable program and a potential
/// list of CLI arguments.
///
/// The program must read the WCNF instance from its standard input (if it
/// does not by default, this may be possible with the right CLI arguments)
/// and write its result on its standard output following the output format
/// of the MaxSAT evaluations.
pub struct ExternalMaxSatSolver {
    buffered_maxsat_solver: BufferedMaxSatSolver,
}

impl ExternalMaxSatSolver {
    /// Builds a new external MaxSAT solver.
    ///
    /// The `program` argument is the path from a directory in the execution
    /// path to the software to execute.
    /// The `options` parameter is the CLI options to provide to the software
    /// under execution.
    pub fn new(program: String, options: Vec<String>) -> Self {
        Self {
            buffered_maxsat_solver: BufferedMaxSatSolver::new(Box::new(move |r| {
                exec_oracle(r, &program, &options)
            })),
        }
    }
}

impl MaxSatSolver for ExternalMaxSatSolver {
    fn add_soft_clause(&mut self, cl: Vec<Literal>, weight: u64) {
        self.buffered_maxsat_solver.add_soft_clause(cl, weight)
    }

    fn solve(&mut self) -> Result<SolvingResult> {
        self.buffered_maxsat_solver.solve()
    }

    fn n_vars(&self) -> usize {
        self.buffered_maxsat_solver.n_vars()
    }

    fn reserve(&mut self, new_max_id: usize) {
        self.buffered_maxsat_solver.reserve(new_max_id)
    }
}

fn exec_oracle(
    mut reader: WcnfInstanceRead,
    program: &str,
    options: &[String],
) -> std::io::Result<Box<dyn Read>> {
    let mut child = Command::new(program)
        .args(options)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()?;
    let mut stdin = child.stdin.take().expect("child stdin must be piped");
    std::thread::spawn(move || {
        let mut buffer = String::new();
        loop {
            match reader.read_to_string(&mut buffer) {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    if stdin.write_all(buffer.as_bytes()).is_err() {
                        break;
                    }
                }
            }
        }
        let _ = stdin.flush();
    });
    // the pipe must be drained before waiting, as a solver producing more
    // output than the pipe buffer holds would otherwise block forever
    let mut stdout = child.stdout.take().expect("child stdout must be piped");
    let mut output = Vec::new();
    stdout.read_to_end(&mut output)?;
    child.wait()?;
    Ok(Box::new(Cursor::new(output)))
}

/// A factory building [`ExternalMaxSatSolver`] instances for a fixed system
/// command.
pub struct ExternalMaxSatSolverFactory {
    program: String,
    options: Vec<String>,
}

impl ExternalMaxSatSolverFactory {
    /// Builds a new factory for the given program and CLI options.
    pub fn new(program: String, options: Vec<String>) -> Self {
        Self { program, options }
    }
}

impl MaxSatSolverFactory for ExternalMaxSatSolverFactory {
    fn new_solver(&self) -> Box<dyn MaxSatSolver> {
        Box::new(ExternalMaxSatSolver::new(
            self.program.clone(),
            self.options.clone(),
        ))
    }
}
