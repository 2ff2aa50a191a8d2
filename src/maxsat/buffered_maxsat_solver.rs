use super::{Assignment, Literal, MaxSatSolver, SolvingResult};
use anyhow::{anyhow, Context, Result};
use std::io::{BufRead, BufReader, Cursor, Read, Write};

/// The type of the functions used to execute the underlying oracle.
///
/// The function is given a reader over the WCNF instance and returns a reader
/// over the oracle output, or an error if the oracle could not be invoked.
pub type SolvingFn = dyn Fn(WcnfInstanceRead) -> std::io::Result<Box<dyn Read>>;

/// A reader over a WCNF instance, beginning with its preamble line.
pub struct WcnfInstanceRead {
    preamble: Cursor<String>,
    clauses: Cursor<String>,
}

impl Read for WcnfInstanceRead {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let r = self.preamble.read(buf)?;
        if r > 0 {
            return Ok(r);
        }
        self.clauses.read(buf)
    }
}

const DEFAULT_BUFFER_CAP: usize = 1 << 20;

/// A MaxSAT solver buffering its clauses as WCNF text and delegating the
/// solving process to a function.
///
/// The instance follows the WCNF format of the MaxSAT evaluations: each
/// clause line begins with its weight, and the preamble declares a `top`
/// weight higher than the sum of the soft weights.
/// The solving function output must follow the competition output format
/// (`s`/`o`/`v`/`c` lines).
pub struct BufferedMaxSatSolver {
    n_vars: usize,
    n_clauses: usize,
    weight_sum: u64,
    clauses: String,
    solving_fn: Box<SolvingFn>,
}

impl BufferedMaxSatSolver {
    /// Builds a new buffered solver delegating the solving process to the
    /// given function.
    pub fn new(solving_fn: Box<SolvingFn>) -> Self {
        Self {
            n_vars: 0,
            n_clauses: 0,
            weight_sum: 0,
            clauses: String::with_capacity(DEFAULT_BUFFER_CAP),
            solving_fn,
        }
    }

    /// Writes the WCNF instance built from the clauses added so far.
    ///
    /// This is the exact content given to the solving function; it is also
    /// what the `encode` CLI command dumps.
    pub fn write_instance(&self, writer: &mut dyn Write) -> Result<()> {
        let context = "while writing a WCNF instance";
        write!(writer, "{}", self.preamble()).context(context)?;
        write!(writer, "{}", self.clauses).context(context)?;
        writer.flush().context(context)
    }

    fn preamble(&self) -> String {
        format!(
            "p wcnf {} {} {}\n",
            self.n_vars,
            self.n_clauses,
            1 + self.weight_sum
        )
    }

    fn parse_output(&self, output: Box<dyn Read>) -> Result<SolvingResult> {
        let context = "while reading the MaxSAT oracle output";
        let mut status: Option<OutputStatus> = None;
        let mut assignment = vec![None; self.n_vars];
        let mut assignment_line_seen = false;
        let mut assignment_line_end = false;
        for line in BufReader::new(output).lines() {
            let line = line.context(context)?;
            if line == "s OPTIMUM FOUND" || line == "s SATISFIABLE" || line == "s UNSATISFIABLE"
                || line == "s UNKNOWN"
            {
                if status.is_some() {
                    return Err(anyhow!("multiple status lines")).context(context);
                }
                status = Some(match line.as_str() {
                    "s OPTIMUM FOUND" => OutputStatus::Optimum,
                    "s SATISFIABLE" => OutputStatus::Satisfiable,
                    "s UNSATISFIABLE" => OutputStatus::Unsatisfiable,
                    _ => OutputStatus::Unknown,
                });
            } else if line.starts_with("v ") {
                assignment_line_seen = true;
                for w in line.split_ascii_whitespace().skip(1) {
                    let n = w
                        .parse::<isize>()
                        .map_err(|_| anyhow!(r#""{}" is not a literal"#, w))
                        .context(context)?;
                    if n == 0 {
                        if assignment_line_end {
                            return Err(anyhow!("multiple zeroes on value lines"))
                                .context(context);
                        }
                        assignment_line_end = true;
                    } else {
                        let v = n.unsigned_abs() - 1;
                        if v >= self.n_vars {
                            return Err(anyhow!(
                                "variable {} in a value line is out of bounds",
                                n.unsigned_abs()
                            ))
                            .context(context);
                        }
                        assignment[v] = Some(n > 0);
                    }
                }
            } else if line.starts_with("o ") {
                line[2..]
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| anyhow!(r#"invalid cost line "{}""#, line))
                    .context(context)?;
            } else if !line.starts_with("c ") && line != "c" && line != "v" && !line.is_empty() {
                return Err(anyhow!(r#"unexpected line "{}""#, line)).context(context);
            }
        }
        Ok(match status {
            Some(OutputStatus::Optimum) if assignment_line_seen => {
                SolvingResult::Optimum(Assignment::new(assignment))
            }
            Some(OutputStatus::Satisfiable) if assignment_line_seen => {
                SolvingResult::Satisfiable(Assignment::new(assignment))
            }
            Some(OutputStatus::Unsatisfiable) => SolvingResult::Unsatisfiable,
            _ => SolvingResult::Unknown,
        })
    }
}

enum OutputStatus {
    Optimum,
    Satisfiable,
    Unsatisfiable,
    Unknown,
}

impl MaxSatSolver for BufferedMaxSatSolver {
    fn add_soft_clause(&mut self, cl: Vec<Literal>, weight: u64) {
        self.clauses.push_str(&format!("{}", weight));
        cl.iter().for_each(|l| {
            self.n_vars = usize::max(self.n_vars, usize::from(l.var()));
            self.clauses.push_str(&format!(" {}", l));
        });
        self.clauses.push_str(" 0\n");
        self.n_clauses += 1;
        self.weight_sum += weight;
    }

    fn solve(&mut self) -> Result<SolvingResult> {
        let instance_reader = WcnfInstanceRead {
            preamble: Cursor::new(self.preamble()),
            clauses: Cursor::new(self.clauses.clone()),
        };
        let output =
            (self.solving_fn)(instance_reader).context("while invoking the MaxSAT oracle")?;
        self.parse_output(output)
    }

    fn n_vars(&self) -> usize {
        self.n_vars
    }

    fn reserve(&mut self, new_max_id: usize) {
        if new_max_id > self.n_vars {
            self.n_vars = new_max_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maxsat::clause;

    fn input_check_solving_fn(expected_input: &'static str) -> Box<SolvingFn> {
        Box::new(move |mut r| {
            let mut buffer = String::new();
            r.read_to_string(&mut buffer).unwrap();
            assert_eq!(expected_input, buffer);
            Ok(Box::new(&[] as &[u8]))
        })
    }

    fn fake_output_solving_fn(output: &'static str) -> Box<SolvingFn> {
        Box::new(|_| Ok(Box::new(output.as_bytes())))
    }

    #[test]
    fn test_input_ok() {
        let expected = "p wcnf 2 3 31\n10 1 2 0\n10 -1 -2 0\n10 1 0\n";
        let mut s = BufferedMaxSatSolver::new(input_check_solving_fn(expected));
        s.add_soft_clause(clause![1, 2], 10);
        s.add_soft_clause(clause![-1, -2], 10);
        s.add_soft_clause(clause![1], 10);
        s.solve().unwrap();
    }

    #[test]
    fn test_write_instance() {
        let mut s = BufferedMaxSatSolver::new(fake_output_solving_fn(""));
        s.add_soft_clause(clause![1, -2], 5);
        let mut out = Vec::new();
        s.write_instance(&mut out).unwrap();
        assert_eq!("p wcnf 2 1 6\n5 1 -2 0\n", String::from_utf8(out).unwrap());
    }

    #[test]
    fn test_output_optimum_ok() {
        let solver_output = "c comment\no 10\ns OPTIMUM FOUND\nv -1 2 0\n";
        let mut s = BufferedMaxSatSolver::new(fake_output_solving_fn(solver_output));
        s.add_soft_clause(clause![-1, 2], 10);
        let assignment = s.solve().unwrap().into_optimum().unwrap();
        assert_eq!(Some(false), assignment.value_of(1));
        assert_eq!(Some(true), assignment.value_of(2));
    }

    #[test]
    fn test_output_optimum_multiple_v_lines() {
        let solver_output = "s OPTIMUM FOUND\nv 1\nv 2\nv 0\n";
        let mut s = BufferedMaxSatSolver::new(fake_output_solving_fn(solver_output));
        s.add_soft_clause(clause![1, 2], 1);
        let assignment = s.solve().unwrap().into_optimum().unwrap();
        assert_eq!(Some(true), assignment.value_of(1));
        assert_eq!(Some(true), assignment.value_of(2));
    }

    #[test]
    fn test_output_satisfiable_is_not_optimum() {
        let solver_output = "s SATISFIABLE\nv 1 2 0\n";
        let mut s = BufferedMaxSatSolver::new(fake_output_solving_fn(solver_output));
        s.add_soft_clause(clause![1, 2], 1);
        assert!(s.solve().unwrap().into_optimum().is_none());
    }

    #[test]
    fn test_output_unsat() {
        let solver_output = "s UNSATISFIABLE\n";
        let mut s = BufferedMaxSatSolver::new(fake_output_solving_fn(solver_output));
        s.add_soft_clause(clause![1], 1);
        assert_eq!(SolvingResult::Unsatisfiable, s.solve().unwrap());
    }

    #[test]
    fn test_output_no_status_line() {
        let solver_output = "v 1 2 0\n";
        let mut s = BufferedMaxSatSolver::new(fake_output_solving_fn(solver_output));
        s.add_soft_clause(clause![1, 2], 1);
        assert_eq!(SolvingResult::Unknown, s.solve().unwrap());
    }

    #[test]
    fn test_output_optimum_without_values() {
        let solver_output = "s OPTIMUM FOUND\n";
        let mut s = BufferedMaxSatSolver::new(fake_output_solving_fn(solver_output));
        s.add_soft_clause(clause![1, 2], 1);
        assert_eq!(SolvingResult::Unknown, s.solve().unwrap());
    }

    #[test]
    fn test_output_multiple_status_lines() {
        let solver_output = "s OPTIMUM FOUND\ns OPTIMUM FOUND\nv 1 2 0\n";
        let mut s = BufferedMaxSatSolver::new(fake_output_solving_fn(solver_output));
        s.add_soft_clause(clause![1, 2], 1);
        assert!(s.solve().is_err());
    }

    #[test]
    fn test_output_var_out_of_bounds() {
        let solver_output = "s OPTIMUM FOUND\nv 1 2 3 0\n";
        let mut s = BufferedMaxSatSolver::new(fake_output_solving_fn(solver_output));
        s.add_soft_clause(clause![1, 2], 1);
        assert!(s.solve().is_err());
    }

    #[test]
    fn test_output_not_a_literal() {
        let solver_output = "s OPTIMUM FOUND\nv 1 foo 0\n";
        let mut s = BufferedMaxSatSolver::new(fake_output_solving_fn(solver_output));
        s.add_soft_clause(clause![1, 2], 1);
        assert!(s.solve().is_err());
    }

    #[test]
    fn test_output_multiple_zeroes() {
        let solver_output = "s OPTIMUM FOUND\nv 1 0\nv 2 0\n";
        let mut s = BufferedMaxSatSolver::new(fake_output_solving_fn(solver_output));
        s.add_soft_clause(clause![1, 2], 1);
        assert!(s.solve().is_err());
    }

    #[test]
    fn test_output_unexpected_line() {
        let solver_output = "foo\ns OPTIMUM FOUND\nv 1 2 0\n";
        let mut s = BufferedMaxSatSolver::new(fake_output_solving_fn(solver_output));
        s.add_soft_clause(clause![1, 2], 1);
        assert!(s.solve().is_err());
    }

    #[test]
    fn test_output_invalid_cost_line() {
        let solver_output = "o ten\ns OPTIMUM FOUND\nv 1 2 0\n";
        let mut s = BufferedMaxSatSolver::new(fake_output_solving_fn(solver_output));
        s.add_soft_clause(clause![1, 2], 1);
        assert!(s.solve().is_err());
    }

    #[test]
    fn test_solving_fn_error() {
        let mut s = BufferedMaxSatSolver::new(Box::new(|_| {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no oracle"))
        }));
        s.add_soft_clause(clause![1], 1);
        assert!(s.solve().is_err());
    }

    #[test]
    fn test_reserve() {
        let mut s = BufferedMaxSatSolver::new(fake_output_solving_fn(""));
        assert_eq!(0, s.n_vars());
        s.reserve(5);
        assert_eq!(5, s.n_vars());
        s.reserve(3);
        assert_eq!(5, s.n_vars());
    }
}
