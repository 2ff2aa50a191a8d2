use anyhow::Result;
use std::{
    fmt::Display,
    num::{NonZeroIsize, NonZeroUsize},
};

/// A variable in a MaxSAT instance.
///
/// A variable is represented by a non-null positive integer.
/// It can be obtained through the [From] trait from an integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variable(NonZeroUsize);

impl From<usize> for Variable {
    fn from(v: usize) -> Self {
        Self(NonZeroUsize::try_from(v).expect("cannot build a variable from zero"))
    }
}

impl From<Variable> for usize {
    fn from(v: Variable) -> Self {
        v.0.into()
    }
}

/// A literal in a MaxSAT instance.
///
/// A literal is represented by a non-null integer which sign gives the
/// polarity.
/// It can be obtained through the [From] trait from a signed integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal(NonZeroIsize);

impl Literal {
    /// Returns the literal with the opposite polarity.
    pub fn negate(self) -> Self {
        Self(NonZeroIsize::try_from(-self.0.get()).unwrap())
    }

    /// Returns the variable the literal is built on.
    pub fn var(&self) -> Variable {
        Variable(self.0.unsigned_abs())
    }

    /// Returns `true` iff the literal has a positive polarity.
    pub fn polarity(&self) -> bool {
        self.0.get() > 0
    }
}

impl From<isize> for Literal {
    fn from(l: isize) -> Self {
        Self(NonZeroIsize::try_from(l).expect("cannot build a literal from zero"))
    }
}

impl From<i32> for Literal {
    fn from(l: i32) -> Self {
        Self::from(l as isize)
    }
}

impl From<Literal> for isize {
    fn from(l: Literal) -> Self {
        l.0.into()
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Builds a clause from a list of integers.
#[cfg(test)]
macro_rules! clause {
    () => (
        vec![] as Vec<$crate::maxsat::Literal>
    );
    ($($x:expr),+ $(,)?) => (
        [$($x),+].into_iter().map($crate::maxsat::Literal::from).collect::<Vec<$crate::maxsat::Literal>>()
    );
}
#[cfg(test)]
pub(crate) use clause;

/// An assignment of a set of variables.
///
/// Inside the set of variables involved in the assignment, some may be left
/// unassigned by the oracle.
/// This is the reason why the accessor to assigned values returns an [Option].
#[derive(Debug, PartialEq, Eq)]
pub struct Assignment(Vec<Option<bool>>);

impl Assignment {
    pub(crate) fn new(assignment: Vec<Option<bool>>) -> Self {
        Self(assignment)
    }

    /// Returns the value potentially assigned to the variable.
    ///
    /// In case the variable is not assigned, [Option::None] is returned.
    pub fn value_of<T>(&self, v: T) -> Option<bool>
    where
        T: Into<Variable>,
    {
        self.0[usize::from(v.into()) - 1]
    }

    /// Iterates over the (variable index, value) couples of the assignment.
    ///
    /// Variable indexes begin at 1.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<bool>)> + '_ {
        self.0.iter().enumerate().map(|(i, v)| (i + 1, *v))
    }
}

/// The result of a MaxSAT oracle invocation.
#[derive(Debug, PartialEq, Eq)]
pub enum SolvingResult {
    /// The oracle proved its assignment maximizes the total satisfied weight.
    Optimum(Assignment),
    /// The oracle found an assignment but could not prove its optimality.
    Satisfiable(Assignment),
    /// The hard part of the instance is unsatisfiable.
    Unsatisfiable,
    /// The oracle gave up or returned no usable assignment.
    Unknown,
}

impl SolvingResult {
    /// Returns the underlying optimum assignment, or [Option::None] for any
    /// other kind of result.
    pub fn into_optimum(self) -> Option<Assignment> {
        match self {
            SolvingResult::Optimum(assignment) => Some(assignment),
            _ => None,
        }
    }
}

/// A trait for weighted MaxSAT solvers.
///
/// All the clauses of an instance are soft; the weight of an optimum
/// assignment is the sum of the weights of the clauses it satisfies.
pub trait MaxSatSolver {
    /// Adds a soft clause with the given weight to this solver.
    fn add_soft_clause(&mut self, cl: Vec<Literal>, weight: u64);

    /// Solves the instance formed by the clauses added so far.
    ///
    /// An error is returned if the oracle cannot be invoked or if its output
    /// does not follow the expected format.
    fn solve(&mut self) -> Result<SolvingResult>;

    /// Returns the number of variables involved so far.
    fn n_vars(&self) -> usize;

    /// Declares a variable id, growing the variable set if it is higher than
    /// the current maximum.
    fn reserve(&mut self, new_max_id: usize);
}

/// A trait for objects able to build fresh MaxSAT solvers.
///
/// The learning loop solves one instance per round; a factory lets it get a
/// new oracle each time.
pub trait MaxSatSolverFactory {
    /// Builds a new solver.
    fn new_solver(&self) -> Box<dyn MaxSatSolver>;
}
