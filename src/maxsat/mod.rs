//! Weighted MaxSAT solver interfaces used to solve the learning constraints.
//!
//! The oracle itself is a black box: it is reached either through an external
//! program speaking the WCNF input format and the competition output format
//! (see [`ExternalMaxSatSolver`]), or through an arbitrary solving function
//! (see [`BufferedMaxSatSolver`]), which is the way tests inject fake or
//! exhaustive oracles.

mod buffered_maxsat_solver;
pub use buffered_maxsat_solver::BufferedMaxSatSolver;
pub use buffered_maxsat_solver::SolvingFn;
pub use buffered_maxsat_solver::WcnfInstanceRead;

mod external_maxsat_solver;
pub use external_maxsat_solver::ExternalMaxSatSolver;
pub use external_maxsat_solver::ExternalMaxSatSolverFactory;

mod maxsat_solver;
#[cfg(test)]
pub(crate) use maxsat_solver::clause;
pub use maxsat_solver::Assignment;
pub use maxsat_solver::Literal;
pub use maxsat_solver::MaxSatSolver;
pub use maxsat_solver::MaxSatSolverFactory;
pub use maxsat_solver::SolvingResult;
pub use maxsat_solver::Variable;
