//! The ARMS learning core.
//!
//! The pipeline generalizes the corpus into a relation vocabulary and a set
//! of action schemas, derives three weighted constraint families (structural,
//! informational and plan-order) from the traces, assembles them into one
//! weighted MaxSAT instance, solves it through an injected oracle, and folds
//! the decoded facts back into the schemas. Schemas whose fact sets reach the
//! configured upper bound are retired; the loop repeats over the remaining
//! ones until none is left.

mod apriori;
pub(crate) use apriori::frequent_pairs;

mod assembler;
pub(crate) use assembler::assemble;
pub use assembler::WeightedProblem;

mod atoms;
pub use atoms::Atom;
pub use atoms::Constraint;
pub use atoms::SignedAtom;

mod connectivity;
pub use connectivity::ConnectivityGraph;

mod driver;
pub use driver::ArmsConfig;
pub use driver::ArmsLearner;
pub use driver::LearningListener;

mod encoder;
pub use encoder::AtomEncoder;

mod information;
pub(crate) use information::InformationConstraints;

mod plan;

mod schemas;
pub use schemas::SchemaSet;

mod structural;

mod vocabulary;
pub use vocabulary::RelationSet;
