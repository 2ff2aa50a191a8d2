//! The observation data model: typed objects, fluents, action instances,
//! steps, traces and trace corpora.
//!
//! A corpus is the input of the learning algorithm. Each of its traces is an
//! ordered sequence of steps; each step exposes an optional observed state
//! (a mapping from fluents to `true`, `false` or unknown values) and the
//! optional action taken from it.

mod actions;
pub use actions::ActionInstance;

mod corpus;
pub use corpus::ObservationKind;
pub use corpus::Trace;
pub use corpus::TraceCorpus;

mod fluents;
pub use fluents::Fluent;
pub use fluents::TypedObject;

mod steps;
pub use steps::State;
pub use steps::Step;
