//! Tracelearn is a learner of symbolic action models from plan execution traces.
//!
//! Given a corpus of traces made of (partially observed) states and the actions
//! taken between them, the library generalizes the observed action instances
//! into type-parameterized action schemas and learns their preconditions,
//! add-effects and delete-effects with the ARMS technique: weighted
//! propositional constraints derived from the corpus are handed to a weighted
//! MaxSAT oracle, and the decoded optimum is folded back into the schemas
//! until all of them are fully learned.

#![warn(missing_docs)]

pub mod io;

pub mod learn;

pub mod maxsat;

pub mod model;

pub mod trace;
