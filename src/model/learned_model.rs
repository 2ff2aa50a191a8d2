use super::ActionSchema;
use crate::trace::Fluent;
use std::collections::BTreeSet;

/// The output of the learning algorithm: the fluent vocabulary and the fully
/// learned action schemas.
#[derive(Debug, Clone)]
pub struct LearnedModel {
    fluents: BTreeSet<Fluent>,
    actions: Vec<ActionSchema>,
}

impl LearnedModel {
    /// Builds a new model from the fluent vocabulary and the learned
    /// schemas.
    pub fn new(fluents: BTreeSet<Fluent>, actions: Vec<ActionSchema>) -> Self {
        Self { fluents, actions }
    }

    /// Returns the fluent vocabulary the model was learned from.
    pub fn fluents(&self) -> &BTreeSet<Fluent> {
        &self.fluents
    }

    /// Returns the learned action schemas.
    pub fn actions(&self) -> &[ActionSchema] {
        &self.actions
    }
}
