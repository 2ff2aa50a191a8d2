//! The learned-model data: type-generalized relations, action schemas and
//! the final model.

mod action_schema;
pub use action_schema::ActionSchema;
pub use action_schema::EffectKind;

mod learned_model;
pub use learned_model::LearnedModel;

mod relation;
pub use relation::Relation;
