use super::Relation;
use crate::trace::ActionInstance;
use std::collections::BTreeSet;
use std::fmt::Display;

/// The three membership kinds a relation can have in an action schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EffectKind {
    /// Membership in the precondition set.
    Precond,
    /// Membership in the add-effect set.
    Add,
    /// Membership in the delete-effect set.
    Delete,
}

impl Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EffectKind::Precond => write!(f, "pre"),
            EffectKind::Add => write!(f, "add"),
            EffectKind::Delete => write!(f, "del"),
        }
    }
}

/// A type-generalized action: a name, the ordered sorts of its parameters,
/// and the learned precondition, add-effect and delete-effect relation sets.
///
/// The identity of a schema is its name and parameter sorts; the three
/// relation sets are mutable and grow monotonically while the schema is
/// being learned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSchema {
    name: String,
    parameter_sorts: Vec<String>,
    precond: BTreeSet<Relation>,
    add: BTreeSet<Relation>,
    delete: BTreeSet<Relation>,
}

impl ActionSchema {
    /// Builds a new schema with empty relation sets.
    pub fn new(name: String, parameter_sorts: Vec<String>) -> Self {
        Self {
            name,
            parameter_sorts,
            precond: BTreeSet::new(),
            add: BTreeSet::new(),
            delete: BTreeSet::new(),
        }
    }

    /// Builds the schema generalizing a concrete action instance: the
    /// instance's name and the sorts of its parameters, in argument order.
    pub fn generalizing(instance: &ActionInstance) -> Self {
        Self::new(instance.name().to_string(), instance.parameter_sorts())
    }

    /// Returns the name of the action.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parameter sorts, in argument order.
    pub fn parameter_sorts(&self) -> &[String] {
        &self.parameter_sorts
    }

    /// Returns the set of distinct parameter sorts.
    pub fn sort_set(&self) -> BTreeSet<&str> {
        self.parameter_sorts.iter().map(|s| s.as_str()).collect()
    }

    /// Returns `true` iff the relation is relevant to this schema: it has at
    /// least one argument and all its argument sorts appear among the
    /// schema's parameter sorts.
    pub fn is_relevant(&self, relation: &Relation) -> bool {
        let sorts = self.sort_set();
        !relation.sorts().is_empty()
            && relation.sorts().iter().all(|s| sorts.contains(s.as_str()))
    }

    /// Returns one of the three relation sets.
    pub fn relations_of(&self, kind: EffectKind) -> &BTreeSet<Relation> {
        match kind {
            EffectKind::Precond => &self.precond,
            EffectKind::Add => &self.add,
            EffectKind::Delete => &self.delete,
        }
    }

    /// Adds a relation to one of the three sets.
    ///
    /// Returns `true` iff the relation was not already present.
    pub fn insert(&mut self, kind: EffectKind, relation: Relation) -> bool {
        match kind {
            EffectKind::Precond => self.precond.insert(relation),
            EffectKind::Add => self.add.insert(relation),
            EffectKind::Delete => self.delete.insert(relation),
        }
    }

    /// Returns the size of the largest of the three relation sets.
    ///
    /// A schema is considered fully learned once this reaches the configured
    /// upper bound.
    pub fn max_set_len(&self) -> usize {
        self.precond.len().max(self.add.len()).max(self.delete.len())
    }
}

impl Display for ActionSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        for s in &self.parameter_sorts {
            write!(f, " {}", s)?;
        }
        Ok(())
    }
}
