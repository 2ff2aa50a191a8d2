use crate::model::Relation;
use crate::trace::Fluent;
use std::collections::{BTreeSet, HashMap};

/// The relation vocabulary of a learning run: every relation generalizing an
/// observed fluent, keyed by a stable id.
///
/// The set also retains which relation each fluent collapsed onto, as the
/// information constraints need to map observed fluent values back to
/// relations.
#[derive(Default)]
pub struct RelationSet {
    relations: Vec<Relation>,
    relation_to_id: HashMap<Relation, usize>,
    fluent_to_id: HashMap<Fluent, usize>,
}

impl RelationSet {
    /// Builds the vocabulary generalizing the given fluents.
    ///
    /// Many fluents may collapse onto the same relation; ids are assigned in
    /// the iteration order of the first fluent mapping to each relation.
    pub fn generalizing(fluents: &BTreeSet<Fluent>) -> Self {
        let mut set = RelationSet::default();
        for fluent in fluents {
            let relation = Relation::generalizing(fluent);
            let id = match set.relation_to_id.get(&relation) {
                Some(id) => *id,
                None => {
                    set.relations.push(relation.clone());
                    set.relation_to_id.insert(relation, set.relations.len() - 1);
                    set.relations.len() - 1
                }
            };
            set.fluent_to_id.insert(fluent.clone(), id);
        }
        set
    }

    /// Returns the number of relations in the vocabulary.
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    /// Returns `true` iff the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    /// Returns the relation with the given id.
    ///
    /// # Panics
    ///
    /// Panics if no relation has such id.
    pub fn get(&self, id: usize) -> &Relation {
        &self.relations[id]
    }

    /// Returns the id of the relation a fluent collapsed onto, if the fluent
    /// belongs to the vocabulary.
    pub fn id_of_fluent(&self, fluent: &Fluent) -> Option<usize> {
        self.fluent_to_id.get(fluent).copied()
    }

    /// Iterates over the (id, relation) couples of the vocabulary, by
    /// increasing id.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Relation)> + '_ {
        self.relations.iter().enumerate()
    }
}
