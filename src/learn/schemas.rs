use crate::model::ActionSchema;
use crate::trace::{ActionInstance, TraceCorpus};
use std::collections::HashMap;

/// The action schemas of a learning run, keyed by a stable id.
///
/// Ids are assigned once at generalization time and never reused: retiring a
/// schema leaves a hole in the id space, so atoms built in earlier rounds
/// keep designating the same schema.
#[derive(Default)]
pub struct SchemaSet {
    schemas: Vec<Option<ActionSchema>>,
    signature_to_id: HashMap<(String, Vec<String>), usize>,
    n_retired: usize,
}

impl SchemaSet {
    /// Generalizes every action instance of the corpus.
    ///
    /// Returns the schema set and the map from each concrete action instance
    /// to the id of its schema, which is needed to replay traces against
    /// schemas.
    pub fn generalizing(corpus: &TraceCorpus) -> (Self, HashMap<ActionInstance, usize>) {
        let mut set = SchemaSet::default();
        let mut instance_map = HashMap::new();
        for trace in corpus.traces() {
            for step in trace.steps() {
                if let Some(instance) = step.action() {
                    let id = set.schema_of(instance);
                    instance_map.insert(instance.clone(), id);
                }
            }
        }
        (set, instance_map)
    }

    fn schema_of(&mut self, instance: &ActionInstance) -> usize {
        let signature = (instance.name().to_string(), instance.parameter_sorts());
        match self.signature_to_id.get(&signature) {
            Some(id) => *id,
            None => {
                self.schemas
                    .push(Some(ActionSchema::generalizing(instance)));
                let id = self.schemas.len() - 1;
                self.signature_to_id.insert(signature, id);
                id
            }
        }
    }

    /// Returns the number of schemas still active.
    pub fn n_active(&self) -> usize {
        self.schemas.len() - self.n_retired
    }

    /// Returns the active schema with the given id.
    ///
    /// # Panics
    ///
    /// Panics if no active schema has such id.
    pub fn get(&self, id: usize) -> &ActionSchema {
        self.schemas[id].as_ref().expect("schema was retired")
    }

    /// Returns a mutable reference on the active schema with the given id.
    ///
    /// # Panics
    ///
    /// Panics if no active schema has such id.
    pub fn get_mut(&mut self, id: usize) -> &mut ActionSchema {
        self.schemas[id].as_mut().expect("schema was retired")
    }

    /// Retires the schema with the given id, removing it from the active set
    /// and returning it.
    ///
    /// # Panics
    ///
    /// Panics if no active schema has such id.
    pub fn retire(&mut self, id: usize) -> ActionSchema {
        self.n_retired += 1;
        self.schemas[id].take().expect("schema was retired")
    }

    /// Iterates over the (id, schema) couples of the active schemas, by
    /// increasing id.
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &ActionSchema)> + '_ {
        self.schemas
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|s| (i, s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{ObservationKind, Step, Trace, TypedObject};

    fn instance(name: &str, obj: &str) -> ActionInstance {
        ActionInstance::new(
            name.to_string(),
            vec![TypedObject::new(obj.to_string(), "block".to_string())],
        )
    }

    fn corpus_of(actions: Vec<ActionInstance>) -> TraceCorpus {
        let steps = actions
            .into_iter()
            .map(|a| Step::new(None, Some(a)))
            .collect();
        TraceCorpus::new(vec![Trace::new(steps)], ObservationKind::Partial)
    }

    #[test]
    fn test_instances_collapse_onto_one_schema() {
        let corpus = corpus_of(vec![instance("pickup", "b1"), instance("pickup", "b2")]);
        let (set, instance_map) = SchemaSet::generalizing(&corpus);
        assert_eq!(1, set.n_active());
        assert_eq!(2, instance_map.len());
        assert_eq!(
            instance_map[&instance("pickup", "b1")],
            instance_map[&instance("pickup", "b2")]
        );
    }

    #[test]
    fn test_distinct_signatures_give_distinct_schemas() {
        let corpus = corpus_of(vec![instance("pickup", "b1"), instance("putdown", "b1")]);
        let (set, instance_map) = SchemaSet::generalizing(&corpus);
        assert_eq!(2, set.n_active());
        assert_ne!(
            instance_map[&instance("pickup", "b1")],
            instance_map[&instance("putdown", "b1")]
        );
    }

    #[test]
    fn test_retire() {
        let corpus = corpus_of(vec![instance("pickup", "b1"), instance("putdown", "b1")]);
        let (mut set, _) = SchemaSet::generalizing(&corpus);
        let retired = set.retire(0);
        assert_eq!("pickup", retired.name());
        assert_eq!(1, set.n_active());
        assert_eq!(vec![1], set.iter_active().map(|(i, _)| i).collect::<Vec<usize>>());
    }

    #[test]
    #[should_panic(expected = "schema was retired")]
    fn test_get_retired_panics() {
        let corpus = corpus_of(vec![instance("pickup", "b1")]);
        let (mut set, _) = SchemaSet::generalizing(&corpus);
        set.retire(0);
        set.get(0);
    }
}
