use super::SchemaSet;
use std::collections::{BTreeSet, HashMap};

/// The connectivity graph of the active schemas.
///
/// Two schemas are connected iff their parameter-sort sets intersect; the
/// edge holds the shared sorts. A schema may be connected to itself. Edges
/// touching a retired schema are dropped.
#[derive(Default)]
pub struct ConnectivityGraph {
    shared: HashMap<(usize, usize), BTreeSet<String>>,
}

impl ConnectivityGraph {
    /// Builds the graph connecting every pair of active schemas (self-pairs
    /// included) sharing at least one parameter sort.
    pub fn new(schemas: &SchemaSet) -> Self {
        let active = schemas.iter_active().collect::<Vec<_>>();
        let mut shared = HashMap::new();
        for (i, (id1, s1)) in active.iter().enumerate() {
            let sorts1 = s1.sort_set();
            for (id2, s2) in &active[i..] {
                let intersection = s2
                    .sort_set()
                    .into_iter()
                    .filter(|s| sorts1.contains(s))
                    .map(|s| s.to_string())
                    .collect::<BTreeSet<String>>();
                if !intersection.is_empty() {
                    shared.insert((*id1, *id2), intersection);
                }
            }
        }
        Self { shared }
    }

    /// Returns the sorts shared by the two schemas, or [Option::None] if
    /// they are not connected.
    ///
    /// The couple is unordered: `shared_sorts(a, b)` and `shared_sorts(b, a)`
    /// designate the same edge.
    pub fn shared_sorts(&self, a: usize, b: usize) -> Option<&BTreeSet<String>> {
        self.shared.get(&(a.min(b), a.max(b)))
    }

    /// Drops every edge touching the given schema.
    pub fn remove_schema(&mut self, id: usize) {
        self.shared.retain(|(a, b), _| *a != id && *b != id);
    }

    /// Returns the number of edges of the graph.
    pub fn n_edges(&self) -> usize {
        self.shared.len()
    }
}
