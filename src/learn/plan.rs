use super::{
    frequent_pairs, Atom, ConnectivityGraph, Constraint, RelationSet, SignedAtom,
};
use crate::trace::{ActionInstance, TraceCorpus};
use std::collections::{BTreeMap, HashMap};

/// Generates the plan constraints of a round, with their support counts.
///
/// Each trace is projected onto its sequence of active schema ids; the
/// frequent ordered pairs of these sequences are mined with the Apriori
/// passes of [frequent_pairs]. For each frequent pair of connected schemas,
/// one constraint requires some relation to explain the ordering: a
/// disjunction of the causal-link atoms of the relations whose sorts all
/// belong to the pair's shared sorts. Zero-arity relations never explain an
/// ordering, and a pair no candidate relation fits is skipped.
pub(crate) fn generate(
    corpus: &TraceCorpus,
    relations: &RelationSet,
    graph: &ConnectivityGraph,
    instance_map: &HashMap<ActionInstance, usize>,
    min_support: usize,
) -> BTreeMap<Constraint, usize> {
    let sequences = corpus
        .traces()
        .iter()
        .map(|trace| {
            trace
                .steps()
                .iter()
                .filter_map(|step| step.action().and_then(|a| instance_map.get(a)).copied())
                .collect::<Vec<usize>>()
        })
        .collect::<Vec<_>>();
    let mut constraints = BTreeMap::new();
    for ((first, second), count) in frequent_pairs(&sequences, min_support) {
        let shared = match graph.shared_sorts(first, second) {
            Some(shared) => shared,
            None => continue,
        };
        let literals = relations
            .iter()
            .filter(|(_, r)| {
                !r.sorts().is_empty() && r.sorts().iter().all(|s| shared.contains(s))
            })
            .map(|(id, _)| SignedAtom::positive(Atom::causal_link(id, first, second)))
            .collect::<Vec<SignedAtom>>();
        if literals.is_empty() {
            continue;
        }
        constraints.insert(Constraint::disjunction(literals), count);
    }
    constraints
}
