use super::{Atom, Constraint, RelationSet, SignedAtom};
use crate::model::EffectKind;
use crate::trace::{ActionInstance, TraceCorpus};
use std::collections::{BTreeMap, HashMap};

/// The output of the information constraint generator: the I1/I2 constraints
/// and the I3 support counts, which only feed the probability-derived
/// weighting.
pub(crate) struct InformationConstraints {
    pub(crate) constraints: Vec<Constraint>,
    pub(crate) support_counts: BTreeMap<Constraint, usize>,
}

/// Generates the information constraints of a round by replaying the corpus.
///
/// For each step `i > 0` carrying an observed state and each fluent observed
/// `true` there:
///
/// - I1: the truth must originate from the add list of some action at an
///   index `< i-1` (omitted when no such action maps to an active schema),
/// - I2: the action at index `i-1` must not have deleted the relation,
/// - I3: if the current step carries a mapped action and is not the last
///   one, the support count of `relation ∈ pre(current)` is incremented;
///   otherwise, if the action at `i-1` maps, the support count of
///   `relation ∈ add(previous)` is.
///
/// Exactly one I3 increment happens per qualifying occurrence. Fluents
/// absent from the vocabulary are ignored.
pub(crate) fn generate(
    corpus: &TraceCorpus,
    relations: &RelationSet,
    instance_map: &HashMap<ActionInstance, usize>,
) -> InformationConstraints {
    let mut constraints = Vec::new();
    let mut support_counts: BTreeMap<Constraint, usize> = BTreeMap::new();
    let schema_at = |steps: &[crate::trace::Step], i: usize| {
        steps[i]
            .action()
            .and_then(|a| instance_map.get(a))
            .copied()
    };
    for trace in corpus.traces() {
        let steps = trace.steps();
        for (i, step) in steps.iter().enumerate() {
            let state = match step.state() {
                Some(state) if i > 0 => state,
                _ => continue,
            };
            for (fluent, value) in state {
                if *value != Some(true) {
                    continue;
                }
                let relation = match relations.id_of_fluent(fluent) {
                    Some(id) => id,
                    None => continue,
                };
                let i1 = (0..i.saturating_sub(1))
                    .filter_map(|j| schema_at(steps, j))
                    .map(|schema| {
                        SignedAtom::positive(Atom::membership(relation, EffectKind::Add, schema))
                    })
                    .collect::<Vec<SignedAtom>>();
                if !i1.is_empty() {
                    constraints.push(Constraint::disjunction(i1));
                }
                if let Some(schema) = schema_at(steps, i - 1) {
                    constraints.push(Constraint::unit(SignedAtom::negative(Atom::membership(
                        relation,
                        EffectKind::Delete,
                        schema,
                    ))));
                }
                if i < steps.len() - 1 && schema_at(steps, i).is_some() {
                    let schema = schema_at(steps, i).unwrap();
                    *support_counts
                        .entry(Constraint::unit(SignedAtom::positive(Atom::membership(
                            relation,
                            EffectKind::Precond,
                            schema,
                        ))))
                        .or_insert(0) += 1;
                } else if let Some(schema) = schema_at(steps, i - 1) {
                    *support_counts
                        .entry(Constraint::unit(SignedAtom::positive(Atom::membership(
                            relation,
                            EffectKind::Add,
                            schema,
                        ))))
                        .or_insert(0) += 1;
                }
            }
        }
    }
    InformationConstraints {
        constraints,
        support_counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learn::SchemaSet;
    use crate::trace::{Fluent, ObservationKind, State, Step, Trace, TypedObject};

    fn holding() -> Fluent {
        Fluent::new(
            "holding".to_string(),
            vec![TypedObject::new("b1".to_string(), "block".to_string())],
        )
    }

    fn action(name: &str) -> ActionInstance {
        ActionInstance::new(
            name.to_string(),
            vec![TypedObject::new("b1".to_string(), "block".to_string())],
        )
    }

    fn state_with(value: Option<bool>) -> State {
        let mut state = State::new();
        state.insert(holding(), value);
        state
    }

    fn setup(steps: Vec<Step>) -> (TraceCorpus, RelationSet, HashMap<ActionInstance, usize>) {
        let corpus = TraceCorpus::new(vec![Trace::new(steps)], ObservationKind::Partial);
        let relations = RelationSet::generalizing(&corpus.fluents());
        let (_, instance_map) = SchemaSet::generalizing(&corpus);
        (corpus, relations, instance_map)
    }

    #[test]
    fn test_i1_window_excludes_previous_action() {
        // holding true at index 1: the only earlier action is at index 0,
        // outside the < i-1 window, so no I1 constraint is emitted.
        let (corpus, relations, map) = setup(vec![
            Step::new(Some(state_with(Some(false))), Some(action("pickup"))),
            Step::new(Some(state_with(Some(true))), Some(action("putdown"))),
            Step::new(Some(state_with(Some(false))), None),
        ]);
        let out = generate(&corpus, &relations, &map);
        let pickup = map[&action("pickup")];
        let i2 = Constraint::unit(SignedAtom::negative(Atom::membership(
            0,
            EffectKind::Delete,
            pickup,
        )));
        assert_eq!(vec![i2], out.constraints);
    }

    #[test]
    fn test_i1_collects_earlier_add_lists() {
        let (corpus, relations, map) = setup(vec![
            Step::new(Some(state_with(Some(false))), Some(action("pickup"))),
            Step::new(None, Some(action("scan"))),
            Step::new(Some(state_with(Some(true))), Some(action("putdown"))),
            Step::new(Some(state_with(Some(false))), None),
        ]);
        let out = generate(&corpus, &relations, &map);
        let pickup = map[&action("pickup")];
        let scan = map[&action("scan")];
        let i1 = Constraint::unit(SignedAtom::positive(Atom::membership(
            0,
            EffectKind::Add,
            pickup,
        )));
        let i2 = Constraint::unit(SignedAtom::negative(Atom::membership(
            0,
            EffectKind::Delete,
            scan,
        )));
        assert!(out.constraints.contains(&i1));
        assert!(out.constraints.contains(&i2));
        assert_eq!(2, out.constraints.len());
    }

    #[test]
    fn test_i3_counts_current_action_precondition() {
        let (corpus, relations, map) = setup(vec![
            Step::new(Some(state_with(Some(false))), Some(action("pickup"))),
            Step::new(Some(state_with(Some(true))), Some(action("putdown"))),
            Step::new(Some(state_with(Some(false))), None),
        ]);
        let out = generate(&corpus, &relations, &map);
        let putdown = map[&action("putdown")];
        let pre = Constraint::unit(SignedAtom::positive(Atom::membership(
            0,
            EffectKind::Precond,
            putdown,
        )));
        assert_eq!(BTreeMap::from([(pre, 1)]), out.support_counts);
    }

    #[test]
    fn test_i3_falls_back_to_previous_action_add_on_last_step() {
        // holding true at the last step: the current step has no action, so
        // the support goes to the add list of the previous action.
        let (corpus, relations, map) = setup(vec![
            Step::new(Some(state_with(Some(false))), Some(action("pickup"))),
            Step::new(Some(state_with(Some(true))), None),
        ]);
        let out = generate(&corpus, &relations, &map);
        let pickup = map[&action("pickup")];
        let add = Constraint::unit(SignedAtom::positive(Atom::membership(
            0,
            EffectKind::Add,
            pickup,
        )));
        assert_eq!(BTreeMap::from([(add, 1)]), out.support_counts);
    }

    #[test]
    fn test_false_and_unknown_values_are_ignored() {
        let (corpus, relations, map) = setup(vec![
            Step::new(Some(state_with(Some(false))), Some(action("pickup"))),
            Step::new(Some(state_with(None)), Some(action("putdown"))),
            Step::new(Some(state_with(Some(false))), None),
        ]);
        let out = generate(&corpus, &relations, &map);
        assert!(out.constraints.is_empty());
        assert!(out.support_counts.is_empty());
    }

    #[test]
    fn test_hidden_states_are_ignored() {
        let (corpus, relations, map) = setup(vec![
            Step::new(Some(state_with(Some(false))), Some(action("pickup"))),
            Step::new(None, Some(action("putdown"))),
            Step::new(None, None),
        ]);
        let out = generate(&corpus, &relations, &map);
        assert!(out.constraints.is_empty());
        assert!(out.support_counts.is_empty());
    }

    #[test]
    fn test_initial_state_is_ignored() {
        let (corpus, relations, map) = setup(vec![
            Step::new(Some(state_with(Some(true))), Some(action("putdown"))),
            Step::new(Some(state_with(Some(false))), None),
        ]);
        let out = generate(&corpus, &relations, &map);
        assert!(out.constraints.is_empty());
        // holding false at index 1, so no support count either
        assert!(out.support_counts.is_empty());
    }

    #[test]
    fn test_retired_schemas_are_skipped() {
        let (corpus, relations, mut map) = setup(vec![
            Step::new(Some(state_with(Some(false))), Some(action("pickup"))),
            Step::new(Some(state_with(Some(true))), Some(action("putdown"))),
            Step::new(Some(state_with(Some(false))), None),
        ]);
        // retiring putdown removes it from the instance map
        let putdown = map[&action("putdown")];
        map.retain(|_, v| *v != putdown);
        let out = generate(&corpus, &relations, &map);
        let pickup = map[&action("pickup")];
        // I3 falls back to the add list of pickup
        let add = Constraint::unit(SignedAtom::positive(Atom::membership(
            0,
            EffectKind::Add,
            pickup,
        )));
        assert_eq!(BTreeMap::from([(add, 1)]), out.support_counts);
    }
}
