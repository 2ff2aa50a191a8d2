use super::{Atom, Constraint, RelationSet, SchemaSet, SignedAtom};
use crate::model::EffectKind;

/// Generates the structural constraints of a round.
///
/// For each active schema and each relation relevant to it, three
/// implications are emitted:
///
/// - A1a: relation ∈ add ⇒ relation ∉ pre,
/// - A1b: relation ∈ pre ⇒ relation ∉ add,
/// - A2: relation ∈ del ⇒ relation ∈ pre.
///
/// A1a and A1b normalize to the same clause; both are emitted and the
/// assembler deduplicates them (they carry the same weight).
pub(crate) fn generate(schemas: &SchemaSet, relations: &RelationSet) -> Vec<Constraint> {
    let mut constraints = Vec::new();
    for (schema_id, schema) in schemas.iter_active() {
        for (relation_id, relation) in relations.iter() {
            if !schema.is_relevant(relation) {
                continue;
            }
            let in_pre =
                SignedAtom::positive(Atom::membership(relation_id, EffectKind::Precond, schema_id));
            let in_add =
                SignedAtom::positive(Atom::membership(relation_id, EffectKind::Add, schema_id));
            let in_del =
                SignedAtom::positive(Atom::membership(relation_id, EffectKind::Delete, schema_id));
            constraints.push(Constraint::implication(in_add, in_pre.negate()));
            constraints.push(Constraint::implication(in_pre, in_add.negate()));
            constraints.push(Constraint::implication(in_del, in_pre));
        }
    }
    constraints
}
