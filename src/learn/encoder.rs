use super::{Atom, WeightedProblem};
use crate::maxsat::{Assignment, Literal, MaxSatSolver};
use std::collections::HashMap;

/// The bidirectional mapping between atoms and solver variables.
///
/// Variables are numbered from 1 in the order the atoms are first met, so
/// encoding the same problem twice yields the same instance.
#[derive(Default)]
pub struct AtomEncoder {
    atom_to_var: HashMap<Atom, usize>,
    var_to_atom: Vec<Atom>,
}

impl AtomEncoder {
    /// Returns the variable associated to the atom, registering a fresh one
    /// at the first call for this atom.
    pub fn var_of(&mut self, atom: Atom) -> usize {
        match self.atom_to_var.get(&atom) {
            Some(v) => *v,
            None => {
                self.var_to_atom.push(atom);
                self.atom_to_var.insert(atom, self.var_to_atom.len());
                self.var_to_atom.len()
            }
        }
    }

    /// Returns the number of atoms registered so far.
    pub fn n_atoms(&self) -> usize {
        self.var_to_atom.len()
    }

    /// Encodes the problem into the solver, one soft clause per constraint.
    pub fn encode_into(&mut self, problem: &WeightedProblem, solver: &mut dyn MaxSatSolver) {
        for (constraint, weight) in problem.iter() {
            let clause = constraint
                .literals()
                .iter()
                .map(|l| {
                    let v = self.var_of(l.atom()) as isize;
                    Literal::from(if l.polarity() { v } else { -v })
                })
                .collect::<Vec<Literal>>();
            solver.add_soft_clause(clause, weight);
        }
    }

    /// Maps an assignment back to (atom, value) couples, skipping the
    /// variables the oracle left unassigned.
    ///
    /// # Panics
    ///
    /// Panics if the assignment involves a variable no atom is mapped to.
    pub fn decode(&self, assignment: &Assignment) -> Vec<(Atom, bool)> {
        assignment
            .iter()
            .filter_map(|(var, value)| {
                let atom = *self
                    .var_to_atom
                    .get(var - 1)
                    .unwrap_or_else(|| panic!("no atom is mapped to variable {}", var));
                value.map(|v| (atom, v))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learn::{Constraint, SignedAtom};
    use crate::maxsat::SolvingResult;
    use crate::model::EffectKind;
    use anyhow::Result;

    #[derive(Default)]
    struct RecordingSolver(Vec<(Vec<Literal>, u64)>);

    impl MaxSatSolver for RecordingSolver {
        fn add_soft_clause(&mut self, cl: Vec<Literal>, weight: u64) {
            self.0.push((cl, weight));
        }

        fn solve(&mut self) -> Result<SolvingResult> {
            Ok(SolvingResult::Unknown)
        }

        fn n_vars(&self) -> usize {
            0
        }

        fn reserve(&mut self, _new_max_id: usize) {}
    }

    fn atom(relation: usize) -> Atom {
        Atom::membership(relation, EffectKind::Add, 0)
    }

    #[test]
    fn test_var_of_is_stable() {
        let mut encoder = AtomEncoder::default();
        assert_eq!(1, encoder.var_of(atom(0)));
        assert_eq!(2, encoder.var_of(atom(1)));
        assert_eq!(1, encoder.var_of(atom(0)));
        assert_eq!(2, encoder.n_atoms());
    }

    #[test]
    fn test_encode_into() {
        let mut problem = WeightedProblem::default();
        problem
            .push(
                Constraint::disjunction(vec![
                    SignedAtom::positive(atom(0)),
                    SignedAtom::negative(atom(1)),
                ]),
                10,
            )
            .unwrap();
        problem
            .push(Constraint::unit(SignedAtom::positive(atom(1))), 20)
            .unwrap();
        let mut encoder = AtomEncoder::default();
        let mut solver = RecordingSolver::default();
        encoder.encode_into(&problem, &mut solver);
        // the constraint is normalized with its negative literal first, so
        // the negated atom gets variable 1
        assert_eq!(
            vec![
                (vec![Literal::from(-1), Literal::from(2)], 10),
                (vec![Literal::from(1)], 20)
            ],
            solver.0
        );
    }

    #[test]
    fn test_decode() {
        let mut encoder = AtomEncoder::default();
        encoder.var_of(atom(0));
        encoder.var_of(atom(1));
        encoder.var_of(atom(2));
        let assignment = Assignment::new(vec![Some(true), None, Some(false)]);
        assert_eq!(
            vec![(atom(0), true), (atom(2), false)],
            encoder.decode(&assignment)
        );
    }

    #[test]
    #[should_panic(expected = "no atom is mapped to variable 2")]
    fn test_decode_unknown_variable_panics() {
        let mut encoder = AtomEncoder::default();
        encoder.var_of(atom(0));
        encoder.decode(&Assignment::new(vec![Some(true), Some(true)]));
    }
}
