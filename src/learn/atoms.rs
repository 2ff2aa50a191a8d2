use crate::model::EffectKind;
use std::fmt::Display;

/// A named boolean fact the learning constraints are built on.
///
/// Relations and schemas are designated by their ids in the current
/// [`RelationSet`](crate::learn::RelationSet) and
/// [`SchemaSet`](crate::learn::SchemaSet); the solver boundary maps atoms to
/// integer variables through the [`AtomEncoder`](crate::learn::AtomEncoder),
/// so no string encoding is involved in the pipeline itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Atom {
    /// The membership of a relation in one of a schema's three sets.
    Membership {
        /// The relation id.
        relation: usize,
        /// The membership kind.
        kind: EffectKind,
        /// The schema id.
        schema: usize,
    },
    /// The existence of a causal link between two schemas through a
    /// relation.
    CausalLink {
        /// The relation id.
        relation: usize,
        /// The id of the earlier schema.
        first: usize,
        /// The id of the later schema.
        second: usize,
    },
}

impl Atom {
    /// Builds a membership atom.
    pub fn membership(relation: usize, kind: EffectKind, schema: usize) -> Self {
        Atom::Membership {
            relation,
            kind,
            schema,
        }
    }

    /// Builds a causal-link atom.
    pub fn causal_link(relation: usize, first: usize, second: usize) -> Self {
        Atom::CausalLink {
            relation,
            first,
            second,
        }
    }
}

impl Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Atom::Membership {
                relation,
                kind,
                schema,
            } => write!(f, "r{}_in_{}_a{}", relation, kind, schema),
            Atom::CausalLink {
                relation,
                first,
                second,
            } => write!(f, "r{}_relevant_a{}_a{}", relation, first, second),
        }
    }
}

/// An atom with a polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignedAtom {
    positive: bool,
    atom: Atom,
}

impl SignedAtom {
    /// Builds a positive occurrence of an atom.
    pub fn positive(atom: Atom) -> Self {
        Self {
            positive: true,
            atom,
        }
    }

    /// Builds a negative occurrence of an atom.
    pub fn negative(atom: Atom) -> Self {
        Self {
            positive: false,
            atom,
        }
    }

    /// Returns the occurrence with the opposite polarity.
    pub fn negate(self) -> Self {
        Self {
            positive: !self.positive,
            atom: self.atom,
        }
    }

    /// Returns the underlying atom.
    pub fn atom(&self) -> Atom {
        self.atom
    }

    /// Returns `true` iff this is a positive occurrence.
    pub fn polarity(&self) -> bool {
        self.positive
    }
}

impl Display for SignedAtom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.positive {
            write!(f, "~")?;
        }
        write!(f, "{}", self.atom)
    }
}

/// A disjunction of signed atoms.
///
/// Constraints are kept in a normalized form (literals sorted and
/// deduplicated) so that structural equality is canonical: two derivations
/// of the same disjunction always compare equal. The empty disjunction is
/// trivially false.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Constraint(Vec<SignedAtom>);

impl Constraint {
    /// Builds the normalized disjunction of the given literals.
    pub fn disjunction(mut literals: Vec<SignedAtom>) -> Self {
        literals.sort_unstable();
        literals.dedup();
        Self(literals)
    }

    /// Builds a single-literal constraint.
    pub fn unit(literal: SignedAtom) -> Self {
        Self(vec![literal])
    }

    /// Builds the clausal form of `premise ⇒ conclusion`.
    pub fn implication(premise: SignedAtom, conclusion: SignedAtom) -> Self {
        Self::disjunction(vec![premise.negate(), conclusion])
    }

    /// Returns the literals of the constraint, in normalized order.
    pub fn literals(&self) -> &[SignedAtom] {
        &self.0
    }

    /// Returns `true` iff the constraint is the empty disjunction.
    pub fn is_trivially_false(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "false");
        }
        for (i, l) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}", l)?;
        }
        Ok(())
    }
}
