use crate::trace::Fluent;
use std::fmt::Display;

/// A type-generalized fluent: a predicate name and the ordered sorts of its
/// arguments.
///
/// Many ground fluents collapse onto one relation. A relation is immutable
/// and identified by its canonical form `name sort1 sort2 …`, which is also
/// its display form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Relation {
    name: String,
    sorts: Vec<String>,
}

impl Relation {
    /// Builds a new relation given its name and its argument sorts.
    pub fn new(name: String, sorts: Vec<String>) -> Self {
        Self { name, sorts }
    }

    /// Builds the relation generalizing a ground fluent: the fluent's name
    /// and the sorts of its objects, in argument order.
    pub fn generalizing(fluent: &Fluent) -> Self {
        Self {
            name: fluent.name().to_string(),
            sorts: fluent
                .objects()
                .iter()
                .map(|o| o.sort().to_string())
                .collect(),
        }
    }

    /// Returns the predicate name of the relation.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the argument sorts of the relation, in argument order.
    pub fn sorts(&self) -> &[String] {
        &self.sorts
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        for s in &self.sorts {
            write!(f, " {}", s)?;
        }
        Ok(())
    }
}
