use std::fmt::Display;

/// An object of the planning domain, tagged with its sort.
///
/// Each object carries exactly one sort: objects with multiple types are not
/// supported by this data model, which is an assumption of the learning
/// algorithm (a single sort generalizes each object across traces).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedObject {
    name: String,
    sort: String,
}

impl TypedObject {
    /// Builds a new typed object given its name and its sort.
    pub fn new(name: String, sort: String) -> Self {
        Self { name, sort }
    }

    /// Returns the name of the object.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the sort of the object.
    pub fn sort(&self) -> &str {
        &self.sort
    }
}

impl Display for TypedObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.name, self.sort)
    }
}

/// A ground fluent: a predicate name applied to an ordered list of typed
/// objects.
///
/// Fluents are totally ordered so observed states can rely on ordered maps,
/// making replays of a corpus deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fluent {
    name: String,
    objects: Vec<TypedObject>,
}

impl Fluent {
    /// Builds a new fluent given its predicate name and its objects.
    pub fn new(name: String, objects: Vec<TypedObject>) -> Self {
        Self { name, objects }
    }

    /// Returns the predicate name of the fluent.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the objects the fluent applies to, in argument order.
    pub fn objects(&self) -> &[TypedObject] {
        &self.objects
    }
}

impl Display for Fluent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, o) in self.objects.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", o)?;
        }
        write!(f, ")")
    }
}
