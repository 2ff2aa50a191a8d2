use super::TypedObject;
use std::fmt::Display;

/// A concrete action occurrence: an action name applied to an ordered list
/// of typed objects.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActionInstance {
    name: String,
    parameters: Vec<TypedObject>,
}

impl ActionInstance {
    /// Builds a new action instance given its name and its parameters.
    pub fn new(name: String, parameters: Vec<TypedObject>) -> Self {
        Self { name, parameters }
    }

    /// Returns the name of the action.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parameters of the action, in argument order.
    pub fn parameters(&self) -> &[TypedObject] {
        &self.parameters
    }

    /// Returns the sorts of the parameters, in argument order.
    pub fn parameter_sorts(&self) -> Vec<String> {
        self.parameters.iter().map(|p| p.sort().to_string()).collect()
    }
}

impl Display for ActionInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, p) in self.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", p)?;
        }
        write!(f, ")")
    }
}
