use super::{ActionInstance, Fluent};
use std::collections::BTreeMap;

/// An observed state: a mapping from fluents to their observed values.
///
/// A `None` value models a fluent whose value is unknown (hidden by the
/// observation policy).
pub type State = BTreeMap<Fluent, Option<bool>>;

/// A step of a trace: the state observed before the action, and the action
/// taken from it.
///
/// Both components are optional. A fully hidden state is `None`; the last
/// step of a trace usually carries the final state and no action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    state: Option<State>,
    action: Option<ActionInstance>,
}

impl Step {
    /// Builds a new step given its optional observed state and its optional
    /// action.
    pub fn new(state: Option<State>, action: Option<ActionInstance>) -> Self {
        Self { state, action }
    }

    /// Returns the state observed before the action, if any.
    pub fn state(&self) -> Option<&State> {
        self.state.as_ref()
    }

    /// Returns the action taken at this step, if any.
    pub fn action(&self) -> Option<&ActionInstance> {
        self.action.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::TypedObject;

    #[test]
    fn test_step_accessors() {
        let f = Fluent::new(
            "holding".to_string(),
            vec![TypedObject::new("b1".to_string(), "block".to_string())],
        );
        let mut state = State::new();
        state.insert(f.clone(), Some(true));
        let a = ActionInstance::new(
            "putdown".to_string(),
            vec![TypedObject::new("b1".to_string(), "block".to_string())],
        );
        let step = Step::new(Some(state), Some(a.clone()));
        assert_eq!(Some(&Some(true)), step.state().unwrap().get(&f));
        assert_eq!(Some(&a), step.action());
        let hidden = Step::new(None, None);
        assert!(hidden.state().is_none());
        assert!(hidden.action().is_none());
    }
}
