use super::{Fluent, Step};
use anyhow::anyhow;
use std::collections::BTreeSet;
use std::fmt::Display;

/// An ordered sequence of steps observed during one plan execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    steps: Vec<Step>,
}

impl Trace {
    /// Builds a new trace from its steps.
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Returns the steps of the trace, in execution order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

/// The observation policy a corpus was produced under.
///
/// The learning algorithm checks this token: it only accepts corpora built
/// under the partial-observability policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservationKind {
    /// Every state is fully observed.
    Complete,
    /// Some fluent values may be hidden.
    Partial,
    /// Some fluent values may be hidden, some may be flipped.
    NoisyPartial,
}

impl Display for ObservationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObservationKind::Complete => write!(f, "complete"),
            ObservationKind::Partial => write!(f, "partial"),
            ObservationKind::NoisyPartial => write!(f, "noisy-partial"),
        }
    }
}

impl TryFrom<&str> for ObservationKind {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "complete" => Ok(ObservationKind::Complete),
            "partial" => Ok(ObservationKind::Partial),
            "noisy-partial" => Ok(ObservationKind::NoisyPartial),
            _ => Err(anyhow!(r#"unknown observation kind: "{}""#, value)),
        }
    }
}

/// A corpus of traces, all produced under the same observation policy.
#[derive(Debug, Clone)]
pub struct TraceCorpus {
    traces: Vec<Trace>,
    kind: ObservationKind,
}

impl TraceCorpus {
    /// Builds a new corpus from its traces and the observation policy that
    /// produced them.
    pub fn new(traces: Vec<Trace>, kind: ObservationKind) -> Self {
        Self { traces, kind }
    }

    /// Returns the traces of the corpus.
    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    /// Returns the observation policy token of the corpus.
    pub fn kind(&self) -> ObservationKind {
        self.kind
    }

    /// Returns the fluent vocabulary of the corpus: every fluent appearing
    /// in the initial state of a trace.
    pub fn fluents(&self) -> BTreeSet<Fluent> {
        self.traces
            .iter()
            .filter_map(|t| t.steps().first())
            .filter_map(|s| s.state())
            .flat_map(|s| s.keys().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{State, TypedObject};

    fn fluent(name: &str) -> Fluent {
        Fluent::new(
            name.to_string(),
            vec![TypedObject::new("b1".to_string(), "block".to_string())],
        )
    }

    #[test]
    fn test_observation_kind_round_trip() {
        for kind in [
            ObservationKind::Complete,
            ObservationKind::Partial,
            ObservationKind::NoisyPartial,
        ] {
            assert_eq!(
                kind,
                ObservationKind::try_from(kind.to_string().as_str()).unwrap()
            );
        }
        assert!(ObservationKind::try_from("full").is_err());
    }

    #[test]
    fn test_fluents_come_from_initial_states() {
        let mut s0 = State::new();
        s0.insert(fluent("holding"), Some(false));
        let mut s1 = State::new();
        s1.insert(fluent("clear"), Some(true));
        let trace = Trace::new(vec![
            Step::new(Some(s0), None),
            Step::new(Some(s1), None),
        ]);
        let corpus = TraceCorpus::new(vec![trace], ObservationKind::Partial);
        let fluents = corpus.fluents();
        assert_eq!(1, fluents.len());
        assert!(fluents.contains(&fluent("holding")));
    }

    #[test]
    fn test_fluents_union_over_traces() {
        let mut s0 = State::new();
        s0.insert(fluent("holding"), Some(false));
        let mut s1 = State::new();
        s1.insert(fluent("clear"), None);
        let t1 = Trace::new(vec![Step::new(Some(s0), None)]);
        let t2 = Trace::new(vec![Step::new(Some(s1), None)]);
        let corpus = TraceCorpus::new(vec![t1, t2], ObservationKind::Partial);
        assert_eq!(2, corpus.fluents().len());
    }

    #[test]
    fn test_fluents_with_hidden_initial_state() {
        let trace = Trace::new(vec![Step::new(None, None)]);
        let corpus = TraceCorpus::new(vec![trace], ObservationKind::Partial);
        assert!(corpus.fluents().is_empty());
    }
}
