use crate::trace::{
    ActionInstance, Fluent, ObservationKind, State, Step, Trace, TraceCorpus, TypedObject,
};
use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::io::{BufRead, BufReader, Read};

const NAME_PATTERN: &str = r"[_[:alpha:]][_[:alpha:]\d-]*";

lazy_static! {
    static ref TRACE_LINE_PATTERN: Regex = Regex::new(r"^\s*trace\.\s*$").unwrap();
    static ref STATE_LINE_PATTERN: Regex = Regex::new(r"^\s*state\((.*)\)\.\s*$").unwrap();
    static ref ACTION_LINE_PATTERN: Regex = Regex::new(r"^\s*action\((.*)\)\.\s*$").unwrap();
    static ref GROUND_PATTERN: Regex = Regex::new(&format!(
        r"^\s*({})\(([^()]*)\)\s*$",
        NAME_PATTERN
    ))
    .unwrap();
    static ref OBJECT_PATTERN: Regex = Regex::new(&format!(
        r"^\s*({})\s*:\s*({})\s*$",
        NAME_PATTERN, NAME_PATTERN
    ))
    .unwrap();
}

fn read_objects(args: &str) -> Result<Vec<TypedObject>> {
    if args.trim().is_empty() {
        return Ok(vec![]);
    }
    args.split(',')
        .map(|arg| {
            let c = OBJECT_PATTERN
                .captures(arg)
                .ok_or_else(|| anyhow!(r#"invalid typed object "{}""#, arg.trim()))?;
            Ok(TypedObject::new(
                c.get(1).unwrap().as_str().to_string(),
                c.get(2).unwrap().as_str().to_string(),
            ))
        })
        .collect()
}

fn read_ground(text: &str) -> Result<(String, Vec<TypedObject>)> {
    let c = GROUND_PATTERN
        .captures(text)
        .ok_or_else(|| anyhow!(r#"invalid ground term "{}""#, text.trim()))?;
    Ok((
        c.get(1).unwrap().as_str().to_string(),
        read_objects(c.get(2).unwrap().as_str())?,
    ))
}

fn read_value(text: &str) -> Result<Option<bool>> {
    match text.trim() {
        "true" => Ok(Some(true)),
        "false" => Ok(Some(false)),
        "unknown" => Ok(None),
        _ => Err(anyhow!(r#"invalid fluent value "{}""#, text.trim())),
    }
}

// splits on the commas that are not nested inside parentheses
fn split_entries(text: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut depth = 0;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                entries.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    entries.push(&text[start..]);
    entries
}

fn read_state(content: &str) -> Result<State> {
    let mut state = State::new();
    if content.trim().is_empty() {
        return Ok(state);
    }
    for entry in split_entries(content) {
        let (fluent_text, value_text) = entry
            .rsplit_once('=')
            .ok_or_else(|| anyhow!(r#"missing value in state entry "{}""#, entry.trim()))?;
        let (name, objects) = read_ground(fluent_text)?;
        state.insert(Fluent::new(name, objects), read_value(value_text)?);
    }
    Ok(state)
}

/// A reader for the trace corpus text format.
///
/// A corpus file is a sequence of lines:
///
/// - `trace.` starts a new trace;
/// - `state(f1=v1, f2=v2).` starts a new step carrying the given observed
///   state, where each fluent is written `name(obj:sort,…)` and each value
///   is `true`, `false` or `unknown`; `state().` is an empty observed state;
/// - `action(name(obj:sort,…)).` sets the action of the pending step, or
///   opens a hidden-state step when no state line precedes it;
/// - blank lines are ignored, and lines beginning with `%` are comments.
///
/// # Example
///
/// ```
/// # use tracelearn::io::TraceReader;
/// # use tracelearn::trace::TraceCorpus;
/// fn read_corpus_from_str(s: &str) -> TraceCorpus {
///     TraceReader::default().read(&mut s.as_bytes()).expect("invalid corpus")
/// }
/// # read_corpus_from_str("trace.\nstate(holding(b1:block)=true).\n");
/// ```
pub struct TraceReader {
    kind: ObservationKind,
}

impl Default for TraceReader {
    fn default() -> Self {
        Self {
            kind: ObservationKind::Partial,
        }
    }
}

impl TraceReader {
    /// Builds a reader tagging the corpora it reads with the given
    /// observation kind.
    pub fn new(kind: ObservationKind) -> Self {
        Self { kind }
    }

    /// Reads a trace corpus.
    ///
    /// An error is returned in case a line cannot be parsed or a step
    /// appears before the first `trace.` line; the error context carries the
    /// line number.
    pub fn read(&self, reader: &mut dyn Read) -> Result<TraceCorpus> {
        let mut traces: Vec<Trace> = Vec::new();
        let mut current: Option<Vec<Step>> = None;
        let mut pending_state: Option<State> = None;
        let flush_pending = |steps: &mut Vec<Step>, pending: &mut Option<State>| {
            if let Some(state) = pending.take() {
                steps.push(Step::new(Some(state), None));
            }
        };
        for (i, line) in BufReader::new(reader).lines().enumerate() {
            let context = || format!("while reading line {}", i + 1);
            let l = &line.with_context(context)?;
            if l.trim().is_empty() || l.trim_start().starts_with('%') {
                continue;
            }
            if TRACE_LINE_PATTERN.is_match(l) {
                if let Some(mut steps) = current.take() {
                    flush_pending(&mut steps, &mut pending_state);
                    traces.push(Trace::new(steps));
                }
                current = Some(Vec::new());
                continue;
            }
            let steps = current
                .as_mut()
                .ok_or_else(|| anyhow!("found a step before the first trace line"))
                .with_context(context)?;
            if let Some(c) = STATE_LINE_PATTERN.captures(l) {
                flush_pending(steps, &mut pending_state);
                pending_state =
                    Some(read_state(c.get(1).unwrap().as_str()).with_context(context)?);
            } else if let Some(c) = ACTION_LINE_PATTERN.captures(l) {
                let (name, parameters) =
                    read_ground(c.get(1).unwrap().as_str()).with_context(context)?;
                let action = ActionInstance::new(name, parameters);
                steps.push(Step::new(pending_state.take(), Some(action)));
            } else {
                return Err(anyhow!(r#"syntax error in line "{}""#, l)).with_context(context);
            }
        }
        if let Some(mut steps) = current.take() {
            flush_pending(&mut steps, &mut pending_state);
            traces.push(Trace::new(steps));
        }
        Ok(TraceCorpus::new(traces, self.kind))
    }
}
