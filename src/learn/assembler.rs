use super::{Constraint, InformationConstraints};
use anyhow::{anyhow, Result};
use std::collections::{BTreeMap, HashMap};

/// A weighted constraint problem, ready to be encoded for a MaxSAT oracle.
///
/// Constraints are kept in insertion order so that variable numbering at the
/// solver boundary is reproducible. A constraint may be pushed several times
/// with the same weight; pushing it again with a different weight is an
/// error, as the two weights cannot both hold.
#[derive(Default)]
pub struct WeightedProblem {
    constraints: Vec<(Constraint, u64)>,
    index: HashMap<Constraint, usize>,
}

impl WeightedProblem {
    /// Adds a constraint with its weight.
    ///
    /// Trivially false constraints are discarded and duplicates are kept
    /// once. An error is returned if the constraint was already added with
    /// another weight.
    pub fn push(&mut self, constraint: Constraint, weight: u64) -> Result<()> {
        if constraint.is_trivially_false() {
            return Ok(());
        }
        match self.index.get(&constraint) {
            Some(i) => {
                let registered = self.constraints[*i].1;
                if registered == weight {
                    Ok(())
                } else {
                    Err(anyhow!(
                        r#"inconsistent weights for constraint "{}": {} and {}"#,
                        constraint,
                        registered,
                        weight
                    ))
                }
            }
            None => {
                self.index.insert(constraint.clone(), self.constraints.len());
                self.constraints.push((constraint, weight));
                Ok(())
            }
        }
    }

    /// Returns the number of constraints of the problem.
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Returns `true` iff the problem has no constraint.
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Iterates over the (constraint, weight) couples, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Constraint, u64)> + '_ {
        self.constraints.iter().map(|(c, w)| (c, *w))
    }
}

/// Turns support counts into weights.
///
/// Each count is normalized by the highest one; a constraint whose rate
/// exceeds the threshold weighs `round(rate * 100)`, the others get the
/// default weight. The output preserves the map order of the input.
pub(crate) fn support_rates(
    support_counts: &BTreeMap<Constraint, usize>,
    threshold: f64,
    default_weight: u64,
) -> Vec<(Constraint, u64)> {
    let z = support_counts.values().copied().max().unwrap_or(0);
    support_counts
        .iter()
        .map(|(constraint, count)| {
            let rate = *count as f64 / z as f64;
            let weight = if rate > threshold {
                (rate * 100.0).round() as u64
            } else {
                default_weight
            };
            (constraint.clone(), weight)
        })
        .collect()
}

/// Assembles the constraints of a round into one weighted problem.
///
/// Structural constraints weigh `structural_weight` and I1/I2 constraints weigh
/// `info_weight`; the I3 and plan constraints are weighted by their support
/// rates, each family normalized by its own maximal count.
pub(crate) fn assemble(
    structural: Vec<Constraint>,
    structural_weight: u64,
    information: InformationConstraints,
    info_weight: u64,
    plan_counts: BTreeMap<Constraint, usize>,
    threshold: f64,
    info3_default_weight: u64,
    plan_default_weight: u64,
) -> Result<WeightedProblem> {
    let mut problem = WeightedProblem::default();
    for constraint in structural {
        problem.push(constraint, structural_weight)?;
    }
    for constraint in information.constraints {
        problem.push(constraint, info_weight)?;
    }
    for (constraint, weight) in support_rates(
        &information.support_counts,
        threshold,
        info3_default_weight,
    ) {
        problem.push(constraint, weight)?;
    }
    for (constraint, weight) in support_rates(&plan_counts, threshold, plan_default_weight) {
        problem.push(constraint, weight)?;
    }
    Ok(problem)
}
