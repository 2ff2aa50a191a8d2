use permutator::CartesianProduct;
use std::collections::{BTreeMap, HashMap};

/// Mines the frequent ordered pairs of the given schema-id sequences.
///
/// A first Apriori pass keeps the ids occurring at least `min_support` times
/// across all sequences; the candidate pairs are the cartesian square of the
/// survivors, self-pairs excluded. A candidate `(a, b)` is then counted once
/// per occurrence of `a` followed (anywhere later in the same sequence) by an
/// occurrence of `b`, and kept iff its count reaches `min_support`.
pub(crate) fn frequent_pairs(
    sequences: &[Vec<usize>],
    min_support: usize,
) -> BTreeMap<(usize, usize), usize> {
    let mut single_counts: HashMap<usize, usize> = HashMap::new();
    for sequence in sequences {
        for id in sequence {
            *single_counts.entry(*id).or_insert(0) += 1;
        }
    }
    let mut frequent_singles = single_counts
        .into_iter()
        .filter_map(|(id, count)| (count >= min_support).then_some(id))
        .collect::<Vec<usize>>();
    frequent_singles.sort_unstable();
    let mut pairs = BTreeMap::new();
    if frequent_singles.is_empty() {
        return pairs;
    }
    let domains: Vec<&[usize]> = vec![&frequent_singles, &frequent_singles];
    for candidate in domains.as_slice().cart_prod() {
        let (first, second) = (*candidate[0], *candidate[1]);
        if first == second {
            continue;
        }
        let count = sequences
            .iter()
            .flat_map(|sequence| {
                sequence
                    .iter()
                    .enumerate()
                    .filter(|(i, id)| **id == first && sequence[i + 1..].contains(&second))
            })
            .count();
        if count >= min_support {
            pairs.insert((first, second), count);
        }
    }
    pairs
}
