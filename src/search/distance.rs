//! Specialty-ratio distance: how far a passing subset is from the target mix.
//!
//! Only labels observed in the subset contribute a term. An observed label
//! without a target is compared against 0; a targeted label that nobody in the
//! subset carries is ignored. That asymmetry is deliberate and kept as-is.

use std::collections::BTreeMap;

use crate::domain::Candidate;

/// Euclidean distance between observed and target specialty fractions.
///
/// Returns `Some(0.0)` whenever the objective is disabled. Returns `None` only
/// for an empty subset with the objective enabled (there is no fraction to
/// compute); the searcher never scores empty subsets.
pub fn specialty_ratio_distance(
    subset: &[&Candidate],
    min_specialty_ratio: &BTreeMap<String, f64>,
    use_specialty_threshold: bool,
) -> Option<f64> {
    if !use_specialty_threshold {
        return Some(0.0);
    }

    let ratios = specialty_ratios(subset)?;
    let sum_sq: f64 = ratios
        .iter()
        .map(|(label, observed)| {
            let target = min_specialty_ratio.get(label).copied().unwrap_or(0.0);
            let diff = observed - target;
            diff * diff
        })
        .sum();

    Some(sum_sq.sqrt())
}

/// Count of candidates per specialty label.
pub fn specialty_counts(subset: &[&Candidate]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for c in subset {
        *counts.entry(c.specialty.clone()).or_insert(0) += 1;
    }
    counts
}

/// Fraction of the subset per specialty label (`None` for an empty subset).
pub fn specialty_ratios(subset: &[&Candidate]) -> Option<BTreeMap<String, f64>> {
    if subset.is_empty() {
        return None;
    }
    let total = subset.len() as f64;
    Some(
        specialty_counts(subset)
            .into_iter()
            .map(|(label, count)| (label, count as f64 / total))
            .collect(),
    )
}
