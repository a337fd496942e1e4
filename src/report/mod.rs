//! Reporting utilities: the statistics shown for a winning threshold pair.

use serde::{Deserialize, Serialize};

use crate::domain::{Candidate, ConstraintConfig, ThresholdPair};
use crate::error::AppError;
use crate::search::{count_highschool, filter_passing_candidates, specialty_counts, specialty_ratio_distance};

pub mod format;

pub use format::*;

/// One specialty's share of the passing set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialtyShare {
    pub label: String,
    pub count: usize,
    pub ratio: f64,
}

/// Everything the caller displays about the passing set at a threshold pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassSummary {
    pub thresholds: ThresholdPair,
    pub dataset_size: usize,
    pub total_pass: usize,
    pub highschool_pass: usize,
    /// `floor(total_pass / dataset_size * 100)`.
    pub pass_ratio_pct: usize,
    /// Lowest scores actually admitted (the effective cut).
    pub min_class_score: u32,
    pub min_quiz_score: u32,
    /// Sorted by count (descending), then label.
    pub specialties: Vec<SpecialtyShare>,
    pub distance: f64,
}

/// Filter `dataset` at `pair` and summarize the passing set.
pub fn summarize(
    dataset: &[Candidate],
    pair: ThresholdPair,
    constraints: &ConstraintConfig,
) -> Result<PassSummary, AppError> {
    let subset = filter_passing_candidates(
        dataset,
        pair.class_threshold,
        pair.quiz_threshold,
        constraints.min_class_score,
        constraints.min_quiz_score,
    );
    summarize_subset(&subset, dataset.len(), pair, constraints)
}

/// Summarize an already-filtered passing set.
pub fn summarize_subset(
    subset: &[&Candidate],
    dataset_size: usize,
    pair: ThresholdPair,
    constraints: &ConstraintConfig,
) -> Result<PassSummary, AppError> {
    let (Some(min_class_score), Some(min_quiz_score)) = (
        subset.iter().map(|c| c.class_score).min(),
        subset.iter().map(|c| c.quiz_score).min(),
    ) else {
        return Err(AppError::infeasible(format!("No candidate passes at thresholds {pair}.")));
    };

    let total_pass = subset.len();
    let mut specialties: Vec<SpecialtyShare> = specialty_counts(subset)
        .into_iter()
        .map(|(label, count)| SpecialtyShare {
            label,
            count,
            ratio: count as f64 / total_pass as f64,
        })
        .collect();
    specialties.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));

    let distance = specialty_ratio_distance(
        subset,
        &constraints.min_specialty_ratio,
        constraints.use_specialty_threshold,
    )
    .unwrap_or(0.0);

    Ok(PassSummary {
        thresholds: pair,
        dataset_size,
        total_pass,
        highschool_pass: count_highschool(subset),
        pass_ratio_pct: pass_ratio_pct(total_pass, dataset_size),
        min_class_score,
        min_quiz_score,
        specialties,
        distance,
    })
}

/// Floor-truncated percentage; 0 for an empty dataset.
pub fn pass_ratio_pct(total_pass: usize, dataset_size: usize) -> usize {
    if dataset_size == 0 {
        return 0;
    }
    total_pass * 100 / dataset_size
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Vec<Candidate> {
        vec![
            Candidate::new(3, 2, "Design", true),
            Candidate::new(9, 7, "Technology", false),
            Candidate::new(6, 9, "Technology", true),
            Candidate::new(11, 5, "Business", false),
            Candidate::new(7, 6, "Technology", false),
            Candidate::new(6, 5, "Business", true),
        ]
    }

    fn loose() -> ConstraintConfig {
        ConstraintConfig {
            min_class_score: 0,
            min_quiz_score: 0,
            ..ConstraintConfig::default()
        }
    }

    #[test]
    fn summary_counts_and_cuts() {
        let summary = summarize(&dataset(), ThresholdPair::new(6, 5), &loose()).unwrap();
        assert_eq!(summary.dataset_size, 6);
        assert_eq!(summary.total_pass, 5);
        assert_eq!(summary.highschool_pass, 2);
        assert_eq!(summary.pass_ratio_pct, 83);
        assert_eq!(summary.min_class_score, 6);
        assert_eq!(summary.min_quiz_score, 5);
        assert_eq!(summary.distance, 0.0);

        let labels: Vec<(&str, usize)> = summary
            .specialties
            .iter()
            .map(|s| (s.label.as_str(), s.count))
            .collect();
        assert_eq!(labels, vec![("Technology", 3), ("Business", 2)]);
        assert!((summary.specialties[0].ratio - 0.6).abs() < 1e-12);
    }

    #[test]
    fn floors_raise_the_effective_cut() {
        let config = ConstraintConfig {
            min_class_score: 7,
            min_quiz_score: 0,
            ..ConstraintConfig::default()
        };
        let summary = summarize(&dataset(), ThresholdPair::new(1, 1), &config).unwrap();
        assert_eq!(summary.total_pass, 3);
        assert_eq!(summary.min_class_score, 7);
        assert_eq!(summary.min_quiz_score, 5);
    }

    #[test]
    fn distance_is_reported_when_objective_enabled() {
        let config = ConstraintConfig {
            use_specialty_threshold: true,
            ..loose()
        };
        let summary = summarize(&dataset(), ThresholdPair::new(6, 5), &config).unwrap();
        // Technology 0.6, Business 0.4 against 0.3 each.
        let expected = (0.3f64 * 0.3 + 0.1 * 0.1).sqrt();
        assert!((summary.distance - expected).abs() < 1e-12);
    }

    #[test]
    fn nobody_passing_is_an_error() {
        let err = summarize(&dataset(), ThresholdPair::new(15, 11), &loose()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn pass_ratio_truncates() {
        assert_eq!(pass_ratio_pct(105, 200), 52);
        assert_eq!(pass_ratio_pct(2, 3), 66);
        assert_eq!(pass_ratio_pct(200, 200), 100);
        assert_eq!(pass_ratio_pct(0, 0), 0);
    }
}
