//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during the search
//! - exported to JSON/CSV
//! - reloaded later for display

use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Upper bound of `class_score` (inclusive).
pub const CLASS_SCORE_MAX: u32 = 15;
/// Upper bound of `quiz_score` (inclusive).
pub const QUIZ_SCORE_MAX: u32 = 11;

/// Swept class cutoffs, in enumeration order.
pub const CLASS_THRESHOLDS: RangeInclusive<u32> = 1..=CLASS_SCORE_MAX;
/// Swept quiz cutoffs, in enumeration order.
pub const QUIZ_THRESHOLDS: RangeInclusive<u32> = 1..=QUIZ_SCORE_MAX;

/// Specialties that get a default target ratio.
pub const DEFAULT_SPECIALTIES: [&str; 3] = ["Technology", "Business", "Design"];
/// Default target fraction for every known specialty.
pub const DEFAULT_SPECIALTY_RATIO: f64 = 0.3;

/// One candidate row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub class_score: u32,
    pub quiz_score: u32,
    pub specialty: String,
    /// Serialized as `0`/`1` to match the usual dataset exports.
    #[serde(serialize_with = "serialize_flag01")]
    pub is_highschool: bool,
}

impl Candidate {
    pub fn new(class_score: u32, quiz_score: u32, specialty: impl Into<String>, is_highschool: bool) -> Self {
        Self {
            class_score,
            quiz_score,
            specialty: specialty.into(),
            is_highschool,
        }
    }

    /// Whether this candidate clears both swept cutoffs and both floors.
    pub fn passes(
        &self,
        class_threshold: u32,
        quiz_threshold: u32,
        min_class_score: u32,
        min_quiz_score: u32,
    ) -> bool {
        self.class_score >= class_threshold
            && self.quiz_score >= quiz_threshold
            && self.class_score >= min_class_score
            && self.quiz_score >= min_quiz_score
    }
}

fn serialize_flag01<S: serde::Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*value))
}

/// The decision variable swept by the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ThresholdPair {
    pub class_threshold: u32,
    pub quiz_threshold: u32,
}

impl ThresholdPair {
    pub fn new(class_threshold: u32, quiz_threshold: u32) -> Self {
        Self {
            class_threshold,
            quiz_threshold,
        }
    }
}

impl fmt::Display for ThresholdPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.class_threshold, self.quiz_threshold)
    }
}

/// Hard constraints and objective settings for one search.
///
/// Built once by the caller and passed by reference; the search never reads
/// anything outside this value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintConfig {
    pub min_total_pass: usize,
    pub max_total_pass: usize,
    pub min_highschool: usize,
    pub min_class_score: u32,
    pub min_quiz_score: u32,
    /// Target fraction per specialty label.
    pub min_specialty_ratio: BTreeMap<String, f64>,
    /// When false, every feasible pair scores a distance of 0.
    pub use_specialty_threshold: bool,
}

impl Default for ConstraintConfig {
    fn default() -> Self {
        Self {
            min_total_pass: 100,
            max_total_pass: 110,
            min_highschool: 15,
            min_class_score: 5,
            min_quiz_score: 5,
            min_specialty_ratio: default_specialty_ratios(),
            use_specialty_threshold: false,
        }
    }
}

impl ConstraintConfig {
    /// Reject settings outside their documented ranges.
    ///
    /// `min_total_pass > max_total_pass` is allowed: it just makes every cell infeasible.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.min_class_score > CLASS_SCORE_MAX {
            return Err(AppError::input(format!(
                "Minimum class score must be within 0..={CLASS_SCORE_MAX} (got {}).",
                self.min_class_score
            )));
        }
        if self.min_quiz_score > QUIZ_SCORE_MAX {
            return Err(AppError::input(format!(
                "Minimum quiz score must be within 0..={QUIZ_SCORE_MAX} (got {}).",
                self.min_quiz_score
            )));
        }
        for (label, ratio) in &self.min_specialty_ratio {
            if !(ratio.is_finite() && (0.0..=1.0).contains(ratio)) {
                return Err(AppError::input(format!(
                    "Specialty ratio for '{label}' must be within 0.0..=1.0 (got {ratio})."
                )));
            }
        }
        Ok(())
    }
}

/// `Technology`, `Business` and `Design` at 0.3 each.
pub fn default_specialty_ratios() -> BTreeMap<String, f64> {
    DEFAULT_SPECIALTIES
        .iter()
        .map(|label| (label.to_string(), DEFAULT_SPECIALTY_RATIO))
        .collect()
}

/// Summary stats about the loaded dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStats {
    pub n_records: usize,
    pub n_highschool: usize,
    pub specialties: Vec<String>,
    pub class_min: u32,
    pub class_max: u32,
    pub quiz_min: u32,
    pub quiz_max: u32,
}

impl DatasetStats {
    /// `None` for an empty dataset.
    pub fn from_candidates(candidates: &[Candidate]) -> Option<Self> {
        let first = candidates.first()?;
        let mut stats = Self {
            n_records: candidates.len(),
            n_highschool: 0,
            specialties: Vec::new(),
            class_min: first.class_score,
            class_max: first.class_score,
            quiz_min: first.quiz_score,
            quiz_max: first.quiz_score,
        };

        for c in candidates {
            if c.is_highschool {
                stats.n_highschool += 1;
            }
            stats.class_min = stats.class_min.min(c.class_score);
            stats.class_max = stats.class_max.max(c.class_score);
            stats.quiz_min = stats.quiz_min.min(c.quiz_score);
            stats.quiz_max = stats.quiz_max.max(c.quiz_score);
            if !stats.specialties.contains(&c.specialty) {
                stats.specialties.push(c.specialty.clone());
            }
        }
        stats.specialties.sort();

        Some(stats)
    }
}
