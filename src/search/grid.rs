//! Threshold grid generation.
//!
//! The search space is tiny (15 class cutoffs × 11 quiz cutoffs), so we
//! enumerate all of it. The order here is the tie-break order.

use crate::domain::{CLASS_THRESHOLDS, QUIZ_THRESHOLDS, ThresholdPair};

/// Every threshold pair: class ascending (outer), quiz ascending (inner).
pub fn threshold_grid() -> Vec<ThresholdPair> {
    CLASS_THRESHOLDS
        .flat_map(|c| QUIZ_THRESHOLDS.map(move |q| ThresholdPair::new(c, q)))
        .collect()
}

/// Number of cells in the fixed grid.
pub fn grid_size() -> usize {
    CLASS_THRESHOLDS.count() * QUIZ_THRESHOLDS.count()
}
