//! Exhaustive threshold search with a feasibility gate.
//!
//! For every cell of the fixed grid:
//! 1. filter the dataset
//! 2. reject the cell if the pass count or high-school count violates the constraints
//! 3. score survivors with the specialty-ratio distance
//!
//! The winner is the first cell (in grid order) with the strictly smallest
//! distance. Cells can be evaluated in parallel; selection always runs over
//! the results in grid order, so both modes pick the same pair.

use rayon::prelude::*;
use tracing::{debug, info, trace};

use crate::domain::{Candidate, ConstraintConfig, ThresholdPair};
use crate::search::distance::specialty_ratio_distance;
use crate::search::filter::{count_highschool, filter_passing_candidates};
use crate::search::grid::threshold_grid;

/// How grid cells are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    #[default]
    Sequential,
    Parallel,
}

/// Why a cell was kept or rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellVerdict {
    /// Nobody passes; never scored.
    Empty,
    BelowMinPass,
    AboveMaxPass,
    TooFewHighschool,
    Feasible { distance: f64 },
}

impl CellVerdict {
    pub fn distance(&self) -> Option<f64> {
        match self {
            CellVerdict::Feasible { distance } => Some(*distance),
            _ => None,
        }
    }

    pub fn is_feasible(&self) -> bool {
        matches!(self, CellVerdict::Feasible { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            CellVerdict::Empty => "empty",
            CellVerdict::BelowMinPass => "too few passes",
            CellVerdict::AboveMaxPass => "too many passes",
            CellVerdict::TooFewHighschool => "too few high-school",
            CellVerdict::Feasible { .. } => "feasible",
        }
    }
}

/// Outcome of evaluating one threshold pair.
#[derive(Debug, Clone, PartialEq)]
pub struct CellEvaluation {
    pub pair: ThresholdPair,
    pub total_pass: usize,
    pub highschool_pass: usize,
    pub verdict: CellVerdict,
}

/// All cell evaluations (grid order) plus the selected pair.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub cells: Vec<CellEvaluation>,
    pub best: Option<ThresholdPair>,
    pub best_distance: Option<f64>,
}

impl SearchOutcome {
    pub fn feasible_count(&self) -> usize {
        self.cells.iter().filter(|c| c.verdict.is_feasible()).count()
    }

    pub fn cell(&self, pair: ThresholdPair) -> Option<&CellEvaluation> {
        self.cells.iter().find(|c| c.pair == pair)
    }
}

/// Find the threshold pair that satisfies the constraints with the smallest
/// specialty-ratio distance. `None` when no pair is feasible.
pub fn find_optimal_thresholds(dataset: &[Candidate], constraints: &ConstraintConfig) -> Option<ThresholdPair> {
    search(dataset, constraints, SearchMode::Sequential).best
}

/// Evaluate the whole grid and select the best pair.
pub fn search(dataset: &[Candidate], constraints: &ConstraintConfig, mode: SearchMode) -> SearchOutcome {
    let grid = threshold_grid();
    info!(
        event = "search_start",
        records = dataset.len(),
        cells = grid.len(),
        parallel = mode == SearchMode::Parallel,
        use_specialty_threshold = constraints.use_specialty_threshold,
    );

    // Indexed parallel collect keeps grid order.
    let cells: Vec<CellEvaluation> = match mode {
        SearchMode::Sequential => grid
            .iter()
            .map(|&pair| evaluate_cell(dataset, pair, constraints))
            .collect(),
        SearchMode::Parallel => grid
            .par_iter()
            .map(|&pair| evaluate_cell(dataset, pair, constraints))
            .collect(),
    };

    let best_cell = select_best(&cells);
    let best = best_cell.map(|c| c.pair);
    let best_distance = best_cell.and_then(|c| c.verdict.distance());

    let feasible = cells.iter().filter(|c| c.verdict.is_feasible()).count();
    match best {
        Some(pair) => info!(event = "search_end", feasible, best = %pair, distance = best_distance),
        None => info!(event = "search_end", feasible, "no feasible threshold pair"),
    }

    SearchOutcome {
        cells,
        best,
        best_distance,
    }
}

/// Filter the dataset at `pair`, apply the feasibility gate and score survivors.
pub fn evaluate_cell(dataset: &[Candidate], pair: ThresholdPair, constraints: &ConstraintConfig) -> CellEvaluation {
    let subset = filter_passing_candidates(
        dataset,
        pair.class_threshold,
        pair.quiz_threshold,
        constraints.min_class_score,
        constraints.min_quiz_score,
    );
    let total_pass = subset.len();
    let highschool_pass = count_highschool(&subset);

    let verdict = if total_pass == 0 {
        CellVerdict::Empty
    } else if total_pass < constraints.min_total_pass {
        CellVerdict::BelowMinPass
    } else if total_pass > constraints.max_total_pass {
        CellVerdict::AboveMaxPass
    } else if highschool_pass < constraints.min_highschool {
        CellVerdict::TooFewHighschool
    } else {
        match specialty_ratio_distance(
            &subset,
            &constraints.min_specialty_ratio,
            constraints.use_specialty_threshold,
        ) {
            Some(distance) => CellVerdict::Feasible { distance },
            None => CellVerdict::Empty,
        }
    };

    trace!(pair = %pair, total_pass, highschool_pass, verdict = verdict.label());

    CellEvaluation {
        pair,
        total_pass,
        highschool_pass,
        verdict,
    }
}

/// Pick the feasible cell with the smallest distance.
///
/// Strict `<`: on ties the earliest cell in slice order wins.
pub fn select_best(cells: &[CellEvaluation]) -> Option<&CellEvaluation> {
    let mut best: Option<(&CellEvaluation, f64)> = None;
    for cell in cells {
        let Some(distance) = cell.verdict.distance() else {
            continue;
        };
        let improves = match best {
            None => true,
            Some((_, best_distance)) => distance < best_distance,
        };
        if improves {
            debug!(pair = %cell.pair, distance, "new best cell");
            best = Some((cell, distance));
        }
    }
    best.map(|(cell, _)| cell)
}
