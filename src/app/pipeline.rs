//! Shared search pipeline: ingest -> grid search -> pass summary.
//!
//! The CLI handlers and the tests both go through here, so presentation stays
//! in `app` and the workflow lives in one place.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::domain::{Candidate, ConstraintConfig};
use crate::error::AppError;
use crate::io::ingest::{IngestedData, load_candidates};
use crate::report::{PassSummary, summarize_subset};
use crate::search::{SearchMode, SearchOutcome, filter_passing_candidates, search};

/// Inputs of one `cutoff search` run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub data_path: PathBuf,
    pub constraints: ConstraintConfig,
    pub mode: SearchMode,
}

/// All computed outputs of a single search run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedData,
    pub outcome: SearchOutcome,
    /// `None` when no pair is feasible.
    pub summary: Option<PassSummary>,
    /// Passing candidates at the winning pair, in input order.
    pub passing: Vec<Candidate>,
}

/// Load the dataset named by `config` and run the search on it.
pub fn run_search(config: &RunConfig) -> Result<RunOutput, AppError> {
    config.constraints.validate()?;
    let ingest = load_candidates(&config.data_path)?;
    run_search_on(ingest, config)
}

/// Run the search on an already-loaded dataset.
pub fn run_search_on(ingest: IngestedData, config: &RunConfig) -> Result<RunOutput, AppError> {
    config.constraints.validate()?;
    let constraints = &config.constraints;

    let outcome = search(&ingest.candidates, constraints, config.mode);

    let (summary, passing) = match outcome.best {
        Some(pair) => {
            let subset = filter_passing_candidates(
                &ingest.candidates,
                pair.class_threshold,
                pair.quiz_threshold,
                constraints.min_class_score,
                constraints.min_quiz_score,
            );
            let summary = summarize_subset(&subset, ingest.candidates.len(), pair, constraints)?;
            let passing: Vec<Candidate> = subset.into_iter().cloned().collect();
            info!(
                thresholds = %pair,
                total_pass = summary.total_pass,
                highschool_pass = summary.highschool_pass,
                "selected thresholds"
            );
            (Some(summary), passing)
        }
        None => {
            debug!(cells = outcome.cells.len(), "no feasible thresholds");
            (None, Vec::new())
        }
    };

    Ok(RunOutput {
        ingest,
        outcome,
        summary,
        passing,
    })
}
