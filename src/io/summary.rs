//! Read/write summary JSON files.
//!
//! A summary file is the portable record of one search:
//! - the constraints it ran with
//! - the winning pair and its pass statistics
//! - where the data came from and when
//!
//! `cutoff show` prints a saved file without re-running the search.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::ConstraintConfig;
use crate::error::AppError;
use crate::report::PassSummary;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub constraints: ConstraintConfig,
    pub summary: PassSummary,
}

impl SummaryFile {
    pub fn new(source: impl Into<String>, constraints: &ConstraintConfig, summary: &PassSummary) -> Self {
        Self {
            tool: "cutoff".to_string(),
            generated_at: Utc::now(),
            source: source.into(),
            constraints: constraints.clone(),
            summary: summary.clone(),
        }
    }
}

pub fn write_summary_json(path: &Path, file: &SummaryFile) -> Result<(), AppError> {
    let out = File::create(path)
        .map_err(|e| AppError::runtime(format!("Failed to create summary JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(out, file)
        .map_err(|e| AppError::runtime(format!("Failed to write summary JSON: {e}")))?;
    info!(path = %path.display(), "exported summary");
    Ok(())
}

pub fn read_summary_json(path: &Path) -> Result<SummaryFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open summary JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(file).map_err(|e| AppError::input(format!("Invalid summary JSON: {e}")))
}
