//! Command-line parsing for the candidate threshold optimizer.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! search code. Defaults here are the documented constraint defaults.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::domain::{CLASS_SCORE_MAX, QUIZ_SCORE_MAX};

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "cutoff", version, about = "Candidate threshold optimizer")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search the threshold grid for a candidate CSV and print the result.
    Search(SearchArgs),
    /// Write a synthetic candidate pool to CSV.
    Generate(GenerateArgs),
    /// Print a summary JSON saved with `search --export-summary`.
    Show(ShowArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct SearchArgs {
    /// Candidate CSV (columns: class_score, quiz_score, specialty, is_highschool).
    ///
    /// Falls back to `CUTOFF_DATA`, then `./data.csv`, then an interactive picker.
    #[arg(short = 'f', long = "file", value_name = "CSV")]
    pub file: Option<PathBuf>,

    /// Minimum number of candidates who pass.
    #[arg(long, default_value_t = 100)]
    pub min_total_pass: usize,

    /// Maximum number of candidates who pass.
    #[arg(long, default_value_t = 110)]
    pub max_total_pass: usize,

    /// Minimum number of high-school candidates who pass.
    #[arg(long, default_value_t = 15)]
    pub min_highschool: usize,

    /// Class score floor applied on top of the swept threshold.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(0..=CLASS_SCORE_MAX as i64))]
    pub min_class_score: u32,

    /// Quiz score floor applied on top of the swept threshold.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(0..=QUIZ_SCORE_MAX as i64))]
    pub min_quiz_score: u32,

    /// Rank feasible pairs by distance to the specialty targets.
    #[arg(long)]
    pub use_specialty_threshold: bool,

    /// Specialty target as LABEL=FRACTION (repeatable). Technology, Business and
    /// Design default to 0.3.
    #[arg(long = "ratio", value_name = "LABEL=FRACTION", value_parser = parse_ratio)]
    pub ratios: Vec<(String, f64)>,

    /// Evaluate grid cells in parallel.
    #[arg(long)]
    pub parallel: bool,

    /// Do not print the grid map.
    #[arg(long)]
    pub no_grid: bool,

    /// Export the passing candidates to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the result summary to JSON.
    #[arg(long = "export-summary", value_name = "JSON")]
    pub export_summary: Option<PathBuf>,

    /// Write a Markdown bundle with every grid cell's evaluation.
    #[arg(long)]
    pub debug: bool,

    /// Directory for debug bundles.
    #[arg(long, default_value = "debug")]
    pub debug_dir: PathBuf,
}

#[derive(Debug, Parser, Clone)]
pub struct GenerateArgs {
    /// Output CSV path.
    #[arg(short = 'o', long, default_value = "data.csv")]
    pub output: PathBuf,

    /// Number of candidates.
    #[arg(short = 'n', long, default_value_t = 200)]
    pub count: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Probability that a candidate is in high school.
    #[arg(long, default_value_t = 0.2)]
    pub highschool_prob: f64,

    /// Specialty labels to draw from (comma-separated).
    #[arg(long, value_delimiter = ',', default_values_t = ["Technology".to_string(), "Business".to_string(), "Design".to_string()])]
    pub specialties: Vec<String>,
}

#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Summary JSON produced by `cutoff search --export-summary`.
    #[arg(value_name = "JSON")]
    pub summary: PathBuf,
}

/// Parse `LABEL=FRACTION`.
pub fn parse_ratio(raw: &str) -> Result<(String, f64), String> {
    let (label, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected LABEL=FRACTION, got '{raw}'"))?;
    let label = label.trim();
    if label.is_empty() {
        return Err(format!("missing specialty label in '{raw}'"));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid fraction in '{raw}'"))?;
    if !(value.is_finite() && (0.0..=1.0).contains(&value)) {
        return Err(format!("fraction must be within 0.0..=1.0 in '{raw}'"));
    }
    Ok((label.to_string(), value))
}
