//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - candidate records (`Candidate`)
//! - the decision variable (`ThresholdPair`) and its fixed ranges
//! - the search configuration (`ConstraintConfig`)

pub mod types;

pub use types::*;
