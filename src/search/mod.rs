//! Threshold search.
//!
//! Responsibilities:
//!
//! - filter candidates for a threshold pair (`filter`)
//! - score a passing subset against target specialty ratios (`distance`)
//! - enumerate the fixed grid and select the best feasible pair (`grid`, `searcher`)

pub mod distance;
pub mod filter;
pub mod grid;
pub mod searcher;

pub use distance::*;
pub use filter::*;
pub use grid::*;
pub use searcher::*;
