//! `cutoff` library crate.
//!
//! Picks the (class, quiz) score cutoffs that admit a target number of
//! candidates. The binary is a thin wrapper around this library so the search
//! is testable without spawning processes.

pub mod app;
pub mod cli;
pub mod data;
pub mod debug;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
pub mod search;
