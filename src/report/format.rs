//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the search code stays clean and testable
//! - output changes are localized

use crate::domain::ConstraintConfig;
use crate::io::ingest::IngestedData;
use crate::report::{PassSummary, SpecialtyShare};
use crate::search::{CellVerdict, SearchOutcome};

pub const INFEASIBLE_MESSAGE: &str =
    "Impossible to find threshold from the current constraints. Please adjust the constraints and try again.";

/// Dataset, constraints and search diagnostics.
pub fn format_run_summary(ingest: &IngestedData, outcome: &SearchOutcome, constraints: &ConstraintConfig) -> String {
    let stats = &ingest.stats;
    let mut out = String::new();

    out.push_str("=== cutoff - Candidate Threshold Optimizer ===\n");
    out.push_str(&format!(
        "Dataset: n={} | high-school={} | class=[{}, {}] | quiz=[{}, {}]\n",
        stats.n_records, stats.n_highschool, stats.class_min, stats.class_max, stats.quiz_min, stats.quiz_max
    ));
    out.push_str(&format!("Specialties: {}\n", stats.specialties.join(", ")));

    out.push_str("\nConstraints:\n");
    out.push_str(&format!(
        "- total pass in [{}, {}]\n",
        constraints.min_total_pass, constraints.max_total_pass
    ));
    out.push_str(&format!("- high-school pass >= {}\n", constraints.min_highschool));
    out.push_str(&format!(
        "- class score >= {} | quiz score >= {}\n",
        constraints.min_class_score, constraints.min_quiz_score
    ));
    if constraints.use_specialty_threshold {
        let targets: Vec<String> = constraints
            .min_specialty_ratio
            .iter()
            .map(|(label, ratio)| format!("{label}={ratio:.2}"))
            .collect();
        out.push_str(&format!("- specialty targets: {}\n", targets.join(", ")));
    } else {
        out.push_str("- specialty targets: off\n");
    }

    out.push_str(&format!(
        "\nSearch: {} cells evaluated, {} feasible\n",
        outcome.cells.len(),
        outcome.feasible_count()
    ));

    out
}

/// The message for a search with no feasible pair, plus why cells were rejected.
pub fn format_infeasible(outcome: &SearchOutcome) -> String {
    let mut counts = [0usize; 4];
    for cell in &outcome.cells {
        match cell.verdict {
            CellVerdict::Empty => counts[0] += 1,
            CellVerdict::BelowMinPass => counts[1] += 1,
            CellVerdict::AboveMaxPass => counts[2] += 1,
            CellVerdict::TooFewHighschool => counts[3] += 1,
            CellVerdict::Feasible { .. } => {}
        }
    }
    format!(
        "{INFEASIBLE_MESSAGE}\nRejected cells: empty={} | too few passes={} | too many passes={} | too few high-school={}",
        counts[0], counts[1], counts[2], counts[3]
    )
}

/// The result block for a winning pair.
pub fn format_pass_summary(summary: &PassSummary) -> String {
    let mut out = String::new();

    out.push_str("Results:\n");
    out.push_str(&format!("- optimal thresholds (class, quiz): {}\n", summary.thresholds));
    out.push_str(&format!("- specialty ratios: {}\n", fmt_ratios(&summary.specialties)));
    out.push_str(&format!("- number of people who pass: {}\n", summary.total_pass));
    out.push_str(&format!("- number of high-school who pass: {}\n", summary.highschool_pass));
    out.push_str(&format!("- pass ratio: {} %\n", summary.pass_ratio_pct));
    out.push_str(&format!("- cut class score at: {}\n", summary.min_class_score));
    out.push_str(&format!("- cut quiz score at: {}\n", summary.min_quiz_score));
    out.push_str(&format!("- specialty distance: {:.4}\n", summary.distance));
    out.push('\n');
    out.push_str(&format_specialty_table(&summary.specialties));

    out
}

pub fn format_specialty_table(rows: &[SpecialtyShare]) -> String {
    let mut out = String::new();
    out.push_str(format!("{:<20} {:>6} {:>8}", "specialty", "count", "ratio").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<20} {:-<6} {:-<8}", "", "", "").trim_end());
    out.push('\n');
    for r in rows {
        out.push_str(format!("{:<20} {:>6} {:>8.4}", truncate(&r.label, 20), r.count, r.ratio).trim_end());
        out.push('\n');
    }
    out
}

fn fmt_ratios(rows: &[SpecialtyShare]) -> String {
    let parts: Vec<String> = rows.iter().map(|r| format!("{}={:.4}", r.label, r.ratio)).collect();
    format!("{{{}}}", parts.join(", "))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}
