//! Debug bundle writer for inspecting every grid cell of a search.

use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;

use crate::domain::ConstraintConfig;
use crate::error::AppError;
use crate::io::ingest::IngestedData;
use crate::search::SearchOutcome;

/// Write a Markdown bundle under `dir` and return its path.
pub fn write_debug_bundle(
    dir: &Path,
    ingest: &IngestedData,
    outcome: &SearchOutcome,
    constraints: &ConstraintConfig,
) -> Result<PathBuf, AppError> {
    create_dir_all(dir).map_err(|e| AppError::runtime(format!("Failed to create debug dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("cutoff_debug_n{}_{ts}.md", ingest.stats.n_records));

    let file =
        File::create(&path).map_err(|e| AppError::runtime(format!("Failed to create debug file: {e}")))?;
    let mut out = BufWriter::new(file);
    write_debug_markdown(&mut out, ingest, outcome, constraints)?;
    out.flush().map_err(write_err)?;

    info!(path = %path.display(), "wrote debug bundle");
    Ok(path)
}

/// Write the bundle contents to `out`.
pub fn write_debug_markdown<W: Write>(
    out: &mut W,
    ingest: &IngestedData,
    outcome: &SearchOutcome,
    constraints: &ConstraintConfig,
) -> Result<(), AppError> {
    let stats = &ingest.stats;

    writeln!(out, "# cutoff debug bundle").map_err(write_err)?;
    writeln!(out, "- generated: {}", Local::now().to_rfc3339()).map_err(write_err)?;
    writeln!(out, "- records: {} (high-school: {})", stats.n_records, stats.n_highschool).map_err(write_err)?;
    writeln!(out, "- specialties: {}", stats.specialties.join(", ")).map_err(write_err)?;
    writeln!(
        out,
        "- pass range: [{}, {}], min high-school: {}",
        constraints.min_total_pass, constraints.max_total_pass, constraints.min_highschool
    )
    .map_err(write_err)?;
    writeln!(
        out,
        "- floors: class >= {}, quiz >= {}",
        constraints.min_class_score, constraints.min_quiz_score
    )
    .map_err(write_err)?;
    writeln!(out, "- specialty objective: {}", constraints.use_specialty_threshold).map_err(write_err)?;
    for (label, ratio) in &constraints.min_specialty_ratio {
        writeln!(out, "  - {label}: {ratio:.3}").map_err(write_err)?;
    }

    writeln!(out, "\n## Result").map_err(write_err)?;
    let best_line = match (outcome.best, outcome.best_distance) {
        (Some(pair), Some(distance)) => writeln!(out, "- best: {pair} (distance {distance:.6})"),
        _ => writeln!(out, "- best: none (no feasible cell)"),
    };
    best_line.map_err(write_err)?;
    writeln!(out, "- feasible cells: {} / {}", outcome.feasible_count(), outcome.cells.len()).map_err(write_err)?;

    writeln!(out, "\n## Cells").map_err(write_err)?;
    writeln!(out, "| class | quiz | pass | high-school | verdict | distance |").map_err(write_err)?;
    writeln!(out, "| - | - | - | - | - | - |").map_err(write_err)?;
    for cell in &outcome.cells {
        let distance = cell
            .verdict
            .distance()
            .map(|d| format!("{d:.6}"))
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} |",
            cell.pair.class_threshold,
            cell.pair.quiz_threshold,
            cell.total_pass,
            cell.highschool_pass,
            cell.verdict.label(),
            distance
        )
        .map_err(write_err)?;
    }

    Ok(())
}

fn write_err(e: std::io::Error) -> AppError {
    AppError::runtime(format!("Failed to write debug bundle: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Candidate, DatasetStats};
    use crate::search::{SearchMode, search};

    fn ingest(candidates: Vec<Candidate>) -> IngestedData {
        let stats = DatasetStats::from_candidates(&candidates).unwrap();
        IngestedData {
            rows_read: candidates.len(),
            candidates,
            stats,
        }
    }

    #[test]
    fn bundle_lists_every_cell() {
        let data = ingest(vec![
            Candidate::new(4, 4, "Design", true),
            Candidate::new(9, 2, "Business", false),
        ]);
        let config = ConstraintConfig {
            min_total_pass: 1,
            max_total_pass: 1,
            min_highschool: 0,
            min_class_score: 0,
            min_quiz_score: 0,
            ..ConstraintConfig::default()
        };
        let outcome = search(&data.candidates, &config, SearchMode::Sequential);
        let mut buf = Vec::new();
        write_debug_markdown(&mut buf, &data, &outcome, &config).unwrap();
        let md = String::from_utf8(buf).unwrap();

        let rows = md.lines().filter(|l| l.starts_with("| ") && !l.starts_with("| class") && !l.starts_with("| -"));
        assert_eq!(rows.count(), 165);
        assert!(md.contains("- best: (1, 3) (distance 0.000000)"));
        assert!(md.contains("| 1 | 1 | 2 | 1 | too many passes | - |"));
    }

    #[test]
    fn bundle_is_written_to_disk() {
        let data = ingest(vec![Candidate::new(4, 4, "Design", true)]);
        let config = ConstraintConfig::default();
        let outcome = search(&data.candidates, &config, SearchMode::Sequential);

        let dir = tempfile::tempdir().unwrap();
        let path = write_debug_bundle(&dir.path().join("debug"), &data, &outcome, &config).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains("- best: none (no feasible cell)"));
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failures_surface_as_runtime_errors() {
        let data = ingest(vec![Candidate::new(4, 4, "Design", true)]);
        let config = ConstraintConfig::default();
        let outcome = search(&data.candidates, &config, SearchMode::Sequential);

        let err = write_debug_markdown(&mut FailingWriter, &data, &outcome, &config).unwrap_err();
        assert_eq!(err.exit_code(), 4);
        assert!(err.message().contains("disk full"));
    }
}
