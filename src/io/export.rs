//! Export candidate lists to CSV.
//!
//! Output uses the canonical four columns so exported files can be fed straight
//! back into `cutoff search`.

use std::path::Path;

use tracing::info;

use crate::domain::Candidate;
use crate::error::AppError;

/// Write the passing candidates (input order preserved).
pub fn write_passing_csv(path: &Path, passing: &[&Candidate]) -> Result<(), AppError> {
    write_rows(path, passing.iter().copied())?;
    info!(path = %path.display(), rows = passing.len(), "exported passing candidates");
    Ok(())
}

/// Write a full candidate pool (used by `cutoff generate`).
pub fn write_candidates_csv(path: &Path, candidates: &[Candidate]) -> Result<(), AppError> {
    write_rows(path, candidates.iter())?;
    info!(path = %path.display(), rows = candidates.len(), "wrote candidate pool");
    Ok(())
}

fn write_rows<'a>(path: &Path, rows: impl Iterator<Item = &'a Candidate>) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::runtime(format!("Failed to create CSV '{}': {e}", path.display())))?;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| AppError::runtime(format!("Failed to write CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::runtime(format!("Failed to flush CSV '{}': {e}", path.display())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ingest::load_candidates;
    use crate::search::filter_passing_candidates;

    #[test]
    fn exported_passing_set_reloads_identically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("passing.csv");
        let data = vec![
            Candidate::new(9, 9, "Design, Product", true),
            Candidate::new(2, 9, "Business", false),
            Candidate::new(8, 6, "Technology", false),
        ];
        let passing = filter_passing_candidates(&data, 5, 5, 0, 0);
        write_passing_csv(&path, &passing).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("class_score,quiz_score,specialty,is_highschool\n"));
        assert!(text.contains("9,9,\"Design, Product\",1"));

        let reloaded = load_candidates(&path).unwrap();
        let expected: Vec<Candidate> = passing.into_iter().cloned().collect();
        assert_eq!(reloaded.candidates, expected);
    }

    #[test]
    fn unwritable_path_is_a_runtime_error() {
        let err = write_candidates_csv(Path::new("/nonexistent-dir/out.csv"), &[]).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
