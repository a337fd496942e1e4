//! Dataset resolution and the interactive CSV picker.
//!
//! clap handles structured flags; this module turns "no `-f` given" into a
//! concrete CSV path:
//! 1. `CUTOFF_DATA` from the environment (or `.env`)
//! 2. `./data.csv` if it exists
//! 3. a prompt over `*.csv` files found under the working directory

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::AppError;

/// Environment variable naming the default dataset.
pub const DATA_ENV_VAR: &str = "CUTOFF_DATA";
/// Dataset picked up from the working directory when nothing else is set.
pub const DEFAULT_DATA_FILE: &str = "data.csv";

/// Default directory recursion depth for finding CSV files.
const DEFAULT_SEARCH_DEPTH: usize = 4;

/// Pick the dataset path for a search run.
pub fn resolve_dataset_path(explicit: Option<PathBuf>) -> Result<PathBuf, AppError> {
    if let Some(path) = explicit {
        return validate_csv_path(&path);
    }

    dotenvy::dotenv().ok();
    if let Ok(raw) = std::env::var(DATA_ENV_VAR) {
        let raw = raw.trim();
        if !raw.is_empty() {
            debug!(var = DATA_ENV_VAR, path = raw, "dataset from environment");
            return validate_csv_path(Path::new(raw));
        }
    }

    let fallback = Path::new(DEFAULT_DATA_FILE);
    if fallback.is_file() {
        debug!(path = DEFAULT_DATA_FILE, "dataset from working directory");
        return Ok(fallback.to_path_buf());
    }

    prompt_for_csv_path()
}

/// Prompt the user to select a CSV file from the current directory tree.
///
/// Accepts a number from the list or an explicit path; `q` cancels.
pub fn prompt_for_csv_path() -> Result<PathBuf, AppError> {
    let files = discover_csv_files();
    if files.is_empty() {
        return Err(AppError::input(
            "No .csv files found. Provide one with `cutoff search -f <file.csv>` or `cutoff generate`.",
        ));
    }

    println!("Found {} CSV file(s):", files.len());
    for (idx, path) in files.iter().enumerate() {
        println!("{:>3}) {}", idx + 1, pretty_path(path));
    }

    loop {
        print!("Select a file by number (1-{}) or type a path (q to quit): ", files.len());
        io::stdout()
            .flush()
            .map_err(|e| AppError::runtime(format!("Failed to write prompt: {e}")))?;

        let mut input = String::new();
        let bytes = io::stdin()
            .read_line(&mut input)
            .map_err(|e| AppError::runtime(format!("Failed to read input: {e}")))?;

        if bytes == 0 {
            return Err(AppError::input(
                "No input received. Provide a CSV path with `cutoff search -f <file.csv>`.",
            ));
        }

        let input = input.trim();
        if input.eq_ignore_ascii_case("q") {
            return Err(AppError::input("Canceled."));
        }

        if let Ok(choice) = input.parse::<usize>() {
            if (1..=files.len()).contains(&choice) {
                return validate_csv_path(&files[choice - 1]);
            }
            println!("Invalid choice: {choice}. Enter a number between 1 and {}.", files.len());
            continue;
        }

        match validate_csv_path(Path::new(input)) {
            Ok(path) => return Ok(path),
            Err(err) => println!("{err}"),
        }
    }
}

/// Validate the provided path points to a `.csv` file.
pub fn validate_csv_path(path: &Path) -> Result<PathBuf, AppError> {
    if !path.exists() {
        return Err(AppError::input(format!("CSV file not found: {}", path.display())));
    }
    if path.is_dir() {
        return Err(AppError::input(format!(
            "Expected a file, got a directory: {}",
            path.display()
        )));
    }
    if !has_csv_extension(path) {
        return Err(AppError::input(format!(
            "Expected a .csv file (got: {}). Use -f to pass a CSV path.",
            path.display()
        )));
    }

    Ok(path.to_path_buf())
}

/// Discover `*.csv` files under the current directory (deterministic order).
pub fn discover_csv_files() -> Vec<PathBuf> {
    find_csv_files(Path::new("."), DEFAULT_SEARCH_DEPTH)
}

fn find_csv_files(root: &Path, max_depth: usize) -> Vec<PathBuf> {
    let mut out = Vec::new();
    find_csv_files_inner(root, 0, max_depth, &mut out);
    out.sort_by_key(|p| pretty_path(p));
    out
}

fn find_csv_files_inner(root: &Path, depth: usize, max_depth: usize, out: &mut Vec<PathBuf>) {
    if depth > max_depth {
        return;
    }

    let Ok(entries) = fs::read_dir(root) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            if !should_skip_dir(&path) {
                find_csv_files_inner(&path, depth + 1, max_depth, out);
            }
        } else if file_type.is_file() && has_csv_extension(&path) {
            out.push(path);
        }
    }
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn should_skip_dir(path: &Path) -> bool {
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
    matches!(name, ".git" | "target" | "node_modules" | "debug")
}

fn pretty_path(path: &Path) -> String {
    let stripped = path.strip_prefix("./").unwrap_or(path);
    stripped.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_must_be_an_existing_csv() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("Pool.CSV");
        let txt = dir.path().join("pool.txt");
        fs::write(&csv, "x").unwrap();
        fs::write(&txt, "x").unwrap();

        assert_eq!(resolve_dataset_path(Some(csv.clone())).unwrap(), csv);
        assert_eq!(resolve_dataset_path(Some(txt)).unwrap_err().exit_code(), 2);
        assert!(validate_csv_path(dir.path()).is_err());
        assert!(validate_csv_path(&dir.path().join("missing.csv")).is_err());
    }

    #[test]
    fn discovery_is_sorted_and_skips_build_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("b")).unwrap();
        fs::create_dir_all(root.join("target")).unwrap();
        fs::write(root.join("b/two.csv"), "x").unwrap();
        fs::write(root.join("a.csv"), "x").unwrap();
        fs::write(root.join("target/skip.csv"), "x").unwrap();
        fs::write(root.join("notes.md"), "x").unwrap();

        let found = find_csv_files(root, DEFAULT_SEARCH_DEPTH);
        let names: Vec<String> = found
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().display().to_string())
            .collect();
        assert_eq!(names, vec!["a.csv".to_string(), format!("b{}two.csv", std::path::MAIN_SEPARATOR)]);
    }
}
