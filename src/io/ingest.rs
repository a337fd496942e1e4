//! CSV ingest and validation.
//!
//! This module turns a candidate CSV into `Candidate` records.
//!
//! Design goals:
//! - **Strict schema**: `class_score`, `quiz_score`, `specialty`, `is_highschool` must exist
//! - **No partial recovery**: the first malformed row fails the whole load (with its line number)
//! - **Tolerant headers**: case-insensitive, BOM-stripped, extra columns ignored

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::{debug, info};

use crate::domain::{CLASS_SCORE_MAX, Candidate, DatasetStats, QUIZ_SCORE_MAX};
use crate::error::AppError;

pub const REQUIRED_COLUMNS: [&str; 4] = ["class_score", "quiz_score", "specialty", "is_highschool"];

/// Ingest output: records in file order + stats.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub candidates: Vec<Candidate>,
    pub stats: DatasetStats,
    pub rows_read: usize,
}

/// Load candidates from a CSV file.
pub fn load_candidates(path: &Path) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;
    let data = read_candidates(file)?;
    info!(path = %path.display(), rows = data.rows_read, "loaded candidate dataset");
    Ok(data)
}

/// Load candidates from any CSV reader.
pub fn read_candidates<R: Read>(reader: R) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map)?;

    let mut candidates = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // Line 1 is the header.
        let line = idx + 2;
        let record = result.map_err(|e| AppError::input(format!("Line {line}: CSV parse error: {e}")))?;
        let candidate =
            parse_row(&record, &header_map).map_err(|msg| AppError::input(format!("Line {line}: {msg}")))?;
        candidates.push(candidate);
    }

    let rows_read = candidates.len();
    let stats = DatasetStats::from_candidates(&candidates)
        .ok_or_else(|| AppError::input("The CSV contains no candidate rows."))?;
    debug!(
        rows = rows_read,
        highschool = stats.n_highschool,
        specialties = stats.specialties.len(),
        "parsed candidates"
    );

    Ok(IngestedData {
        candidates,
        stats,
        rows_read,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), AppError> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|name| !header_map.contains_key(*name))
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    let list = missing.iter().map(|m| format!("`{m}`")).collect::<Vec<_>>().join(", ");
    Err(AppError::input(format!("Missing required column(s): {list}")))
}

fn parse_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<Candidate, String> {
    let class_score = parse_score(get_required(record, header_map, "class_score")?, "class_score", CLASS_SCORE_MAX)?;
    let quiz_score = parse_score(get_required(record, header_map, "quiz_score")?, "quiz_score", QUIZ_SCORE_MAX)?;
    let specialty = get_required(record, header_map, "specialty")?.to_string();
    let is_highschool = parse_flag(get_required(record, header_map, "is_highschool")?)?;

    Ok(Candidate {
        class_score,
        quiz_score,
        specialty,
        is_highschool,
    })
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

fn parse_score(s: &str, name: &str, max: u32) -> Result<u32, String> {
    let value: i64 = s
        .parse()
        .map_err(|_| format!("Invalid `{name}` '{s}' (expected an integer)."))?;
    if !(0..=i64::from(max)).contains(&value) {
        return Err(format!("`{name}` {value} is outside 0..={max}."));
    }
    Ok(value as u32)
}

fn parse_flag(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(format!("Invalid `is_highschool` '{s}' (expected 0/1, true/false or yes/no).")),
    }
}
