//! ASCII map of the threshold grid.
//!
//! Rows are class thresholds, columns quiz thresholds, one glyph per cell:
//! - `*`: selected pair
//! - `o`: feasible
//! - `+`: too many passes
//! - `-`: too few passes
//! - `h`: too few high-school passes
//! - `.`: nobody passes
//!
//! Output is deterministic, which keeps golden tests simple.

use crate::domain::{CLASS_THRESHOLDS, QUIZ_THRESHOLDS};
use crate::search::{CellEvaluation, CellVerdict, SearchOutcome};

const CELL_WIDTH: usize = 3;

pub fn render_grid_map(outcome: &SearchOutcome) -> String {
    let mut out = String::new();
    out.push_str("Grid (rows: class threshold, columns: quiz threshold)\n");

    let mut header = format!("{:>5} ", "c\\q");
    for q in QUIZ_THRESHOLDS {
        header.push_str(&format!("{q:>CELL_WIDTH$}"));
    }
    out.push_str(header.trim_end());
    out.push('\n');

    for c in CLASS_THRESHOLDS {
        let mut row = format!("{c:>5} ");
        for q in QUIZ_THRESHOLDS {
            let glyph = outcome
                .cells
                .iter()
                .find(|cell| cell.pair.class_threshold == c && cell.pair.quiz_threshold == q)
                .map(|cell| glyph(cell, outcome))
                .unwrap_or(' ');
            row.push_str(&format!("{glyph:>CELL_WIDTH$}"));
        }
        out.push_str(row.trim_end());
        out.push('\n');
    }

    out.push_str("Legend: * best  o feasible  + too many  - too few  h few high-school  . empty\n");
    out
}

fn glyph(cell: &CellEvaluation, outcome: &SearchOutcome) -> char {
    if outcome.best == Some(cell.pair) {
        return '*';
    }
    match cell.verdict {
        CellVerdict::Feasible { .. } => 'o',
        CellVerdict::AboveMaxPass => '+',
        CellVerdict::BelowMinPass => '-',
        CellVerdict::TooFewHighschool => 'h',
        CellVerdict::Empty => '.',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Candidate, ConstraintConfig};
    use crate::search::{SearchMode, search};

    #[test]
    fn map_marks_winner_and_verdicts() {
        let data = vec![
            Candidate::new(2, 2, "Design", true),
            Candidate::new(2, 2, "Design", false),
            Candidate::new(3, 3, "Design", false),
        ];
        let config = ConstraintConfig {
            min_total_pass: 2,
            max_total_pass: 2,
            min_highschool: 1,
            min_class_score: 0,
            min_quiz_score: 0,
            ..ConstraintConfig::default()
        };
        let outcome = search(&data, &config, SearchMode::Sequential);
        assert_eq!(outcome.best, None);

        let map = render_grid_map(&outcome);
        let lines: Vec<&str> = map.lines().collect();
        assert_eq!(lines.len(), 1 + 1 + 15 + 1);
        assert_eq!(lines[1], "  c\\q   1  2  3  4  5  6  7  8  9 10 11");
        // class 1: 3 pass at q<=2, 1 at q=3, none above.
        assert_eq!(lines[2], "    1   +  +  -  .  .  .  .  .  .  .  .");
        assert_eq!(lines[4], "    3   -  -  -  .  .  .  .  .  .  .  .");
        assert!(lines[2..17].iter().all(|l| !l.contains('*')));
    }

    #[test]
    fn map_shows_best_cell() {
        let data = vec![
            Candidate::new(2, 2, "Design", true),
            Candidate::new(3, 3, "Design", true),
        ];
        let config = ConstraintConfig {
            min_total_pass: 1,
            max_total_pass: 1,
            min_highschool: 0,
            min_class_score: 0,
            min_quiz_score: 0,
            ..ConstraintConfig::default()
        };
        let outcome = search(&data, &config, SearchMode::Sequential);
        let map = render_grid_map(&outcome);
        let lines: Vec<&str> = map.lines().collect();
        assert_eq!(lines[2], "    1   +  +  *  .  .  .  .  .  .  .  .");
        assert_eq!(lines[3], "    2   +  +  o  .  .  .  .  .  .  .  .");
        assert_eq!(lines[4], "    3   o  o  o  .  .  .  .  .  .  .  .");
        let stars: usize = lines[2..17].iter().map(|l| l.matches('*').count()).sum();
        assert_eq!(stars, 1);
    }
}
