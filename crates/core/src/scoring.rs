//! Scoring rules
//!
//! - Line clears: 100 / 300 / 500 / 800 for 1-4 rows, times the current level.
//! - Soft drop: 1 point for every gravity tick that moves the piece while the input is held.
//! - Hard drop: 2 points for every row the piece falls.

use crate::types::{HARD_DROP_POINTS, LINE_SCORES, SOFT_DROP_POINTS};

/// Points for clearing `rows` rows at `level`
pub fn line_clear_score(rows: usize, level: u32) -> u32 {
    if rows == 0 || rows > 4 {
        return 0;
    }
    LINE_SCORES[rows].saturating_mul(level)
}

/// Points for a drop of `rows` rows
pub fn drop_score(rows: u32, is_hard_drop: bool) -> u32 {
    let per_row = if is_hard_drop {
        HARD_DROP_POINTS
    } else {
        SOFT_DROP_POINTS
    };
    rows.saturating_mul(per_row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_table() {
        assert_eq!(line_clear_score(1, 1), 100);
        assert_eq!(line_clear_score(2, 1), 300);
        assert_eq!(line_clear_score(3, 1), 500);
        assert_eq!(line_clear_score(4, 1), 800);
        assert_eq!(line_clear_score(4, 3), 2400);
        assert_eq!(line_clear_score(0, 5), 0);
        assert_eq!(line_clear_score(5, 5), 0);
    }

    #[test]
    fn test_drop_score() {
        assert_eq!(drop_score(18, true), 36);
        assert_eq!(drop_score(3, false), 3);
    }
}
