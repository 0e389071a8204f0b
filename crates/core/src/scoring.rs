//! Scoring module - classic line-clear points and leveling
//!
//! Points for a lock are `SCORE_TABLE[lines] * (level + 1)` using the level
//! in effect *before* the clear. The level is then recomputed from the total
//! line count, never incremented on its own.

use crate::types::{LINES_PER_LEVEL, SCORE_TABLE};

/// Points for clearing `lines` rows at once on `level` (0-based).
///
/// More than four rows can only be full after an artificial setup; they score
/// like four.
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    let base = SCORE_TABLE[lines.min(SCORE_TABLE.len() - 1)];
    base.saturating_mul(level.saturating_add(1))
}

/// Level reached after `total_lines` cleared lines.
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_score_level_0() {
        assert_eq!(line_clear_score(0, 0), 0);
        assert_eq!(line_clear_score(1, 0), 40);
        assert_eq!(line_clear_score(2, 0), 100);
        assert_eq!(line_clear_score(3, 0), 300);
        assert_eq!(line_clear_score(4, 0), 1200);
    }

    #[test]
    fn test_line_clear_score_scales_with_level() {
        assert_eq!(line_clear_score(1, 1), 80);
        assert_eq!(line_clear_score(4, 2), 3600);
        assert_eq!(line_clear_score(2, 9), 1000);
    }

    #[test]
    fn test_line_clear_score_clamps_row_count() {
        assert_eq!(line_clear_score(7, 0), 1200);
    }

    #[test]
    fn test_line_clear_score_saturates() {
        assert_eq!(line_clear_score(4, u32::MAX), u32::MAX);
    }

    #[test]
    fn test_level_for_lines() {
        assert_eq!(level_for_lines(0), 0);
        assert_eq!(level_for_lines(4), 0);
        assert_eq!(level_for_lines(5), 1);
        assert_eq!(level_for_lines(14), 2);
        assert_eq!(level_for_lines(25), 5);
    }
}
