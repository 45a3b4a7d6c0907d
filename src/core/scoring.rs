//! Scoring and speed progression rules.

use crate::types::{DROP_FLOOR_MS, PIECES_PER_SPEEDUP, ROW_CLEAR_SCORE};

/// Bonus for a clear pass: proportional to the number of rows cleared.
pub fn clear_bonus(rows_cleared: u32) -> u32 {
    rows_cleared * ROW_CLEAR_SCORE
}

/// Drop interval after a piece locks.
///
/// The interval halves after every `PIECES_PER_SPEEDUP`th locked piece and
/// is floored at `DROP_FLOOR_MS` so it never reaches zero.
pub fn drop_interval_after_lock(current_ms: u32, locked_pieces: u32) -> u32 {
    if locked_pieces > 0 && locked_pieces % PIECES_PER_SPEEDUP == 0 {
        (current_ms / 2).max(DROP_FLOOR_MS)
    } else {
        current_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_DROP_MS;

    #[test]
    fn test_clear_bonus_is_proportional() {
        assert_eq!(clear_bonus(0), 0);
        assert_eq!(clear_bonus(1), ROW_CLEAR_SCORE);
        assert_eq!(clear_bonus(3), 3 * ROW_CLEAR_SCORE);
    }

    #[test]
    fn test_interval_halves_every_fifth_lock() {
        let mut interval = DEFAULT_DROP_MS;
        for locked in 1..=4 {
            interval = drop_interval_after_lock(interval, locked);
            assert_eq!(interval, DEFAULT_DROP_MS);
        }
        interval = drop_interval_after_lock(interval, 5);
        assert_eq!(interval, DEFAULT_DROP_MS / 2);
        interval = drop_interval_after_lock(interval, 6);
        assert_eq!(interval, DEFAULT_DROP_MS / 2);
        interval = drop_interval_after_lock(interval, 10);
        assert_eq!(interval, DEFAULT_DROP_MS / 4);
    }

    #[test]
    fn test_interval_never_drops_below_floor() {
        let mut interval = DEFAULT_DROP_MS;
        for locked in 1..=1000 {
            interval = drop_interval_after_lock(interval, locked);
        }
        assert_eq!(interval, DROP_FLOOR_MS);
    }
}
