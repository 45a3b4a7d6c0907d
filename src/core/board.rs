//! Board module - the two 8x8 occupancy bitmaps and their transformations.
//!
//! Two boards exist side by side: the committed board holds cells locked in
//! by previous pieces, the active board holds the falling piece only. Each is
//! 8 rows of `u8` bitfields, top row first; bit 0 is the rightmost column.
//! No cell is ever set in both boards at a consistent point in time: overlap
//! is checked transiently and never persisted.

use arrayvec::ArrayVec;

use crate::types::{Row, RowBitmap, FULL_ROW, LEFT_EDGE, MATRIX_ROWS, RIGHT_EDGE};

/// The game board: committed cells plus the falling piece's cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    committed: RowBitmap,
    active: RowBitmap,
}

impl Board {
    /// Create a new board with both bitmaps empty.
    pub fn new() -> Self {
        Self {
            committed: [0; MATRIX_ROWS],
            active: [0; MATRIX_ROWS],
        }
    }

    /// Clear both bitmaps.
    pub fn reset(&mut self) {
        self.committed = [0; MATRIX_ROWS];
        self.active = [0; MATRIX_ROWS];
    }

    pub fn committed_rows(&self) -> &RowBitmap {
        &self.committed
    }

    pub fn active_rows(&self) -> &RowBitmap {
        &self.active
    }

    /// Overwrite one committed row. Intended for adapters and tests that
    /// need to pre-load a board position.
    pub fn set_committed_row(&mut self, idx: usize, row: Row) {
        if idx < MATRIX_ROWS {
            self.committed[idx] = row;
        }
    }

    /// Replace the whole active bitmap.
    pub fn replace_active(&mut self, rows: RowBitmap) {
        self.active = rows;
    }

    /// Load a piece pattern into the active board at the top, left-shifted
    /// by `shift` columns. Clears any previous active cells.
    pub fn load_active(&mut self, pattern: &[Row], shift: usize) {
        self.active = [0; MATRIX_ROWS];
        for (idx, &row) in pattern.iter().take(MATRIX_ROWS).enumerate() {
            self.active[idx] = row << shift;
        }
    }

    pub fn clear_active(&mut self) {
        self.active = [0; MATRIX_ROWS];
    }

    /// The combined bitmap exposed to the render adapter: per-row bitwise OR
    /// of committed and active cells.
    pub fn frame(&self) -> RowBitmap {
        let mut out = [0; MATRIX_ROWS];
        for (idx, row) in out.iter_mut().enumerate() {
            *row = self.committed[idx] | self.active[idx];
        }
        out
    }

    /// Index of the topmost non-empty active row.
    pub fn first_active_row(&self) -> Option<usize> {
        self.active.iter().position(|&row| row != 0)
    }

    /// Index of the lowest non-empty active row.
    pub fn lowest_active_row(&self) -> Option<usize> {
        self.active.iter().rposition(|&row| row != 0)
    }

    /// Minimum occupied column across all active rows.
    pub fn min_active_col(&self) -> Option<usize> {
        let merged = self.active.iter().fold(0u8, |acc, row| acc | row);
        if merged == 0 {
            None
        } else {
            Some(merged.trailing_zeros() as usize)
        }
    }

    /// Total occupied cells on the active board.
    pub fn active_cell_count(&self) -> u32 {
        self.active.iter().map(|row| row.count_ones()).sum()
    }

    /// Whether the falling piece can advance one row.
    ///
    /// True iff the piece's lowest occupied row is not the board's last row
    /// and that row does not intersect the committed row directly below it.
    /// This is the sole authority for continuing the fall; when it returns
    /// false the piece locks on the next tick.
    pub fn can_move_down(&self) -> bool {
        let Some(lowest) = self.lowest_active_row() else {
            return false;
        };
        if lowest == MATRIX_ROWS - 1 {
            return false;
        }
        self.active[lowest] & self.committed[lowest + 1] == 0
    }

    /// Shift every active row down by one: the last row is dropped and an
    /// all-zero row is inserted at the top. Callers confirm legality via
    /// `can_move_down` first, or accept this as the locking trigger.
    pub fn move_down(&mut self) {
        self.active.copy_within(0..MATRIX_ROWS - 1, 1);
        self.active[0] = 0;
    }

    /// A horizontal move is legal iff no occupied row sits on the boundary
    /// column and no shifted row would intersect the committed board. A
    /// single violating row blocks the entire move.
    fn can_shift(&self, shift: impl Fn(Row) -> Row, edge: Row) -> bool {
        self.active
            .iter()
            .zip(self.committed.iter())
            .filter(|(&active, _)| active != 0)
            .all(|(&active, &committed)| active & edge == 0 && shift(active) & committed == 0)
    }

    /// Shift the active piece one column toward the left edge (bit 7).
    /// Returns false (board unchanged) if the move is blocked.
    pub fn move_left(&mut self) -> bool {
        if !self.can_shift(|row| row << 1, LEFT_EDGE) {
            return false;
        }
        for row in &mut self.active {
            *row <<= 1;
        }
        true
    }

    /// Shift the active piece one column toward the right edge (bit 0).
    /// Returns false (board unchanged) if the move is blocked.
    pub fn move_right(&mut self) -> bool {
        if !self.can_shift(|row| row >> 1, RIGHT_EDGE) {
            return false;
        }
        for row in &mut self.active {
            *row >>= 1;
        }
        true
    }

    /// True iff any row has cells set in both boards.
    pub fn is_overlapping(&self) -> bool {
        self.active
            .iter()
            .zip(self.committed.iter())
            .any(|(&active, &committed)| active & committed != 0)
    }

    /// Merge the active piece into the committed board (bitwise OR per row)
    /// and clear the active bitmap.
    pub fn merge_active(&mut self) {
        for (idx, row) in self.active.iter().enumerate() {
            self.committed[idx] |= row;
        }
        self.active = [0; MATRIX_ROWS];
    }

    /// Zero every committed row equal to the full-width mask and compact the
    /// remaining rows downward, zero-filling vacated rows at the top.
    /// Returns the cleared row indices, sorted top to bottom.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, MATRIX_ROWS> {
        let mut cleared = ArrayVec::new();
        let mut write = MATRIX_ROWS;

        // Two-pointer compaction, scanning bottom to top.
        for read in (0..MATRIX_ROWS).rev() {
            if self.committed[read] == FULL_ROW {
                cleared.push(read);
            } else {
                write -= 1;
                self.committed[write] = self.committed[read];
            }
        }
        for row in &mut self.committed[..write] {
            *row = 0;
        }

        cleared.reverse();
        cleared
    }

    /// True once every committed row holds at least one cell: the stack has
    /// reached the top row and the session is over regardless of overlap.
    pub fn is_saturated(&self) -> bool {
        self.committed.iter().all(|&row| row != 0)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.committed_rows(), &[0; MATRIX_ROWS]);
        assert_eq!(board.active_rows(), &[0; MATRIX_ROWS]);
        assert_eq!(board.frame(), [0; MATRIX_ROWS]);
    }

    #[test]
    fn test_load_active_applies_column_shift() {
        let mut board = Board::new();
        board.load_active(&[0x01, 0x03], 2);
        assert_eq!(board.active_rows()[0], 0x04);
        assert_eq!(board.active_rows()[1], 0x0C);
        assert_eq!(board.active_rows()[2], 0x00);
    }

    #[test]
    fn test_active_bounding_helpers() {
        let mut board = Board::new();
        assert_eq!(board.first_active_row(), None);
        assert_eq!(board.min_active_col(), None);

        board.load_active(&[0x02, 0x06], 3);
        assert_eq!(board.first_active_row(), Some(0));
        assert_eq!(board.lowest_active_row(), Some(1));
        assert_eq!(board.min_active_col(), Some(4));
        assert_eq!(board.active_cell_count(), 3);
    }
}
