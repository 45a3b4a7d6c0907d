//! Game session - the canonical stateful engine over the two boards.
//!
//! One owned struct holds the committed and active bitmaps, the falling
//! piece, the score and the speed parameter, and exposes the move / rotate /
//! tick operations as its only mutation surface. Illegal moves and rotations
//! are rejected state transitions, not errors: the session is left unchanged
//! and no failure is reported beyond the `bool` return.

use crate::core::{pieces, scoring, Board, SimpleRng};
use crate::types::{
    Angle, Command, RowBitmap, Shape, TickResult, DEFAULT_DROP_MS, MATRIX_COLS, MATRIX_ROWS,
};

/// The falling piece: its shape and current rotation angle. The cells it
/// occupies live on the session's active board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub shape: Shape,
    pub angle: Angle,
}

/// Complete state of one game session.
///
/// Lifecycle: construct, then tick and apply commands until game over
/// (latched), then `reset` for a fresh session.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    piece: Option<Piece>,
    rng: SimpleRng,
    score: u32,
    drop_interval_ms: u32,
    locked_pieces: u32,
    game_over: bool,
}

impl GameState {
    /// Create a session with empty boards, default speed and a freshly
    /// spawned piece, drawing from the given RNG seed.
    pub fn new(seed: u32) -> Self {
        let mut state = Self {
            board: Board::new(),
            piece: None,
            rng: SimpleRng::new(seed),
            score: 0,
            drop_interval_ms: DEFAULT_DROP_MS,
            locked_pieces: 0,
            game_over: false,
        };
        state.spawn_piece();
        state
    }

    /// Start a fresh session: empty boards, default speed, zero score.
    /// The RNG keeps its state so restarts see new piece sequences.
    pub fn reset(&mut self) {
        self.board.reset();
        self.piece = None;
        self.score = 0;
        self.drop_interval_ms = DEFAULT_DROP_MS;
        self.locked_pieces = 0;
        self.game_over = false;
        self.spawn_piece();
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn locked_pieces(&self) -> u32 {
        self.locked_pieces
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn piece(&self) -> Option<Piece> {
        self.piece
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for adapters and tests that pre-load positions.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// The combined bitmap for the render adapter, one `u8` per row.
    pub fn frame(&self) -> RowBitmap {
        self.board.frame()
    }

    /// Apply one input command. Returns true if the board changed.
    pub fn apply(&mut self, command: Command) -> bool {
        if self.game_over {
            return false;
        }
        match command {
            Command::MoveLeft => self.board.move_left(),
            Command::MoveRight => self.board.move_right(),
            Command::RotateCw => self.try_rotate(true),
            Command::RotateCcw => self.try_rotate(false),
        }
    }

    /// Advance the falling state machine by one step.
    ///
    /// The piece either moves down one row or, if it cannot, locks into the
    /// committed board, full rows are cleared and scored, and a replacement
    /// piece spawns. Game over is latched: further ticks are no-ops.
    pub fn tick(&mut self) -> TickResult {
        if self.game_over {
            return TickResult::GameOver;
        }
        if self.board.can_move_down() {
            self.board.move_down();
            return TickResult::Falling;
        }
        self.lock_and_scan()
    }

    /// Lock the active piece, clear full rows, update speed and spawn the
    /// replacement piece.
    fn lock_and_scan(&mut self) -> TickResult {
        // A stack that reached the top row ends the session before any
        // merge, independent of collision overlap.
        if self.board.is_saturated() {
            return self.enter_game_over();
        }

        self.board.merge_active();
        self.piece = None;

        let cleared = self.board.clear_full_rows();
        if !cleared.is_empty() {
            self.score += scoring::clear_bonus(cleared.len() as u32);
        }

        self.locked_pieces += 1;
        self.drop_interval_ms =
            scoring::drop_interval_after_lock(self.drop_interval_ms, self.locked_pieces);

        // The session ends when the replacement piece's starting cells
        // already overlap committed cells.
        self.spawn_piece();
        if self.board.is_overlapping() {
            return self.enter_game_over();
        }

        match cleared.len() {
            0 => TickResult::Locked,
            n => TickResult::Cleared(n as u8),
        }
    }

    fn enter_game_over(&mut self) -> TickResult {
        // Never persist an overlapping active bitmap.
        self.board.clear_active();
        self.piece = None;
        self.game_over = true;
        TickResult::GameOver
    }

    /// Spawn a random piece at the top: uniform shape, uniform initial
    /// rotation angle, and a horizontal offset chosen so the pattern's
    /// occupied-column span fits within the board width.
    fn spawn_piece(&mut self) {
        let shape = self.rng.next_shape();
        let angle = self.rng.next_angle();
        let rows = pieces::pattern(shape, angle);
        let width = pieces::span(rows);
        let shift = self.rng.next_range((MATRIX_COLS - width + 1) as u32) as usize;

        self.board.load_active(rows, shift);
        self.piece = Some(Piece { shape, angle });
    }

    /// Load a specific piece at a given column shift. Deterministic
    /// counterpart of the random spawn, used by tests and demo drivers.
    pub fn place_piece(&mut self, shape: Shape, angle: Angle, shift: usize) {
        let rows = pieces::pattern(shape, angle);
        let width = pieces::span(rows);
        let shift = shift.min(MATRIX_COLS - width);
        self.board.load_active(rows, shift);
        self.piece = Some(Piece { shape, angle });
    }

    /// Rotate the falling piece by 90 degrees.
    ///
    /// The new angle's pattern is tentatively re-anchored at the current
    /// bounding box's top-left occupied cell, clamped so it stays inside the
    /// board. The rotation is rejected and fully reverted (board and angle)
    /// if the tentative placement overlaps the committed board or changes
    /// the total occupied-cell count.
    fn try_rotate(&mut self, clockwise: bool) -> bool {
        let Some(piece) = self.piece else {
            return false;
        };
        let (Some(top), Some(min_col)) =
            (self.board.first_active_row(), self.board.min_active_col())
        else {
            return false;
        };

        let snapshot = *self.board.active_rows();
        let cells_before = self.board.active_cell_count();

        let new_angle = if clockwise {
            piece.angle.cw()
        } else {
            piece.angle.ccw()
        };
        let rows = pieces::pattern(piece.shape, new_angle);
        let width = pieces::span(rows);

        // Re-anchor at the old top-left cell, clamped to the board edges.
        let top = top.min(MATRIX_ROWS - rows.len());
        let shift = min_col.min(MATRIX_COLS - width);

        let mut tentative: RowBitmap = [0; MATRIX_ROWS];
        for (idx, &row) in rows.iter().enumerate() {
            tentative[top + idx] = row << shift;
        }

        self.board.replace_active(tentative);
        if self.board.is_overlapping() || self.board.active_cell_count() != cells_before {
            self.board.replace_active(snapshot);
            return false;
        }

        self.piece = Some(Piece {
            shape: piece.shape,
            angle: new_angle,
        });
        true
    }
}
