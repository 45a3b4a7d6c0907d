//! MatrixView: maps the engine's 8x8 frame onto a terminal canvas.
//!
//! This module is pure (no I/O). It stands in for the physical LED matrix:
//! every set bit of the frame becomes a lit "LED", everything else a dark
//! socket. Bit 7 of a row is drawn as the leftmost column; any physical
//! mirroring of the real matrix is the hardware adapter's business.

use crate::core::GameState;
use crate::term::screen::{Canvas, Ink, Rgb};
use crate::types::{MATRIX_COLS, MATRIX_ROWS};

const BORDER_INK: Ink = Ink::plain(Rgb::new(90, 90, 100));
const LIT_INK: Ink = Ink::bold(Rgb::new(255, 60, 40));
const DARK_INK: Ink = Ink::plain(Rgb::new(60, 50, 50));
const BANNER_INK: Ink = Ink::bold(Rgb::new(255, 200, 60));

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Renders the LED matrix, score line and game-over banner.
pub struct MatrixView {
    /// LED cell width in terminal columns.
    cell_w: u16,
    /// LED cell height in terminal rows.
    cell_h: u16,
}

impl Default for MatrixView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl MatrixView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render the current session state into a canvas.
    pub fn render(&self, state: &GameState, viewport: Viewport) -> Canvas {
        let mut canvas = Canvas::new(viewport.width, viewport.height);

        let matrix_w = MATRIX_COLS as u16 * self.cell_w;
        let matrix_h = MATRIX_ROWS as u16 * self.cell_h;
        let frame_w = matrix_w + 2;
        let frame_h = matrix_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        self.draw_border(&mut canvas, start_x, start_y, frame_w, frame_h);
        self.draw_leds(&mut canvas, state, start_x + 1, start_y + 1);
        self.draw_status(&mut canvas, state, start_x, start_y + frame_h);

        if state.game_over() {
            self.draw_game_over(&mut canvas, start_x, start_y, frame_w);
        }

        canvas
    }

    fn draw_border(&self, canvas: &mut Canvas, x: u16, y: u16, w: u16, h: u16) {
        for dx in 0..w {
            canvas.put(x + dx, y, '─', BORDER_INK);
            canvas.put(x + dx, y + h - 1, '─', BORDER_INK);
        }
        for dy in 0..h {
            canvas.put(x, y + dy, '│', BORDER_INK);
            canvas.put(x + w - 1, y + dy, '│', BORDER_INK);
        }
        canvas.put(x, y, '┌', BORDER_INK);
        canvas.put(x + w - 1, y, '┐', BORDER_INK);
        canvas.put(x, y + h - 1, '└', BORDER_INK);
        canvas.put(x + w - 1, y + h - 1, '┘', BORDER_INK);
    }

    fn draw_leds(&self, canvas: &mut Canvas, state: &GameState, x0: u16, y0: u16) {
        let frame = state.frame();
        for (row_idx, &row) in frame.iter().enumerate() {
            for col in 0..MATRIX_COLS {
                // Bit 7 is the leftmost column on screen.
                let on = row & (1 << (MATRIX_COLS - 1 - col)) != 0;
                let (ch, ink) = if on { ('●', LIT_INK) } else { ('·', DARK_INK) };

                let cx = x0 + col as u16 * self.cell_w;
                let cy = y0 + row_idx as u16 * self.cell_h;
                for dy in 0..self.cell_h {
                    for dx in 0..self.cell_w {
                        // Pad wide cells with spaces after the glyph.
                        let c = if dx == 0 { ch } else { ' ' };
                        canvas.put(cx + dx, cy + dy, c, ink);
                    }
                }
            }
        }
    }

    fn draw_status(&self, canvas: &mut Canvas, state: &GameState, x: u16, y: u16) {
        let piece = state
            .piece()
            .map(|p| p.shape.as_str())
            .unwrap_or("-");
        let line = format!(
            "score {}  pieces {}  {}ms  [{}]",
            state.score(),
            state.locked_pieces(),
            state.drop_interval_ms(),
            piece
        );
        canvas.text(x, y, &line, Ink::default());
    }

    fn draw_game_over(&self, canvas: &mut Canvas, x: u16, y: u16, w: u16) {
        let banner = "GAME OVER";
        let hint = "r: restart  q: quit";
        let bx = x + w.saturating_sub(banner.len() as u16) / 2;
        canvas.text(bx, y.saturating_sub(2), banner, BANNER_INK);
        canvas.text(x, y.saturating_sub(1), hint, Ink::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Angle, Shape};

    fn lit_led_count(canvas: &Canvas) -> usize {
        let mut count = 0;
        for y in 0..canvas.rows() {
            for x in 0..canvas.cols() {
                if canvas.at(x, y).map(|p| p.ch) == Some('●') {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn test_lit_leds_match_frame_cells() {
        let mut state = GameState::new(1);
        state.place_piece(Shape::O, Angle::Deg0, 3);

        let view = MatrixView::default();
        let canvas = view.render(&state, Viewport::new(80, 24));

        // The O piece occupies exactly 4 cells.
        assert_eq!(lit_led_count(&canvas), 4);
    }

    #[test]
    fn test_render_fits_tiny_viewport_without_panic() {
        let state = GameState::new(1);
        let view = MatrixView::default();
        let canvas = view.render(&state, Viewport::new(4, 3));
        assert_eq!(canvas.cols(), 4);
        assert_eq!(canvas.rows(), 3);
    }
}
