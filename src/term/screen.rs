//! Character-cell canvas the matrix view paints into.
//!
//! The view draws a small fixed footprint (the bordered 8x8 matrix plus one
//! status line) centered in the terminal, so the canvas is nothing more than
//! a dense grid of glyph/ink pairs. Writes outside the grid are clipped
//! silently; tiny terminals just see a cropped picture.

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// How a glyph is drawn: foreground color and weight. The background stays
/// the terminal default throughout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ink {
    pub color: Rgb,
    pub bold: bool,
}

impl Ink {
    pub const fn plain(color: Rgb) -> Self {
        Self { color, bold: false }
    }

    pub const fn bold(color: Rgb) -> Self {
        Self { color, bold: true }
    }
}

impl Default for Ink {
    fn default() -> Self {
        Self::plain(Rgb::new(220, 220, 220))
    }
}

/// One canvas cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub ch: char,
    pub ink: Ink,
}

impl Default for Pixel {
    fn default() -> Self {
        Self {
            ch: ' ',
            ink: Ink::default(),
        }
    }
}

/// Row-major glyph grid, blank on creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    cols: u16,
    rows: u16,
    pixels: Vec<Pixel>,
}

impl Canvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            pixels: vec![Pixel::default(); cols as usize * rows as usize],
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn at(&self, col: u16, row: u16) -> Option<Pixel> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(self.pixels[row as usize * self.cols as usize + col as usize])
    }

    /// Paint one glyph, clipping out-of-range coordinates.
    pub fn put(&mut self, col: u16, row: u16, ch: char, ink: Ink) {
        if col < self.cols && row < self.rows {
            self.pixels[row as usize * self.cols as usize + col as usize] = Pixel { ch, ink };
        }
    }

    /// Paint a string left to right, clipping at the right edge.
    pub fn text(&mut self, col: u16, row: u16, s: &str, ink: Ink) {
        for (offset, ch) in s.chars().enumerate() {
            self.put(col + offset as u16, row, ch, ink);
        }
    }

    /// The grid one terminal line at a time, top to bottom.
    pub fn scanlines(&self) -> impl Iterator<Item = &[Pixel]> {
        self.pixels.chunks(self.cols.max(1) as usize)
    }
}
