//! Core types shared across the crate.
//! This module contains pure data types with no external dependencies.

/// Number of rows on the LED matrix.
pub const MATRIX_ROWS: usize = 8;

/// Number of columns on the LED matrix. Kept the same width as
/// `MATRIX_ROWS`; narrow again at the use sites that need it.
pub const MATRIX_COLS: usize = 8;

/// A board row: bit i = column i occupied.
///
/// Bit 0 (`0x01`) is the rightmost column, bit 7 (`0x80`) the leftmost.
pub type Row = u8;

/// One full board: 8 row bitfields, top row first.
pub type RowBitmap = [Row; MATRIX_ROWS];

/// Column mask that blocks a move toward the right edge.
pub const RIGHT_EDGE: Row = 0x01;

/// Column mask that blocks a move toward the left edge.
pub const LEFT_EDGE: Row = 0x80;

/// A completely occupied row, eligible for clearing.
pub const FULL_ROW: Row = 0xFF;

/// Default drop interval at the start of a session (milliseconds).
pub const DEFAULT_DROP_MS: u32 = 1000;

/// The drop interval never falls below this, no matter how long the session runs.
pub const DROP_FLOOR_MS: u32 = 125;

/// The drop interval halves after every this many locked pieces.
pub const PIECES_PER_SPEEDUP: u32 = 5;

/// Points awarded per cleared row.
pub const ROW_CLEAR_SCORE: u32 = 100;

/// Tetromino piece shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    I,
    J,
    L,
    O,
    T,
    S,
    Z,
}

impl Shape {
    /// All seven shapes, in catalog order.
    pub const ALL: [Shape; 7] = [
        Shape::I,
        Shape::J,
        Shape::L,
        Shape::O,
        Shape::T,
        Shape::S,
        Shape::Z,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::I => "I",
            Shape::J => "J",
            Shape::L => "L",
            Shape::O => "O",
            Shape::T => "T",
            Shape::S => "S",
            Shape::Z => "Z",
        }
    }
}

/// Rotation states (0 degrees = the shape's native pattern)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Angle {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Angle {
    /// All four angles, in rotation-table order.
    pub const ALL: [Angle; 4] = [Angle::Deg0, Angle::Deg90, Angle::Deg180, Angle::Deg270];

    /// Index into a shape's rotation table.
    pub fn index(&self) -> usize {
        match self {
            Angle::Deg0 => 0,
            Angle::Deg90 => 1,
            Angle::Deg180 => 2,
            Angle::Deg270 => 3,
        }
    }

    /// Rotate clockwise (+90 degrees, 270 wraps to 0).
    pub fn cw(&self) -> Self {
        match self {
            Angle::Deg0 => Angle::Deg90,
            Angle::Deg90 => Angle::Deg180,
            Angle::Deg180 => Angle::Deg270,
            Angle::Deg270 => Angle::Deg0,
        }
    }

    /// Rotate counter-clockwise (-90 degrees, 0 wraps to 270).
    pub fn ccw(&self) -> Self {
        match self {
            Angle::Deg0 => Angle::Deg270,
            Angle::Deg270 => Angle::Deg180,
            Angle::Deg180 => Angle::Deg90,
            Angle::Deg90 => Angle::Deg0,
        }
    }

    pub fn as_degrees(&self) -> u16 {
        match self {
            Angle::Deg0 => 0,
            Angle::Deg90 => 90,
            Angle::Deg180 => 180,
            Angle::Deg270 => 270,
        }
    }
}

/// Input commands (the four control buttons)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    RotateCw,
    RotateCcw,
}

/// Outcome of one tick of the falling state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    /// The piece moved down one row.
    Falling,
    /// The piece locked into the committed board; no rows cleared.
    Locked,
    /// The piece locked and this many full rows were cleared.
    Cleared(u8),
    /// The session ended; only an explicit reset leaves this state.
    GameOver,
}
