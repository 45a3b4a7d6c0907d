//! Piece catalog - static rotation tables for the seven tetromino shapes.
//!
//! Patterns are ordered row bitfields, top row first, defined in the low bits
//! (the column-0 side); placement on the board applies a left shift. A
//! rotation that is visually identical to another angle aliases that angle
//! instead of duplicating its rows, and resolving a pattern follows at most
//! one alias hop.

use crate::types::{Angle, Row, Shape};

/// The four cells a tetromino can occupy within a row, in native position.
const LED0: Row = 0x01;
const LED1: Row = 0x02;
const LED2: Row = 0x04;
const LED3: Row = 0x08;

/// One entry of a shape's rotation table.
enum Entry {
    /// Explicit row pattern for this angle.
    Rows(&'static [Row]),
    /// This angle reuses another angle's rows.
    Alias(Angle),
}

/// Rotation table: one entry per angle, indexed by `Angle::index`.
type RotationTable = [Entry; 4];

const I_TABLE: RotationTable = [
    Entry::Rows(&[LED0, LED0, LED0, LED0]),
    Entry::Rows(&[LED0 | LED1 | LED2 | LED3]),
    Entry::Alias(Angle::Deg0),
    Entry::Alias(Angle::Deg90),
];

const J_TABLE: RotationTable = [
    Entry::Rows(&[LED1, LED1, LED0 | LED1]),
    Entry::Rows(&[LED0, LED0 | LED1 | LED2]),
    Entry::Rows(&[LED0 | LED1, LED0, LED0]),
    Entry::Rows(&[LED0 | LED1 | LED2, LED2]),
];

const L_TABLE: RotationTable = [
    Entry::Rows(&[LED0, LED0, LED0 | LED1]),
    Entry::Rows(&[LED0 | LED1 | LED2, LED0]),
    Entry::Rows(&[LED0 | LED1, LED1, LED1]),
    Entry::Rows(&[LED2, LED0 | LED1 | LED2]),
];

const O_TABLE: RotationTable = [
    Entry::Rows(&[LED0 | LED1, LED0 | LED1]),
    Entry::Alias(Angle::Deg0),
    Entry::Alias(Angle::Deg0),
    Entry::Alias(Angle::Deg0),
];

const T_TABLE: RotationTable = [
    Entry::Rows(&[LED1, LED0 | LED1 | LED2]),
    Entry::Rows(&[LED0, LED0 | LED1, LED0]),
    Entry::Rows(&[LED0 | LED1 | LED2, LED1]),
    Entry::Rows(&[LED1, LED0 | LED1, LED1]),
];

const S_TABLE: RotationTable = [
    Entry::Rows(&[LED0, LED0 | LED1, LED1]),
    Entry::Rows(&[LED1 | LED2, LED0 | LED1]),
    Entry::Alias(Angle::Deg0),
    Entry::Alias(Angle::Deg90),
];

const Z_TABLE: RotationTable = [
    Entry::Rows(&[LED1, LED0 | LED1, LED0]),
    Entry::Rows(&[LED0 | LED1, LED1 | LED2]),
    Entry::Alias(Angle::Deg0),
    Entry::Alias(Angle::Deg90),
];

fn table(shape: Shape) -> &'static RotationTable {
    match shape {
        Shape::I => &I_TABLE,
        Shape::J => &J_TABLE,
        Shape::L => &L_TABLE,
        Shape::O => &O_TABLE,
        Shape::T => &T_TABLE,
        Shape::S => &S_TABLE,
        Shape::Z => &Z_TABLE,
    }
}

/// Resolve the row pattern for a shape at a given angle.
///
/// Pure lookup with no failure modes: every angle is one of the four legal
/// values by construction, and the canonical tables never chain aliases.
pub fn pattern(shape: Shape, angle: Angle) -> &'static [Row] {
    let mut entry = &table(shape)[angle.index()];
    if let Entry::Alias(target) = entry {
        entry = &table(shape)[target.index()];
    }
    match entry {
        Entry::Rows(rows) => rows,
        // Unreached for the canonical tables (no alias chains).
        Entry::Alias(_) => &[],
    }
}

/// Number of columns a pattern spans (highest occupied bit index + 1).
pub fn span(rows: &[Row]) -> usize {
    let merged = rows.iter().fold(0u8, |acc, row| acc | row);
    (8 - merged.leading_zeros()) as usize
}

/// Total occupied cells in a pattern.
pub fn cell_count(rows: &[Row]) -> u32 {
    rows.iter().map(|row| row.count_ones()).sum()
}
