//! Tetris board engine for an 8x8 LED matrix.
//!
//! The `core` module is the game itself: two row-bitfield boards, the piece
//! catalog and the session state machine. `input` and `term` are thin
//! adapters; on real hardware the matrix would be driven over I2C expander
//! chips instead of a terminal.

pub mod core;
pub mod input;
pub mod term;
pub mod types;
