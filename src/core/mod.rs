//! Core module - pure game logic with no I/O dependencies.
//!
//! This module contains the board bitmaps, the piece catalog, the session
//! state machine and the scoring rules. It knows nothing about terminals,
//! GPIO or the I/O-expander bus.

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;

// Re-export commonly used types
pub use board::Board;
pub use game_state::{GameState, Piece};
pub use rng::SimpleRng;
