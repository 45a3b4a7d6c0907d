//! Terminal stand-in for the LED matrix and its I2C driver.

pub mod matrix_view;
pub mod renderer;
pub mod screen;

pub use matrix_view::{MatrixView, Viewport};
pub use renderer::TerminalRenderer;
pub use screen::{Canvas, Ink, Pixel, Rgb};
