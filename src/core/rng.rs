//! Deterministic piece draws.
//!
//! One linear congruential generator per session makes every spawn sequence
//! reproducible from a single seed, which the session tests rely on. Shape,
//! initial angle and column offset are independent uniform draws; there is
//! no bag randomizer.

use crate::types::{Angle, Shape};

// Numerical Recipes parameters; the modulus is 2^32 via wrapping arithmetic.
const LCG_MUL: u32 = 1_664_525;
const LCG_INC: u32 = 1_013_904_223;

#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Seed the generator. A zero seed is bumped to one so the state never
    /// starts degenerate.
    pub fn new(seed: u32) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(LCG_MUL).wrapping_add(LCG_INC);
        self.state
    }

    /// Uniform draw from `[0, max)`.
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Draw a uniformly random shape.
    pub fn next_shape(&mut self) -> Shape {
        Shape::ALL[self.next_range(Shape::ALL.len() as u32) as usize]
    }

    /// Draw a uniformly random rotation angle.
    pub fn next_angle(&mut self) -> Angle {
        Angle::ALL[self.next_range(Angle::ALL.len() as u32) as usize]
    }
}
