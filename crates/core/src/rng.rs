//! RNG module - seedable randomness for piece and color selection
//!
//! Every spawn draws a uniformly random shape from the 7-piece catalog and a
//! uniformly random color. The engine takes its random source as a type
//! parameter so tests can script exact sequences; [`SimpleRng`] is the
//! default.

use crate::types::{PieceKind, COLOR_COUNT};

/// Source of bounded random integers.
pub trait RandomSource {
    /// Random value in `[0, max)`. `max` is never zero.
    fn next_range(&mut self, max: u32) -> u32;

    /// Uniformly random catalog piece.
    fn pick_kind(&mut self) -> PieceKind {
        let idx = self.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[idx % PieceKind::ALL.len()]
    }

    /// Uniformly random settled color in `[1, COLOR_COUNT - 1]`.
    fn pick_color(&mut self) -> u8 {
        let span = (COLOR_COUNT - 1) as u32;
        1 + (self.next_range(span) % span) as u8
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Current generator state, usable as a seed to replay the stream.
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_range(&mut self, max: u32) -> u32 {
        // Low LCG bits cycle with short periods.
        (self.next_u32() >> 16) % max.max(1)
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// Useful for scripting exact piece/color sequences.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<u32>,
    pos: usize,
}

impl ScriptedRng {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, pos: 0 }
    }

    /// Script that spawns `pieces` in order, each paired with its color.
    pub fn pieces(pieces: &[(PieceKind, u8)]) -> Self {
        let mut values = Vec::with_capacity(pieces.len() * 2);
        for &(kind, color) in pieces {
            let idx = PieceKind::ALL.iter().position(|&k| k == kind).unwrap_or(0);
            values.push(idx as u32);
            values.push(color.saturating_sub(1) as u32);
        }
        Self::new(values)
    }
}

impl RandomSource for ScriptedRng {
    fn next_range(&mut self, max: u32) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        let v = self.values[self.pos % self.values.len()];
        self.pos = self.pos.wrapping_add(1);
        v % max.max(1)
    }
}
