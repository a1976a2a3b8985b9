//! RNG module - tile sources for board generation and refill
//!
//! Every tile that enters the grid (initial fill, fair-start redraws and
//! gravity refills) is drawn from a [`TileSource`]. The default source is a
//! seeded LCG so a game can be replayed from its seed. Tests swap in a
//! [`ScriptedSource`] to make cascades land exactly where they want.

use std::collections::VecDeque;

use crate::types::{TileKind, TILE_KIND_COUNT};

/// Anything that can hand out tiles.
pub trait TileSource {
    /// Draw one tile uniformly from the first `kinds` symbols of
    /// [`TileKind::ALL`].
    fn draw(&mut self, kinds: u8) -> TileKind;
}

impl<T: TileSource + ?Sized> TileSource for &mut T {
    fn draw(&mut self, kinds: u8) -> TileKind {
        (**self).draw(kinds)
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

    /// Generate random value in range [0, max)
    ///
    /// Takes the high bits (multiply-shift); the low bits of a power-of-two
    /// LCG cycle with very short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current internal state (for reproducing the remaining stream)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl TileSource for SimpleRng {
    fn draw(&mut self, kinds: u8) -> TileKind {
        let n = kinds.clamp(1, TILE_KIND_COUNT);
        TileKind::ALL[self.next_range(n as u32) as usize]
    }
}

/// Replays a fixed queue of tiles, then falls back to a seeded [`SimpleRng`].
///
/// Queued tiles are returned as-is even if they lie outside the requested
/// alphabet.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    queue: VecDeque<TileKind>,
    fallback: SimpleRng,
}

impl ScriptedSource {
    pub fn new(tiles: impl IntoIterator<Item = TileKind>) -> Self {
        Self {
            queue: tiles.into_iter().collect(),
            fallback: SimpleRng::new(1),
        }
    }

    pub fn with_fallback_seed(mut self, seed: u32) -> Self {
        self.fallback = SimpleRng::new(seed);
        self
    }

    /// Append more tiles to the end of the script
    pub fn extend(&mut self, tiles: impl IntoIterator<Item = TileKind>) {
        self.queue.extend(tiles);
    }

    /// Tiles not yet drawn from the script
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl TileSource for ScriptedSource {
    fn draw(&mut self, kinds: u8) -> TileKind {
        match self.queue.pop_front() {
            Some(kind) => kind,
            None => self.fallback.draw(kinds),
        }
    }
}
