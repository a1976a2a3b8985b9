//! Scoring module - chain-multiplied wave scoring
//!
//! Each cascade wave scores `matched_cells * POINTS_PER_TILE * chain_index`,
//! where `chain_index` is 1 for the wave produced directly by the swap, 2 for
//! the first cascade after it, and so on. The shape of the match does not
//! matter; an L of five tiles scores the same as a straight five.

use serde::Serialize;

use crate::types::POINTS_PER_TILE;

/// Points for one wave.
pub fn wave_score(matched_cells: usize, chain_index: u32) -> u32 {
    u32::try_from(matched_cells)
        .unwrap_or(u32::MAX)
        .saturating_mul(POINTS_PER_TILE)
        .saturating_mul(chain_index)
}

/// Score and chain state for a session.
///
/// The score only ever grows. The chain counter belongs to the current
/// resolution episode and is zeroed when the next episode starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScoreBoard {
    score: u32,
    chain: u32,
    best_chain: u32,
    tiles_cleared: u32,
    waves: u32,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Chain index of the latest wave in the current episode (0 before the
    /// first wave).
    pub fn chain(&self) -> u32 {
        self.chain
    }

    /// Longest chain seen this session
    pub fn best_chain(&self) -> u32 {
        self.best_chain
    }

    pub fn tiles_cleared(&self) -> u32 {
        self.tiles_cleared
    }

    pub fn waves(&self) -> u32 {
        self.waves
    }

    /// Start a new resolution episode.
    pub fn start_episode(&mut self) {
        self.chain = 0;
    }

    /// Book one wave of `matched_cells`. Returns `(chain_index, gained)`.
    pub fn record_wave(&mut self, matched_cells: usize) -> (u32, u32) {
        self.chain += 1;
        let gained = wave_score(matched_cells, self.chain);
        self.score = self.score.saturating_add(gained);
        self.best_chain = self.best_chain.max(self.chain);
        self.tiles_cleared = self
            .tiles_cleared
            .saturating_add(u32::try_from(matched_cells).unwrap_or(u32::MAX));
        self.waves += 1;
        (self.chain, gained)
    }

    /// Back to a fresh game.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wave_score_formula() {
        assert_eq!(wave_score(3, 1), 30);
        assert_eq!(wave_score(5, 1), 50);
        assert_eq!(wave_score(3, 2), 60);
        assert_eq!(wave_score(4, 3), 120);
        assert_eq!(wave_score(0, 4), 0);
    }

    #[test]
    fn test_wave_score_saturates() {
        assert_eq!(wave_score(usize::MAX, 2), u32::MAX);
        assert_eq!(wave_score(1_000_000, 1_000_000), u32::MAX);
    }

    #[test]
    fn test_chain_multiplier_grows_within_episode() {
        let mut board = ScoreBoard::new();
        board.start_episode();
        assert_eq!(board.record_wave(3), (1, 30));
        assert_eq!(board.record_wave(3), (2, 60));
        assert_eq!(board.record_wave(4), (3, 120));
        assert_eq!(board.score(), 210);
        assert_eq!(board.chain(), 3);
        assert_eq!(board.tiles_cleared(), 10);
        assert_eq!(board.waves(), 3);
    }

    #[test]
    fn test_chain_resets_per_episode_but_score_does_not() {
        let mut board = ScoreBoard::new();
        board.start_episode();
        board.record_wave(3);
        board.record_wave(3);
        assert_eq!(board.best_chain(), 2);

        board.start_episode();
        assert_eq!(board.chain(), 0);
        assert_eq!(board.record_wave(3), (1, 30));
        assert_eq!(board.score(), 120);
        assert_eq!(board.best_chain(), 2);
    }

    #[test]
    fn test_reset() {
        let mut board = ScoreBoard::new();
        board.record_wave(5);
        board.reset();
        assert_eq!(board, ScoreBoard::default());
    }
}
