//! Cascade resolution - clear, score, gravity, repeat
//!
//! One resolution episode runs until the grid holds no match:
//!
//! 1. bump the chain counter (first wave = 1)
//! 2. take the current match set `M`
//! 3. empty every cell of `M`
//! 4. score `|M| * 10 * chain`
//! 5. compact each column downward and refill the vacated cells
//! 6. detect again
//!
//! [`Resolution`] runs the episode lazily. [`Resolution::advance`] stops at
//! both pause points of a wave ([`ResolutionEvent::Cleared`] with the matched
//! cells emptied, then [`ResolutionEvent::Settled`] after gravity), while the
//! [`Iterator`] impl yields one [`ResolutionStep`] per wave. Callers that do
//! not care about pacing can call [`Resolution::finish`].
//!
//! A resolution holds the grid mutably for its whole life, so no swap can
//! slip in mid-episode. Dropping it early drains the remaining waves; the
//! grid never outlives a resolution with empty cells in it.

use std::iter::FusedIterator;

use serde::Serialize;

use crate::config::EngineConfig;
use crate::grid::Grid;
use crate::matcher::{find_matches, MatchSet};
use crate::rng::TileSource;
use crate::scoring::ScoreBoard;

/// Outcome of one full wave
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionStep {
    /// 1 for the first wave of the episode
    pub chain_index: u32,
    pub matched: MatchSet,
    pub score_gained: u32,
    /// Session score after this wave
    pub total_score: u32,
    pub grid_after_gravity: Grid,
}

/// Pause points within a wave
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionEvent {
    /// Matched cells are now empty and scored; gravity has not run.
    Cleared {
        chain_index: u32,
        matched: MatchSet,
        score_gained: u32,
    },
    /// Gravity and refill are done for this wave.
    Settled(ResolutionStep),
}

#[derive(Debug)]
enum Phase {
    Detect,
    Cleared {
        chain_index: u32,
        matched: MatchSet,
        score_gained: u32,
    },
    Done,
}

/// A lazily evaluated resolution episode
pub struct Resolution<'a, R: TileSource + ?Sized> {
    grid: &'a mut Grid,
    source: &'a mut R,
    ledger: &'a mut ScoreBoard,
    config: EngineConfig,
    phase: Phase,
    episode_score: u32,
}

impl<'a, R: TileSource + ?Sized> Resolution<'a, R> {
    /// Start an episode. The chain counter is zeroed here.
    pub fn new(
        grid: &'a mut Grid,
        source: &'a mut R,
        ledger: &'a mut ScoreBoard,
        config: EngineConfig,
    ) -> Self {
        ledger.start_episode();
        Self {
            grid,
            source,
            ledger,
            config,
            phase: Phase::Detect,
            episode_score: 0,
        }
    }

    /// Run the episode up to its next pause point.
    pub fn advance(&mut self) -> Option<ResolutionEvent> {
        match std::mem::replace(&mut self.phase, Phase::Done) {
            Phase::Detect => {
                let matched = find_matches(self.grid, self.config.min_run);
                if matched.is_empty() {
                    return None;
                }

                self.grid.clear_cells(&matched);
                let (chain_index, score_gained) = self.ledger.record_wave(matched.len());
                self.episode_score = self.episode_score.saturating_add(score_gained);

                self.phase = Phase::Cleared {
                    chain_index,
                    matched: matched.clone(),
                    score_gained,
                };
                Some(ResolutionEvent::Cleared {
                    chain_index,
                    matched,
                    score_gained,
                })
            }
            Phase::Cleared {
                chain_index,
                matched,
                score_gained,
            } => {
                let kinds = self.config.tile_kinds;
                let source = &mut *self.source;
                self.grid.apply_gravity(|| source.draw(kinds));

                self.phase = Phase::Detect;
                Some(ResolutionEvent::Settled(ResolutionStep {
                    chain_index,
                    matched,
                    score_gained,
                    total_score: self.ledger.score(),
                    grid_after_gravity: self.grid.clone(),
                }))
            }
            Phase::Done => None,
        }
    }

    /// The grid as of the last pause point
    pub fn grid(&self) -> &Grid {
        &*self.grid
    }

    pub fn ledger(&self) -> &ScoreBoard {
        &*self.ledger
    }

    /// Points scored so far in this episode
    pub fn episode_score(&self) -> u32 {
        self.episode_score
    }

    pub fn is_done(&self) -> bool {
        matches!(self.phase, Phase::Done)
    }

    /// Run the rest of the episode and return the points it scored in total.
    pub fn finish(mut self) -> u32 {
        while self.advance().is_some() {}
        self.episode_score
    }
}

impl<R: TileSource + ?Sized> Iterator for Resolution<'_, R> {
    type Item = ResolutionStep;

    fn next(&mut self) -> Option<ResolutionStep> {
        loop {
            match self.advance()? {
                ResolutionEvent::Cleared { .. } => continue,
                ResolutionEvent::Settled(step) => return Some(step),
            }
        }
    }
}

impl<R: TileSource + ?Sized> FusedIterator for Resolution<'_, R> {}

impl<R: TileSource + ?Sized> Drop for Resolution<'_, R> {
    fn drop(&mut self) {
        while self.advance().is_some() {}
    }
}

impl<R: TileSource + ?Sized> std::fmt::Debug for Resolution<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolution")
            .field("phase", &self.phase)
            .field("episode_score", &self.episode_score)
            .finish_non_exhaustive()
    }
}

/// Start resolving whatever matches `grid` currently holds.
pub fn resolve<'a, R: TileSource + ?Sized>(
    grid: &'a mut Grid,
    source: &'a mut R,
    ledger: &'a mut ScoreBoard,
    config: EngineConfig,
) -> Resolution<'a, R> {
    Resolution::new(grid, source, ledger, config)
}
