//! Engine configuration: board size, alphabet and match rule.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{
    DEFAULT_GRID_SIZE, DEFAULT_MIN_RUN, MAX_GRID_SIZE, MIN_GRID_SIZE, MIN_TILE_KINDS,
    TILE_KIND_COUNT,
};

/// Default redraw budget for the fair-start generator.
pub const DEFAULT_MAX_FAIR_REDRAWS: u32 = 10_000;

/// Rules shared by the engine and the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Edge length of the square grid
    pub grid_size: u8,
    /// Number of tile kinds in play (the first N of `TileKind::ALL`)
    pub tile_kinds: u8,
    /// Shortest line of identical tiles that counts as a match
    pub min_run: u8,
    /// Random redraws the fair-start generator may spend before it falls
    /// back to deterministic repair
    pub max_fair_redraws: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            tile_kinds: TILE_KIND_COUNT,
            min_run: DEFAULT_MIN_RUN,
            max_fair_redraws: DEFAULT_MAX_FAIR_REDRAWS,
        }
    }
}

impl EngineConfig {
    pub fn with_grid_size(mut self, grid_size: u8) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_tile_kinds(mut self, tile_kinds: u8) -> Self {
        self.tile_kinds = tile_kinds;
        self
    }

    pub fn with_min_run(mut self, min_run: u8) -> Self {
        self.min_run = min_run;
        self
    }

    pub fn with_max_fair_redraws(mut self, max_fair_redraws: u32) -> Self {
        self.max_fair_redraws = max_fair_redraws;
        self
    }

    /// Check that the configuration describes a playable board.
    ///
    /// An alphabet of at least three kinds is what makes a run-free start
    /// board always constructible.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(ConfigError::GridSize {
                size: self.grid_size,
                min: MIN_GRID_SIZE,
                max: MAX_GRID_SIZE,
            });
        }
        if !(MIN_TILE_KINDS..=TILE_KIND_COUNT).contains(&self.tile_kinds) {
            return Err(ConfigError::TileKinds {
                kinds: self.tile_kinds,
                min: MIN_TILE_KINDS,
                max: TILE_KIND_COUNT,
            });
        }
        if !(DEFAULT_MIN_RUN..=self.grid_size).contains(&self.min_run) {
            return Err(ConfigError::MinRun {
                min_run: self.min_run,
                min: DEFAULT_MIN_RUN,
                grid_size: self.grid_size,
            });
        }
        Ok(())
    }
}
