use serde::Serialize;

use crate::grid::Grid;
use crate::scoring::ScoreBoard;
use crate::types::{Cell, Position, TileKind};

/// Plain copy of everything a front-end needs to draw one frame.
///
/// `cells` holds one code per cell in row-major order: 0 for empty,
/// `kind.index() + 1` otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SessionSnapshot {
    pub size: u8,
    pub cells: Vec<u8>,
    pub episode_id: u32,
    pub seed: Option<u32>,
    pub score: u32,
    pub chain: u32,
    pub best_chain: u32,
    pub tiles_cleared: u32,
    pub swaps: u32,
    pub first_pick: Option<Position>,
    pub expired: bool,
}

impl SessionSnapshot {
    /// Board and score only; session fields stay at their defaults.
    pub fn from_parts(grid: &Grid, ledger: &ScoreBoard) -> Self {
        let mut s = Self::default();
        s.update_board(grid, ledger);
        s
    }

    /// Refresh the board and score fields, leaving the rest alone.
    ///
    /// Used while a resolution holds the session: the grid and ledger are
    /// still readable through it.
    pub fn update_board(&mut self, grid: &Grid, ledger: &ScoreBoard) {
        self.size = grid.size();
        grid.write_codes(&mut self.cells);
        self.score = ledger.score();
        self.chain = ledger.chain();
        self.best_chain = ledger.best_chain();
        self.tiles_cleared = ledger.tiles_cleared();
    }

    /// Cell at `pos`; `None` for empty or out-of-bounds cells.
    pub fn cell(&self, pos: Position) -> Cell {
        if pos.row >= self.size || pos.col >= self.size {
            return None;
        }
        let i = (pos.row as usize) * (self.size as usize) + (pos.col as usize);
        let code = *self.cells.get(i)?;
        code.checked_sub(1).and_then(TileKind::from_index)
    }

    pub fn is_settled(&self) -> bool {
        self.cells.iter().all(|&code| code != 0)
    }

    pub fn playable(&self) -> bool {
        !self.expired
    }
}
