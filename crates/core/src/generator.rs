//! Fair-start board generation
//!
//! Every cell is drawn independently, then the board is scanned row by row.
//! A cell that closes a run with its left or upper neighbours is redrawn and
//! the scan of that row starts over. Redraws are capped by
//! [`EngineConfig::max_fair_redraws`]; past the cap a conflicting cell gets
//! the first kind that differs from both neighbours instead, which needs an
//! alphabet of at least three kinds.

use crate::config::EngineConfig;
use crate::grid::Grid;
use crate::rng::TileSource;
use crate::types::{Position, TileKind};

/// Build a fresh grid with no match on it.
pub fn init_grid<R: TileSource + ?Sized>(config: &EngineConfig, source: &mut R) -> Grid {
    let mut grid = Grid::empty(config.grid_size);
    fill_fair(&mut grid, config, source);
    grid
}

/// Overwrite every cell of `grid` with a fair start. Returns the number of
/// random redraws spent.
pub fn fill_fair<R: TileSource + ?Sized>(
    grid: &mut Grid,
    config: &EngineConfig,
    source: &mut R,
) -> u32 {
    let n = grid.size();
    let kinds = config.tile_kinds;

    for pos in grid.positions() {
        grid.set(pos, Some(source.draw(kinds)));
    }

    let mut redraws = 0u32;
    for row in 0..n {
        let mut col = 0;
        while col < n {
            let pos = Position::new(row, col);
            if closes_run(grid, pos, config.min_run) {
                if redraws < config.max_fair_redraws {
                    redraws += 1;
                    grid.set(pos, Some(source.draw(kinds)));
                    col = 0;
                    continue;
                }
                grid.set(pos, Some(repair_kind(grid, pos, kinds)));
            }
            col += 1;
        }
    }

    redraws
}

/// True if the tile at `pos` ends a run of `min_run` going left or up.
fn closes_run(grid: &Grid, pos: Position, min_run: u8) -> bool {
    let Some(kind) = grid.tile(pos) else {
        return false;
    };

    let left = (1..min_run)
        .take_while(|&k| {
            pos.col >= k && grid.tile(Position::new(pos.row, pos.col - k)) == Some(kind)
        })
        .count();
    if left + 1 >= min_run as usize {
        return true;
    }

    let up = (1..min_run)
        .take_while(|&k| {
            pos.row >= k && grid.tile(Position::new(pos.row - k, pos.col)) == Some(kind)
        })
        .count();
    up + 1 >= min_run as usize
}

fn repair_kind(grid: &Grid, pos: Position, kinds: u8) -> TileKind {
    let left = pos
        .col
        .checked_sub(1)
        .and_then(|c| grid.tile(Position::new(pos.row, c)));
    let up = pos
        .row
        .checked_sub(1)
        .and_then(|r| grid.tile(Position::new(r, pos.col)));

    TileKind::ALL
        .iter()
        .take(kinds.max(1) as usize)
        .copied()
        .find(|&kind| Some(kind) != left && Some(kind) != up)
        .unwrap_or(TileKind::ALL[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::has_match;
    use crate::rng::{ScriptedSource, SimpleRng};
    use crate::types::TileKind::*;

    #[test]
    fn test_fair_over_many_seeds() {
        let config = EngineConfig::default();
        for seed in 0..200 {
            let grid = init_grid(&config, &mut SimpleRng::new(seed));
            assert!(grid.is_settled());
            assert!(!has_match(&grid, 3), "seed {} produced a match:\n{}", seed, grid);
        }
    }

    #[test]
    fn test_small_alphabet_and_long_runs() {
        for seed in 0..100 {
            let config = EngineConfig::default().with_tile_kinds(3).with_grid_size(6);
            let grid = init_grid(&config, &mut SimpleRng::new(seed));
            assert!(!has_match(&grid, 3));
            assert!(grid.cells().iter().all(|c| c.unwrap().index() < 3));

            let config = EngineConfig::default().with_min_run(4);
            assert!(!has_match(&init_grid(&config, &mut SimpleRng::new(seed)), 4));
        }
    }

    #[test]
    fn test_same_seed_same_grid() {
        let config = EngineConfig::default();
        let a = init_grid(&config, &mut SimpleRng::new(42));
        let b = init_grid(&config, &mut SimpleRng::new(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_clean_draws_are_kept_verbatim() {
        let mut source = ScriptedSource::new([
            Leaf, Bolt, Shield, Bolt, Shield, Leaf, Shield, Leaf, Bolt,
        ]);
        let config = EngineConfig::default().with_grid_size(3);
        let mut grid = Grid::empty(3);
        assert_eq!(fill_fair(&mut grid, &config, &mut source), 0);
        assert_eq!(grid.to_string(), "LBS\nBSL\nSLB");
    }

    #[test]
    fn test_redraw_restarts_row() {
        // (0,2) closes L L L; one redraw (Atom) fixes it.
        let mut source = ScriptedSource::new([
            Leaf, Leaf, Leaf, Bolt, Shield, Bolt, Shield, Bolt, Shield, Atom,
        ]);
        let config = EngineConfig::default().with_grid_size(3);
        let mut grid = Grid::empty(3);
        assert_eq!(fill_fair(&mut grid, &config, &mut source), 1);
        assert_eq!(grid.to_string(), "LLA\nBSB\nSBS");
    }

    #[test]
    fn test_exhausted_budget_repairs_deterministically() {
        let mut source = ScriptedSource::new(std::iter::repeat(Leaf).take(16));
        let config = EngineConfig::default()
            .with_grid_size(4)
            .with_tile_kinds(3)
            .with_max_fair_redraws(0);
        let mut grid = Grid::empty(4);
        assert_eq!(fill_fair(&mut grid, &config, &mut source), 0);
        assert_eq!(grid.to_string(), "LLBL\nLLSL\nBSLB\nLLBL");
        assert!(!has_match(&grid, 3));
    }

    #[test]
    fn test_refill_overwrites_existing_tiles() {
        let mut grid = Grid::parse("OOO/OOO/OOO").unwrap();
        let config = EngineConfig::default().with_grid_size(3);
        fill_fair(&mut grid, &config, &mut SimpleRng::new(5));
        assert!(!has_match(&grid, 3));
    }
}
