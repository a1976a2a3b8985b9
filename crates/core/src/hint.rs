//! Hint search
//!
//! Tries every cell in row-major order against its neighbours (right, down,
//! left, up) and reports the first swap that would be accepted. The search
//! runs on a scratch copy, so the caller's grid is only ever borrowed
//! immutably.

use serde::Serialize;

use crate::grid::Grid;
use crate::matcher::has_match;
use crate::types::Position;

/// A swap that would produce a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Hint {
    pub from: Position,
    pub to: Position,
}

impl Hint {
    pub fn contains(&self, pos: Position) -> bool {
        self.from == pos || self.to == pos
    }
}

/// First accepted swap in search order, or `None` when the board is stuck.
pub fn find_hint(grid: &Grid, min_run: u8) -> Option<Hint> {
    let mut scratch = grid.clone();

    for from in grid.positions() {
        for to in grid.neighbors(from) {
            scratch.swap(from, to);
            let found = has_match(&scratch, min_run);
            scratch.swap(from, to);
            if found {
                return Some(Hint { from, to });
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swap::attempt_swap;

    fn p(row: u8, col: u8) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_finds_first_in_search_order() {
        // (0,3) down to (1,3) completes row 0. (0,0) has no working swap,
        // nor do (0,1) and (0,2); (0,3) right is off the board.
        let grid = Grid::parse("BLLA/SBAL/ASBS/BABL").unwrap();
        let hint = find_hint(&grid, 3).unwrap();
        assert_eq!(hint, Hint { from: p(0, 3), to: p(1, 3) });
    }

    #[test]
    fn test_hint_is_accepted_by_swap() {
        let mut grid = Grid::parse("BLLA/SBAL/ASBS/BABL").unwrap();
        let hint = find_hint(&grid, 3).unwrap();
        assert!(attempt_swap(&mut grid, hint.from, hint.to, 3).is_accepted());
    }

    #[test]
    fn test_stuck_board_has_no_hint() {
        // No kind appears three times, so no line can ever fill.
        let grid = Grid::parse("LBS/AKO/SLB").unwrap();
        assert_eq!(find_hint(&grid, 3), None);
    }

    #[test]
    fn test_grid_untouched() {
        let grid = Grid::parse("BLLA/SBAL/ASBS/BABL").unwrap();
        let before = grid.clone();
        let _ = find_hint(&grid, 3);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_hint_contains() {
        let hint = Hint { from: p(1, 1), to: p(1, 2) };
        assert!(hint.contains(p(1, 2)));
        assert!(!hint.contains(p(2, 2)));
    }
}
