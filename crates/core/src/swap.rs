//! Swap validation
//!
//! A swap is applied iff it immediately produces at least one match.
//! Rejected swaps leave the grid exactly as it was.

use serde::Serialize;

use crate::grid::Grid;
use crate::matcher::{find_matches, MatchSet};
use crate::types::Position;

/// Result of trying to exchange two tiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SwapOutcome {
    /// The swap stands; `matched` is the match set it produced.
    Accepted { matched: MatchSet },
    /// The tiles were adjacent but nothing matched; swapped back.
    NoMatch,
    /// The positions are not orthogonal neighbours; nothing happened.
    NotAdjacent,
}

impl SwapOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SwapOutcome::Accepted { .. })
    }

    /// Match set of an accepted swap
    pub fn matched(&self) -> Option<&MatchSet> {
        match self {
            SwapOutcome::Accepted { matched } => Some(matched),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SwapOutcome::Accepted { .. } => "accepted",
            SwapOutcome::NoMatch => "no_match",
            SwapOutcome::NotAdjacent => "not_adjacent",
        }
    }
}

/// Try to swap the tiles at `a` and `b`.
///
/// # Panics
///
/// Panics if either position is outside the grid.
pub fn attempt_swap(grid: &mut Grid, a: Position, b: Position, min_run: u8) -> SwapOutcome {
    assert!(
        grid.in_bounds(a) && grid.in_bounds(b),
        "swap ({}, {}) <-> ({}, {}) is outside the {}x{} grid",
        a.row,
        a.col,
        b.row,
        b.col,
        grid.size(),
        grid.size()
    );

    if !a.is_adjacent(b) {
        return SwapOutcome::NotAdjacent;
    }

    grid.swap(a, b);
    let matched = find_matches(grid, min_run);
    if matched.is_empty() {
        grid.swap(a, b);
        return SwapOutcome::NoMatch;
    }

    SwapOutcome::Accepted { matched }
}
