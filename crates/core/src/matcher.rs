//! Match detection - runs of identical tiles in rows and columns
//!
//! A run is a maximal line of adjacent cells holding the same tile kind.
//! Runs of at least `min_run` cells are matches. The match set is the
//! union of all matching runs with each position recorded once, so a cell
//! at the crossing of a row run and a column run counts once for scoring.
//!
//! Detection never mutates the grid. An empty match set is what ends a
//! cascade.

use serde::Serialize;

use crate::grid::Grid;
use crate::types::{Position, TileKind};

/// Direction a run extends in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Row,
    Column,
}

/// A matching run: `len` cells of `kind` starting at `start` and extending
/// right (row) or down (column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Run {
    pub axis: Axis,
    pub start: Position,
    pub len: u8,
    pub kind: TileKind,
}

impl Run {
    /// Cells covered by the run, in order
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let Run {
            axis, start, len, ..
        } = *self;
        (0..len).map(move |i| match axis {
            Axis::Row => Position::new(start.row, start.col + i),
            Axis::Column => Position::new(start.row + i, start.col),
        })
    }
}

/// Deduplicated set of matched positions, kept in row-major order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MatchSet {
    cells: Vec<Position>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from any positions; sorts and removes duplicates.
    pub fn from_positions(positions: impl IntoIterator<Item = Position>) -> Self {
        let mut cells: Vec<Position> = positions.into_iter().collect();
        cells.sort_unstable();
        cells.dedup();
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.cells.binary_search(&pos).is_ok()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Position> {
        self.cells.iter()
    }

    pub fn as_slice(&self) -> &[Position] {
        &self.cells
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// Walk every row, then every column, calling `emit` for each run of at
/// least `min_run`. Stops early once `emit` returns `false`.
fn scan_runs(grid: &Grid, min_run: u8, mut emit: impl FnMut(Run) -> bool) -> bool {
    let n = grid.size();

    for axis in [Axis::Row, Axis::Column] {
        for line in 0..n {
            // (start, kind, len) of the run in progress
            let mut current: Option<(Position, TileKind, u8)> = None;

            for i in 0..n {
                let pos = match axis {
                    Axis::Row => Position::new(line, i),
                    Axis::Column => Position::new(i, line),
                };
                let cell = grid.tile(pos);

                match (current, cell) {
                    (Some((start, kind, len)), Some(next)) if next == kind => {
                        current = Some((start, kind, len + 1));
                    }
                    _ => {
                        if let Some((start, kind, len)) = current {
                            if len >= min_run
                                && !emit(Run {
                                    axis,
                                    start,
                                    len,
                                    kind,
                                })
                            {
                                return false;
                            }
                        }
                        current = cell.map(|kind| (pos, kind, 1));
                    }
                }
            }

            // Trailing run at the end of the line
            if let Some((start, kind, len)) = current {
                if len >= min_run
                    && !emit(Run {
                        axis,
                        start,
                        len,
                        kind,
                    })
                {
                    return false;
                }
            }
        }
    }

    true
}

/// All runs of at least `min_run`, rows first (top to bottom) then columns
/// (left to right).
pub fn find_runs(grid: &Grid, min_run: u8) -> Vec<Run> {
    let mut runs = Vec::new();
    scan_runs(grid, min_run, |run| {
        runs.push(run);
        true
    });
    runs
}

/// The match set of the grid: every position in any run of at least
/// `min_run`, each recorded once.
pub fn find_matches(grid: &Grid, min_run: u8) -> MatchSet {
    let n = grid.size() as usize;
    let mut marked = vec![false; n * n];
    let mut count = 0usize;

    scan_runs(grid, min_run, |run| {
        for pos in run.positions() {
            let i = (pos.row as usize) * n + (pos.col as usize);
            if !marked[i] {
                marked[i] = true;
                count += 1;
            }
        }
        true
    });

    let mut cells = Vec::with_capacity(count);
    cells.extend(grid.positions().filter(|pos| {
        marked[(pos.row as usize) * n + (pos.col as usize)]
    }));
    MatchSet { cells }
}

/// True if the grid holds at least one match. Same rule as
/// [`find_matches`], but stops at the first run.
pub fn has_match(grid: &Grid, min_run: u8) -> bool {
    let mut found = false;
    scan_runs(grid, min_run, |_| {
        found = true;
        false
    });
    found
}
