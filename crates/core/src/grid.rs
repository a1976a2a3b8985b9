//! Grid module - the square board of tiles
//!
//! The grid is an N x N board where each cell holds a tile kind or is empty.
//! Cells live in a flat row-major vector: `index(r, c) = r * N + c`.
//! Row 0 is the top; gravity pulls tiles towards the last row.
//!
//! Empty cells only exist while a cascade is between clearing a wave and
//! applying gravity. Between player actions every cell holds a tile.
//!
//! Addressing a position outside the board is a caller bug and panics,
//! except through [`Grid::get`], which reports it as `None`.

use std::fmt;

use arrayvec::ArrayVec;
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::types::{Cell, Direction, Position, TileKind};

/// The game grid - N x N cells using flat vector storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: u8,
    /// Flat vector of cells, row-major order (row * size + col)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell empty
    pub fn empty(size: u8) -> Self {
        let n = size as usize;
        Self {
            size,
            cells: vec![None; n * n],
        }
    }

    /// Create a grid by evaluating `f` for every position in row-major order
    pub fn from_fn(size: u8, mut f: impl FnMut(Position) -> Cell) -> Self {
        let mut grid = Self::empty(size);
        for pos in grid.positions() {
            let i = grid.index(pos);
            grid.cells[i] = f(pos);
        }
        grid
    }

    /// Create from a 2D vector of rows. Returns `None` unless the rows form a
    /// non-empty square.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Option<Self> {
        if rows.is_empty() {
            return None;
        }
        let size = u8::try_from(rows.len()).ok()?;
        if rows.iter().any(|row| row.len() != rows.len()) {
            return None;
        }
        Some(Self {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Parse the text board format.
    ///
    /// One row per line (or per `/`), one letter per tile as given by
    /// [`TileKind::letter`], `.` for an empty cell. Spaces are ignored.
    ///
    /// ```
    /// use tui_match3_core::Grid;
    /// use tui_match3_types::{Position, TileKind};
    ///
    /// let grid = Grid::parse("LBS/BSL/SLB").unwrap();
    /// assert_eq!(grid.size(), 3);
    /// assert_eq!(grid.tile(Position::new(0, 1)), Some(TileKind::Bolt));
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        let mut rows = Vec::new();
        for line in text.split(['\n', '/']) {
            let row: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if row.is_empty() {
                continue;
            }
            let mut cells = Vec::with_capacity(row.len());
            for ch in row {
                if ch == '.' {
                    cells.push(None);
                } else {
                    cells.push(Some(TileKind::from_letter(ch)?));
                }
            }
            rows.push(cells);
        }
        Self::from_rows(rows)
    }

    /// Edge length of the grid
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Check if position lies on the board
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Flat index of an in-bounds position
    #[inline(always)]
    fn index(&self, pos: Position) -> usize {
        assert!(
            self.in_bounds(pos),
            "position ({}, {}) is outside the {}x{} grid",
            pos.row,
            pos.col,
            self.size,
            self.size
        );
        (pos.row as usize) * (self.size as usize) + (pos.col as usize)
    }

    /// Get cell at position; `None` if out of bounds
    pub fn get(&self, pos: Position) -> Option<Cell> {
        if self.in_bounds(pos) {
            Some(self.cells[self.index(pos)])
        } else {
            None
        }
    }

    /// Cell at an in-bounds position
    pub fn tile(&self, pos: Position) -> Cell {
        self.cells[self.index(pos)]
    }

    /// Overwrite the cell at an in-bounds position
    pub fn set(&mut self, pos: Position, cell: Cell) {
        let i = self.index(pos);
        self.cells[i] = cell;
    }

    /// Exchange two cells
    pub fn swap(&mut self, a: Position, b: Position) {
        let (ia, ib) = (self.index(a), self.index(b));
        self.cells.swap(ia, ib);
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Position::new(row, col)))
    }

    /// In-bounds neighbours in right, down, left, up order
    pub fn neighbors(&self, pos: Position) -> ArrayVec<Position, 4> {
        Direction::ALL
            .iter()
            .filter_map(|&dir| pos.step(dir))
            .filter(|&p| self.in_bounds(p))
            .collect()
    }

    /// One row of cells, left to right
    pub fn row(&self, row: u8) -> &[Cell] {
        let n = self.size as usize;
        let start = self.index(Position::new(row, 0));
        &self.cells[start..start + n]
    }

    /// Get a reference to the internal cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// True when no cell is empty
    pub fn is_settled(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Number of empty cells
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Empty every listed cell
    pub fn clear_cells<'a>(&mut self, positions: impl IntoIterator<Item = &'a Position>) {
        for pos in positions {
            self.set(*pos, None);
        }
    }

    /// Drop tiles down each column, keeping their order, so every empty cell
    /// ends up at the top of its column. Returns how many cells are left empty.
    pub fn collapse(&mut self) -> usize {
        let n = self.size as usize;
        let mut vacated = 0;

        for col in 0..n {
            // Two-pointer pass from the bottom: `write` is one past the next
            // slot to fill.
            let mut write = n;
            for read in (0..n).rev() {
                if let Some(kind) = self.cells[read * n + col] {
                    write -= 1;
                    self.cells[write * n + col] = Some(kind);
                }
            }
            for row in 0..write {
                self.cells[row * n + col] = None;
            }
            vacated += write;
        }

        vacated
    }

    /// Fill every empty cell with `draw()`.
    ///
    /// Draw order is column by column from the left, and within a column
    /// from the bottom up. Returns the number of cells filled.
    pub fn refill(&mut self, mut draw: impl FnMut() -> TileKind) -> usize {
        let n = self.size as usize;
        let mut filled = 0;

        for col in 0..n {
            for row in (0..n).rev() {
                let cell = &mut self.cells[row * n + col];
                if cell.is_none() {
                    *cell = Some(draw());
                    filled += 1;
                }
            }
        }

        filled
    }

    /// Gravity: [`collapse`](Self::collapse) then [`refill`](Self::refill)
    pub fn apply_gravity(&mut self, draw: impl FnMut() -> TileKind) -> usize {
        self.collapse();
        self.refill(draw)
    }

    /// Write cells as codes (0 = empty, 1.. = kind index + 1) into `out`
    pub fn write_codes(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend(
            self.cells
                .iter()
                .map(|cell| cell.map_or(0, |kind| kind.index() + 1)),
        );
    }

    /// Convert to a 2D vector for testing/display
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        (0..self.size).map(|row| self.row(row).to_vec()).collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            if row > 0 {
                writeln!(f)?;
            }
            for cell in self.row(row) {
                let ch = cell.map_or('.', |kind| kind.letter());
                write!(f, "{}", ch)?;
            }
        }
        Ok(())
    }
}

/// Serialized as one string per row, in the [`Display`](fmt::Display) letters.
impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.size as usize))?;
        for row in 0..self.size {
            let line: String = self
                .row(row)
                .iter()
                .map(|cell| cell.map_or('.', |kind| kind.letter()))
                .collect();
            seq.serialize_element(&line)?;
        }
        seq.end()
    }
}
