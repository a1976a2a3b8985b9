//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no engine logic, so they can be shared by
//! the engine, the terminal front-end and the script protocol alike.
//!
//! # Grid Dimensions
//!
//! The playfield is square. The default is the classic 8x8 board with a
//! six-symbol alphabet:
//!
//! - **Size**: `DEFAULT_GRID_SIZE` (8), configurable within
//!   `MIN_GRID_SIZE..=MAX_GRID_SIZE`
//! - **Alphabet**: `TILE_KIND_COUNT` (6) symbols, at least `MIN_TILE_KINDS` (3)
//! - **Run length**: `DEFAULT_MIN_RUN` (3) identical tiles in a line
//!
//! # Presentation Timing
//!
//! The engine holds no clock. These values are only used by the terminal
//! front-end to pace a resolution:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Input poll interval |
//! | `CLEAR_PAUSE_MS` | 260 | Pause after matched tiles are cleared |
//! | `SETTLE_PAUSE_MS` | 90 | Pause after gravity refills a wave |
//! | `HINT_FLASH_MS` | 700 | How long a hint stays highlighted |
//! | `TIME_LIMIT_SECS` | 60 | Default session length |
//!
//! # Examples
//!
//! ```
//! use tui_match3_types::{Direction, Position, TileKind};
//!
//! let kind = TileKind::from_str("Leaf").unwrap();
//! assert_eq!(kind, TileKind::Leaf);
//! assert_eq!(kind.as_str(), "leaf");
//!
//! let p = Position::new(2, 3);
//! assert_eq!(p.step(Direction::Right), Some(Position::new(2, 4)));
//! assert_eq!(Position::new(0, 0).step(Direction::Up), None);
//! assert!(p.is_adjacent(Position::new(3, 3)));
//! ```

use serde::{Deserialize, Serialize};

/// Default board edge length (8x8)
pub const DEFAULT_GRID_SIZE: u8 = 8;

/// Smallest supported board edge length
pub const MIN_GRID_SIZE: u8 = 3;

/// Largest supported board edge length
pub const MAX_GRID_SIZE: u8 = 16;

/// Number of tile symbols in the full alphabet
pub const TILE_KIND_COUNT: u8 = 6;

/// Fewest symbols for which run-free boards are always constructible
pub const MIN_TILE_KINDS: u8 = 3;

/// Default minimum run length that counts as a match
pub const DEFAULT_MIN_RUN: u8 = 3;

/// Points per cleared tile before the chain multiplier
pub const POINTS_PER_TILE: u32 = 10;

/// Input poll interval in milliseconds
pub const TICK_MS: u32 = 16;

/// Default session length in seconds
pub const TIME_LIMIT_SECS: u32 = 60;

/// Remaining seconds at which the timer is drawn as a warning
pub const LOW_TIME_WARNING_SECS: u32 = 10;

/// Pause after a wave of matched tiles is cleared
pub const CLEAR_PAUSE_MS: u32 = 260;

/// Pause after gravity has refilled a wave
pub const SETTLE_PAUSE_MS: u32 = 90;

/// How long a hint pair stays highlighted
pub const HINT_FLASH_MS: u32 = 700;

/// The tile symbols.
///
/// A board configured with fewer than `TILE_KIND_COUNT` kinds uses the
/// first N variants in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    Leaf,
    Bolt,
    Shield,
    Atom,
    Link,
    Orb,
}

impl TileKind {
    /// Every kind, in declaration order.
    pub const ALL: [TileKind; TILE_KIND_COUNT as usize] = [
        TileKind::Leaf,
        TileKind::Bolt,
        TileKind::Shield,
        TileKind::Atom,
        TileKind::Link,
        TileKind::Orb,
    ];

    /// Kind at `index` in declaration order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_match3_types::TileKind;
    ///
    /// assert_eq!(TileKind::from_index(0), Some(TileKind::Leaf));
    /// assert_eq!(TileKind::from_index(5), Some(TileKind::Orb));
    /// assert_eq!(TileKind::from_index(6), None);
    /// ```
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Zero-based index in declaration order.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Parse tile kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "leaf" => Some(TileKind::Leaf),
            "bolt" => Some(TileKind::Bolt),
            "shield" => Some(TileKind::Shield),
            "atom" => Some(TileKind::Atom),
            "link" => Some(TileKind::Link),
            "orb" => Some(TileKind::Orb),
            _ => None,
        }
    }

    /// Single-letter code used by the text board format
    ///
    /// Link uses `K` so it does not clash with Leaf.
    pub fn letter(&self) -> char {
        match self {
            TileKind::Leaf => 'L',
            TileKind::Bolt => 'B',
            TileKind::Shield => 'S',
            TileKind::Atom => 'A',
            TileKind::Link => 'K',
            TileKind::Orb => 'O',
        }
    }

    /// Parse a single-letter code (case-insensitive)
    pub fn from_letter(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            'L' => Some(TileKind::Leaf),
            'B' => Some(TileKind::Bolt),
            'S' => Some(TileKind::Shield),
            'A' => Some(TileKind::Atom),
            'K' => Some(TileKind::Link),
            'O' => Some(TileKind::Orb),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            TileKind::Leaf => "leaf",
            TileKind::Bolt => "bolt",
            TileKind::Shield => "shield",
            TileKind::Atom => "atom",
            TileKind::Link => "link",
            TileKind::Orb => "orb",
        }
    }
}

/// A cell on the grid
///
/// - `None`: Empty, only seen while a cascade is between clear and gravity
/// - `Some(TileKind)`: Cell holding a tile
pub type Cell = Option<TileKind>;

/// A (row, column) pair. Row 0 is the top of the board.
///
/// Ordering is row-major, so sorted positions follow scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two positions
    pub fn distance(self, other: Position) -> u16 {
        (self.row.abs_diff(other.row) as u16) + (self.col.abs_diff(other.col) as u16)
    }

    /// True when the positions share an edge
    pub fn is_adjacent(self, other: Position) -> bool {
        self.distance(other) == 1
    }

    /// Neighbour one step in `dir`.
    ///
    /// Returns `None` only when stepping off the top or left edge; the
    /// bottom/right edge depends on the board size and is checked by the grid.
    pub fn step(self, dir: Direction) -> Option<Position> {
        let (dr, dc) = dir.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Some(Position { row, col })
    }
}

/// Axis-aligned neighbour directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// Hint search order: right, down, left, up.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// (row delta, column delta)
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Up => (-1, 0),
        }
    }
}

/// Player actions produced by the input layer
///
/// The cursor actions only move the front-end's selection; `Pick` is the
/// one that reaches the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the cursor one cell up
    CursorUp,
    /// Move the cursor one cell down
    CursorDown,
    /// Move the cursor one cell left
    CursorLeft,
    /// Move the cursor one cell right
    CursorRight,
    /// Pick the cell under the cursor (first or second pick of a swap)
    Pick,
    /// Ask the engine for a hint
    Hint,
    /// Start a new game
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_match3_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("pick"), Some(GameAction::Pick));
    /// assert_eq!(GameAction::from_str("cursorLeft"), Some(GameAction::CursorLeft));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cursorup" => Some(GameAction::CursorUp),
            "cursordown" => Some(GameAction::CursorDown),
            "cursorleft" => Some(GameAction::CursorLeft),
            "cursorright" => Some(GameAction::CursorRight),
            "pick" => Some(GameAction::Pick),
            "hint" => Some(GameAction::Hint),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::CursorUp => "cursorUp",
            GameAction::CursorDown => "cursorDown",
            GameAction::CursorLeft => "cursorLeft",
            GameAction::CursorRight => "cursorRight",
            GameAction::Pick => "pick",
            GameAction::Hint => "hint",
            GameAction::Restart => "restart",
        }
    }
}
