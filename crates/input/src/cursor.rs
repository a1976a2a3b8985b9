//! Board cursor for keyboard play.

use crate::types::{GameAction, Position};

/// Keyboard cursor over an N x N board. Moves stop at the edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pos: Position,
    size: u8,
}

impl Cursor {
    /// Cursor in the middle of a `size` x `size` board
    pub fn new(size: u8) -> Self {
        let mid = size.saturating_sub(1) / 2;
        Self {
            pos: Position::new(mid, mid),
            size,
        }
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    /// Jump to `pos`, clamped onto the board
    pub fn set_position(&mut self, pos: Position) {
        let last = self.size.saturating_sub(1);
        self.pos = Position::new(pos.row.min(last), pos.col.min(last));
    }

    /// Apply a cursor action. Returns true if the cursor moved; other
    /// actions are left to the caller and return false.
    pub fn apply(&mut self, action: GameAction) -> bool {
        let last = self.size.saturating_sub(1);
        let Position { row, col } = self.pos;
        let next = match action {
            GameAction::CursorUp => Position::new(row.saturating_sub(1), col),
            GameAction::CursorDown => Position::new((row + 1).min(last), col),
            GameAction::CursorLeft => Position::new(row, col.saturating_sub(1)),
            GameAction::CursorRight => Position::new(row, (col + 1).min(last)),
            _ => return false,
        };
        let moved = next != self.pos;
        self.pos = next;
        moved
    }
}
