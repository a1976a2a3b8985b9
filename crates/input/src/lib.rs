//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and keeps
//! the board cursor those actions move. Nothing here touches the engine;
//! the front-end turns `Pick` into a session pick at the cursor.

pub mod cursor;
pub mod map;

pub use tui_match3_types as types;

pub use cursor::Cursor;
pub use map::{handle_key_event, should_quit};
