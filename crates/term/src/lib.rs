//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids
//! widget/layout libraries and renders into a simple framebuffer that is
//! flushed to the terminal backend.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Render from a snapshot so the view never borrows the session
//! - Allow precise control over aspect ratio (2 chars wide per tile)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_match3_core as core;
pub use tui_match3_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Overlay, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
