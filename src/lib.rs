//! TUI match-3 (workspace facade crate).
//!
//! Re-exports the engine and front-end crates under `crates/` as
//! `tui_match3::{core,input,term,types}`, plus the application layer shared
//! by the binary: environment config, the JSON-lines event log and the
//! headless script driver.

pub use tui_match3_core as core;
pub use tui_match3_input as input;
pub use tui_match3_term as term;
pub use tui_match3_types as types;

pub mod config;
pub mod event_log;
pub mod script;
