//! Core engine - pure, deterministic, and testable
//!
//! This crate holds the whole board simulation of the match-3 game. It has
//! **no dependencies** on terminals, clocks, or I/O:
//!
//! - **Deterministic**: the same seed (or the same scripted tile source)
//!   replays the same game
//! - **Testable**: every rule is a plain function over a [`Grid`]
//! - **Portable**: the terminal front-end and the headless script driver use
//!   the same API
//!
//! # Module Structure
//!
//! - [`grid`]: N x N board, gravity and refill
//! - [`matcher`]: run detection and the deduplicated match set
//! - [`swap`]: adjacency check and match-or-revert swaps
//! - [`cascade`]: lazy clear / score / gravity loop
//! - [`hint`]: first available move, read-only
//! - [`generator`]: fair start with no pre-made matches
//! - [`rng`]: tile sources (seeded LCG, scripted queue)
//! - [`scoring`]: chain-multiplied wave score
//! - [`session`]: one game: grid, score, pending pick, expiry
//!
//! # Game Rules
//!
//! - A swap of two orthogonal neighbours stands only if it makes a match
//! - A match is any row or column run of three or more identical tiles
//! - Each cascade wave scores `cells * 10 * chain`, with `chain` starting at 1
//! - Cleared cells fall out of the column; new tiles drop in from the top
//!
//! # Example
//!
//! ```
//! use tui_match3_core::{EngineConfig, Session};
//!
//! let mut session = Session::new(EngineConfig::default(), 12345).unwrap();
//!
//! if let Some(hint) = session.hint() {
//!     let outcome = session.try_swap(hint.from, hint.to).unwrap();
//!     assert!(outcome.is_accepted());
//!
//!     for step in session.resolve() {
//!         assert!(step.score_gained > 0);
//!     }
//! }
//!
//! assert!(session.grid().is_settled());
//! ```

pub mod cascade;
pub mod config;
pub mod error;
pub mod generator;
pub mod grid;
pub mod hint;
pub mod matcher;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod swap;

pub use tui_match3_types as types;

// Re-export commonly used types for convenience
pub use cascade::{resolve, Resolution, ResolutionEvent, ResolutionStep};
pub use config::EngineConfig;
pub use error::ConfigError;
pub use generator::{fill_fair, init_grid};
pub use grid::Grid;
pub use hint::{find_hint, Hint};
pub use matcher::{find_matches, find_runs, has_match, Axis, MatchSet, Run};
pub use rng::{ScriptedSource, SimpleRng, TileSource};
pub use scoring::{wave_score, ScoreBoard};
pub use session::{PickOutcome, Session};
pub use snapshot::SessionSnapshot;
pub use swap::{attempt_swap, SwapOutcome};
