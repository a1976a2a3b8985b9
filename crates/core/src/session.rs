//! Session module - one game in progress
//!
//! A [`Session`] owns the grid, the score ledger, the tile source and the
//! pending first pick. Front-ends drive it with [`Session::pick`] (or
//! [`Session::try_swap`]) and then run the returned swap to completion with
//! [`Session::resolve`]. The session keeps no clock; the caller decides when
//! time is up and calls [`Session::expire`].

use serde::Serialize;

use crate::cascade::{resolve, Resolution};
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::generator::fill_fair;
use crate::grid::Grid;
use crate::hint::{find_hint, Hint};
use crate::rng::{SimpleRng, TileSource};
use crate::scoring::ScoreBoard;
use crate::snapshot::SessionSnapshot;
use crate::swap::{attempt_swap, SwapOutcome};
use crate::types::Position;

/// What a pick did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "pick", rename_all = "snake_case")]
pub enum PickOutcome {
    /// Stored as the first pick
    Selected { at: Position },
    /// The first pick was picked again and dropped
    Deselected { at: Position },
    /// Second pick: a swap was attempted and the first pick cleared
    Swapped {
        from: Position,
        to: Position,
        #[serde(flatten)]
        outcome: SwapOutcome,
    },
    /// The session has expired
    Ignored,
}

impl PickOutcome {
    /// True if the pick produced an accepted swap that now needs resolving
    pub fn needs_resolve(&self) -> bool {
        matches!(self, PickOutcome::Swapped { outcome, .. } if outcome.is_accepted())
    }
}

/// A game in progress
#[derive(Debug, Clone)]
pub struct Session<R: TileSource = SimpleRng> {
    config: EngineConfig,
    grid: Grid,
    ledger: ScoreBoard,
    source: R,
    first_pick: Option<Position>,
    expired: bool,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    seed: Option<u32>,
    /// Accepted swaps this episode
    swaps: u32,
    /// Random redraws the last fair start needed
    fair_redraws: u32,
}

impl Session<SimpleRng> {
    /// New game on a seeded LCG.
    pub fn new(config: EngineConfig, seed: u32) -> Result<Self, ConfigError> {
        let mut session = Self::with_source(config, SimpleRng::new(seed))?;
        session.seed = Some(seed);
        Ok(session)
    }
}

impl<R: TileSource> Session<R> {
    /// New game drawing every tile from `source`.
    pub fn with_source(config: EngineConfig, mut source: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut grid = Grid::empty(config.grid_size);
        let fair_redraws = fill_fair(&mut grid, &config, &mut source);
        Ok(Self::assemble(config, grid, source, fair_redraws))
    }

    /// Start from a prepared grid instead of a fair start.
    ///
    /// The grid may already hold matches; they stay until the next
    /// [`resolve`](Self::resolve).
    pub fn from_grid(config: EngineConfig, grid: Grid, source: R) -> Result<Self, ConfigError> {
        config.validate()?;
        if grid.size() != config.grid_size {
            return Err(ConfigError::GridMismatch {
                expected: config.grid_size,
                actual: grid.size(),
            });
        }
        if !grid.is_settled() {
            return Err(ConfigError::UnsettledGrid);
        }
        Ok(Self::assemble(config, grid, source, 0))
    }

    fn assemble(config: EngineConfig, grid: Grid, source: R, fair_redraws: u32) -> Self {
        Self {
            config,
            grid,
            ledger: ScoreBoard::new(),
            source,
            first_pick: None,
            expired: false,
            episode_id: 0,
            seed: None,
            swaps: 0,
            fair_redraws,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn ledger(&self) -> &ScoreBoard {
        &self.ledger
    }

    pub fn score(&self) -> u32 {
        self.ledger.score()
    }

    pub fn first_pick(&self) -> Option<Position> {
        self.first_pick
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn seed(&self) -> Option<u32> {
        self.seed
    }

    pub fn swaps(&self) -> u32 {
        self.swaps
    }

    pub fn fair_redraws(&self) -> u32 {
        self.fair_redraws
    }

    pub fn source(&self) -> &R {
        &self.source
    }

    /// Pick a cell.
    ///
    /// The first pick is remembered. Picking it again drops it. Any other
    /// second pick attempts a swap with the first and clears it, whatever
    /// the outcome. An accepted swap must be followed by
    /// [`resolve`](Self::resolve).
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    pub fn pick(&mut self, pos: Position) -> PickOutcome {
        assert!(
            self.grid.in_bounds(pos),
            "pick ({}, {}) is outside the {}x{} grid",
            pos.row,
            pos.col,
            self.grid.size(),
            self.grid.size()
        );
        if self.expired {
            return PickOutcome::Ignored;
        }

        match self.first_pick {
            None => {
                self.first_pick = Some(pos);
                PickOutcome::Selected { at: pos }
            }
            Some(first) if first == pos => {
                self.first_pick = None;
                PickOutcome::Deselected { at: pos }
            }
            Some(first) => match self.try_swap(first, pos) {
                Some(outcome) => PickOutcome::Swapped {
                    from: first,
                    to: pos,
                    outcome,
                },
                None => PickOutcome::Ignored,
            },
        }
    }

    /// Drop the pending first pick, if any.
    pub fn clear_pick(&mut self) {
        self.first_pick = None;
    }

    /// Swap two cells directly. Returns `None` once the session has expired.
    pub fn try_swap(&mut self, a: Position, b: Position) -> Option<SwapOutcome> {
        if self.expired {
            return None;
        }
        self.first_pick = None;
        let outcome = attempt_swap(&mut self.grid, a, b, self.config.min_run);
        if outcome.is_accepted() {
            self.swaps += 1;
        }
        Some(outcome)
    }

    /// Resolve every match on the grid. The returned [`Resolution`] borrows
    /// the session until it is consumed or dropped.
    pub fn resolve(&mut self) -> Resolution<'_, R> {
        resolve(
            &mut self.grid,
            &mut self.source,
            &mut self.ledger,
            self.config,
        )
    }

    /// First swap that would be accepted, if any.
    pub fn hint(&self) -> Option<Hint> {
        find_hint(&self.grid, self.config.min_run)
    }

    /// No swap on the board produces a match.
    pub fn is_stuck(&self) -> bool {
        self.hint().is_none()
    }

    /// Time is up: further picks and swaps are ignored until restart.
    pub fn expire(&mut self) {
        self.expired = true;
        self.first_pick = None;
    }

    /// New game on the same grid and tile source.
    pub fn restart(&mut self) {
        self.fair_redraws = fill_fair(&mut self.grid, &self.config, &mut self.source);
        self.ledger.reset();
        self.first_pick = None;
        self.expired = false;
        self.swaps = 0;
        self.episode_id = self.episode_id.wrapping_add(1);
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.update_board(&self.grid, &self.ledger);
        out.episode_id = self.episode_id;
        out.seed = self.seed;
        out.swaps = self.swaps;
        out.first_pick = self.first_pick;
        out.expired = self.expired;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::has_match;
    use crate::rng::ScriptedSource;
    use crate::types::TileKind::*;

    fn p(row: u8, col: u8) -> Position {
        Position::new(row, col)
    }

    fn config4() -> EngineConfig {
        EngineConfig::default().with_grid_size(4)
    }

    // (0,3) <-> (1,3) completes Leaf row 0.
    fn fixed_session() -> Session<ScriptedSource> {
        let grid = Grid::parse("BLLA/SBAL/ASBS/BABL").unwrap();
        let source = ScriptedSource::new([Orb, Atom, Link]);
        Session::from_grid(config4(), grid, source).unwrap()
    }

    #[test]
    fn test_new_session_is_fair_and_fresh() {
        let session = Session::new(EngineConfig::default(), 12345).unwrap();
        assert!(!has_match(session.grid(), 3));
        assert_eq!(session.score(), 0);
        assert_eq!(session.first_pick(), None);
        assert_eq!(session.seed(), Some(12345));
        assert!(!session.is_expired());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = Session::new(EngineConfig::default().with_tile_kinds(2), 1).unwrap_err();
        assert!(matches!(err, ConfigError::TileKinds { .. }));
    }

    #[test]
    fn test_from_grid_checks_shape() {
        let grid = Grid::parse("LBS/BSL/SLB").unwrap();
        let err = Session::from_grid(config4(), grid, SimpleRng::new(1)).unwrap_err();
        assert_eq!(err, ConfigError::GridMismatch { expected: 4, actual: 3 });

        let grid = Grid::parse("LB.L/BLSB/LBSL/BSLB").unwrap();
        let err = Session::from_grid(config4(), grid, SimpleRng::new(1)).unwrap_err();
        assert_eq!(err, ConfigError::UnsettledGrid);
    }

    #[test]
    fn test_pick_select_and_deselect() {
        let mut session = fixed_session();
        assert_eq!(session.pick(p(1, 1)), PickOutcome::Selected { at: p(1, 1) });
        assert_eq!(session.first_pick(), Some(p(1, 1)));
        assert_eq!(session.pick(p(1, 1)), PickOutcome::Deselected { at: p(1, 1) });
        assert_eq!(session.first_pick(), None);
    }

    #[test]
    fn test_pick_non_adjacent_clears_pick() {
        let mut session = fixed_session();
        let before = session.grid().clone();
        session.pick(p(0, 0));
        let outcome = session.pick(p(2, 2));
        assert_eq!(
            outcome,
            PickOutcome::Swapped {
                from: p(0, 0),
                to: p(2, 2),
                outcome: SwapOutcome::NotAdjacent,
            }
        );
        assert_eq!(session.first_pick(), None);
        assert_eq!(session.grid(), &before);
    }

    #[test]
    fn test_pick_accepted_then_resolve() {
        let mut session = fixed_session();
        session.pick(p(0, 3));
        let outcome = session.pick(p(1, 3));
        assert!(outcome.needs_resolve());
        assert_eq!(session.swaps(), 1);

        let gained = session.resolve().finish();
        assert_eq!(gained, 30);
        assert_eq!(session.score(), 30);
        assert!(session.grid().is_settled());
        assert!(!has_match(session.grid(), 3));
    }

    #[test]
    fn test_rejected_swap_leaves_grid() {
        let mut session = fixed_session();
        let before = session.grid().clone();
        assert_eq!(session.try_swap(p(2, 0), p(2, 1)), Some(SwapOutcome::NoMatch));
        assert_eq!(session.grid(), &before);
        assert_eq!(session.swaps(), 0);
    }

    #[test]
    fn test_hint_and_stuck() {
        let session = fixed_session();
        let hint = session.hint().unwrap();
        assert_eq!((hint.from, hint.to), (p(0, 3), p(1, 3)));
        assert!(!session.is_stuck());

        let config = EngineConfig::default().with_grid_size(3);
        let grid = Grid::parse("LBS/AKO/SLB").unwrap();
        let stuck = Session::from_grid(config, grid, SimpleRng::new(1)).unwrap();
        assert!(stuck.is_stuck());
    }

    #[test]
    fn test_expired_session_ignores_input() {
        let mut session = fixed_session();
        session.pick(p(0, 3));
        session.expire();
        assert_eq!(session.first_pick(), None);
        assert_eq!(session.pick(p(0, 3)), PickOutcome::Ignored);
        assert_eq!(session.try_swap(p(0, 3), p(1, 3)), None);
        assert!(session.snapshot().expired);
    }

    #[test]
    fn test_restart_resets_and_bumps_episode() {
        let mut session = fixed_session();
        session.try_swap(p(0, 3), p(1, 3));
        session.resolve().finish();
        assert_eq!(session.score(), 30);
        session.expire();

        session.restart();
        assert_eq!(session.score(), 0);
        assert_eq!(session.ledger().best_chain(), 0);
        assert!(!session.is_expired());
        assert_eq!(session.episode_id(), 1);
        assert_eq!(session.swaps(), 0);
        assert!(session.grid().is_settled());
        assert!(!has_match(session.grid(), 3));
    }

    #[test]
    fn test_snapshot_reflects_session() {
        let mut session = fixed_session();
        session.pick(p(2, 2));
        let snap = session.snapshot();
        assert_eq!(snap.size, 4);
        assert_eq!(snap.first_pick, Some(p(2, 2)));
        assert_eq!(snap.cell(p(0, 0)), Some(Bolt));
        assert_eq!(snap.seed, None);
    }

    #[test]
    fn test_sessions_are_independent() {
        let a0 = Session::new(EngineConfig::default(), 99).unwrap();
        let b0 = Session::new(EngineConfig::default(), 99).unwrap();
        assert_eq!(a0.grid(), b0.grid());

        let mut a = fixed_session();
        let b = fixed_session();
        a.try_swap(p(0, 3), p(1, 3));
        a.resolve().finish();
        assert_eq!(a.score(), 30);
        assert_eq!(b.score(), 0);
        assert_ne!(a.grid(), b.grid());
    }

    #[test]
    fn test_pick_outcome_json() {
        let json = serde_json::to_string(&PickOutcome::Selected { at: p(1, 2) }).unwrap();
        assert_eq!(json, r#"{"pick":"selected","at":{"row":1,"col":2}}"#);

        let swapped = PickOutcome::Swapped {
            from: p(0, 0),
            to: p(0, 1),
            outcome: SwapOutcome::NoMatch,
        };
        let json = serde_json::to_string(&swapped).unwrap();
        assert_eq!(
            json,
            r#"{"pick":"swapped","from":{"row":0,"col":0},"to":{"row":0,"col":1},"outcome":"no_match"}"#
        );
    }
}
