//! Engine error types.
//!
//! Gameplay never fails: rejected swaps and missing hints are reported as
//! outcomes. The only fallible surface is building a session from a
//! configuration that cannot produce a playable board.

/// Errors raised when validating an [`EngineConfig`](crate::EngineConfig),
/// or the starting grid handed to
/// [`Session::from_grid`](crate::Session::from_grid) against it
/// (`GridMismatch`, `UnsettledGrid`).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("grid size {size} is outside {min}..={max}")]
    GridSize { size: u8, min: u8, max: u8 },

    #[error("tile alphabet of {kinds} kinds is outside {min}..={max}")]
    TileKinds { kinds: u8, min: u8, max: u8 },

    #[error("minimum run {min_run} must be within {min}..={grid_size}")]
    MinRun { min_run: u8, min: u8, grid_size: u8 },

    /// Starting grid has the wrong edge length.
    #[error("grid is {actual}x{actual} but the configuration expects {expected}x{expected}")]
    GridMismatch { expected: u8, actual: u8 },

    /// Starting grid has empty cells.
    #[error("grid still holds empty cells")]
    UnsettledGrid,
}
