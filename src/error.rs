use thiserror::Error;

use crate::coords::Coords;

/// Contract violations raised by the core.
///
/// Recoverable outcomes (a rejected step, a missing path) are ordinary return
/// values and never show up here.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("coordinate {coords} is outside the {height}x{width} board")]
    OutOfBounds {
        coords: Coords,
        height: usize,
        width: usize,
    },

    #[error("no empty cell left to place food (score {score})\n{board}")]
    BoardFull { score: u32, board: String },

    #[error("board invariant violated: {reason}\n{board}")]
    InvariantViolation { reason: String, board: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Rejected game setups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board must be at least 3 cells, got {height}x{width}")]
    BoardTooSmall { height: usize, width: usize },

    #[error("{what} position {coords} is outside the {height}x{width} board")]
    OutOfBounds {
        what: &'static str,
        coords: Coords,
        height: usize,
        width: usize,
    },

    #[error("head and food cannot share cell {0}")]
    Overlap(Coords),

    #[error("tick interval must be positive")]
    ZeroTick,
}
