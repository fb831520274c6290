//! Error types for the grid layer.

use serde::{Deserialize, Serialize};

/// Why a ship (or a whole fleet) was refused.
///
/// Placement is validated in full before anything is mutated, so
/// receiving one of these means the field is exactly as it was before
/// the attempt.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error,
)]
pub enum PlacementError {
    /// The ship is not a straight line, or its length is not one the
    /// ruleset asks for.
    #[error("ship length is not allowed by the ruleset")]
    WrongLength,

    /// Part of the ship lies outside the board.
    #[error("ship does not fit on the board")]
    OutOfBounds,

    /// The ship overlaps another ship or touches one, diagonally included.
    #[error("ship overlaps or touches another ship")]
    Overlap,

    /// The fleet already holds every ship of this length.
    #[error("fleet already has all ships of this length")]
    TooManyShips,

    /// Every ship was valid but the fleet is still missing some.
    #[error("fleet is incomplete")]
    IncompleteFleet,
}

/// Errors from building a [`GameConfig`](crate::GameConfig) or
/// [`Ruleset`](crate::Ruleset).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// One of the board dimensions is zero.
    #[error("board must have at least one row and one column, got {rows}x{cols}")]
    ZeroDimension { rows: u8, cols: u8 },

    /// The ruleset does not require a single ship.
    #[error("ruleset requires no ships")]
    EmptyRuleset,

    /// The ruleset requires a ship that cannot fit on the board.
    #[error("ships of length {length} do not fit on a {rows}x{cols} board")]
    ShipTooLong { length: usize, rows: u8, cols: u8 },
}
