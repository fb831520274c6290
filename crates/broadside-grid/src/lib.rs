//! Grid geometry, boards and ship placement for Broadside.
//!
//! Everything here is plain synchronous data. The crate has no idea who
//! the players are or whose turn it is; it only answers "does this ship
//! fit" and "what did this shot hit".
//!
//! - [`geometry`]: positions, offsets and rectangles
//! - [`board`]: the ship and shot bit layers
//! - [`fleet`]: ships, rulesets and quotas
//! - [`field`]: a board and fleet kept consistent by the placement rules

pub mod board;
pub mod config;
pub mod error;
pub mod field;
pub mod fleet;
pub mod geometry;

pub use board::{BitLayer, Board};
pub use config::GameConfig;
pub use error::{ConfigError, PlacementError};
pub use field::{Impact, PlayerField};
pub use fleet::{Fleet, Ruleset, Ship};
pub use geometry::{Cells, Offset, Position, Rectangle};
