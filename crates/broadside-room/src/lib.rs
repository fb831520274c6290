//! Rooms for Broadside.
//!
//! A room seats exactly two sessions, decides whose move it is and
//! resolves shots against the opponent's field. Each running room is an
//! isolated Tokio task (actor) reached through a [`RoomHandle`], so all
//! mutations to one room happen one at a time.
//!
//! # Key types
//!
//! - [`Room`]: the synchronous turn state machine
//! - [`RoomHandle`]: send commands to a running room actor
//! - [`RoomState`]: whose move it is, or who won
//! - [`RoomConfig`], [`FieldAccess`]: room settings

mod actor;
mod config;
mod error;
mod room;

pub use actor::{RoomHandle, RoomInfo, spawn_room};
pub use config::{FieldAccess, RoomConfig, RoomState};
pub use error::{RoomError, TurnError};
pub use room::{Room, ShotOutcome};
