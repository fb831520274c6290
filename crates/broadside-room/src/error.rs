//! Error types for the room layer.

use broadside_grid::Position;
use broadside_protocol::{RoomId, SessionId};

/// A request that is well-formed but not allowed right now.
///
/// None of these change any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    /// The requester does not hold the move.
    #[error("wait for the enemy's move")]
    NotYourTurn,

    /// The room already has a winner.
    #[error("the game is over")]
    GameOver,

    /// The target is not on the opponent's board.
    #[error("target {0} is off the board")]
    OutOfBounds(Position),

    /// The target has already been fired upon.
    #[error("target {0} was already fired upon")]
    AlreadyTargeted(Position),

    /// The session is still queued and has no opponent yet.
    #[error("waiting for an opponent")]
    AwaitingOpponent,
}

/// Errors that can occur during room operations.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// A session was routed to a room that does not seat it. This is a
    /// matchmaking bookkeeping fault, not a client mistake.
    #[error("session {session} is not seated in room {room_id}")]
    NoOpponentMapped { session: SessionId, room_id: RoomId },

    /// The room's command channel is closed.
    #[error("room {0} is unavailable")]
    Unavailable(RoomId),

    #[error(transparent)]
    Turn(#[from] TurnError),
}
