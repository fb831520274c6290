//! Room configuration and state machine.

use std::fmt;

use broadside_protocol::SessionId;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// FieldAccess
// ---------------------------------------------------------------------------

/// Who may look at their own field, and when.
///
/// Once a room is finished both players may always view their field,
/// whatever the policy says.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldAccess {
    /// Only the player holding the move may fetch their field. Clients
    /// poll the field to learn that it is their turn.
    #[default]
    OnTurn,

    /// A player may fetch their own field at any time, including while
    /// still waiting for an opponent.
    Always,
}

impl FieldAccess {
    /// Decides a field request. `my_move` is whether the requester holds
    /// the move; `finished` is whether the room has a winner.
    pub fn permits(self, my_move: bool, finished: bool) -> bool {
        match self {
            Self::Always => true,
            Self::OnTurn => my_move || finished,
        }
    }
}

// ---------------------------------------------------------------------------
// RoomConfig
// ---------------------------------------------------------------------------

/// Configuration shared by every room the server creates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomConfig {
    pub field_access: FieldAccess,

    /// Capacity of each room actor's command channel.
    pub channel_size: usize,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            field_access: FieldAccess::OnTurn,
            channel_size: 64,
        }
    }
}

// ---------------------------------------------------------------------------
// RoomState
// ---------------------------------------------------------------------------

/// Whose move it is.
///
/// ```text
/// AwaitingFirstMove ──shot──→ AwaitingShot(mover) ──shot──→ AwaitingShot(mover')
///         │                           │
///         └──────── winning shot ─────┴──→ Finished { winner }
/// ```
///
/// - **AwaitingFirstMove**: nobody has fired yet; the first-seated
///   player holds the move.
/// - **AwaitingShot**: the named session holds the move. A hit keeps
///   it, a miss hands it to the opponent.
/// - **Finished**: terminal. No more shots are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomState {
    AwaitingFirstMove,
    AwaitingShot(SessionId),
    Finished { winner: SessionId },
}

impl RoomState {
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished { .. })
    }

    pub fn winner(&self) -> Option<SessionId> {
        match self {
            Self::Finished { winner } => Some(*winner),
            _ => None,
        }
    }
}

impl fmt::Display for RoomState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AwaitingFirstMove => write!(f, "AwaitingFirstMove"),
            Self::AwaitingShot(mover) => write!(f, "AwaitingShot({mover})"),
            Self::Finished { winner } => write!(f, "Finished({winner})"),
        }
    }
}
