//! Message and identity types for Broadside's wire format.

use std::fmt;
use std::str::FromStr;

use broadside_grid::{BitLayer, PlayerField, Position, Rectangle};
use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// An opaque 128-bit token identifying one player's game.
///
/// Minted when a fleet is accepted and carried by the client in every
/// later request. On the wire and in logs it is 32 lowercase hex digits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId([u8; 16]);

impl SessionId {
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Debug prints the same hex string, so `?session` in a log line reads
/// the way the client sees it.
impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({self})")
    }
}

impl FromStr for SessionId {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ProtocolError::InvalidSessionId(s.to_owned());
        if s.len() != 32 || !s.is_ascii() {
            return Err(invalid());
        }
        let mut bytes = [0u8; 16];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[2 * i..2 * i + 2], 16).map_err(|_| invalid())?;
        }
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for SessionId {
    type Error = ProtocolError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.to_string()
    }
}

/// A unique identifier for a room (one match between two sessions).
///
/// Rooms never appear in requests; the id exists for logs and for the
/// server's own bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub u64);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// FieldSnapshot
// ---------------------------------------------------------------------------

/// A player's own field as sent to that player.
///
/// ```json
/// {
///   "rows": 10, "cols": 10,
///   "ships": "1111000000...",
///   "shots": "0100000000...",
///   "fleet": [ { "first": {"row":0,"col":0}, "last": {"row":0,"col":3} } ]
/// }
/// ```
///
/// `ships` and `shots` hold one character per cell in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSnapshot {
    pub rows: u8,
    pub cols: u8,
    pub ships: BitLayer,
    pub shots: BitLayer,
    /// Ship footprints in placement order.
    pub fleet: Vec<Rectangle>,
}

impl From<&PlayerField> for FieldSnapshot {
    fn from(field: &PlayerField) -> Self {
        let board = field.board();
        Self {
            rows: board.rows(),
            cols: board.cols(),
            ships: board.ship_layer().clone(),
            shots: board.shot_layer().clone(),
            fleet: field.fleet().ships().iter().map(|ship| ship.zone()).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Request / Response
// ---------------------------------------------------------------------------

/// Client → server.
///
/// Internally tagged, so a shot looks like:
/// `{ "type": "Shoot", "session": "9f…", "target": { "row": 3, "col": 4 } }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Submit a complete fleet and join the matchmaking queue.
    StartGame { ships: Vec<Rectangle> },

    /// Fire at `target` on the opponent's board.
    Shoot { session: SessionId, target: Position },

    /// Fetch the caller's own field.
    GetField { session: SessionId },
}

/// Server → client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    /// The fleet was accepted. Keep `session` for every later request.
    GameStarted {
        session: SessionId,
        field: FieldSnapshot,
    },

    /// Outcome of a shot. `winner` is set only by the shot that ended
    /// the game.
    ShotResolved {
        hit: bool,
        sunk: bool,
        winner: Option<SessionId>,
    },

    Field { field: FieldSnapshot },

    /// The request was refused. `code` follows HTTP conventions
    /// (400 bad request, 401 unknown session, 423 not your move,
    /// 500 server fault).
    Error { code: u16, message: String },
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Wraps every message on the wire.
///
/// The server copies `seq` from a request into its response so a client
/// can match them up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub seq: u64,
    pub payload: T,
}

impl<T> Envelope<T> {
    /// Builds the reply to this envelope, keeping its sequence number.
    pub fn reply<U>(&self, payload: U) -> Envelope<U> {
        Envelope {
            seq: self.seq,
            payload,
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
