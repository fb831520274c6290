//! Unified error type for the Broadside server.

use broadside_grid::{ConfigError, PlacementError};
use broadside_protocol::{ProtocolError, Response};
use broadside_room::{RoomError, TurnError};
use broadside_session::AuthError;

use crate::TransportError;

/// Top-level error that wraps every crate-specific error.
///
/// `#[from]` on each variant lets `?` convert sub-crate errors.
#[derive(Debug, thiserror::Error)]
pub enum BroadsideError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Placement(#[from] PlacementError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Room(#[from] RoomError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<TurnError> for BroadsideError {
    fn from(e: TurnError) -> Self {
        Self::Room(RoomError::Turn(e))
    }
}

impl BroadsideError {
    /// HTTP-style status code reported to the client.
    ///
    /// | code | meaning |
    /// |------|---------|
    /// | 400  | malformed request, rejected fleet, bad target |
    /// | 401  | unknown session |
    /// | 423  | not your move (or no move left to make) |
    /// | 500  | server-side fault |
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Protocol(_) | Self::Placement(_) => 400,
            Self::Auth(_) => 401,
            Self::Room(RoomError::Turn(turn)) => match turn {
                TurnError::OutOfBounds(_) | TurnError::AlreadyTargeted(_) => 400,
                TurnError::NotYourTurn | TurnError::GameOver | TurnError::AwaitingOpponent => {
                    423
                }
            },
            Self::Room(_) | Self::Transport(_) | Self::Config(_) => 500,
        }
    }

    /// The error as a wire response.
    pub fn to_response(&self) -> Response {
        Response::Error {
            code: self.status_code(),
            message: self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use broadside_grid::Position;
    use broadside_protocol::{RoomId, SessionId};

    use super::*;

    #[test]
    fn test_from_placement_error_maps_to_bad_request() {
        let err: BroadsideError = PlacementError::Overlap.into();
        assert!(matches!(err, BroadsideError::Placement(_)));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_from_auth_error_maps_to_unauthorized() {
        let err: BroadsideError = AuthError::UnknownSession(SessionId::from_bytes([0; 16])).into();
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn test_from_turn_error_maps_to_locked() {
        let err: BroadsideError = TurnError::NotYourTurn.into();
        assert!(matches!(err, BroadsideError::Room(RoomError::Turn(_))));
        assert_eq!(err.status_code(), 423);
    }

    #[test]
    fn test_bad_target_maps_to_bad_request() {
        let err: BroadsideError = TurnError::AlreadyTargeted(Position::new(1, 1)).into();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_room_fault_maps_to_server_error() {
        let err: BroadsideError = RoomError::Unavailable(RoomId(4)).into();
        assert_eq!(err.status_code(), 500);
        assert!(err.to_string().contains("R-4"));
    }

    #[test]
    fn test_to_response_carries_code_and_message() {
        let err: BroadsideError = PlacementError::TooManyShips.into();
        let Response::Error { code, message } = err.to_response() else {
            panic!("expected an error response");
        };
        assert_eq!(code, 400);
        assert_eq!(message, "fleet already has all ships of this length");
    }
}
