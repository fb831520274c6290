//! The turn state machine for one match.

use broadside_grid::{Impact, PlayerField, Position};
use broadside_protocol::{RoomId, SessionId};

use crate::{FieldAccess, RoomError, RoomState, TurnError};

/// What one accepted shot did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotOutcome {
    pub hit: bool,
    /// The shot finished off a ship.
    pub sunk: bool,
    /// Set when the shot ended the game. The shooter is always the winner.
    pub winner: Option<SessionId>,
}

/// One seated player: who they are and the field their opponent fires at.
#[derive(Debug)]
struct Seat {
    session: SessionId,
    field: PlayerField,
}

/// Two seated sessions, their fields, and whose move it is.
///
/// A `Room` is plain synchronous data. Serializing access to it is the
/// job of the actor in [`spawn_room`](crate::spawn_room).
#[derive(Debug)]
pub struct Room {
    id: RoomId,
    seats: [Seat; 2],
    state: RoomState,
    field_access: FieldAccess,
}

impl Room {
    /// Seats two players. `first` holds the opening move.
    pub fn new(
        id: RoomId,
        first: (SessionId, PlayerField),
        second: (SessionId, PlayerField),
        field_access: FieldAccess,
    ) -> Self {
        Self {
            id,
            seats: [
                Seat {
                    session: first.0,
                    field: first.1,
                },
                Seat {
                    session: second.0,
                    field: second.1,
                },
            ],
            state: RoomState::AwaitingFirstMove,
            field_access,
        }
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn state(&self) -> RoomState {
        self.state
    }

    /// Both sessions, first mover first.
    pub fn players(&self) -> [SessionId; 2] {
        [self.seats[0].session, self.seats[1].session]
    }

    /// The session holding the move, or `None` once the game is over.
    pub fn mover(&self) -> Option<SessionId> {
        match self.state {
            RoomState::AwaitingFirstMove => Some(self.seats[0].session),
            RoomState::AwaitingShot(mover) => Some(mover),
            RoomState::Finished { .. } => None,
        }
    }

    pub fn is_my_move(&self, session: SessionId) -> bool {
        self.mover() == Some(session)
    }

    /// The other seated session, or `None` if `session` is not seated here.
    pub fn my_enemy(&self, session: SessionId) -> Option<SessionId> {
        self.seat_of(session)
            .map(|index| self.seats[1 - index].session)
    }

    /// Fires `shooter`'s shot at `target` on the opponent's board.
    ///
    /// Refusals, first match wins: not seated here, game over, not the
    /// shooter's move, target off the board, target already fired upon.
    /// A refused shot changes nothing.
    pub fn shoot(
        &mut self,
        shooter: SessionId,
        target: Position,
    ) -> Result<ShotOutcome, RoomError> {
        let enemy_index = self.enemy_seat(shooter)?;
        if self.state.is_finished() {
            return Err(TurnError::GameOver.into());
        }
        if !self.is_my_move(shooter) {
            return Err(TurnError::NotYourTurn.into());
        }

        let enemy = &mut self.seats[enemy_index];
        if !enemy.field.board().contains(target) {
            return Err(TurnError::OutOfBounds(target).into());
        }
        if enemy.field.was_targeted(target) {
            return Err(TurnError::AlreadyTargeted(target).into());
        }

        let impact = enemy
            .field
            .receive_shot(target)
            .ok_or(TurnError::OutOfBounds(target))?;
        let defeated = enemy.field.is_defeated();
        let enemy_session = enemy.session;

        self.state = if defeated {
            RoomState::Finished { winner: shooter }
        } else {
            // A hit earns another shot.
            RoomState::AwaitingShot(if impact.is_hit() { shooter } else { enemy_session })
        };

        Ok(ShotOutcome {
            hit: impact.is_hit(),
            sunk: impact == Impact::Sunk,
            winner: self.state.winner(),
        })
    }

    /// The requester's own field, if the access policy allows it now.
    pub fn field(&self, requester: SessionId) -> Result<&PlayerField, RoomError> {
        let index = self.seat_of(requester).ok_or(RoomError::NoOpponentMapped {
            session: requester,
            room_id: self.id,
        })?;
        let permitted = self
            .field_access
            .permits(self.is_my_move(requester), self.state.is_finished());
        if !permitted {
            return Err(TurnError::NotYourTurn.into());
        }
        Ok(&self.seats[index].field)
    }

    fn seat_of(&self, session: SessionId) -> Option<usize> {
        self.seats.iter().position(|seat| seat.session == session)
    }

    fn enemy_seat(&self, session: SessionId) -> Result<usize, RoomError> {
        self.seat_of(session)
            .map(|index| 1 - index)
            .ok_or(RoomError::NoOpponentMapped {
                session,
                room_id: self.id,
            })
    }
}
