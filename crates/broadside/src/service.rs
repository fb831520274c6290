//! The game service: StartGame, Shoot and GetField.
//!
//! Owns the one process-wide [`SessionDirectory`]. Matchmaking happens
//! entirely under its lock; shots and field reads clone the room handle,
//! release the lock, then wait on the room actor.

use broadside_grid::{GameConfig, PlayerField, Position, Rectangle, Ship};
use broadside_protocol::{Envelope, FieldSnapshot, Request, Response, SessionId};
use broadside_room::{FieldAccess, RoomHandle, ShotOutcome, TurnError};
use broadside_session::{DirectoryConfig, Seat, SessionDirectory, reap_finished};
use tokio::sync::Mutex;

use crate::BroadsideError;

/// Transport-agnostic entry point for the three game operations.
pub struct GameService {
    game: GameConfig,
    field_access: FieldAccess,
    directory: Mutex<SessionDirectory>,
}

/// What a lookup under the directory lock resolved to.
enum Lookup {
    /// Answered without touching a room.
    Ready(FieldSnapshot),
    Room(RoomHandle),
}

impl GameService {
    pub fn new(config: DirectoryConfig) -> Self {
        Self {
            game: config.game.clone(),
            field_access: config.room.field_access,
            directory: Mutex::new(SessionDirectory::new(config)),
        }
    }

    /// Validates a fleet, mints a session and queues it for matchmaking.
    ///
    /// Placement errors come from building the field; a fleet that places
    /// cleanly but is not full is turned away by the directory.
    ///
    /// Must run inside a Tokio runtime: pairing spawns the room actor.
    pub async fn start_game(
        &self,
        ships: &[Rectangle],
    ) -> Result<(SessionId, FieldSnapshot), BroadsideError> {
        let field = PlayerField::try_from_ships(&self.game, ships.iter().copied().map(Ship::from))?;
        let snapshot = FieldSnapshot::from(&field);

        let admission = self.directory.lock().await.enqueue(field)?;
        if let Some(room_id) = admission.room_id {
            tracing::debug!(session = %admission.session, %room_id, "seated on arrival");
        }
        Ok((admission.session, snapshot))
    }

    /// Fires `session`'s shot at `target`.
    pub async fn shoot(
        &self,
        session: SessionId,
        target: Position,
    ) -> Result<ShotOutcome, BroadsideError> {
        let handle = {
            let dir = self.directory.lock().await;
            match dir.seat(session)? {
                Seat::Waiting(_) => return Err(TurnError::AwaitingOpponent.into()),
                Seat::Playing(handle) => handle.clone(),
            }
        };
        Ok(handle.shoot(session, target).await?)
    }

    /// Returns `session`'s own field, if the access policy allows it now.
    pub async fn get_field(&self, session: SessionId) -> Result<FieldSnapshot, BroadsideError> {
        let lookup = {
            let dir = self.directory.lock().await;
            match dir.seat(session)? {
                Seat::Waiting(field) => {
                    if !self.field_access.permits(false, false) {
                        return Err(TurnError::AwaitingOpponent.into());
                    }
                    Lookup::Ready(FieldSnapshot::from(field))
                }
                Seat::Playing(handle) => Lookup::Room(handle.clone()),
            }
        };
        match lookup {
            Lookup::Ready(snapshot) => Ok(snapshot),
            Lookup::Room(handle) => Ok(handle.field(session).await?),
        }
    }

    /// Answers one request envelope, echoing its sequence number.
    ///
    /// Every failure becomes a [`Response::Error`]; nothing here ends the
    /// connection.
    pub async fn handle(&self, request: &Envelope<Request>) -> Envelope<Response> {
        let result = match &request.payload {
            Request::StartGame { ships } => self
                .start_game(ships)
                .await
                .map(|(session, field)| Response::GameStarted { session, field }),
            Request::Shoot { session, target } => {
                self.shoot(*session, *target)
                    .await
                    .map(|outcome| Response::ShotResolved {
                        hit: outcome.hit,
                        sunk: outcome.sunk,
                        winner: outcome.winner,
                    })
            }
            Request::GetField { session } => self
                .get_field(*session)
                .await
                .map(|field| Response::Field { field }),
        };

        let response = result.unwrap_or_else(|e| {
            let code = e.status_code();
            if code >= 500 {
                tracing::error!(seq = request.seq, code, error = %e, "request failed");
            } else {
                tracing::debug!(seq = request.seq, code, error = %e, "request refused");
            }
            e.to_response()
        });
        request.reply(response)
    }

    /// Forgets rooms whose grace period has run out. Returns how many.
    pub async fn reap_finished(&self) -> usize {
        reap_finished(&self.directory).await
    }

    /// Number of sessions still waiting for an opponent.
    pub async fn waiting_len(&self) -> usize {
        self.directory.lock().await.waiting_len()
    }

    pub async fn room_count(&self) -> usize {
        self.directory.lock().await.room_count()
    }
}

// =========================================================================
// Tests
// =========================================================================
