//! Room actor: an isolated Tokio task that owns one [`Room`].
//!
//! The actor is the only thing that ever touches the room and the two
//! fields inside it. Everyone else talks to it through a [`RoomHandle`],
//! which sends a command and waits for the reply on a oneshot channel.

use std::time::Instant;

use broadside_grid::{PlayerField, Position};
use broadside_protocol::{FieldSnapshot, RoomId, SessionId};
use tokio::sync::{mpsc, oneshot};

use crate::{Room, RoomConfig, RoomError, RoomState, ShotOutcome};

/// Commands sent to a room actor through its channel.
enum RoomCommand {
    Shoot {
        session: SessionId,
        target: Position,
        reply: oneshot::Sender<Result<ShotOutcome, RoomError>>,
    },

    Field {
        session: SessionId,
        reply: oneshot::Sender<Result<FieldSnapshot, RoomError>>,
    },

    Info {
        reply: oneshot::Sender<RoomInfo>,
    },

    Shutdown,
}

/// A snapshot of room metadata (not the fields).
#[derive(Debug, Clone)]
pub struct RoomInfo {
    pub room_id: RoomId,
    pub state: RoomState,
    /// First mover first.
    pub players: [SessionId; 2],
    /// When the winning shot landed.
    pub finished_at: Option<Instant>,
}

/// Handle to a running room actor.
///
/// Cheap to clone. The session directory keeps one per seated session.
#[derive(Debug, Clone)]
pub struct RoomHandle {
    room_id: RoomId,
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    /// Fires a shot on behalf of `session`.
    pub async fn shoot(
        &self,
        session: SessionId,
        target: Position,
    ) -> Result<ShotOutcome, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(RoomCommand::Shoot {
            session,
            target,
            reply: reply_tx,
        })
        .await?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?
    }

    /// Fetches `session`'s own field, subject to the room's access policy.
    pub async fn field(&self, session: SessionId) -> Result<FieldSnapshot, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(RoomCommand::Field {
            session,
            reply: reply_tx,
        })
        .await?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?
    }

    pub async fn info(&self) -> Result<RoomInfo, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(RoomCommand::Info { reply: reply_tx }).await?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))
    }

    /// Tells the room to stop. Commands already queued are still handled.
    pub async fn shutdown(&self) -> Result<(), RoomError> {
        self.send(RoomCommand::Shutdown).await
    }

    async fn send(&self, cmd: RoomCommand) -> Result<(), RoomError> {
        self.sender
            .send(cmd)
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))
    }
}

/// The internal actor state. Runs inside a Tokio task.
struct RoomActor {
    room: Room,
    finished_at: Option<Instant>,
    receiver: mpsc::Receiver<RoomCommand>,
}

impl RoomActor {
    async fn run(mut self) {
        let room_id = self.room.id();
        tracing::info!(%room_id, "room actor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                RoomCommand::Shoot {
                    session,
                    target,
                    reply,
                } => {
                    let result = self.handle_shoot(session, target);
                    let _ = reply.send(result);
                }
                RoomCommand::Field { session, reply } => {
                    let result = self.room.field(session).map(FieldSnapshot::from);
                    let _ = reply.send(result);
                }
                RoomCommand::Info { reply } => {
                    let _ = reply.send(self.info());
                }
                RoomCommand::Shutdown => {
                    tracing::info!(%room_id, "room shutting down");
                    break;
                }
            }
        }

        tracing::info!(%room_id, "room actor stopped");
    }

    fn handle_shoot(
        &mut self,
        session: SessionId,
        target: Position,
    ) -> Result<ShotOutcome, RoomError> {
        let room_id = self.room.id();
        let outcome = match self.room.shoot(session, target) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::debug!(%room_id, %session, %target, error = %e, "shot refused");
                return Err(e);
            }
        };

        tracing::info!(
            %room_id,
            %session,
            %target,
            hit = outcome.hit,
            sunk = outcome.sunk,
            "shot resolved"
        );
        if let Some(winner) = outcome.winner {
            self.finished_at = Some(Instant::now());
            tracing::info!(%room_id, %winner, "game finished");
        }
        Ok(outcome)
    }

    fn info(&self) -> RoomInfo {
        RoomInfo {
            room_id: self.room.id(),
            state: self.room.state(),
            players: self.room.players(),
            finished_at: self.finished_at,
        }
    }
}

/// Seats two players in a new room actor and returns a handle to it.
///
/// `first` holds the opening move. Must be called from inside a Tokio
/// runtime.
pub fn spawn_room(
    room_id: RoomId,
    first: (SessionId, PlayerField),
    second: (SessionId, PlayerField),
    config: &RoomConfig,
) -> RoomHandle {
    let (tx, rx) = mpsc::channel(config.channel_size.max(1));

    let actor = RoomActor {
        room: Room::new(room_id, first, second, config.field_access),
        finished_at: None,
        receiver: rx,
    };

    tokio::spawn(actor.run());

    RoomHandle {
        room_id,
        sender: tx,
    }
}
