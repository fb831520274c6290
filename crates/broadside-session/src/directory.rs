//! The session directory: token minting, FIFO matchmaking and the
//! session → room index.
//!
//! # Concurrency note
//!
//! `SessionDirectory` is plain data with no locking of its own. The
//! server keeps exactly one behind a `tokio::sync::Mutex`, which makes
//! enqueue-and-pair atomic. Nothing in here awaits a room actor; callers
//! clone the [`RoomHandle`] they need and drop the lock first.

use std::collections::{HashMap, VecDeque};

use broadside_grid::{PlacementError, PlayerField};
use broadside_protocol::{RoomId, SessionId};
use broadside_room::{RoomHandle, spawn_room};
use rand::Rng;
use tokio::sync::Mutex;

use crate::{AuthError, DirectoryConfig};

/// Result of admitting a fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admission {
    pub session: SessionId,
    /// The room the session was seated in right away, if an opponent was
    /// already waiting.
    pub room_id: Option<RoomId>,
}

/// Where a session currently is.
#[derive(Debug)]
pub enum Seat<'a> {
    /// Queued, no opponent yet. The field is still held here.
    Waiting(&'a PlayerField),

    /// Seated in a running (or finished, not yet reaped) room.
    Playing(&'a RoomHandle),
}

/// A running room and the two sessions in it.
#[derive(Debug)]
struct RoomEntry {
    handle: RoomHandle,
    players: [SessionId; 2],
}

/// Every live session, the matchmaking queue and the rooms formed from it.
///
/// ```text
/// enqueue() ──→ [Waiting] ──(second player)──→ [Playing] ──(finished + grace)──→ forgotten
/// ```
pub struct SessionDirectory {
    config: DirectoryConfig,

    /// Sessions waiting for an opponent, oldest first, each with its field.
    queue: VecDeque<(SessionId, PlayerField)>,

    /// Seated sessions. Two entries per room, sharing one handle.
    seats: HashMap<SessionId, RoomHandle>,

    rooms: HashMap<RoomId, RoomEntry>,

    next_room_id: u64,
}

impl SessionDirectory {
    pub fn new(config: DirectoryConfig) -> Self {
        Self {
            config,
            queue: VecDeque::new(),
            seats: HashMap::new(),
            rooms: HashMap::new(),
            next_room_id: 1,
        }
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Admits a ready field: mints a session id, queues it, and pairs the
    /// two oldest queued sessions if there are two.
    ///
    /// Spawns the room actor, so this must run inside a Tokio runtime.
    ///
    /// # Errors
    /// [`PlacementError::IncompleteFleet`] if the field's fleet is not full.
    pub fn enqueue(&mut self, field: PlayerField) -> Result<Admission, PlacementError> {
        if !field.is_ready() {
            return Err(PlacementError::IncompleteFleet);
        }

        let session = self.mint();
        self.queue.push_back((session, field));
        tracing::info!(%session, waiting = self.queue.len(), "session created");

        let room_id = self.pair_oldest();
        Ok(Admission { session, room_id })
    }

    /// Looks a session up.
    ///
    /// # Errors
    /// [`AuthError::UnknownSession`] if the session is neither queued nor
    /// seated.
    pub fn seat(&self, session: SessionId) -> Result<Seat<'_>, AuthError> {
        if let Some(handle) = self.seats.get(&session) {
            return Ok(Seat::Playing(handle));
        }
        self.queue
            .iter()
            .find(|(id, _)| *id == session)
            .map(|(_, field)| Seat::Waiting(field))
            .ok_or(AuthError::UnknownSession(session))
    }

    /// Cloned handles to every room, for async work without the lock.
    pub fn room_handles(&self) -> Vec<RoomHandle> {
        self.rooms.values().map(|entry| entry.handle.clone()).collect()
    }

    /// Forgets a room and both of its sessions.
    ///
    /// Returns the handle so the caller can shut the actor down after
    /// releasing the lock.
    pub fn remove_room(&mut self, room_id: RoomId) -> Option<RoomHandle> {
        let entry = self.rooms.remove(&room_id)?;
        for session in entry.players {
            self.seats.remove(&session);
        }
        tracing::info!(%room_id, "room destroyed");
        Some(entry.handle)
    }

    /// Number of sessions waiting for an opponent.
    pub fn waiting_len(&self) -> usize {
        self.queue.len()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Number of known sessions, queued or seated.
    pub fn session_count(&self) -> usize {
        self.queue.len() + self.seats.len()
    }

    fn pair_oldest(&mut self) -> Option<RoomId> {
        if self.queue.len() < 2 {
            return None;
        }
        let first = self.queue.pop_front()?;
        let second = self.queue.pop_front()?;
        let players = [first.0, second.0];

        let room_id = RoomId(self.next_room_id);
        self.next_room_id += 1;

        let handle = spawn_room(room_id, first, second, &self.config.room);
        for session in players {
            self.seats.insert(session, handle.clone());
        }
        self.rooms.insert(room_id, RoomEntry { handle, players });

        tracing::info!(
            %room_id,
            first = %players[0],
            second = %players[1],
            "room created"
        );
        Some(room_id)
    }

    /// Generates a fresh 128-bit session id, unique among live sessions.
    fn mint(&self) -> SessionId {
        let mut rng = rand::rng();
        loop {
            let id = SessionId::from_bytes(rng.random());
            if self.seat(id).is_err() {
                return id;
            }
        }
    }
}

/// Removes rooms that finished more than the grace period ago, plus any
/// whose actor has stopped answering, and shuts their actors down.
///
/// The directory lock is held only while collecting handles and while
/// removing entries, never while waiting on a room. Returns how many
/// rooms were removed.
///
/// Abandoned games are not collected. A room still in play keeps its actor
/// and both fields, and a queued session keeps its place, until the game
/// ends or the process exits. Sessions are not tied to connections, so
/// the directory cannot tell a departed player from a slow one.
pub async fn reap_finished(directory: &Mutex<SessionDirectory>) -> usize {
    let (handles, grace) = {
        let dir = directory.lock().await;
        (dir.room_handles(), dir.config().finished_room_grace())
    };

    let mut expired = Vec::new();
    for handle in handles {
        match handle.info().await {
            Ok(info) => {
                if info.finished_at.is_some_and(|at| at.elapsed() >= grace) {
                    expired.push(info.room_id);
                }
            }
            Err(e) => {
                tracing::warn!(room_id = %handle.room_id(), error = %e, "room unresponsive, reaping");
                expired.push(handle.room_id());
            }
        }
    }

    let removed: Vec<RoomHandle> = {
        let mut dir = directory.lock().await;
        expired
            .into_iter()
            .filter_map(|room_id| dir.remove_room(room_id))
            .collect()
    };
    for handle in &removed {
        let _ = handle.shutdown().await;
    }
    removed.len()
}

// =========================================================================
// Tests
// =========================================================================
