//! Session identities and matchmaking for Broadside.
//!
//! 1. **Admission**: a ready fleet gets a fresh random [`SessionId`](broadside_protocol::SessionId)
//!    and joins the queue.
//! 2. **Pairing**: the two oldest queued sessions are seated in a new
//!    room, oldest first.
//! 3. **Lookup**: later requests name their session; an unknown one is
//!    an [`AuthError`].
//! 4. **Reaping**: finished rooms are forgotten after a grace period.
//!
//! ```text
//! Service (above)  ← resolves sessions to seats
//!     ↕
//! Session Layer (this crate)  ← queue, room index, token minting
//!     ↕
//! Room Layer (below)  ← one actor per match
//! ```

mod config;
mod directory;
mod error;

pub use config::DirectoryConfig;
pub use directory::{Admission, Seat, SessionDirectory, reap_finished};
pub use error::AuthError;
