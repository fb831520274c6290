//! Error types for the session layer.

use broadside_protocol::SessionId;

/// A request named a session the server does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Never issued, already reaped, or issued by a previous process.
    #[error("unknown session {0}")]
    UnknownSession(SessionId),
}
