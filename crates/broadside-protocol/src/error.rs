//! Error types for the protocol layer.

/// Errors that can occur while encoding, decoding or parsing wire values.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// The bytes were not a well-formed message: bad JSON, a missing
    /// field, an unknown `"type"` tag.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// A session id that is not exactly 32 hex digits.
    #[error("invalid session id: {0:?}")]
    InvalidSessionId(String),
}
