//! Wire protocol for Broadside.
//!
//! This crate defines what clients and the server say to each other:
//!
//! - **Identities** ([`SessionId`], [`RoomId`]): opaque handles that
//!   travel in requests and show up in logs.
//! - **Messages** ([`Envelope`], [`Request`], [`Response`],
//!   [`FieldSnapshot`]): the structures that go on the wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how messages become
//!   bytes and back.
//! - **Errors** ([`ProtocolError`]).
//!
//! The protocol layer knows nothing about connections, rooms or turns.
//!
//! ```text
//! Transport (frames) → Protocol (Envelope<Request>) → Service → Envelope<Response>
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{Envelope, FieldSnapshot, Request, Response, RoomId, SessionId};
