//! # Broadside
//!
//! A two-player naval combat game server. Players submit a fleet, get
//! paired first-come-first-served, and take turns firing at each other's
//! board over a WebSocket until one fleet is sunk.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use broadside::prelude::*;
//!
//! # async fn start() -> Result<(), BroadsideError> {
//! let server = BroadsideServer::builder()
//!     .bind("0.0.0.0:8080")
//!     .game_config(GameConfig::default())
//!     .field_access(FieldAccess::OnTurn)
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod error;
mod handler;
pub mod logging;
mod server;
mod service;
mod transport;

pub use error::BroadsideError;
pub use server::{BroadsideServer, BroadsideServerBuilder, ServerConfig};
pub use service::GameService;
pub use transport::{Connection, ConnectionId, TransportError, WebSocketConnection};

/// Everything needed to configure and run a server.
pub mod prelude {
    pub use broadside_grid::{GameConfig, PlacementError, Position, Rectangle, Ruleset};
    pub use broadside_protocol::{Envelope, FieldSnapshot, Request, Response, SessionId};
    pub use broadside_room::{FieldAccess, TurnError};
    pub use broadside_session::AuthError;

    pub use crate::{BroadsideError, BroadsideServer, BroadsideServerBuilder, ServerConfig};
}
