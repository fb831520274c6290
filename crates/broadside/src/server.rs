//! `BroadsideServer` builder and server loop.
//!
//! Ties the layers together: transport → protocol → service → session
//! directory → room actors.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use broadside_grid::GameConfig;
use broadside_protocol::JsonCodec;
use broadside_room::FieldAccess;
use broadside_session::DirectoryConfig;

use crate::handler::handle_connection;
use crate::transport::WebSocketListener;
use crate::{BroadsideError, Connection, GameService, WebSocketConnection};

/// Shared server state passed to each connection handler task.
pub(crate) struct ServerState {
    pub(crate) service: GameService,
    pub(crate) codec: JsonCodec,
    pub(crate) idle_timeout: Duration,
}

/// Everything a server needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,

    /// Game rules, room policy and the finished-room grace period.
    pub directory: DirectoryConfig,

    /// A connection with no request for this long is closed.
    pub idle_timeout: Duration,

    /// How often finished rooms are checked for reaping.
    pub sweep_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            directory: DirectoryConfig::default(),
            idle_timeout: Duration::from_secs(30),
            sweep_interval: Duration::from_secs(10),
        }
    }
}

/// Builder for configuring and starting a Broadside server.
///
/// ```rust,ignore
/// let server = BroadsideServer::builder()
///     .bind("0.0.0.0:8080")
///     .field_access(FieldAccess::Always)
///     .build()
///     .await?;
/// server.run().await
/// ```
#[derive(Debug, Default)]
pub struct BroadsideServerBuilder {
    config: ServerConfig,
}

impl BroadsideServerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(mut self, addr: &str) -> Self {
        self.config.bind_addr = addr.to_string();
        self
    }

    /// Board size and ruleset.
    pub fn game_config(mut self, game: GameConfig) -> Self {
        self.config.directory.game = game;
        self
    }

    pub fn field_access(mut self, access: FieldAccess) -> Self {
        self.config.directory.room.field_access = access;
        self
    }

    pub fn finished_room_grace_secs(mut self, secs: u64) -> Self {
        self.config.directory.finished_room_grace_secs = secs;
        self
    }

    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.idle_timeout = timeout;
        self
    }

    pub fn sweep_interval(mut self, interval: Duration) -> Self {
        self.config.sweep_interval = interval;
        self
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Binds the listener. Nothing is accepted until [`BroadsideServer::run`].
    pub async fn build(self) -> Result<BroadsideServer, BroadsideError> {
        let listener = WebSocketListener::bind(&self.config.bind_addr).await?;

        let state = Arc::new(ServerState {
            service: GameService::new(self.config.directory),
            codec: JsonCodec,
            idle_timeout: self.config.idle_timeout,
        });

        Ok(BroadsideServer {
            listener,
            state,
            sweep_interval: self.config.sweep_interval,
        })
    }
}

/// A bound Broadside server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct BroadsideServer {
    listener: WebSocketListener,
    state: Arc<ServerState>,
    sweep_interval: Duration,
}

impl BroadsideServer {
    pub fn builder() -> BroadsideServerBuilder {
        BroadsideServerBuilder::new()
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs the accept loop and the finished-room sweep until the process
    /// is terminated.
    pub async fn run(self) -> Result<(), BroadsideError> {
        tracing::info!("Broadside server running");

        let sweeper = Arc::clone(&self.state);
        let every = self.sweep_interval.max(Duration::from_millis(1));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            // The first tick fires immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let reaped = sweeper.service.reap_finished().await;
                if reaped > 0 {
                    tracing::info!(reaped, "finished rooms reaped");
                }
            }
        });

        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        let conn = match WebSocketConnection::upgrade(stream).await {
                            Ok(conn) => conn,
                            Err(e) => {
                                tracing::debug!(%addr, error = %e, "WebSocket upgrade failed");
                                return;
                            }
                        };
                        tracing::debug!(conn_id = %conn.id(), %addr, "accepted WebSocket connection");
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(error = %e, "connection ended with error");
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
