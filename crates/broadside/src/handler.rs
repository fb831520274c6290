//! Per-connection handler: decode a request, answer it, repeat.
//!
//! Each accepted connection gets its own Tokio task running this loop.
//! A connection carries no identity of its own; every request names its
//! session, so a client may reconnect and carry on.

use std::sync::Arc;

use broadside_protocol::{Codec, Envelope, Request};

use crate::server::ServerState;
use crate::{BroadsideError, Connection};

/// Serves one connection until the peer closes it, goes quiet for
/// longer than the idle timeout, or the transport fails.
pub(crate) async fn handle_connection<T: Connection>(
    conn: T,
    state: Arc<ServerState>,
) -> Result<(), BroadsideError> {
    let conn_id = conn.id();
    tracing::debug!(%conn_id, "handling new connection");

    loop {
        let data = match tokio::time::timeout(state.idle_timeout, conn.recv()).await {
            Ok(Ok(Some(data))) => data,
            Ok(Ok(None)) => {
                tracing::debug!(%conn_id, "connection closed cleanly");
                break;
            }
            Ok(Err(e)) => {
                tracing::debug!(%conn_id, error = %e, "recv error");
                break;
            }
            Err(_) => {
                tracing::info!(%conn_id, "connection timed out");
                let _ = conn.close().await;
                break;
            }
        };

        let reply = match state.codec.decode::<Envelope<Request>>(&data) {
            Ok(request) => state.service.handle(&request).await,
            Err(e) => {
                // Without a parsed envelope there is no seq to echo.
                tracing::debug!(%conn_id, error = %e, "failed to decode envelope");
                Envelope {
                    seq: 0,
                    payload: BroadsideError::from(e).to_response(),
                }
            }
        };

        let bytes = state.codec.encode(&reply)?;
        conn.send(&bytes).await?;
    }

    Ok(())
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Drives the handler over an in-memory connection, no sockets.

    use std::time::Duration;

    use broadside_grid::{GameConfig, Position, Rectangle, Ruleset};
    use broadside_protocol::{JsonCodec, Response};
    use broadside_session::DirectoryConfig;
    use tokio::sync::{Mutex, mpsc};

    use super::*;
    use crate::{ConnectionId, GameService, TransportError};

    struct MemoryConnection {
        inbound: Mutex<mpsc::UnboundedReceiver<Vec<u8>>>,
        outbound: mpsc::UnboundedSender<Vec<u8>>,
    }

    impl Connection for MemoryConnection {
        async fn send(&self, data: &[u8]) -> Result<(), TransportError> {
            let _ = self.outbound.send(data.to_vec());
            Ok(())
        }

        async fn recv(&self) -> Result<Option<Vec<u8>>, TransportError> {
            Ok(self.inbound.lock().await.recv().await)
        }

        async fn close(&self) -> Result<(), TransportError> {
            Ok(())
        }

        fn id(&self) -> ConnectionId {
            ConnectionId::new(0)
        }
    }

    struct Client {
        to_server: mpsc::UnboundedSender<Vec<u8>>,
        from_server: mpsc::UnboundedReceiver<Vec<u8>>,
    }

    impl Client {
        async fn request(&mut self, envelope: &Envelope<Request>) -> Envelope<Response> {
            self.send_raw(serde_json::to_vec(envelope).unwrap()).await
        }

        async fn send_raw(&mut self, bytes: Vec<u8>) -> Envelope<Response> {
            self.to_server.send(bytes).unwrap();
            let reply = self.from_server.recv().await.unwrap();
            serde_json::from_slice(&reply).unwrap()
        }
    }

    fn state(idle_timeout: Duration) -> Arc<ServerState> {
        Arc::new(ServerState {
            service: GameService::new(DirectoryConfig {
                game: GameConfig::new(3, 3, Ruleset::new([1]).unwrap()).unwrap(),
                ..DirectoryConfig::default()
            }),
            codec: JsonCodec,
            idle_timeout,
        })
    }

    fn connect(state: Arc<ServerState>) -> (Client, tokio::task::JoinHandle<Result<(), BroadsideError>>) {
        let (to_server, inbound) = mpsc::unbounded_channel();
        let (outbound, from_server) = mpsc::unbounded_channel();
        let conn = MemoryConnection {
            inbound: Mutex::new(inbound),
            outbound,
        };
        let task = tokio::spawn(handle_connection(conn, state));
        (Client { to_server, from_server }, task)
    }

    #[tokio::test]
    async fn test_handle_connection_answers_start_game_with_same_seq() {
        let (mut client, _task) = connect(state(Duration::from_secs(5)));
        let boat = Rectangle::new(Position::new(1, 1), Position::new(1, 1));

        let reply = client
            .request(&Envelope {
                seq: 5,
                payload: Request::StartGame { ships: vec![boat] },
            })
            .await;

        assert_eq!(reply.seq, 5);
        assert!(matches!(reply.payload, Response::GameStarted { .. }));
    }

    #[tokio::test]
    async fn test_handle_connection_garbage_gets_bad_request_and_stays_open() {
        let (mut client, _task) = connect(state(Duration::from_secs(5)));

        let reply = client.send_raw(b"not json at all".to_vec()).await;
        assert_eq!(reply.seq, 0);
        assert!(matches!(reply.payload, Response::Error { code: 400, .. }));

        // Still serving.
        let reply = client
            .request(&Envelope {
                seq: 2,
                payload: Request::StartGame { ships: vec![] },
            })
            .await;
        assert_eq!(reply.seq, 2);
        assert!(matches!(reply.payload, Response::Error { code: 400, .. }));
    }

    #[tokio::test]
    async fn test_handle_connection_ends_when_peer_closes() {
        let (client, task) = connect(state(Duration::from_secs(5)));
        drop(client);
        let result = tokio::time::timeout(Duration::from_secs(1), task).await;
        assert!(matches!(result, Ok(Ok(Ok(())))));
    }

    #[tokio::test]
    async fn test_handle_connection_idle_timeout() {
        let (_client, task) = connect(state(Duration::from_millis(20)));
        let result = tokio::time::timeout(Duration::from_secs(1), task).await;
        assert!(matches!(result, Ok(Ok(Ok(())))));
    }
}
