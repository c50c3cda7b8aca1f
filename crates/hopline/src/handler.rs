//! WebSocket connection handler: the per-connection message loop.
//!
//! One task per connection, bridging the socket to the relay actor. Inbound
//! text frames are decoded and forwarded to the relay; outbound frames
//! arrive pre-encoded on the connection's channel and are written to the
//! socket verbatim. Heartbeats keep half-dead browser tabs from lingering.

use std::time::{Duration, Instant};

use actix_ws::Message;
use futures_util::StreamExt as _;
use hopline_protocol::decode_client;
use hopline_relay::RelayHandle;
use tokio::sync::mpsc;
use tokio::time::interval;

/// How often heartbeat pings are sent.
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);

/// How long without any client frame before the connection is dropped.
const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs a WebSocket connection until it closes.
///
/// Registers with the relay (which assigns the connection id and queues the
/// room summary as the first outbound frame), then loops over three inputs:
/// socket frames from the client, relay frames to write out, and the
/// heartbeat tick. A malformed inbound frame is logged and skipped — it
/// never closes the connection. On exit the relay is told to disconnect,
/// which handles the registry cleanup and the `playerLeft` broadcast.
pub async fn handle_ws(
    relay: RelayHandle,
    mut session: actix_ws::Session,
    mut msg_stream: actix_ws::MessageStream,
) {
    let (conn_tx, mut conn_rx) = mpsc::unbounded_channel();

    let id = match relay.connect(conn_tx).await {
        Ok(id) => id,
        Err(error) => {
            tracing::error!(%error, "relay rejected connection");
            let _ = session.close(None).await;
            return;
        }
    };
    tracing::debug!(%id, "websocket connected");

    let mut last_heartbeat = Instant::now();
    let mut heartbeat = interval(HEARTBEAT_INTERVAL);

    let close_reason = loop {
        tokio::select! {
            msg = msg_stream.next() => match msg {
                Some(Ok(Message::Text(text))) => {
                    last_heartbeat = Instant::now();
                    match decode_client(&text) {
                        Ok(event) => {
                            if relay.inbound(id, event).await.is_err() {
                                tracing::error!(%id, "relay gone, closing connection");
                                break None;
                            }
                        }
                        Err(error) => {
                            tracing::warn!(%id, %error, "ignoring malformed frame");
                        }
                    }
                }
                Some(Ok(Message::Ping(bytes))) => {
                    last_heartbeat = Instant::now();
                    let _ = session.pong(&bytes).await;
                }
                Some(Ok(Message::Pong(_))) => {
                    last_heartbeat = Instant::now();
                }
                Some(Ok(Message::Close(reason))) => break reason,
                Some(Ok(_)) => {}
                Some(Err(error)) => {
                    tracing::debug!(%id, %error, "websocket stream error");
                    break None;
                }
                None => break None,
            },

            frame = conn_rx.recv() => match frame {
                Some(frame) => {
                    if session.text(frame).await.is_err() {
                        break None;
                    }
                }
                // The relay dropped our sender; nothing more will arrive.
                None => break None,
            },

            _ = heartbeat.tick() => {
                if last_heartbeat.elapsed() > CLIENT_TIMEOUT {
                    tracing::info!(%id, "heartbeat timeout, disconnecting");
                    break None;
                }
                let _ = session.ping(b"").await;
            }
        }
    };

    tracing::debug!(%id, "websocket disconnecting");
    if let Err(error) = relay.disconnect(id).await {
        tracing::error!(%id, %error, "failed to notify relay of disconnect");
    }
    let _ = session.close(close_reason).await;
}
