//! Relay actor: the single Tokio task that owns all mutable relay state.
//!
//! The actor owns the [`RelayContext`] plus the per-connection outbound
//! channels, and processes commands one at a time off an mpsc channel. That
//! queue IS the concurrency model: every event is applied and fanned out
//! atomically with respect to every other event, with no locks anywhere.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::{SystemTime, UNIX_EPOCH};

use hopline_protocol::{encode_server, ClientEvent, Player, PlayerId, ServerEvent};
use tokio::sync::{mpsc, oneshot};

use crate::{connect_summary, disconnect, route, Audience, RelayContext, RelayError};

/// Channel sender for delivering pre-encoded outbound frames to a
/// connection handler.
///
/// Frames are encoded once in the actor and fanned out as `String` clones,
/// so a broadcast to N connections serializes the event exactly once.
pub type ConnSender = mpsc::UnboundedSender<String>;

/// Unix-epoch milliseconds, as stamped on joins and match starts.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Commands sent to the relay actor through its channel.
///
/// The `oneshot::Sender` in some variants is a reply channel — the caller
/// sends a command and waits for the response on it.
enum RelayCommand {
    /// A new WebSocket connection was accepted.
    Connect {
        conn_tx: ConnSender,
        reply: oneshot::Sender<PlayerId>,
    },

    /// A decoded event arrived from a connection.
    Inbound { id: PlayerId, event: ClientEvent },

    /// A connection closed (or its handler is tearing down).
    Disconnect { id: PlayerId },

    /// Request a snapshot of every registered player.
    Players {
        reply: oneshot::Sender<Vec<Player>>,
    },

    /// Request room metadata counters.
    Stats {
        reply: oneshot::Sender<RelayStats>,
    },
}

/// A snapshot of relay metadata (not the player records themselves).
#[derive(Debug, Clone, Copy)]
pub struct RelayStats {
    /// Number of registered players.
    pub players: usize,
    /// Number of open connections, joined or not.
    pub connections: usize,
    /// Whether a match is running.
    pub is_started: bool,
}

/// Handle to the running relay actor. Used to send commands to it.
///
/// Cheap to clone — it's just an `mpsc::Sender` wrapper. Every connection
/// handler and HTTP endpoint holds one.
#[derive(Clone)]
pub struct RelayHandle {
    sender: mpsc::Sender<RelayCommand>,
}

impl RelayHandle {
    /// Registers a new connection with the relay.
    ///
    /// The relay assigns the connection id and pushes the room summary
    /// frame into `conn_tx` before replying, so the summary is always the
    /// first thing a client receives.
    pub async fn connect(&self, conn_tx: ConnSender) -> Result<PlayerId, RelayError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RelayCommand::Connect {
                conn_tx,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RelayError::Unavailable)?;
        reply_rx.await.map_err(|_| RelayError::Unavailable)
    }

    /// Delivers a decoded client event to the relay (fire-and-forget).
    pub async fn inbound(&self, id: PlayerId, event: ClientEvent) -> Result<(), RelayError> {
        self.sender
            .send(RelayCommand::Inbound { id, event })
            .await
            .map_err(|_| RelayError::Unavailable)
    }

    /// Tells the relay a connection has closed.
    pub async fn disconnect(&self, id: PlayerId) -> Result<(), RelayError> {
        self.sender
            .send(RelayCommand::Disconnect { id })
            .await
            .map_err(|_| RelayError::Unavailable)
    }

    /// Requests the current player roster, in join order.
    pub async fn players(&self) -> Result<Vec<Player>, RelayError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RelayCommand::Players { reply: reply_tx })
            .await
            .map_err(|_| RelayError::Unavailable)?;
        reply_rx.await.map_err(|_| RelayError::Unavailable)
    }

    /// Requests the relay's metadata counters.
    pub async fn stats(&self) -> Result<RelayStats, RelayError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RelayCommand::Stats { reply: reply_tx })
            .await
            .map_err(|_| RelayError::Unavailable)?;
        reply_rx.await.map_err(|_| RelayError::Unavailable)
    }
}

/// The internal relay actor state. Runs inside a Tokio task.
struct RelayActor {
    ctx: RelayContext,
    /// Per-connection outbound channels, keyed by connection id. This is a
    /// superset of the registry: a connection appears here from accept to
    /// close, in the registry only between join and close.
    conns: HashMap<PlayerId, ConnSender>,
    next_id: u64,
    receiver: mpsc::Receiver<RelayCommand>,
}

impl RelayActor {
    /// Runs the actor loop, processing commands until every handle drops.
    async fn run(mut self) {
        tracing::info!("relay actor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                RelayCommand::Connect { conn_tx, reply } => {
                    let id = self.handle_connect(conn_tx);
                    let _ = reply.send(id);
                }
                RelayCommand::Inbound { id, event } => {
                    let now = now_ms();
                    // One bad event must not take down the actor; catch at
                    // the per-event boundary and keep serving.
                    let result =
                        catch_unwind(AssertUnwindSafe(|| route(&mut self.ctx, id, event, now)));
                    match result {
                        Ok(out) => self.dispatch(id, out),
                        Err(_) => {
                            tracing::error!(%id, "event handler panicked, event dropped");
                        }
                    }
                }
                RelayCommand::Disconnect { id } => {
                    self.conns.remove(&id);
                    let result = catch_unwind(AssertUnwindSafe(|| disconnect(&mut self.ctx, id)));
                    match result {
                        Ok(out) => self.dispatch(id, out),
                        Err(_) => {
                            tracing::error!(%id, "disconnect handler panicked");
                        }
                    }
                }
                RelayCommand::Players { reply } => {
                    let _ = reply.send(self.ctx.registry.snapshot());
                }
                RelayCommand::Stats { reply } => {
                    let _ = reply.send(RelayStats {
                        players: self.ctx.registry.len(),
                        connections: self.conns.len(),
                        is_started: self.ctx.room.is_started(),
                    });
                }
            }
        }

        tracing::info!("relay actor stopped");
    }

    fn handle_connect(&mut self, conn_tx: ConnSender) -> PlayerId {
        self.next_id += 1;
        let id = PlayerId(self.next_id);

        // Push the room summary before the connection is eligible for any
        // broadcast, so the summary is always the client's first frame.
        let summary = connect_summary(&self.ctx);
        Self::send_frame(&conn_tx, &summary);

        self.conns.insert(id, conn_tx);
        tracing::info!(%id, connections = self.conns.len(), "connection accepted");
        id
    }

    /// Encodes each event once and fans the frame out to its audience.
    fn dispatch(&self, sender: PlayerId, out: Vec<(Audience, ServerEvent)>) {
        for (audience, event) in out {
            let frame = match encode_server(&event) {
                Ok(frame) => frame,
                Err(error) => {
                    tracing::error!(%error, "failed to encode outbound event");
                    continue;
                }
            };
            match audience {
                Audience::Sender => {
                    self.send_to(sender, frame);
                }
                Audience::Others => {
                    for (&id, conn_tx) in &self.conns {
                        if id != sender {
                            let _ = conn_tx.send(frame.clone());
                        }
                    }
                }
                Audience::All => {
                    for conn_tx in self.conns.values() {
                        let _ = conn_tx.send(frame.clone());
                    }
                }
            }
        }
    }

    /// Sends a frame to a single connection. Silently drops if the receiver
    /// is gone (the handler raced a close).
    fn send_to(&self, id: PlayerId, frame: String) {
        if let Some(conn_tx) = self.conns.get(&id) {
            let _ = conn_tx.send(frame);
        }
    }

    fn send_frame(conn_tx: &ConnSender, event: &ServerEvent) {
        match encode_server(event) {
            Ok(frame) => {
                let _ = conn_tx.send(frame);
            }
            Err(error) => {
                tracing::error!(%error, "failed to encode outbound event");
            }
        }
    }
}

/// Spawns the relay actor task and returns a handle to communicate with it.
///
/// `channel_size` controls backpressure — if the command queue fills up,
/// callers wait (bounded channel).
pub fn spawn_relay(channel_size: usize) -> RelayHandle {
    let (tx, rx) = mpsc::channel(channel_size);

    let actor = RelayActor {
        ctx: RelayContext::new(),
        conns: HashMap::new(),
        next_id: 0,
        receiver: rx,
    };

    tokio::spawn(actor.run());

    RelayHandle { sender: tx }
}
