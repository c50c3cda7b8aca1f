//! The event router: the single decision point for what each inbound event
//! does to shared state and who hears about it.
//!
//! Routing is a pure function over a [`RelayContext`] — no channels, no
//! tasks, no clocks. The actor in [`server`](crate::server) owns the context
//! and the network plumbing; everything testable about the protocol's
//! semantics lives here.

use hopline_protocol::{ClientEvent, PlayerId, ServerEvent};
use hopline_registry::{PlayerPatch, PlayerRegistry};

use crate::RoomPhase;

/// Who should receive an outbound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// Only the connection the inbound event came from.
    Sender,
    /// Every open connection except the sender.
    Others,
    /// Every open connection, sender included.
    All,
}

/// The shared mutable state the router operates on: the player registry and
/// the room phase, owned together so a single relay instance is one value.
///
/// Kept as an explicit context object (rather than globals) so multiple
/// independent relay instances remain possible without touching the routing
/// logic.
#[derive(Debug, Default)]
pub struct RelayContext {
    pub registry: PlayerRegistry,
    pub room: RoomPhase,
}

impl RelayContext {
    /// Creates an empty context: no players, room in the lobby.
    pub fn new() -> Self {
        Self::default()
    }
}

/// The room summary sent to a connection the moment it is accepted.
///
/// `players` counts registered players, not raw sockets — a connection that
/// never joined does not show up.
pub fn connect_summary(ctx: &RelayContext) -> ServerEvent {
    ServerEvent::GameState {
        is_started: ctx.room.is_started(),
        start_time: ctx.room.start_time(),
        players: ctx.registry.len(),
    }
}

/// Applies one inbound event and returns the derived outbound events in
/// delivery order.
///
/// Every id-scoped event (`playerMove`, `scoreUpdate`, `gameOver`) is a
/// guarded no-op when the sender never joined — such events can legitimately
/// race a processed disconnect, so they are logged and dropped, never an
/// error. Nothing the client sends is otherwise validated.
pub fn route(
    ctx: &mut RelayContext,
    sender: PlayerId,
    event: ClientEvent,
    now: u64,
) -> Vec<(Audience, ServerEvent)> {
    match event {
        ClientEvent::PlayerJoin { name, color } => {
            // Snapshot before registering, so the joining client never sees
            // itself in its own hydration reply. The id filter only matters
            // on a re-join, where a previous record for the sender exists.
            let mut existing = ctx.registry.snapshot();
            existing.retain(|p| p.id != sender);

            let player = ctx.registry.register(sender, name, color, now);
            tracing::info!(%sender, name = %player.name, "player joined");

            vec![
                (Audience::Sender, ServerEvent::CurrentPlayers { players: existing }),
                (Audience::Others, ServerEvent::PlayerJoined(player)),
            ]
        }

        ClientEvent::PlayerMove { position, is_alive } => {
            let is_alive = is_alive.unwrap_or(true);
            let patch = PlayerPatch {
                position: Some(position),
                is_alive: Some(is_alive),
                ..PlayerPatch::default()
            };
            if !ctx.registry.update(sender, patch) {
                tracing::debug!(%sender, "move from unregistered id, dropping");
                return Vec::new();
            }
            vec![(
                Audience::Others,
                ServerEvent::PlayerMoved {
                    id: sender,
                    position,
                    is_alive,
                },
            )]
        }

        ClientEvent::ScoreUpdate { score } => {
            let patch = PlayerPatch {
                score: Some(score),
                ..PlayerPatch::default()
            };
            if !ctx.registry.update(sender, patch) {
                tracing::debug!(%sender, "score from unregistered id, dropping");
                return Vec::new();
            }
            tracing::debug!(%sender, score, "score updated");
            vec![(
                Audience::All,
                ServerEvent::PlayerScoreUpdated { id: sender, score },
            )]
        }

        ClientEvent::StartGame => {
            if !ctx.room.start(now, sender) {
                tracing::debug!(%sender, "duplicate start, ignoring");
                return Vec::new();
            }
            tracing::info!(%sender, start_time = now, "game started");
            vec![(
                Audience::All,
                ServerEvent::GameStarted {
                    start_time: now,
                    started_by: sender,
                },
            )]
        }

        ClientEvent::ResetGame => {
            ctx.room.reset();
            ctx.registry.reset_all();
            tracing::info!(%sender, "game reset");
            vec![(Audience::All, ServerEvent::GameReset)]
        }

        ClientEvent::GameOver { score } => {
            let Some(player) = ctx.registry.lookup(sender) else {
                tracing::debug!(%sender, "game over from unregistered id, dropping");
                return Vec::new();
            };
            let name = player.name.clone();
            // Mark dead; the stored score stays whatever the client last
            // reported via scoreUpdate.
            ctx.registry.update(
                sender,
                PlayerPatch {
                    is_alive: Some(false),
                    ..PlayerPatch::default()
                },
            );
            tracing::info!(%sender, final_score = score, "player game over");
            vec![(
                Audience::All,
                ServerEvent::PlayerGameOver {
                    id: sender,
                    name,
                    final_score: score,
                },
            )]
        }
    }
}

/// Handles a closed connection: drops the registry record (if the client
/// ever joined) and tells everyone else.
pub fn disconnect(ctx: &mut RelayContext, id: PlayerId) -> Vec<(Audience, ServerEvent)> {
    if ctx.registry.remove(id).is_none() {
        // Connected but never joined; nobody was told about this client.
        return Vec::new();
    }
    tracing::info!(%id, "player disconnected");
    vec![(Audience::Others, ServerEvent::PlayerLeft { id })]
}
