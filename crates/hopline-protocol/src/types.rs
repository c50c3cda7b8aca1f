//! Core types for Hopline's wire format.
//!
//! Everything that travels between a browser client and the relay is defined
//! here: the player record, and the inbound/outbound event unions. The wire
//! shape is a JSON object tagged with an `"event"` field and camelCase
//! payload fields, matching what the browser client emits and listens for.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A unique identifier for a connected client.
///
/// Assigned by the relay when the WebSocket connection is accepted, from a
/// monotonically increasing counter; it doubles as the player identity for
/// the lifetime of that connection. Ids are never reused while the connection
/// is open — a reconnect always produces a fresh identity.
///
/// `#[serde(transparent)]` serializes this as a plain JSON number, so clients
/// see an opaque id rather than a wrapper object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// The shared record for one connected player.
///
/// Every field except `id` and `connected_at` is client-reported and never
/// validated by the relay — it is mirrored to other clients as-is
/// (trust-the-client model).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Connection id, doubling as the player identity.
    pub id: PlayerId,
    /// Display name; pass-through, defaulted when the client sends none.
    pub name: String,
    /// Cosmetic color token; defaulted from a fixed palette when absent.
    pub color: String,
    /// Last reported vertical offset. No server-side meaning.
    pub position: f64,
    /// Last reported score. Not enforced to be monotonic.
    pub score: u64,
    /// Last reported liveness; drives opacity/leaderboard on other clients.
    pub is_alive: bool,
    /// Unix-epoch milliseconds at the moment of `playerJoin`.
    pub connected_at: u64,
}

/// Events a client sends to the relay.
///
/// `#[serde(tag = "event")]` produces internally tagged JSON:
/// `{ "event": "playerMove", "position": 42.0 }`. All payload fields are
/// optional or defaulted — a malformed payload degrades to defaults rather
/// than being rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientEvent {
    /// Enter the game with an optional display name and color.
    PlayerJoin {
        name: Option<String>,
        color: Option<String>,
    },

    /// Report a new vertical position. Missing `isAlive` means alive.
    PlayerMove {
        #[serde(default)]
        position: f64,
        is_alive: Option<bool>,
    },

    /// Report a new score.
    ScoreUpdate {
        #[serde(default)]
        score: u64,
    },

    /// Request the match to start. A no-op if it already has.
    StartGame,

    /// Return the room to the lobby and zero everyone's run state.
    ResetGame,

    /// Report this player's run as over, with the final score.
    GameOver {
        #[serde(default)]
        score: u64,
    },
}

/// Events the relay sends to clients.
///
/// Same internally tagged JSON shape as [`ClientEvent`]. Which connections
/// receive which event is decided by the relay's router, not encoded here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    /// Sent to a connection as soon as it is accepted: a summary of the
    /// current room. `players` counts registered players, not raw sockets.
    GameState {
        is_started: bool,
        start_time: Option<u64>,
        players: usize,
    },

    /// Direct reply to `playerJoin`: everyone who was already registered
    /// before this join. Never includes the joining player's own id.
    CurrentPlayers { players: Vec<Player> },

    /// Broadcast to the other connections when someone joins.
    PlayerJoined(Player),

    /// Broadcast to the other connections when a player moves.
    PlayerMoved {
        id: PlayerId,
        position: f64,
        is_alive: bool,
    },

    /// Broadcast to every connection when a score changes.
    PlayerScoreUpdated { id: PlayerId, score: u64 },

    /// Broadcast to every connection when the match starts.
    GameStarted {
        start_time: u64,
        started_by: PlayerId,
    },

    /// Broadcast to every connection when the room resets. No payload.
    GameReset,

    /// Broadcast to every connection when a player's run ends.
    PlayerGameOver {
        id: PlayerId,
        name: String,
        final_score: u64,
    },

    /// Broadcast to the other connections when someone disconnects.
    PlayerLeft { id: PlayerId },
}

#[cfg(test)]
mod tests {
    //! The browser client parses these exact JSON shapes; a mismatch in a
    //! tag or field name silently breaks the game, so each variant's wire
    //! form is pinned down here.

    use super::*;
    use serde_json::json;

    #[test]
    fn test_player_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&PlayerId(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn test_player_id_display() {
        assert_eq!(PlayerId(7).to_string(), "conn-7");
    }

    #[test]
    fn test_player_serializes_with_camel_case_fields() {
        let player = Player {
            id: PlayerId(3),
            name: "Al".into(),
            color: "#FF0000".into(),
            position: 1.5,
            score: 10,
            is_alive: true,
            connected_at: 1_700_000_000_000,
        };
        let value = serde_json::to_value(&player).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["isAlive"], true);
        assert_eq!(value["connectedAt"], 1_700_000_000_000_u64);
        assert!(value.get("is_alive").is_none());
    }

    #[test]
    fn test_player_join_decodes_with_full_payload() {
        let event: ClientEvent = serde_json::from_value(json!({
            "event": "playerJoin",
            "name": "Al",
            "color": "#FF0000",
        }))
        .unwrap();
        assert_eq!(
            event,
            ClientEvent::PlayerJoin {
                name: Some("Al".into()),
                color: Some("#FF0000".into()),
            }
        );
    }

    #[test]
    fn test_player_join_decodes_with_empty_payload() {
        // Both fields are optional; a bare join is valid.
        let event: ClientEvent =
            serde_json::from_value(json!({ "event": "playerJoin" })).unwrap();
        assert_eq!(
            event,
            ClientEvent::PlayerJoin {
                name: None,
                color: None,
            }
        );
    }

    #[test]
    fn test_player_move_defaults_missing_fields() {
        // Absent isAlive stays None here; the router defaults it to true.
        let event: ClientEvent = serde_json::from_value(json!({
            "event": "playerMove",
            "position": 12.5,
        }))
        .unwrap();
        assert_eq!(
            event,
            ClientEvent::PlayerMove {
                position: 12.5,
                is_alive: None,
            }
        );

        // Even the position may be missing; it defaults rather than erroring.
        let event: ClientEvent =
            serde_json::from_value(json!({ "event": "playerMove" })).unwrap();
        assert_eq!(
            event,
            ClientEvent::PlayerMove {
                position: 0.0,
                is_alive: None,
            }
        );
    }

    #[test]
    fn test_start_game_is_a_bare_tag() {
        let event: ClientEvent =
            serde_json::from_value(json!({ "event": "startGame" })).unwrap();
        assert_eq!(event, ClientEvent::StartGame);
    }

    #[test]
    fn test_game_over_decodes_score() {
        let event: ClientEvent = serde_json::from_value(json!({
            "event": "gameOver",
            "score": 99,
        }))
        .unwrap();
        assert_eq!(event, ClientEvent::GameOver { score: 99 });
    }

    #[test]
    fn test_unknown_event_tag_is_rejected() {
        let result: Result<ClientEvent, _> =
            serde_json::from_value(json!({ "event": "flyToMoon" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_game_state_json_shape() {
        let event = ServerEvent::GameState {
            is_started: true,
            start_time: Some(5000),
            players: 2,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], "gameState");
        assert_eq!(value["isStarted"], true);
        assert_eq!(value["startTime"], 5000);
        assert_eq!(value["players"], 2);
    }

    #[test]
    fn test_game_state_lobby_has_null_start_time() {
        let event = ServerEvent::GameState {
            is_started: false,
            start_time: None,
            players: 0,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["isStarted"], false);
        assert!(value["startTime"].is_null());
    }

    #[test]
    fn test_player_joined_flattens_the_player_record() {
        let event = ServerEvent::PlayerJoined(Player {
            id: PlayerId(2),
            name: "Bo".into(),
            color: "#00FF00".into(),
            position: 0.0,
            score: 0,
            is_alive: true,
            connected_at: 100,
        });
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], "playerJoined");
        assert_eq!(value["id"], 2);
        assert_eq!(value["name"], "Bo");
    }

    #[test]
    fn test_player_game_over_json_shape() {
        let event = ServerEvent::PlayerGameOver {
            id: PlayerId(1),
            name: "Al".into(),
            final_score: 42,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], "playerGameOver");
        assert_eq!(value["finalScore"], 42);
    }

    #[test]
    fn test_game_reset_has_no_payload() {
        let value = serde_json::to_value(&ServerEvent::GameReset).unwrap();
        assert_eq!(value, json!({ "event": "gameReset" }));
    }

    #[test]
    fn test_server_event_round_trip() {
        let event = ServerEvent::PlayerMoved {
            id: PlayerId(9),
            position: -3.25,
            is_alive: false,
        };
        let text = serde_json::to_string(&event).unwrap();
        let decoded: ServerEvent = serde_json::from_str(&text).unwrap();
        assert_eq!(event, decoded);
    }
}
