//! The shared room state: a single global match context.
//!
//! There is exactly one room per relay process, alive for the process
//! lifetime. Its whole state machine is `Lobby ⇄ Started`.

use hopline_protocol::PlayerId;
use serde::{Deserialize, Serialize};

/// The lifecycle phase of the room.
///
/// Start metadata lives inside the `Started` variant, so "`startTime` and
/// `startedBy` are set if and only if the match is started" holds by
/// construction — there is no way to represent a half-set state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoomPhase {
    /// No match running; players are waiting (or playing solo warm-ups —
    /// the relay doesn't care).
    #[default]
    Lobby,

    /// A match is running.
    Started {
        /// Unix-epoch milliseconds when the match started.
        start_time: u64,
        /// The connection that sent the start event.
        started_by: PlayerId,
    },
}

impl RoomPhase {
    /// Returns `true` while a match is running.
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started { .. })
    }

    /// Transitions `Lobby → Started`.
    ///
    /// Returns `false` without touching anything if the match already
    /// started — a duplicate start is an idempotent no-op, not an error.
    pub fn start(&mut self, start_time: u64, started_by: PlayerId) -> bool {
        if self.is_started() {
            return false;
        }
        *self = Self::Started {
            start_time,
            started_by,
        };
        true
    }

    /// Transitions back to `Lobby`, clearing the start metadata.
    pub fn reset(&mut self) {
        *self = Self::Lobby;
    }

    /// The start time, when started.
    pub fn start_time(&self) -> Option<u64> {
        match self {
            Self::Lobby => None,
            Self::Started { start_time, .. } => Some(*start_time),
        }
    }
}
