//! Hopline: a WebSocket relay server for a browser endless-runner game.
//!
//! The server holds no game rules. It assigns connection ids, keeps the
//! shared player roster, and fans client-reported events out to the right
//! audiences; every gameplay decision happens in the browsers. A small
//! read-only HTTP side channel (`/health`, `/api/players`) rides on the
//! same port as the `/ws` upgrade.

use std::time::Instant;

use hopline_relay::RelayHandle;

pub mod api;
pub mod config;
pub mod error;
pub mod handler;

pub use config::{Config, CorsOrigins};
pub use error::HoplineError;

/// Command queue depth for the relay actor.
pub const RELAY_CHANNEL_SIZE: usize = 64;

/// Shared state handed to every HTTP endpoint.
#[derive(Clone)]
pub struct AppState {
    /// Handle to the relay actor.
    pub relay: RelayHandle,
    /// Process start, for the `/health` uptime counter.
    pub started_at: Instant,
}

impl AppState {
    /// Creates state around a running relay.
    pub fn new(relay: RelayHandle) -> Self {
        Self {
            relay,
            started_at: Instant::now(),
        }
    }
}
