//! Room state and event routing for the Hopline relay.
//!
//! This crate is the relay's brain, split into two layers:
//!
//! 1. **Routing** — a pure function from (state, sender, event) to a batch
//!    of (audience, event) pairs ([`route`], [`connect_summary`],
//!    [`disconnect`]). All protocol semantics live here and are testable
//!    without any I/O.
//! 2. **The actor** — a single Tokio task owning the [`RelayContext`] and
//!    the per-connection outbound channels ([`spawn_relay`],
//!    [`RelayHandle`]). The actor's command queue serializes every event;
//!    there is no other synchronization in the process.

mod error;
mod room;
mod router;
mod server;

pub use error::RelayError;
pub use room::RoomPhase;
pub use router::{connect_summary, disconnect, route, Audience, RelayContext};
pub use server::{now_ms, spawn_relay, ConnSender, RelayHandle, RelayStats};
