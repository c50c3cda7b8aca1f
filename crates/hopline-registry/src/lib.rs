//! Connection registry for the Hopline relay.
//!
//! This crate owns the mapping from connection id to [`Player`] record:
//!
//! 1. **Registration** — a record is created on the join event (not on raw
//!    connect) and destroyed on disconnect ([`PlayerRegistry`]).
//! 2. **Updates** — movement/score/liveness patches merged in as clients
//!    report them ([`PlayerPatch`]).
//! 3. **Defaults** — generated display names and palette colors for clients
//!    that join without them ([`defaults`]).
//!
//! The registry has no locking of its own; it is owned by the single relay
//! actor task, which serializes all access.
//!
//! [`Player`]: hopline_protocol::Player

pub mod defaults;
mod registry;

pub use registry::{PlayerPatch, PlayerRegistry};
