//! Wire protocol for the Hopline game relay.
//!
//! This crate defines the "language" that browser clients and the relay
//! speak:
//!
//! - **Types** ([`Player`], [`ClientEvent`], [`ServerEvent`]) — the
//!   structures that travel on the wire as tagged JSON objects.
//! - **Codec** ([`decode_client`], [`encode_server`]) — the JSON text
//!   conversion used for WebSocket frames.
//! - **Errors** ([`ProtocolError`]) — what can go wrong doing so.
//!
//! The protocol layer knows nothing about connections, the registry, or the
//! room — it only describes messages.

mod codec;
mod error;
mod types;

pub use codec::{decode_client, encode_server};
pub use error::ProtocolError;
pub use types::{ClientEvent, Player, PlayerId, ServerEvent};
