//! Error types for the protocol layer.

/// Errors that can occur while encoding or decoding wire events.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization of an outbound event failed.
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// An inbound frame was malformed: bad JSON, an unknown `"event"` tag,
    /// or field types that don't match the schema.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),
}
