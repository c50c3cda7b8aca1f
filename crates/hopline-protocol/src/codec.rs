//! JSON encoding and decoding for relay events.
//!
//! The wire is JSON text frames in both directions — browsers speak nothing
//! else here, so there is no pluggable codec layer, just two functions.

use crate::{ClientEvent, ProtocolError, ServerEvent};

/// Decodes an inbound text frame into a [`ClientEvent`].
///
/// # Errors
/// Returns [`ProtocolError::Decode`] when the frame is not valid JSON or
/// does not carry a known `"event"` tag. Callers are expected to log and
/// skip — a bad frame never terminates the connection.
pub fn decode_client(text: &str) -> Result<ClientEvent, ProtocolError> {
    serde_json::from_str(text).map_err(ProtocolError::Decode)
}

/// Encodes an outbound [`ServerEvent`] into a text frame.
///
/// # Errors
/// Returns [`ProtocolError::Encode`] if serialization fails.
pub fn encode_server(event: &ServerEvent) -> Result<String, ProtocolError> {
    serde_json::to_string(event).map_err(ProtocolError::Encode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlayerId;

    #[test]
    fn test_decode_valid_event() {
        let event = decode_client(r#"{"event":"scoreUpdate","score":7}"#).unwrap();
        assert_eq!(event, ClientEvent::ScoreUpdate { score: 7 });
    }

    #[test]
    fn test_decode_garbage_returns_error() {
        assert!(decode_client("not json at all").is_err());
    }

    #[test]
    fn test_decode_wrong_shape_returns_error() {
        // Valid JSON, but no "event" tag.
        assert!(decode_client(r#"{"name":"hello"}"#).is_err());
    }

    #[test]
    fn test_encode_produces_tagged_json() {
        let text = encode_server(&ServerEvent::PlayerLeft { id: PlayerId(4) }).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["event"], "playerLeft");
        assert_eq!(value["id"], 4);
    }
}
