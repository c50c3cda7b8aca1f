//! Error types for the relay crate.

use thiserror::Error;

/// Errors from talking to the relay actor.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The relay actor is gone — its task stopped or its channel closed.
    #[error("relay is unavailable")]
    Unavailable,
}
