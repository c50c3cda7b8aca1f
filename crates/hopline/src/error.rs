//! Top-level error type for the server binary.

use thiserror::Error;

use crate::config::ConfigError;

/// Anything that can abort server startup.
#[derive(Debug, Error)]
pub enum HoplineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Relay(#[from] hopline_relay::RelayError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
