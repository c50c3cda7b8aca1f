//! Environment-driven server configuration.
//!
//! Everything tunable comes from three variables, all optional:
//!
//! * `PORT` — listen port, default `3000`
//! * `BIND_ADDR` — listen address, default `0.0.0.0`
//! * `CLIENT_URL` — comma-separated allowed CORS origins, default
//!   `http://localhost:5173`; the single value `*` allows any origin

use std::env;

use actix_cors::Cors;
use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
const DEFAULT_CLIENT_URL: &str = "http://localhost:5173";

/// Configuration errors surfaced at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `PORT` was set but is not a valid port number.
    #[error("invalid PORT value {value:?}")]
    InvalidPort {
        value: String,
        source: std::num::ParseIntError,
    },
}

/// Which browser origins may talk to the HTTP endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    /// `CLIENT_URL=*`: any origin.
    Any,
    /// An explicit allow-list.
    List(Vec<String>),
}

impl CorsOrigins {
    /// Builds the CORS middleware for these origins.
    ///
    /// Credentials are only allowed with an explicit origin list; the CORS
    /// spec (and actix-cors) forbids pairing them with a wildcard.
    pub fn middleware(&self) -> Cors {
        let cors = Cors::default()
            .allowed_methods(vec!["GET", "POST"])
            .allow_any_header()
            .max_age(3600);
        match self {
            Self::Any => cors.allow_any_origin(),
            Self::List(origins) => origins
                .iter()
                .fold(cors, |cors, origin| cors.allowed_origin(origin))
                .supports_credentials(),
        }
    }
}

/// Fully resolved server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub bind_addr: String,
    pub cors: CorsOrigins,
}

impl Config {
    /// Reads configuration from the process environment, applying defaults
    /// for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var("PORT") {
            Ok(value) => value
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            Err(_) => DEFAULT_PORT,
        };

        let bind_addr =
            env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let client_url =
            env::var("CLIENT_URL").unwrap_or_else(|_| DEFAULT_CLIENT_URL.to_string());
        let cors = Self::parse_origins(&client_url);

        Ok(Self {
            port,
            bind_addr,
            cors,
        })
    }

    fn parse_origins(client_url: &str) -> CorsOrigins {
        if client_url.trim() == "*" {
            return CorsOrigins::Any;
        }
        CorsOrigins::List(
            client_url
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_allows_any_origin() {
        assert_eq!(Config::parse_origins("*"), CorsOrigins::Any);
        assert_eq!(Config::parse_origins(" * "), CorsOrigins::Any);
    }

    #[test]
    fn test_origin_list_is_split_and_trimmed() {
        let cors = Config::parse_origins("http://localhost:5173, https://game.example.com,");
        assert_eq!(
            cors,
            CorsOrigins::List(vec![
                "http://localhost:5173".to_string(),
                "https://game.example.com".to_string(),
            ])
        );
    }
}
