//! HTTP server settings from environment variables.

use crate::errors::{Error, Result};
use std::net::SocketAddr;

/// Address the API listens on when `BIND_ADDRESS` is unset.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";

/// Settings for the REST API listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_address: SocketAddr,
}

impl ServerConfig {
    /// Reads `BIND_ADDRESS`, falling back to [`DEFAULT_BIND_ADDRESS`].
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the address does not parse.
    pub fn from_env() -> Result<Self> {
        let raw = std::env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());
        Self::parse(&raw)
    }

    /// Parses a `host:port` socket address.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the address does not parse.
    pub fn parse(raw: &str) -> Result<Self> {
        let bind_address = raw.trim().parse().map_err(|e| Error::Config {
            message: format!("Invalid BIND_ADDRESS '{raw}': {e}"),
        })?;
        Ok(Self { bind_address })
    }
}
