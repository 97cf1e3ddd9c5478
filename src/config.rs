//! Runtime configuration for the HTTP service.
//!
//! Values come from environment variables:
//!
//! * `PURCHASE_ENGINE_BIND_ADDR` - socket address to listen on
//!   (default `127.0.0.1:3000`)
//! * `PURCHASE_ENGINE_LOG` - default tracing filter directive, used
//!   when `RUST_LOG` is unset (default `purchase_engine=info`)

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tracing::warn;

pub const BIND_ADDR_VAR: &str = "PURCHASE_ENGINE_BIND_ADDR";
pub const LOG_VAR: &str = "PURCHASE_ENGINE_LOG";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_LOG_FILTER: &str = "purchase_engine=info";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub bind_addr: SocketAddr,
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            log_filter: DEFAULT_LOG_FILTER.into(),
        }
    }
}

impl EngineConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, EngineError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable
    /// name to its value.  Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EngineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let raw_addr = read(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .trim()
            .parse::<SocketAddr>()
            .map_err(|err| {
                warn!(key = BIND_ADDR_VAR, value = %raw_addr, "rejected configuration");
                EngineError::Config {
                    key: BIND_ADDR_VAR,
                    message: format!("`{}` is not a socket address ({})", raw_addr, err),
                }
            })?;

        let log_filter = read(LOG_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            bind_addr,
            log_filter,
        })
    }
}
