//! Runtime configuration (environment variables).

use std::net::SocketAddr;

use anyhow::Context;

/// Environment variable holding the listen address.
pub const BIND_ADDR_VAR: &str = "EPHINV_BIND_ADDR";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
}

impl ApiConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let raw = lookup(BIND_ADDR_VAR).unwrap_or_else(|| {
            tracing::warn!("{BIND_ADDR_VAR} not set; using default {DEFAULT_BIND_ADDR}");
            DEFAULT_BIND_ADDR.to_string()
        });

        let bind_addr = raw
            .parse()
            .with_context(|| format!("{BIND_ADDR_VAR} is not a socket address: '{raw}'"))?;

        Ok(Self { bind_addr })
    }
}
