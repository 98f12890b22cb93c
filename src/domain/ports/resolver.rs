//! HostResolver port - IPv4 forward resolution

use std::net::Ipv4Addr;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// Name exists nowhere or has no A record
    #[error("no IPv4 address found for {host}")]
    NotFound { host: String },

    /// Timeout, refused query, malformed endpoint
    #[error("failed to resolve {host}: {message}")]
    Lookup { host: String, message: String },
}

#[async_trait]
pub trait HostResolver: Send + Sync {
    /// First IPv4 address for `host`
    async fn resolve_ipv4(&self, host: &str) -> Result<Ipv4Addr, ResolveError>;
}
