//! System DNS resolver
//!
//! IPv4 forward resolution through the system resolver configuration.

use std::net::{IpAddr, Ipv4Addr};

use async_trait::async_trait;
use reqwest::Url;
use trust_dns_resolver::error::ResolveErrorKind;
use trust_dns_resolver::TokioAsyncResolver;

use crate::domain::ports::{HostResolver, ResolveError};

pub struct SystemResolver {
    resolver: TokioAsyncResolver,
}

impl SystemResolver {
    /// Resolver configured from `/etc/resolv.conf` (or the platform equivalent)
    pub fn from_system_conf() -> Result<Self, ResolveError> {
        let resolver =
            TokioAsyncResolver::tokio_from_system_conf().map_err(|e| ResolveError::Lookup {
                host: "<system resolver>".to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { resolver })
    }
}

#[async_trait]
impl HostResolver for SystemResolver {
    async fn resolve_ipv4(&self, host: &str) -> Result<Ipv4Addr, ResolveError> {
        if let Ok(ip) = host.parse::<Ipv4Addr>() {
            return Ok(ip);
        }

        let lookup = self.resolver.lookup_ip(host).await.map_err(|e| {
            if matches!(e.kind(), ResolveErrorKind::NoRecordsFound { .. }) {
                ResolveError::NotFound {
                    host: host.to_string(),
                }
            } else {
                ResolveError::Lookup {
                    host: host.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        lookup
            .iter()
            .find_map(|ip| match ip {
                IpAddr::V4(v4) => Some(v4),
                IpAddr::V6(_) => None,
            })
            .ok_or_else(|| ResolveError::NotFound {
                host: host.to_string(),
            })
    }
}

/// Host part of a deployment endpoint.
///
/// Accepts full URLs (`https://deploy.example.com:8443/api`) and bare hosts
/// with an optional port (`203.0.113.7:3000`).
pub fn endpoint_host(endpoint: &str) -> Result<String, ResolveError> {
    let trimmed = endpoint.trim();
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    Url::parse(&with_scheme)
        .ok()
        .and_then(|url| url.host_str().map(|h| h.trim_matches(&['[', ']'][..]).to_string()))
        .filter(|host| !host.is_empty())
        .ok_or_else(|| ResolveError::Lookup {
            host: endpoint.to_string(),
            message: "endpoint has no host".to_string(),
        })
}
