//! Configuration module for Redeploy
//!
//! Configuration hierarchy:
//! 1. Environment variables (REDEPLOY_*, highest priority)
//! 2. Workspace config (`redeploy.toml`)
//! 3. Built-in defaults (lowest priority)

mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use loader::{ConfigWarning, CONFIG_FILE_NAME};
pub use types::{
    Config, DnsConfig, DnsDomains, DnsProviderKind, DomainDnsConfig, LegacyDnsConfig,
    StateConfig, StateProviderKind, DEFAULT_TTL,
};
