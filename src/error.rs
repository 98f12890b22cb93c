//! Error types for Redeploy
//!
//! Uses `thiserror` for library errors. Port-level errors live next to their
//! ports and convert into [`RedeployError`] with `?`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::{DnsProviderError, ResolveError, StateError};

/// Result type alias for Redeploy operations
pub type RedeployResult<T> = Result<T, RedeployError>;

/// Main error type for Redeploy operations
#[derive(Error, Debug)]
pub enum RedeployError {
    /// Workspace configuration is missing something required
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Workspace configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    ConfigParse { file: PathBuf, message: String },

    /// DNS provider tag is recognized but has no implementation
    #[error("DNS provider '{provider}' configured for {domain} is not implemented")]
    UnsupportedDnsProvider { domain: String, provider: String },

    /// DNS provider is implemented but its options are unusable
    #[error("DNS provider for {domain} is misconfigured: {message}")]
    ProviderConfig { domain: String, message: String },

    /// A get-or-create accessor was handed a value that disagrees with the stored one
    #[error("{resource} '{key}' is already provisioned as '{existing}', refusing to replace it with '{attempted}'")]
    ResourceConflict {
        resource: &'static str,
        key: String,
        existing: String,
        attempted: String,
    },

    /// Hostname is not under the root domain it was routed to
    #[error("hostname '{hostname}' is not under root domain '{root}'")]
    HostnameOutsideDomain { hostname: String, root: String },

    /// State storage failure
    #[error(transparent)]
    State(#[from] StateError),

    /// Forward DNS resolution failure
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// DNS provider API failure
    #[error(transparent)]
    DnsProvider(#[from] DnsProviderError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RedeployError {
    /// Configuration errors are raised before any remote side effect.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            RedeployError::Config { .. }
                | RedeployError::ConfigParse { .. }
                | RedeployError::UnsupportedDnsProvider { .. }
                | RedeployError::ProviderConfig { .. }
                | RedeployError::State(StateError::MissingWorkspaceName)
        )
    }
}
