//! Configuration type definitions

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::services::normalize_domain;
use crate::error::{RedeployError, RedeployResult};

use super::loader::{self, ConfigWarning};

/// TTL applied when a domain doesn't set one
pub const DEFAULT_TTL: u32 = 300;

/// Which state provider a workspace uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StateProviderKind {
    /// State file under the workspace directory only
    #[default]
    Local,
    /// Parameter store as source of truth, local file as cache
    Remote,
}

impl StateProviderKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" => Some(Self::Local),
            "remote" | "ssm" => Some(Self::Remote),
            _ => None,
        }
    }
}

/// State storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StateConfig {
    #[serde(default)]
    pub provider: StateProviderKind,

    /// Hidden workspace directory, relative to the workspace root
    #[serde(default = "default_state_directory")]
    pub directory: PathBuf,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            provider: StateProviderKind::default(),
            directory: default_state_directory(),
        }
    }
}

fn default_state_directory() -> PathBuf {
    PathBuf::from(".redeploy")
}

/// DNS vendor configured for a root domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DnsProviderKind {
    Hostinger,
    Route53,
    /// Recognized but not implemented, fails at reconciliation
    Cloudflare,
    /// No API calls, records are created by hand
    Manual,
    /// Caller supplies the provider
    Custom,
}

impl DnsProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hostinger => "hostinger",
            Self::Route53 => "route53",
            Self::Cloudflare => "cloudflare",
            Self::Manual => "manual",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for DnsProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// DNS settings for one root domain
///
/// Any key besides `provider` and `ttl` is a provider option
/// (`api_token_env`, `hosted_zone_id`, ...). Option values are strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DomainDnsConfig {
    pub provider: DnsProviderKind,

    #[serde(default)]
    pub ttl: Option<u32>,

    #[serde(flatten)]
    pub options: BTreeMap<String, String>,
}

impl DomainDnsConfig {
    pub fn new(provider: DnsProviderKind) -> Self {
        Self {
            provider,
            ttl: None,
            options: BTreeMap::new(),
        }
    }

    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn ttl(&self) -> u32 {
        self.ttl.unwrap_or(DEFAULT_TTL)
    }

    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }
}

/// Single-domain shape kept for older workspaces:
///
/// ```toml
/// [dns]
/// provider = "hostinger"
/// domain = "example.com"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LegacyDnsConfig {
    pub provider: DnsProviderKind,
    pub domain: String,
    #[serde(default)]
    pub ttl: Option<u32>,
    #[serde(flatten)]
    pub options: BTreeMap<String, String>,
}

/// Workspace DNS configuration, in either supported shape
///
/// Legacy form:
///   [dns]
///   provider = "hostinger"
///   domain = "example.com"
///
/// Multi-domain form:
///   [dns."example.com"]
///   provider = "hostinger"
///   [dns."example.io"]
///   provider = "route53"
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DnsConfig {
    Legacy(LegacyDnsConfig),
    Domains(BTreeMap<String, DomainDnsConfig>),
}

impl DnsConfig {
    /// Collapse either shape into a map keyed by normalized root domain
    pub fn normalize(&self) -> RedeployResult<DnsDomains> {
        let mut domains = DnsDomains::new();
        match self {
            DnsConfig::Legacy(legacy) => {
                domains.insert(
                    &legacy.domain,
                    DomainDnsConfig {
                        provider: legacy.provider,
                        ttl: legacy.ttl,
                        options: legacy.options.clone(),
                    },
                )?;
            }
            DnsConfig::Domains(map) => {
                for (domain, config) in map {
                    domains.insert(domain, config.clone())?;
                }
            }
        }
        Ok(domains)
    }
}

/// Normalized DNS configuration: root domain -> settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DnsDomains {
    domains: BTreeMap<String, DomainDnsConfig>,
}

impl DnsDomains {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root domain; two spellings of the same domain are rejected.
    pub fn insert(&mut self, domain: &str, config: DomainDnsConfig) -> RedeployResult<()> {
        let key = normalize_domain(domain);
        if key.is_empty() {
            return Err(RedeployError::Config {
                message: "DNS domain name is empty".to_string(),
            });
        }
        if self.domains.contains_key(&key) {
            return Err(RedeployError::Config {
                message: format!("DNS domain '{}' is configured more than once", key),
            });
        }
        self.domains.insert(key, config);
        Ok(())
    }

    pub fn with_domain(mut self, domain: &str, config: DomainDnsConfig) -> RedeployResult<Self> {
        self.insert(domain, config)?;
        Ok(self)
    }

    pub fn get(&self, domain: &str) -> Option<&DomainDnsConfig> {
        self.domains.get(domain)
    }

    /// Configured root domains, normalized
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.domains.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DomainDnsConfig)> {
        self.domains.iter().map(|(d, c)| (d.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

/// Main configuration structure (`redeploy.toml`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct Config {
    /// Workspace name, keys remote state
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub state: StateConfig,

    #[serde(default)]
    pub dns: Option<DnsConfig>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> RedeployResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> RedeployResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load `redeploy.toml` from the workspace root (defaults if absent),
    /// then apply environment overrides
    pub fn load_workspace(workspace_root: &Path) -> RedeployResult<(Self, Vec<ConfigWarning>)> {
        loader::load_workspace(workspace_root)
    }

    /// Apply environment variable overrides (REDEPLOY_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Workspace name, ignoring blank values
    pub fn workspace_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Normalized DNS domains (empty when no `[dns]` table)
    pub fn dns_domains(&self) -> RedeployResult<DnsDomains> {
        match &self.dns {
            Some(dns) => dns.normalize(),
            None => Ok(DnsDomains::new()),
        }
    }

    /// State directory resolved against the workspace root
    pub fn state_directory(&self, workspace_root: &Path) -> PathBuf {
        workspace_root.join(&self.state.directory)
    }
}
