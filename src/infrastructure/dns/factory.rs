//! DNS provider factory
//!
//! Maps a domain's configured provider tag to a concrete client.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{DnsProviderKind, DomainDnsConfig};
use crate::domain::ports::DnsProvider;
use crate::domain::services::normalize_domain;
use crate::error::{RedeployError, RedeployResult};

use super::hostinger::HostingerProvider;
use super::route53::{Route53Api, Route53Provider};

/// Env var holding the Hostinger token unless `api_token_env` names another
pub const DEFAULT_HOSTINGER_TOKEN_ENV: &str = "HOSTINGER_API_TOKEN";

#[derive(Default)]
pub struct DnsProviderFactory {
    overrides: HashMap<String, Arc<dyn DnsProvider>>,
    route53_api: Option<Arc<dyn Route53Api>>,
}

impl DnsProviderFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `provider` for `domain` whatever its configured kind (except manual)
    pub fn with_provider(mut self, domain: &str, provider: Arc<dyn DnsProvider>) -> Self {
        self.overrides.insert(normalize_domain(domain), provider);
        self
    }

    /// Signed Route53 client used for every `route53` domain
    pub fn with_route53_api(mut self, api: Arc<dyn Route53Api>) -> Self {
        self.route53_api = Some(api);
        self
    }

    /// Provider for `domain`, `None` for manually managed domains.
    ///
    /// Fails for recognized but unimplemented providers and for unusable
    /// provider options; nothing is contacted here.
    pub fn create(
        &self,
        domain: &str,
        config: &DomainDnsConfig,
    ) -> RedeployResult<Option<Arc<dyn DnsProvider>>> {
        if config.provider == DnsProviderKind::Manual {
            return Ok(None);
        }
        if let Some(provider) = self.overrides.get(&normalize_domain(domain)) {
            return Ok(Some(provider.clone()));
        }

        let provider: Arc<dyn DnsProvider> = match config.provider {
            DnsProviderKind::Manual => return Ok(None),
            DnsProviderKind::Hostinger => {
                let token = hostinger_token(domain, config)?;
                Arc::new(match config.option("base_url") {
                    Some(base_url) => HostingerProvider::with_base_url(token, base_url),
                    None => HostingerProvider::new(token),
                })
            }
            DnsProviderKind::Route53 => {
                let zone = config
                    .option("hosted_zone_id")
                    .ok_or_else(|| provider_config(domain, "route53 requires hosted_zone_id"))?;
                let api = self.route53_api.clone().ok_or_else(|| {
                    provider_config(domain, "no Route53 API client was supplied")
                })?;
                Arc::new(Route53Provider::new(api, zone))
            }
            DnsProviderKind::Cloudflare => {
                return Err(RedeployError::UnsupportedDnsProvider {
                    domain: domain.to_string(),
                    provider: config.provider.to_string(),
                })
            }
            DnsProviderKind::Custom => {
                return Err(provider_config(
                    domain,
                    "custom provider requires a caller-supplied implementation",
                ))
            }
        };

        Ok(Some(provider))
    }
}

fn provider_config(domain: &str, message: &str) -> RedeployError {
    RedeployError::ProviderConfig {
        domain: domain.to_string(),
        message: message.to_string(),
    }
}

fn hostinger_token(domain: &str, config: &DomainDnsConfig) -> RedeployResult<String> {
    if let Some(token) = config.option("api_token").filter(|t| !t.is_empty()) {
        return Ok(token.to_string());
    }
    let var = config
        .option("api_token_env")
        .unwrap_or(DEFAULT_HOSTINGER_TOKEN_ENV);
    match std::env::var(var) {
        Ok(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(provider_config(
            domain,
            &format!("hostinger API token not found (set {})", var),
        )),
    }
}
