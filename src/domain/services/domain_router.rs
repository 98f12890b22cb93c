//! Root-domain routing
//!
//! Maps each app hostname to the most specific configured root domain and
//! derives the provider-facing record name. Pure functions, no I/O.

use std::collections::BTreeMap;

use crate::error::{RedeployError, RedeployResult};

/// Record name used for the zone apex
pub const APEX: &str = "@";

/// Canonical form of a domain or hostname: trimmed, lowercase, no trailing dot
pub fn normalize_domain(name: &str) -> String {
    name.trim().trim_end_matches('.').to_ascii_lowercase()
}

fn is_under(hostname: &str, domain: &str) -> bool {
    hostname == domain
        || (hostname.len() > domain.len()
            && hostname.ends_with(domain)
            && hostname.as_bytes()[hostname.len() - domain.len() - 1] == b'.')
}

/// The longest configured domain that `hostname` equals or is a subdomain of.
///
/// Matching is on label boundaries, so `exampletraflabs.io` is not under
/// `traflabs.io`.
pub fn find_root_domain<'a, I>(hostname: &str, domains: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let hostname = normalize_domain(hostname);
    domains
        .into_iter()
        .filter(|domain| is_under(&hostname, &normalize_domain(domain)))
        .max_by_key(|domain| normalize_domain(domain).len())
}

/// Provider-facing record name for `hostname` under `root` (`@` for the apex)
pub fn extract_subdomain(hostname: &str, root: &str) -> RedeployResult<String> {
    let host = normalize_domain(hostname);
    let root_norm = normalize_domain(root);

    if host == root_norm {
        return Ok(APEX.to_string());
    }
    if !is_under(&host, &root_norm) {
        return Err(RedeployError::HostnameOutsideDomain {
            hostname: hostname.to_string(),
            root: root.to_string(),
        });
    }

    Ok(host[..host.len() - root_norm.len() - 1].to_string())
}

/// An app hostname assigned to a root domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedHostname {
    pub app_name: String,
    pub hostname: String,
    pub subdomain: String,
}

/// Hostnames bucketed by root domain, plus the ones nothing matched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainRouting {
    pub groups: BTreeMap<String, Vec<RoutedHostname>>,
    /// `(app_name, hostname)` pairs with no configured root domain
    pub unmatched: Vec<(String, String)>,
}

/// Route every app hostname to its root domain
pub fn group_hostnames_by_domain<'a, I>(
    app_hostnames: &BTreeMap<String, String>,
    domains: I,
) -> RedeployResult<DomainRouting>
where
    I: IntoIterator<Item = &'a str>,
{
    let domains: Vec<&str> = domains.into_iter().collect();
    let mut routing = DomainRouting::default();

    for (app_name, hostname) in app_hostnames {
        match find_root_domain(hostname, domains.iter().copied()) {
            Some(root) => {
                let subdomain = extract_subdomain(hostname, root)?;
                routing
                    .groups
                    .entry(root.to_string())
                    .or_default()
                    .push(RoutedHostname {
                        app_name: app_name.clone(),
                        hostname: normalize_domain(hostname),
                        subdomain,
                    });
            }
            None => routing
                .unmatched
                .push((app_name.clone(), hostname.clone())),
        }
    }

    Ok(routing)
}
