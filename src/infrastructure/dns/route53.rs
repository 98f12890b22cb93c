//! Route53 DNS provider.
//!
//! Route53 speaks in fully-qualified record-set names (`api.example.com.`,
//! wildcards escaped as `\052`). This provider translates them to and from
//! zone-relative names. Request signing and transport belong to the
//! [`Route53Api`] implementation handed in by the caller.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{DnsProvider, DnsProviderError, DnsRecord, UpsertRecord, UpsertResult};
use crate::domain::services::{normalize_domain, APEX};
use crate::domain::value_objects::DnsRecordType;

const PROVIDER: &str = "route53";

/// A record set as Route53 reports it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecordSet {
    /// Fully-qualified, usually with a trailing dot
    pub name: String,
    /// Raw type string (`A`, `SOA`, ...)
    pub record_type: String,
    /// Absent for alias records
    pub ttl: Option<u32>,
    pub values: Vec<String>,
}

/// Signed Route53 API calls for one hosted zone
#[async_trait]
pub trait Route53Api: Send + Sync {
    async fn list_resource_record_sets(
        &self,
        hosted_zone_id: &str,
    ) -> Result<Vec<ResourceRecordSet>, DnsProviderError>;

    /// Submit one change batch of UPSERT actions
    async fn upsert_resource_record_sets(
        &self,
        hosted_zone_id: &str,
        record_sets: &[ResourceRecordSet],
    ) -> Result<(), DnsProviderError>;
}

pub struct Route53Provider {
    api: Arc<dyn Route53Api>,
    hosted_zone_id: String,
}

impl Route53Provider {
    pub fn new(api: Arc<dyn Route53Api>, hosted_zone_id: impl Into<String>) -> Self {
        Self {
            api,
            hosted_zone_id: hosted_zone_id.into(),
        }
    }
}

/// Zone-relative name for a Route53 record-set name, `None` when outside the zone
pub fn relative_name(fqdn: &str, domain: &str) -> Option<String> {
    let name = normalize_domain(&fqdn.replace("\\052", "*"));
    let domain = normalize_domain(domain);
    if name == domain {
        return Some(APEX.to_string());
    }
    name.strip_suffix(&domain)
        .and_then(|prefix| prefix.strip_suffix('.'))
        .filter(|prefix| !prefix.is_empty())
        .map(String::from)
}

/// Route53 record-set name for a zone-relative name
pub fn fqdn(name: &str, domain: &str) -> String {
    let domain = normalize_domain(domain);
    if name == APEX || name.is_empty() {
        format!("{}.", domain)
    } else {
        format!("{}.{}.", name, domain)
    }
}

#[async_trait]
impl DnsProvider for Route53Provider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn get_records(&self, domain: &str) -> Result<Vec<DnsRecord>, DnsProviderError> {
        let sets = self
            .api
            .list_resource_record_sets(&self.hosted_zone_id)
            .await?;

        Ok(sets
            .into_iter()
            .filter_map(|set| {
                let record_type = set.record_type.parse::<DnsRecordType>().ok()?;
                let name = relative_name(&set.name, domain)?;
                Some(DnsRecord {
                    name,
                    record_type,
                    ttl: set.ttl.unwrap_or_default(),
                    values: set.values,
                })
            })
            .collect())
    }

    async fn upsert_records(
        &self,
        domain: &str,
        records: &[UpsertRecord],
    ) -> Result<Vec<UpsertResult>, DnsProviderError> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let existing = self.get_records(domain).await?;

        let mut results = Vec::with_capacity(records.len());
        let mut changes = Vec::new();
        for record in records {
            let current = existing
                .iter()
                .find(|r| {
                    r.record_type == record.record_type && r.name.eq_ignore_ascii_case(&record.name)
                });
            let unchanged = current
                .and_then(DnsRecord::first_value)
                .is_some_and(|v| v == record.value);

            if !unchanged {
                changes.push(ResourceRecordSet {
                    name: fqdn(&record.name, domain),
                    record_type: record.record_type.to_string(),
                    ttl: Some(record.ttl),
                    values: vec![record.value.clone()],
                });
            }
            results.push(UpsertResult {
                record: record.clone(),
                created: current.is_none(),
                unchanged,
            });
        }

        if !changes.is_empty() {
            self.api
                .upsert_resource_record_sets(&self.hosted_zone_id, &changes)
                .await?;
            tracing::debug!(domain, count = changes.len(), zone = %self.hosted_zone_id, "route53 change batch submitted");
        }

        Ok(results)
    }
}
