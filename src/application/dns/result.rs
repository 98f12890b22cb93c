//! DNS Results
//!
//! Result types for reconciliation and verification runs.

use std::net::Ipv4Addr;

use chrono::{DateTime, Utc};

use crate::domain::entities::{DeployState, DnsRecordEntry, RecordOutcome, RequiredDnsRecord};

/// Per-domain counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainSummary {
    pub domain: String,
    /// Provider name, `manual` for manually managed domains
    pub provider: String,
    pub created: usize,
    pub existing: usize,
    pub failed: usize,
    pub manual: usize,
    /// Set when the zone itself couldn't be read
    pub error: Option<String>,
}

impl DomainSummary {
    pub(crate) fn from_records(
        domain: &str,
        provider: &str,
        records: &[RequiredDnsRecord],
        error: Option<String>,
    ) -> Self {
        Self {
            domain: domain.to_string(),
            provider: provider.to_string(),
            created: records.iter().filter(|r| r.created()).count(),
            existing: records.iter().filter(|r| r.existed()).count(),
            failed: records.iter().filter(|r| r.error().is_some()).count(),
            manual: records
                .iter()
                .filter(|r| matches!(r.outcome, RecordOutcome::Manual))
                .count(),
            error,
        }
    }
}

/// A hostname no configured domain matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedHostname {
    pub app_name: String,
    pub hostname: String,
}

/// Result of a reconciliation run
#[derive(Debug, Clone)]
pub struct DnsReconcileResult {
    pub server_ip: Ipv4Addr,
    /// Every routed record with its outcome, grouped by domain
    pub records: Vec<RequiredDnsRecord>,
    pub domains: Vec<DomainSummary>,
    pub skipped_hostnames: Vec<SkippedHostname>,
}

impl DnsReconcileResult {
    /// True only if no record carries an error
    pub fn success(&self) -> bool {
        self.records.iter().all(|r| r.error().is_none())
    }

    pub fn created_count(&self) -> usize {
        self.records.iter().filter(|r| r.created()).count()
    }

    pub fn existing_count(&self) -> usize {
        self.records.iter().filter(|r| r.existed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.records.iter().filter(|r| r.error().is_some()).count()
    }

    /// Records an operator must create by hand (manual domains and failures)
    pub fn manual_records(&self) -> impl Iterator<Item = &RequiredDnsRecord> {
        self.records.iter().filter(|r| r.needs_manual_setup())
    }

    /// Track created and updated records in the state's DNS ledger.
    ///
    /// An updated record keeps the `createdAt` of its ledger entry.
    pub fn record_ledger(&self, state: &mut DeployState, at: DateTime<Utc>) {
        for record in &self.records {
            if !matches!(
                record.outcome,
                RecordOutcome::Created | RecordOutcome::Updated { .. }
            ) {
                continue;
            }
            let created_at = state
                .dns_record(&record.subdomain, record.record_type)
                .filter(|entry| entry.domain == record.domain)
                .map(|entry| entry.created_at)
                .unwrap_or(at);
            state.set_dns_record(DnsRecordEntry {
                domain: record.domain.clone(),
                name: record.subdomain.clone(),
                record_type: record.record_type,
                value: record.value.clone(),
                ttl: record.ttl,
                created_at,
            });
        }
    }
}

/// Outcome of verifying one hostname
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostnameVerification {
    pub app_name: String,
    pub hostname: String,
    pub verified: bool,
    /// Cache hit, no lookup performed
    pub skipped: bool,
    pub resolved_ip: Option<Ipv4Addr>,
    pub error: Option<String>,
}

/// Result of a verification pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationReport {
    pub results: Vec<HostnameVerification>,
}

impl VerificationReport {
    pub fn verified_count(&self) -> usize {
        self.results.iter().filter(|r| r.verified).count()
    }

    /// Hostnames not yet resolving to the server
    pub fn pending_count(&self) -> usize {
        self.results.iter().filter(|r| !r.verified).count()
    }

    pub fn all_verified(&self) -> bool {
        self.pending_count() == 0
    }
}
