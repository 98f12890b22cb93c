//! DNS Reconcile Use Case
//!
//! Orchestrates a reconciliation run:
//! 1. Resolve the server IP once (the whole run fails without it)
//! 2. Route hostnames to their most specific root domain
//! 3. Build every domain's provider before contacting any of them
//! 4. Per domain: fetch the zone once, diff, upsert only what changed
//! 5. Aggregate outcomes
//!
//! Domains are processed one after another. A provider failure is recorded on
//! that domain's records and never stops the other domains.

use std::collections::BTreeMap;
use std::net::Ipv4Addr;
use std::sync::Arc;

use crate::config::{DnsDomains, DomainDnsConfig};
use crate::domain::entities::{RecordOutcome, RequiredDnsRecord};
use crate::domain::ports::{
    DnsEvent, DnsEventSink, DnsProvider, HostResolver, NoopEventSink, UpsertRecord,
};
use crate::domain::services::{
    group_hostnames_by_domain, plan_record_change, RecordChange, RoutedHostname,
};
use crate::domain::value_objects::DnsRecordType;
use crate::error::{RedeployError, RedeployResult};
use crate::infrastructure::dns::DnsProviderFactory;
use crate::infrastructure::resolver::endpoint_host;

use super::result::{DnsReconcileResult, DomainSummary, SkippedHostname};

/// DNS reconcile use case
pub struct DnsReconcileUseCase {
    factory: DnsProviderFactory,
    resolver: Arc<dyn HostResolver>,
    events: Arc<dyn DnsEventSink>,
}

/// A domain ready to reconcile: its settings and provider (none when manual)
struct DomainPlan<'a> {
    domain: String,
    config: &'a DomainDnsConfig,
    provider: Option<Arc<dyn DnsProvider>>,
    hostnames: Vec<RoutedHostname>,
}

impl DnsReconcileUseCase {
    pub fn new(factory: DnsProviderFactory, resolver: Arc<dyn HostResolver>) -> Self {
        Self {
            factory,
            resolver,
            events: Arc::new(NoopEventSink),
        }
    }

    /// Report progress to `events`
    pub fn with_events(mut self, events: Arc<dyn DnsEventSink>) -> Self {
        self.events = events;
        self
    }

    /// Resolve the deployment endpoint's IPv4 address
    pub async fn resolve_server_ip(&self, endpoint: &str) -> RedeployResult<Ipv4Addr> {
        let host = endpoint_host(endpoint)?;
        let ip = self.resolver.resolve_ipv4(&host).await?;
        self.events.on_event(DnsEvent::ServerIpResolved {
            endpoint: endpoint.to_string(),
            ip,
        });
        Ok(ip)
    }

    /// Point every app hostname at the deployment endpoint
    pub async fn execute(
        &self,
        app_hostnames: &BTreeMap<String, String>,
        domains: &DnsDomains,
        endpoint: &str,
    ) -> RedeployResult<DnsReconcileResult> {
        let server_ip = self.resolve_server_ip(endpoint).await?;
        self.reconcile(app_hostnames, domains, server_ip).await
    }

    /// Point every app hostname at `server_ip`
    pub async fn reconcile(
        &self,
        app_hostnames: &BTreeMap<String, String>,
        domains: &DnsDomains,
        server_ip: Ipv4Addr,
    ) -> RedeployResult<DnsReconcileResult> {
        let routing = group_hostnames_by_domain(app_hostnames, domains.names())?;

        let mut skipped_hostnames = Vec::with_capacity(routing.unmatched.len());
        for (app_name, hostname) in routing.unmatched {
            tracing::warn!(%app_name, %hostname, "no DNS domain configured for hostname");
            self.events.on_event(DnsEvent::HostnameSkipped {
                app_name: app_name.clone(),
                hostname: hostname.clone(),
            });
            skipped_hostnames.push(SkippedHostname { app_name, hostname });
        }

        // Configuration errors surface before any provider is contacted
        let mut plans = Vec::with_capacity(routing.groups.len());
        for (domain, hostnames) in routing.groups {
            let config = domains.get(&domain).ok_or_else(|| RedeployError::Config {
                message: format!("no DNS configuration for {}", domain),
            })?;
            let provider = self.factory.create(&domain, config)?;
            plans.push(DomainPlan {
                domain,
                config,
                provider,
                hostnames,
            });
        }

        let value = server_ip.to_string();
        let mut records = Vec::new();
        let mut summaries = Vec::with_capacity(plans.len());
        for plan in plans {
            let (summary, domain_records) = self.reconcile_domain(plan, &value).await;
            summaries.push(summary);
            records.extend(domain_records);
        }

        let result = DnsReconcileResult {
            server_ip,
            records,
            domains: summaries,
            skipped_hostnames,
        };
        self.events.on_event(DnsEvent::Completed {
            created: result.created_count(),
            existing: result.existing_count(),
            failed: result.failed_count(),
            manual: result
                .records
                .iter()
                .filter(|r| matches!(r.outcome, RecordOutcome::Manual))
                .count(),
        });
        Ok(result)
    }

    async fn reconcile_domain(
        &self,
        plan: DomainPlan<'_>,
        value: &str,
    ) -> (DomainSummary, Vec<RequiredDnsRecord>) {
        let DomainPlan {
            domain,
            config,
            provider,
            hostnames,
        } = plan;

        let mut records: Vec<RequiredDnsRecord> = hostnames
            .into_iter()
            .map(|routed| RequiredDnsRecord {
                hostname: routed.hostname,
                domain: domain.clone(),
                subdomain: routed.subdomain,
                record_type: DnsRecordType::A,
                value: value.to_string(),
                ttl: config.ttl(),
                app_name: routed.app_name,
                outcome: RecordOutcome::Pending,
            })
            .collect();

        let Some(provider) = provider else {
            for record in &mut records {
                record.outcome = RecordOutcome::Manual;
            }
            self.events.on_event(DnsEvent::ManualSetupRequired {
                domain: domain.clone(),
                record_count: records.len(),
            });
            let summary = DomainSummary::from_records(&domain, "manual", &records, None);
            return (summary, records);
        };

        self.events.on_event(DnsEvent::DomainStarted {
            domain: domain.clone(),
            provider: provider.name().to_string(),
            record_count: records.len(),
        });

        // One snapshot per domain; every decision below is made against it
        let existing = match provider.get_records(&domain).await {
            Ok(existing) => existing,
            Err(e) => {
                let message = e.to_string();
                for record in &mut records {
                    record.fail(message.clone());
                }
                self.events.on_event(DnsEvent::DomainFailed {
                    domain: domain.clone(),
                    error: message.clone(),
                });
                let summary =
                    DomainSummary::from_records(&domain, provider.name(), &records, Some(message));
                return (summary, records);
            }
        };

        let mut batch: Vec<(usize, RecordChange)> = Vec::new();
        for (index, record) in records.iter_mut().enumerate() {
            let change = plan_record_change(
                &existing,
                &record.subdomain,
                record.record_type,
                &record.value,
            );
            tracing::debug!(%domain, name = %record.subdomain, ?change, "planned record");
            if change.needs_upsert() {
                batch.push((index, change));
            } else {
                record.outcome = RecordOutcome::Unchanged;
                self.emit_detail(DnsEvent::RecordUnchanged {
                    domain: domain.clone(),
                    name: record.subdomain.clone(),
                    record_type: record.record_type,
                });
            }
        }

        if !batch.is_empty() {
            // Apps sharing a hostname need the record once and share its outcome
            let mut upserts: Vec<UpsertRecord> = Vec::with_capacity(batch.len());
            for (index, _) in &batch {
                let record = &records[*index];
                let queued = upserts.iter().any(|u| {
                    u.record_type == record.record_type
                        && u.name.eq_ignore_ascii_case(&record.subdomain)
                });
                if !queued {
                    upserts.push(UpsertRecord {
                        name: record.subdomain.clone(),
                        record_type: record.record_type,
                        ttl: record.ttl,
                        value: record.value.clone(),
                    });
                }
            }

            match provider.upsert_records(&domain, &upserts).await {
                // Outcomes follow the plan made against the snapshot above
                Ok(_) => {
                    for (index, change) in batch {
                        let record = &mut records[index];
                        record.outcome = match change {
                            RecordChange::Update { previous } => RecordOutcome::Updated { previous },
                            _ => RecordOutcome::Created,
                        };
                        self.emit_record_outcome(&domain, record);
                    }
                }
                Err(e) => {
                    let message = e.to_string();
                    for (index, _) in batch {
                        let record = &mut records[index];
                        record.fail(message.clone());
                        self.emit_detail(DnsEvent::RecordFailed {
                            domain: domain.clone(),
                            name: record.subdomain.clone(),
                            record_type: record.record_type,
                            error: message.clone(),
                        });
                    }
                }
            }
        }

        let summary = DomainSummary::from_records(&domain, provider.name(), &records, None);
        (summary, records)
    }

    fn emit_record_outcome(&self, domain: &str, record: &RequiredDnsRecord) {
        let event = match &record.outcome {
            RecordOutcome::Created => DnsEvent::RecordCreated {
                domain: domain.to_string(),
                name: record.subdomain.clone(),
                record_type: record.record_type,
                value: record.value.clone(),
            },
            RecordOutcome::Updated { previous } => DnsEvent::RecordUpdated {
                domain: domain.to_string(),
                name: record.subdomain.clone(),
                record_type: record.record_type,
                previous: previous.clone(),
                value: record.value.clone(),
            },
            _ => DnsEvent::RecordUnchanged {
                domain: domain.to_string(),
                name: record.subdomain.clone(),
                record_type: record.record_type,
            },
        };
        self.emit_detail(event);
    }

    fn emit_detail(&self, event: DnsEvent) {
        if self.events.wants_detailed_events() {
            self.events.on_event(event);
        }
    }
}
