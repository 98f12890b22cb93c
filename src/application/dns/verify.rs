//! DNS Verify Use Case
//!
//! Post-deploy propagation check. A hostname confirmed to resolve to the
//! server is cached in the deploy state with the IP it resolved to, so later
//! runs against the same IP skip the lookup. Mismatches and lookup failures
//! are reported but never cached.

use std::collections::BTreeMap;
use std::net::Ipv4Addr;
use std::sync::Arc;

use chrono::Utc;

use crate::domain::entities::DeployState;
use crate::domain::ports::{DnsEvent, DnsEventSink, HostResolver, NoopEventSink};

use super::result::{HostnameVerification, VerificationReport};

/// DNS verify use case
pub struct DnsVerifyUseCase {
    resolver: Arc<dyn HostResolver>,
    events: Arc<dyn DnsEventSink>,
}

impl DnsVerifyUseCase {
    pub fn new(resolver: Arc<dyn HostResolver>) -> Self {
        Self {
            resolver,
            events: Arc::new(NoopEventSink),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn DnsEventSink>) -> Self {
        self.events = events;
        self
    }

    /// Check every app hostname against `server_ip`.
    ///
    /// Only the verification cache of `state` is touched. Never fails: a
    /// hostname that doesn't resolve yet is reported as pending.
    pub async fn execute(
        &self,
        app_hostnames: &BTreeMap<String, String>,
        server_ip: Ipv4Addr,
        state: &mut DeployState,
    ) -> VerificationReport {
        let mut results = Vec::with_capacity(app_hostnames.len());
        for (app_name, hostname) in app_hostnames {
            results.push(self.verify_hostname(app_name, hostname, server_ip, state).await);
        }

        let report = VerificationReport { results };
        tracing::info!(
            verified = report.verified_count(),
            pending = report.pending_count(),
            "DNS verification finished"
        );
        report
    }

    async fn verify_hostname(
        &self,
        app_name: &str,
        hostname: &str,
        server_ip: Ipv4Addr,
        state: &mut DeployState,
    ) -> HostnameVerification {
        let mut verification = HostnameVerification {
            app_name: app_name.to_string(),
            hostname: hostname.to_string(),
            verified: false,
            skipped: false,
            resolved_ip: None,
            error: None,
        };

        if state.is_dns_verified(hostname, server_ip) {
            self.events.on_event(DnsEvent::VerificationCached {
                hostname: hostname.to_string(),
                ip: server_ip,
            });
            verification.verified = true;
            verification.skipped = true;
            verification.resolved_ip = Some(server_ip);
            return verification;
        }

        match self.resolver.resolve_ipv4(hostname).await {
            Ok(ip) if ip == server_ip => {
                state.set_dns_verified(hostname, server_ip, Utc::now());
                self.events.on_event(DnsEvent::Verified {
                    hostname: hostname.to_string(),
                    ip,
                });
                verification.verified = true;
                verification.resolved_ip = Some(ip);
            }
            Ok(ip) => {
                self.events.on_event(DnsEvent::VerificationMismatch {
                    hostname: hostname.to_string(),
                    expected: server_ip,
                    actual: ip,
                });
                verification.resolved_ip = Some(ip);
                verification.error = Some(format!("resolves to {}, expected {}", ip, server_ip));
            }
            Err(e) => {
                tracing::debug!(%hostname, error = %e, "hostname not resolving yet");
                self.events.on_event(DnsEvent::VerificationPending {
                    hostname: hostname.to_string(),
                    error: e.to_string(),
                });
                verification.error = Some(e.to_string());
            }
        }
        verification
    }
}
