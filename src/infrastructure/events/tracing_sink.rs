//! Tracing Event Sink
//!
//! Forwards DNS events as structured `tracing` records, for hosts that
//! already install a subscriber.

use crate::domain::ports::{DnsEvent, DnsEventSink};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl DnsEventSink for TracingEventSink {
    fn on_event(&self, event: DnsEvent) {
        match event {
            DnsEvent::ServerIpResolved { endpoint, ip } => {
                tracing::info!(%endpoint, %ip, "server IP resolved");
            }
            DnsEvent::HostnameSkipped { app_name, hostname } => {
                tracing::warn!(%app_name, %hostname, "no DNS domain configured for hostname, skipping");
            }
            DnsEvent::DomainStarted {
                domain,
                provider,
                record_count,
            } => {
                tracing::info!(%domain, %provider, record_count, "reconciling domain");
            }
            DnsEvent::RecordUnchanged {
                domain,
                name,
                record_type,
            } => {
                tracing::debug!(%domain, %name, %record_type, "record unchanged");
            }
            DnsEvent::RecordCreated {
                domain,
                name,
                record_type,
                value,
            } => {
                tracing::info!(%domain, %name, %record_type, %value, "record created");
            }
            DnsEvent::RecordUpdated {
                domain,
                name,
                record_type,
                previous,
                value,
            } => {
                tracing::info!(%domain, %name, %record_type, %previous, %value, "record updated");
            }
            DnsEvent::RecordFailed {
                domain,
                name,
                record_type,
                error,
            } => {
                tracing::warn!(%domain, %name, %record_type, %error, "record failed");
            }
            DnsEvent::ManualSetupRequired {
                domain,
                record_count,
            } => {
                tracing::info!(%domain, record_count, "manual DNS setup required");
            }
            DnsEvent::DomainFailed { domain, error } => {
                tracing::warn!(%domain, %error, "domain reconciliation failed");
            }
            DnsEvent::Completed {
                created,
                existing,
                failed,
                manual,
            } => {
                tracing::info!(created, existing, failed, manual, "DNS reconciliation complete");
            }
            DnsEvent::VerificationCached { hostname, ip } => {
                tracing::debug!(%hostname, %ip, "DNS already verified");
            }
            DnsEvent::Verified { hostname, ip } => {
                tracing::info!(%hostname, %ip, "DNS verified");
            }
            DnsEvent::VerificationMismatch {
                hostname,
                expected,
                actual,
            } => {
                tracing::warn!(%hostname, %expected, %actual, "DNS resolves to a different address");
            }
            DnsEvent::VerificationPending { hostname, error } => {
                tracing::info!(%hostname, %error, "DNS not propagated yet");
            }
        }
    }
}
