//! DNS Event Port
//!
//! Observable interface for reconciliation and verification runs. The engine
//! never writes to the console itself; progress goes through a sink.

use std::net::Ipv4Addr;

use serde::Serialize;

use crate::domain::value_objects::DnsRecordType;

/// Event emitted during DNS reconciliation or verification
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DnsEvent {
    /// Deployment endpoint resolved
    ServerIpResolved { endpoint: String, ip: Ipv4Addr },

    /// Hostname matched no configured domain
    HostnameSkipped { app_name: String, hostname: String },

    /// Reconciliation of one root domain started
    DomainStarted {
        domain: String,
        provider: String,
        record_count: usize,
    },

    RecordUnchanged {
        domain: String,
        name: String,
        record_type: DnsRecordType,
    },

    RecordCreated {
        domain: String,
        name: String,
        record_type: DnsRecordType,
        value: String,
    },

    RecordUpdated {
        domain: String,
        name: String,
        record_type: DnsRecordType,
        previous: String,
        value: String,
    },

    RecordFailed {
        domain: String,
        name: String,
        record_type: DnsRecordType,
        error: String,
    },

    /// Domain uses manual DNS, records must be created by hand
    ManualSetupRequired { domain: String, record_count: usize },

    /// Fetching the zone failed, every record of the domain failed with it
    DomainFailed { domain: String, error: String },

    /// Reconciliation finished
    Completed {
        created: usize,
        existing: usize,
        failed: usize,
        manual: usize,
    },

    /// Hostname was already verified at this IP, lookup skipped
    VerificationCached { hostname: String, ip: Ipv4Addr },

    Verified { hostname: String, ip: Ipv4Addr },

    VerificationMismatch {
        hostname: String,
        expected: Ipv4Addr,
        actual: Ipv4Addr,
    },

    /// Lookup failed, propagation may still be in progress
    VerificationPending { hostname: String, error: String },
}

/// Trait for receiving DNS events
pub trait DnsEventSink: Send + Sync {
    /// Handle a DNS event
    fn on_event(&self, event: DnsEvent);

    /// Check if this sink wants per-record events
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DnsEventSink for NoopEventSink {
    fn on_event(&self, _event: DnsEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
