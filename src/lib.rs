//! Redeploy - deployment state and DNS reconciliation engine
//!
//! Redeploy keeps the resources a multi-app workspace needs (application ids,
//! databases, caches, credentials, generated secrets, DNS records) consistent
//! across repeated, idempotent deploys. State for each stage lives in a local
//! JSON cache backed by an authoritative remote parameter store, and app
//! hostnames are reconciled against one DNS provider per root domain.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{
    DnsReconcileResult, DnsReconcileUseCase, DnsVerifyUseCase, VerificationReport,
};
pub use config::{Config, DnsDomains, DnsProviderKind, DomainDnsConfig};
pub use domain::entities::{DeployState, RecordOutcome, RequiredDnsRecord};
pub use domain::ports::{DnsEvent, DnsEventSink, DnsProvider, StateProvider};
pub use error::{RedeployError, RedeployResult};
pub use infrastructure::{
    CachedStateProvider, DnsProviderFactory, LocalStateProvider, RemoteStateProvider,
};
pub use presentation::{create_state_provider, SummaryRenderer};
