//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DnsReconcileUseCase` - Points app hostnames at the server across every configured domain
//! - `DnsVerifyUseCase` - Confirms propagation and maintains the verification cache

pub mod dns;

pub use dns::{
    DnsReconcileResult, DnsReconcileUseCase, DnsVerifyUseCase, DomainSummary,
    HostnameVerification, SkippedHostname, VerificationReport,
};
