//! DNS use cases: reconciliation and propagation verification

mod reconcile;
mod result;
#[cfg(test)]
mod testing;
mod verify;

pub use reconcile::DnsReconcileUseCase;
pub use result::{
    DnsReconcileResult, DomainSummary, HostnameVerification, SkippedHostname, VerificationReport,
};
pub use verify::DnsVerifyUseCase;
