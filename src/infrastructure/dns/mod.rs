//! DNS provider clients.
//!
//! Each sub-module implements the `DnsProvider` port for one vendor; the
//! factory picks one per root domain from the workspace configuration.

mod factory;
pub mod hostinger;
pub mod route53;

pub use factory::{DnsProviderFactory, DEFAULT_HOSTINGER_TOKEN_ENV};
pub use hostinger::{HostingerProvider, HOSTINGER_API_URL};
pub use route53::{ResourceRecordSet, Route53Api, Route53Provider};
