//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod dns_events;
pub mod dns_provider;
pub mod parameter_store;
pub mod resolver;
pub mod state_provider;

pub use dns_events::{DnsEvent, DnsEventSink, NoopEventSink};
pub use dns_provider::{DnsProvider, DnsProviderError, DnsRecord, UpsertRecord, UpsertResult};
pub use parameter_store::{ParameterStore, ParameterStoreError};
pub use resolver::{HostResolver, ResolveError};
pub use state_provider::{ensure_stage, StateError, StateProvider};
