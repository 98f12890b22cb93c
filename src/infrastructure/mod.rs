//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Atomic local writes
//! - `state/` - State providers (local, remote, cached)
//! - `dns/` - DNS provider clients (Hostinger, Route53) and factory
//! - `events/` - Event sinks (JSON, tracing)
//! - `resolver` - System IPv4 resolver

pub mod dns;
pub mod events;
pub mod fs;
pub mod resolver;
pub mod state;

// Re-export for convenience
pub use dns::{DnsProviderFactory, HostingerProvider, Route53Api, Route53Provider};
pub use events::{JsonEventSink, TracingEventSink};
pub use resolver::{endpoint_host, SystemResolver};
pub use state::{CachedStateProvider, LocalStateProvider, RemoteStateProvider, StateDiff};
