//! Event Sink Implementations
//!
//! Concrete implementations of DnsEventSink:
//! - JsonEventSink: NDJSON output for CI/automation
//! - TracingEventSink: structured `tracing` records

mod json;
mod tracing_sink;

pub use json::JsonEventSink;
pub use tracing_sink::TracingEventSink;
