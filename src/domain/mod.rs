//! Domain Layer
//!
//! Deployment state and DNS reconciliation rules without I/O.
//!
//! ## Structure
//!
//! - `entities/` - DeployState, RequiredDnsRecord
//! - `value_objects/` - Record types, stage names, secrets
//! - `services/` - Root-domain routing, record change planning
//! - `ports/` - State, parameter store, DNS provider, resolver and event traits
//!
//! Infrastructure implements the ports; nothing here touches the file system
//! or the network directly.

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
