//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod record_type;
mod secret;
mod stage;

pub use record_type::DnsRecordType;
pub use secret::{generate_secret, SECRET_BYTES};
pub use stage::stage_name_problem;
