//! Domain Services
//!
//! Pure business logic services that operate on domain entities.
//! These services have no I/O dependencies and are easily testable.

mod domain_router;
mod record_planner;

pub use domain_router::{
    extract_subdomain, find_root_domain, group_hostnames_by_domain, normalize_domain,
    DomainRouting, RoutedHostname, APEX,
};
pub use record_planner::{plan_record_change, RecordChange};
