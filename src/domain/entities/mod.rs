//! Domain Entities
//!
//! - `DeployState` - Everything provisioned for one stage
//! - `RequiredDnsRecord` - A desired DNS record and its reconciliation outcome

mod deploy_state;
mod dns_record;

pub use deploy_state::{
    dns_record_key, AppCredentials, BackupState, DeployState, DnsRecordEntry, DnsVerification,
    ServiceIds,
};
pub use dns_record::{RecordOutcome, RequiredDnsRecord};
