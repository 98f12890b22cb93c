//! Record change planning
//!
//! Decides, from one snapshot of a zone, whether a desired record needs an
//! upsert. Only the first value of an existing record set is compared.

use crate::domain::ports::DnsRecord;
use crate::domain::value_objects::DnsRecordType;

/// The action to take for a desired record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordChange {
    /// Existing record already holds the value
    Unchanged,
    /// No record of that name and type exists
    Create,
    /// Record exists with a different first value
    Update { previous: String },
}

impl RecordChange {
    pub fn needs_upsert(&self) -> bool {
        !matches!(self, RecordChange::Unchanged)
    }
}

/// Compare a desired record against the zone snapshot
pub fn plan_record_change(
    existing: &[DnsRecord],
    name: &str,
    record_type: DnsRecordType,
    value: &str,
) -> RecordChange {
    let current = existing
        .iter()
        .find(|record| record.record_type == record_type && record.name.eq_ignore_ascii_case(name));

    match current {
        None => RecordChange::Create,
        Some(record) => match record.first_value() {
            Some(first) if first == value => RecordChange::Unchanged,
            first => RecordChange::Update {
                previous: first.unwrap_or_default().to_string(),
            },
        },
    }
}
