//! RequiredDnsRecord entity - one desired record and what happened to it

use serde::Serialize;

use crate::domain::value_objects::DnsRecordType;

/// Outcome of reconciling a single record
///
/// A single enum keeps the outcome flags mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecordOutcome {
    /// Not reconciled yet
    Pending,
    /// Existing record already had the desired value
    Unchanged,
    /// No record of that name and type existed
    Created,
    /// Record existed with a different value and was overwritten
    Updated { previous: String },
    /// Domain is managed by hand
    Manual,
    /// Provider call failed
    Failed { error: String },
}

/// A record the deployment needs, derived from an app hostname
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredDnsRecord {
    pub hostname: String,
    pub domain: String,
    pub subdomain: String,
    #[serde(rename = "type")]
    pub record_type: DnsRecordType,
    pub value: String,
    pub ttl: u32,
    pub app_name: String,
    pub outcome: RecordOutcome,
}

impl RequiredDnsRecord {
    pub fn created(&self) -> bool {
        matches!(self.outcome, RecordOutcome::Created)
    }

    /// A record of this name and type was already there (possibly updated).
    pub fn existed(&self) -> bool {
        matches!(
            self.outcome,
            RecordOutcome::Unchanged | RecordOutcome::Updated { .. }
        )
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            RecordOutcome::Failed { error } => Some(error),
            _ => None,
        }
    }

    /// Records an operator has to set up by hand
    pub fn needs_manual_setup(&self) -> bool {
        matches!(
            self.outcome,
            RecordOutcome::Manual | RecordOutcome::Failed { .. }
        )
    }

    pub fn fail(&mut self, error: impl Into<String>) {
        self.outcome = RecordOutcome::Failed {
            error: error.into(),
        };
    }
}
