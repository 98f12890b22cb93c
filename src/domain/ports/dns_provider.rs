//! DnsProvider port - one DNS vendor's record API
//!
//! Every vendor (Hostinger, Route53, or a caller-supplied implementation)
//! normalises its record sets into [`DnsRecord`] so reconciliation works with
//! a single shape. Names are relative to the zone, `@` is the apex.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::value_objects::DnsRecordType;

/// An existing record set as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: DnsRecordType,
    pub ttl: u32,
    pub values: Vec<String>,
}

impl DnsRecord {
    /// First value of the set, the one reconciliation compares against
    pub fn first_value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }
}

/// A single-value record set to create or replace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: DnsRecordType,
    pub ttl: u32,
    pub value: String,
}

/// What the provider did with one [`UpsertRecord`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertResult {
    pub record: UpsertRecord,
    /// No record of that name and type existed before
    pub created: bool,
    /// The record already held the desired value, nothing was sent
    pub unchanged: bool,
}

#[derive(Debug, Error)]
pub enum DnsProviderError {
    /// Transport-level failure
    #[error("{provider} request failed: {message}")]
    Request { provider: String, message: String },

    /// Non-success HTTP status
    #[error("{provider} API returned {status}: {message}")]
    Api {
        provider: String,
        status: u16,
        message: String,
    },

    /// Response body didn't match the expected shape
    #[error("{provider} returned an unexpected response: {message}")]
    InvalidResponse { provider: String, message: String },

    /// Zone doesn't exist in the provider account
    #[error("{provider} has no zone for {domain}")]
    ZoneNotFound { provider: String, domain: String },
}

/// Trait that every DNS vendor client implements
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Short vendor name for reporting
    fn name(&self) -> &str;

    /// All record sets in the zone for `domain`
    async fn get_records(&self, domain: &str) -> Result<Vec<DnsRecord>, DnsProviderError>;

    /// Create or replace record sets, one result per input record
    async fn upsert_records(
        &self,
        domain: &str,
        records: &[UpsertRecord],
    ) -> Result<Vec<UpsertResult>, DnsProviderError>;
}
