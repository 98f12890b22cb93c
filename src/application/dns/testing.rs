//! Test doubles shared by the DNS use case tests

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{
    DnsProvider, DnsProviderError, DnsRecord, HostResolver, ResolveError, UpsertRecord,
    UpsertResult,
};
use crate::domain::value_objects::DnsRecordType;

/// In-memory zone with call counting and switchable failures
#[derive(Default)]
pub struct FakeDnsProvider {
    pub records: Mutex<Vec<DnsRecord>>,
    pub upserts: Mutex<Vec<UpsertRecord>>,
    pub get_calls: AtomicUsize,
    pub upsert_calls: AtomicUsize,
    pub fail_get: Mutex<Option<String>>,
    pub fail_upsert: Mutex<Option<String>>,
    /// Claim every upserted record was already in place
    pub report_unchanged: Mutex<bool>,
}

impl FakeDnsProvider {
    pub fn with_a(self, name: &str, value: &str) -> Self {
        self.records.lock().unwrap().push(DnsRecord {
            name: name.to_string(),
            record_type: DnsRecordType::A,
            ttl: 300,
            values: vec![value.to_string()],
        });
        self
    }

    pub fn failing_get(self, message: &str) -> Self {
        *self.fail_get.lock().unwrap() = Some(message.to_string());
        self
    }

    pub fn failing_upsert(self, message: &str) -> Self {
        *self.fail_upsert.lock().unwrap() = Some(message.to_string());
        self
    }

    pub fn reporting_unchanged(self) -> Self {
        *self.report_unchanged.lock().unwrap() = true;
        self
    }

    pub fn upserted_names(&self) -> Vec<String> {
        self.upserts
            .lock()
            .unwrap()
            .iter()
            .map(|u| u.name.clone())
            .collect()
    }

    fn error(message: &str) -> DnsProviderError {
        DnsProviderError::Api {
            provider: "fake".to_string(),
            status: 500,
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl DnsProvider for FakeDnsProvider {
    fn name(&self) -> &str {
        "fake"
    }

    async fn get_records(&self, _domain: &str) -> Result<Vec<DnsRecord>, DnsProviderError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.fail_get.lock().unwrap().as_deref() {
            return Err(Self::error(message));
        }
        Ok(self.records.lock().unwrap().clone())
    }

    async fn upsert_records(
        &self,
        _domain: &str,
        records: &[UpsertRecord],
    ) -> Result<Vec<UpsertResult>, DnsProviderError> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.fail_upsert.lock().unwrap().as_deref() {
            return Err(Self::error(message));
        }

        let report_unchanged = *self.report_unchanged.lock().unwrap();
        let mut zone = self.records.lock().unwrap();
        let mut results = Vec::new();
        for record in records {
            self.upserts.lock().unwrap().push(record.clone());
            let existing = zone
                .iter_mut()
                .find(|r| r.name == record.name && r.record_type == record.record_type);
            let created = existing.is_none();
            match existing {
                Some(r) => r.values = vec![record.value.clone()],
                None => zone.push(DnsRecord {
                    name: record.name.clone(),
                    record_type: record.record_type,
                    ttl: record.ttl,
                    values: vec![record.value.clone()],
                }),
            }
            results.push(UpsertResult {
                record: record.clone(),
                created: created && !report_unchanged,
                unchanged: report_unchanged,
            });
        }
        Ok(results)
    }
}

/// Resolver answering from a fixed table
#[derive(Default)]
pub struct FakeResolver {
    pub answers: Mutex<HashMap<String, Ipv4Addr>>,
    pub calls: AtomicUsize,
}

impl FakeResolver {
    pub fn with(self, host: &str, ip: Ipv4Addr) -> Self {
        self.answers.lock().unwrap().insert(host.to_string(), ip);
        self
    }

    pub fn set(&self, host: &str, ip: Ipv4Addr) {
        self.answers.lock().unwrap().insert(host.to_string(), ip);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HostResolver for FakeResolver {
    async fn resolve_ipv4(&self, host: &str) -> Result<Ipv4Addr, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answers
            .lock()
            .unwrap()
            .get(host)
            .copied()
            .ok_or_else(|| ResolveError::NotFound {
                host: host.to_string(),
            })
    }
}
