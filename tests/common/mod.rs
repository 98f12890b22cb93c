//! Shared test doubles for integration tests.
//!
//! In-memory stand-ins for the collaborators the engine talks to: the remote
//! parameter store, a DNS vendor, and the system resolver.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use redeploy::domain::ports::{
    DnsProvider, DnsProviderError, DnsRecord, HostResolver, ParameterStore, ParameterStoreError,
    ResolveError, UpsertRecord, UpsertResult,
};

/// Parameter store kept in memory, shared across "process lifetimes"
#[derive(Default)]
pub struct MemoryParameterStore {
    values: Mutex<HashMap<String, String>>,
    unavailable: Mutex<bool>,
}

impl MemoryParameterStore {
    pub fn get(&self, name: &str) -> Option<String> {
        self.values.lock().unwrap().get(name).cloned()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    fn check(&self) -> Result<(), ParameterStoreError> {
        if *self.unavailable.lock().unwrap() {
            return Err(ParameterStoreError::Request {
                message: "connection reset".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ParameterStore for MemoryParameterStore {
    async fn get_parameter(&self, name: &str) -> Result<String, ParameterStoreError> {
        self.check()?;
        self.get(name).ok_or_else(|| ParameterStoreError::NotFound {
            name: name.to_string(),
        })
    }

    async fn put_parameter(&self, name: &str, value: &str) -> Result<(), ParameterStoreError> {
        self.check()?;
        self.values
            .lock()
            .unwrap()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }
}

/// DNS zone kept in memory, counting API calls
#[derive(Default)]
pub struct MemoryDnsProvider {
    zone: Mutex<Vec<DnsRecord>>,
    pub get_calls: AtomicUsize,
    pub upsert_calls: AtomicUsize,
}

impl MemoryDnsProvider {
    pub fn record(&self, name: &str) -> Option<DnsRecord> {
        self.zone
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.name == name)
            .cloned()
    }

    pub fn upsert_count(&self) -> usize {
        self.upsert_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DnsProvider for MemoryDnsProvider {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get_records(&self, _domain: &str) -> Result<Vec<DnsRecord>, DnsProviderError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.zone.lock().unwrap().clone())
    }

    async fn upsert_records(
        &self,
        _domain: &str,
        records: &[UpsertRecord],
    ) -> Result<Vec<UpsertResult>, DnsProviderError> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        let mut zone = self.zone.lock().unwrap();
        let mut results = Vec::with_capacity(records.len());
        for record in records {
            let before = zone.len();
            zone.retain(|r| !(r.name == record.name && r.record_type == record.record_type));
            let created = zone.len() == before;
            zone.push(DnsRecord {
                name: record.name.clone(),
                record_type: record.record_type,
                ttl: record.ttl,
                values: vec![record.value.clone()],
            });
            results.push(UpsertResult {
                record: record.clone(),
                created,
                unchanged: false,
            });
        }
        Ok(results)
    }
}

/// Resolver answering from a fixed table
#[derive(Default)]
pub struct StaticResolver {
    answers: Mutex<HashMap<String, Ipv4Addr>>,
    calls: Mutex<Vec<String>>,
}

impl StaticResolver {
    pub fn with(self, host: &str, ip: Ipv4Addr) -> Self {
        self.answers.lock().unwrap().insert(host.to_string(), ip);
        self
    }

    /// Hostnames looked up so far, in order
    pub fn lookups(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HostResolver for StaticResolver {
    async fn resolve_ipv4(&self, host: &str) -> Result<Ipv4Addr, ResolveError> {
        self.calls.lock().unwrap().push(host.to_string());
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
