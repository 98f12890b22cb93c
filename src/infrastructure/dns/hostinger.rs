//! Hostinger DNS API client.
//!
//! Uses the Hostinger DNS v1 REST API (`/api/dns/v1/zones/{domain}`) and
//! normalises record sets into `DnsRecord`. Updates are sent with
//! `overwrite: true`, which replaces the whole name+type set.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{DnsProvider, DnsProviderError, DnsRecord, UpsertRecord, UpsertResult};
use crate::domain::value_objects::DnsRecordType;

pub const HOSTINGER_API_URL: &str = "https://developers.hostinger.com";

const PROVIDER: &str = "hostinger";

pub struct HostingerProvider {
    client: Client,
    api_token: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ZoneRecordSet {
    name: String,
    #[serde(rename = "type")]
    record_type: String,
    ttl: u32,
    #[serde(default)]
    records: Vec<ZoneRecordValue>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ZoneRecordValue {
    content: String,
    #[serde(default, skip_serializing)]
    is_disabled: bool,
}

#[derive(Debug, Serialize)]
struct ZoneUpdate<'a> {
    overwrite: bool,
    zone: Vec<ZoneUpdateRecord<'a>>,
}

#[derive(Debug, Serialize)]
struct ZoneUpdateRecord<'a> {
    name: &'a str,
    records: Vec<ZoneRecordValue>,
    ttl: u32,
    #[serde(rename = "type")]
    record_type: DnsRecordType,
}

impl HostingerProvider {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self::with_base_url(api_token, HOSTINGER_API_URL)
    }

    /// Client against a different API host (tests, proxies)
    pub fn with_base_url(api_token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_token: api_token.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn zone_url(&self, domain: &str) -> String {
        format!("{}/api/dns/v1/zones/{}", self.base_url, domain)
    }

    async fn check(
        response: reqwest::Response,
        domain: &str,
    ) -> Result<reqwest::Response, DnsProviderError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(DnsProviderError::ZoneNotFound {
                provider: PROVIDER.to_string(),
                domain: domain.to_string(),
            });
        }
        let body = response.text().await.unwrap_or_default();
        Err(DnsProviderError::Api {
            provider: PROVIDER.to_string(),
            status: status.as_u16(),
            message: error_message(&body),
        })
    }

    fn normalise(set: ZoneRecordSet) -> Option<DnsRecord> {
        let record_type = match set.record_type.parse::<DnsRecordType>() {
            Ok(t) => t,
            Err(_) => {
                tracing::debug!(name = %set.name, record_type = %set.record_type, "skipping unsupported record type");
                return None;
            }
        };
        Some(DnsRecord {
            name: set.name,
            record_type,
            ttl: set.ttl,
            values: set
                .records
                .into_iter()
                .filter(|r| !r.is_disabled)
                .map(|r| r.content)
                .collect(),
        })
    }
}

/// Pull `message` out of a JSON error body, or fall back to the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["message"].as_str().map(String::from))
        .unwrap_or_else(|| body.chars().take(200).collect())
}

fn request_error(e: reqwest::Error) -> DnsProviderError {
    DnsProviderError::Request {
        provider: PROVIDER.to_string(),
        message: e.to_string(),
    }
}

#[async_trait]
impl DnsProvider for HostingerProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn get_records(&self, domain: &str) -> Result<Vec<DnsRecord>, DnsProviderError> {
        let response = self
            .client
            .get(self.zone_url(domain))
            .bearer_auth(&self.api_token)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(request_error)?;

        let sets: Vec<ZoneRecordSet> = Self::check(response, domain)
            .await?
            .json()
            .await
            .map_err(|e| DnsProviderError::InvalidResponse {
                provider: PROVIDER.to_string(),
                message: e.to_string(),
            })?;

        Ok(sets.into_iter().filter_map(Self::normalise).collect())
    }

    async fn upsert_records(
        &self,
        domain: &str,
        records: &[UpsertRecord],
    ) -> Result<Vec<UpsertResult>, DnsProviderError> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let existing: HashMap<(String, DnsRecordType), Option<String>> = self
            .get_records(domain)
            .await?
            .into_iter()
            .map(|r| {
                let first = r.first_value().map(String::from);
                ((r.name.to_ascii_lowercase(), r.record_type), first)
            })
            .collect();

        let mut results = Vec::with_capacity(records.len());
        let mut changed = Vec::new();
        for record in records {
            // Names compare case-insensitively, as in the record planner
            let current = existing.get(&(record.name.to_ascii_lowercase(), record.record_type));
            let unchanged = matches!(current, Some(Some(v)) if *v == record.value);
            if !unchanged {
                changed.push(ZoneUpdateRecord {
                    name: &record.name,
                    records: vec![ZoneRecordValue {
                        content: record.value.clone(),
                        is_disabled: false,
                    }],
                    ttl: record.ttl,
                    record_type: record.record_type,
                });
            }
            results.push(UpsertResult {
                record: record.clone(),
                created: current.is_none(),
                unchanged,
            });
        }

        if !changed.is_empty() {
            let body = ZoneUpdate {
                overwrite: true,
                zone: changed,
            };
            let response = self
                .client
                .put(self.zone_url(domain))
                .bearer_auth(&self.api_token)
                .json(&body)
                .send()
                .await
                .map_err(request_error)?;
            Self::check(response, domain).await?;
            tracing::debug!(domain, count = body.zone.len(), "hostinger zone updated");
        }

        Ok(results)
    }
}
