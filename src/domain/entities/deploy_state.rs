//! DeployState entity - everything provisioned for one stage
//!
//! The state is the record that makes redeploys idempotent: every resource id,
//! credential and secret is created once and then reused. It's a pure data
//! structure; persistence is handled by a `StateProvider`.
//!
//! Accessors follow a get-or-create contract. Setters accept the value that is
//! already stored (no-op) and refuse a different one with
//! [`RedeployError::ResourceConflict`], so a fresh provisioning call can never
//! silently replace an authoritative id. Mutation goes through `&mut self`:
//! whoever holds the mutable borrow during a deploy run is the single writer.

use std::collections::BTreeMap;
use std::net::Ipv4Addr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{generate_secret, DnsRecordType};
use crate::error::{RedeployError, RedeployResult};

/// Shared infrastructure resource ids
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceIds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postgres_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redis_id: Option<String>,
}

/// Per-app database credentials, generated once and never rotated implicitly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppCredentials {
    pub db_user: String,
    pub db_password: String,
}

impl AppCredentials {
    /// Fresh credentials for an app: the user is derived from the app name,
    /// the password is a generated secret.
    pub fn generate(app_name: &str) -> Self {
        Self {
            db_user: db_user_for(app_name),
            db_password: generate_secret(),
        }
    }
}

fn db_user_for(app_name: &str) -> String {
    app_name.replace('-', "_")
}

/// Last address a hostname was confirmed to resolve to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsVerification {
    pub server_ip: Ipv4Addr,
    pub verified_at: DateTime<Utc>,
}

/// A DNS record this tool created, kept for later cleanup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecordEntry {
    pub domain: String,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: DnsRecordType,
    pub value: String,
    pub ttl: u32,
    pub created_at: DateTime<Utc>,
}

impl DnsRecordEntry {
    /// Ledger key for this entry (`name:type`)
    pub fn key(&self) -> String {
        dns_record_key(&self.name, self.record_type)
    }
}

/// Ledger key for a record (`name:type`)
pub fn dns_record_key(name: &str, record_type: DnsRecordType) -> String {
    format!("{}:{}", name, record_type)
}

/// Backup destination metadata, set at most once per stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupState {
    pub bucket_name: String,
    pub region: String,
    pub iam_user_name: String,
    pub iam_access_key_id: String,
    pub iam_secret_access_key: String,
    pub destination_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postgres_backup_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Persisted per-stage deployment state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployState {
    stage: String,
    project_id: String,
    environment_id: String,
    #[serde(default)]
    applications: BTreeMap<String, String>,
    #[serde(default)]
    services: ServiceIds,
    #[serde(default)]
    app_credentials: BTreeMap<String, AppCredentials>,
    #[serde(default)]
    generated_secrets: BTreeMap<String, BTreeMap<String, String>>,
    #[serde(default)]
    dns_verified: BTreeMap<String, DnsVerification>,
    #[serde(default)]
    dns_records: BTreeMap<String, DnsRecordEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    backups: Option<BackupState>,
    last_deployed_at: DateTime<Utc>,
}

impl DeployState {
    /// Create the state for a stage whose project and environment were just created
    pub fn new(
        stage: impl Into<String>,
        project_id: impl Into<String>,
        environment_id: impl Into<String>,
    ) -> Self {
        Self {
            stage: stage.into(),
            project_id: project_id.into(),
            environment_id: environment_id.into(),
            applications: BTreeMap::new(),
            services: ServiceIds::default(),
            app_credentials: BTreeMap::new(),
            generated_secrets: BTreeMap::new(),
            dns_verified: BTreeMap::new(),
            dns_records: BTreeMap::new(),
            backups: None,
            last_deployed_at: Utc::now(),
        }
    }

    pub fn stage(&self) -> &str {
        &self.stage
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn environment_id(&self) -> &str {
        &self.environment_id
    }

    pub fn last_deployed_at(&self) -> DateTime<Utc> {
        self.last_deployed_at
    }

    /// Stamp the time of a successful write
    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.last_deployed_at = at;
    }

    // Applications

    pub fn application_id(&self, app_name: &str) -> Option<&str> {
        self.applications.get(app_name).map(String::as_str)
    }

    pub fn set_application_id(
        &mut self,
        app_name: &str,
        application_id: impl Into<String>,
    ) -> RedeployResult<()> {
        insert_once(
            &mut self.applications,
            "application",
            app_name,
            application_id.into(),
        )
    }

    /// All provisioned applications, ordered by app name
    pub fn applications(&self) -> impl Iterator<Item = (&str, &str)> {
        self.applications
            .iter()
            .map(|(app, id)| (app.as_str(), id.as_str()))
    }

    // Shared services

    pub fn postgres_id(&self) -> Option<&str> {
        self.services.postgres_id.as_deref()
    }

    pub fn set_postgres_id(&mut self, postgres_id: impl Into<String>) -> RedeployResult<()> {
        set_once(&mut self.services.postgres_id, "postgres service", postgres_id.into())
    }

    pub fn redis_id(&self) -> Option<&str> {
        self.services.redis_id.as_deref()
    }

    pub fn set_redis_id(&mut self, redis_id: impl Into<String>) -> RedeployResult<()> {
        set_once(&mut self.services.redis_id, "redis service", redis_id.into())
    }

    // Credentials

    pub fn app_credentials(&self, app_name: &str) -> Option<&AppCredentials> {
        self.app_credentials.get(app_name)
    }

    pub fn set_app_credentials(
        &mut self,
        app_name: &str,
        credentials: AppCredentials,
    ) -> RedeployResult<()> {
        match self.app_credentials.get(app_name) {
            Some(existing) if *existing == credentials => Ok(()),
            Some(existing) => Err(RedeployError::ResourceConflict {
                resource: "app credentials",
                key: app_name.to_string(),
                existing: existing.db_user.clone(),
                attempted: credentials.db_user,
            }),
            None => {
                self.app_credentials.insert(app_name.to_string(), credentials);
                Ok(())
            }
        }
    }

    /// Return the app's credentials, generating them on first use.
    pub fn get_or_create_app_credentials(&mut self, app_name: &str) -> &AppCredentials {
        self.app_credentials
            .entry(app_name.to_string())
            .or_insert_with(|| AppCredentials::generate(app_name))
    }

    // Generated secrets

    pub fn generated_secret(&self, app_name: &str, secret_name: &str) -> Option<&str> {
        self.generated_secrets
            .get(app_name)
            .and_then(|secrets| secrets.get(secret_name))
            .map(String::as_str)
    }

    pub fn set_generated_secret(
        &mut self,
        app_name: &str,
        secret_name: &str,
        value: impl Into<String>,
    ) -> RedeployResult<()> {
        let secrets = self
            .generated_secrets
            .entry(app_name.to_string())
            .or_default();
        insert_once(secrets, "generated secret", secret_name, value.into()).map_err(|err| {
            match err {
                // Secret values never end up in error messages
                RedeployError::ResourceConflict { resource, .. } => {
                    RedeployError::ResourceConflict {
                        resource,
                        key: format!("{}/{}", app_name, secret_name),
                        existing: "<redacted>".to_string(),
                        attempted: "<redacted>".to_string(),
                    }
                }
                other => other,
            }
        })
    }

    /// Return the secret for `(app_name, secret_name)`, generating a 256-bit
    /// hex value the first time. Other pairs are never touched.
    pub fn get_or_generate_secret(&mut self, app_name: &str, secret_name: &str) -> String {
        self.generated_secrets
            .entry(app_name.to_string())
            .or_default()
            .entry(secret_name.to_string())
            .or_insert_with(generate_secret)
            .clone()
    }

    /// Secrets generated for one app, ordered by name
    pub fn generated_secrets_for(&self, app_name: &str) -> Option<&BTreeMap<String, String>> {
        self.generated_secrets.get(app_name)
    }

    // DNS verification cache

    pub fn dns_verification(&self, hostname: &str) -> Option<&DnsVerification> {
        self.dns_verified.get(hostname)
    }

    /// Whether `hostname` was last confirmed to resolve to `server_ip`
    pub fn is_dns_verified(&self, hostname: &str, server_ip: Ipv4Addr) -> bool {
        self.dns_verified
            .get(hostname)
            .is_some_and(|v| v.server_ip == server_ip)
    }

    pub fn set_dns_verified(&mut self, hostname: &str, server_ip: Ipv4Addr, at: DateTime<Utc>) {
        self.dns_verified.insert(
            hostname.to_string(),
            DnsVerification {
                server_ip,
                verified_at: at,
            },
        );
    }

    pub fn clear_dns_verification(&mut self, hostname: &str) -> Option<DnsVerification> {
        self.dns_verified.remove(hostname)
    }

    // DNS record ledger

    pub fn dns_record(&self, name: &str, record_type: DnsRecordType) -> Option<&DnsRecordEntry> {
        self.dns_records.get(&dns_record_key(name, record_type))
    }

    /// Track a record; replaces any entry with the same `(name, type)`.
    pub fn set_dns_record(&mut self, entry: DnsRecordEntry) {
        self.dns_records.insert(entry.key(), entry);
    }

    pub fn remove_dns_record(
        &mut self,
        name: &str,
        record_type: DnsRecordType,
    ) -> Option<DnsRecordEntry> {
        self.dns_records.remove(&dns_record_key(name, record_type))
    }

    pub fn dns_records(&self) -> impl Iterator<Item = &DnsRecordEntry> {
        self.dns_records.values()
    }

    pub fn dns_records_for_domain<'a>(
        &'a self,
        domain: &'a str,
    ) -> impl Iterator<Item = &'a DnsRecordEntry> + 'a {
        self.dns_records
            .values()
            .filter(move |entry| entry.domain == domain)
    }

    // Backups

    pub fn backups(&self) -> Option<&BackupState> {
        self.backups.as_ref()
    }

    pub fn set_backups(&mut self, backups: BackupState) -> RedeployResult<()> {
        match &self.backups {
            Some(existing) if *existing == backups => Ok(()),
            Some(existing) => Err(RedeployError::ResourceConflict {
                resource: "backup destination",
                key: self.stage.clone(),
                existing: existing.bucket_name.clone(),
                attempted: backups.bucket_name,
            }),
            None => {
                self.backups = Some(backups);
                Ok(())
            }
        }
    }
}

fn insert_once(
    map: &mut BTreeMap<String, String>,
    resource: &'static str,
    key: &str,
    value: String,
) -> RedeployResult<()> {
    match map.get(key) {
        Some(existing) if *existing == value => Ok(()),
        Some(existing) => Err(RedeployError::ResourceConflict {
            resource,
            key: key.to_string(),
            existing: existing.clone(),
            attempted: value,
        }),
        None => {
            map.insert(key.to_string(), value);
            Ok(())
        }
    }
}

fn set_once(slot: &mut Option<String>, resource: &'static str, value: String) -> RedeployResult<()> {
    match slot.as_deref() {
        Some(existing) if existing == value => Ok(()),
        Some(existing) => Err(RedeployError::ResourceConflict {
            resource,
            key: resource.to_string(),
            existing: existing.to_string(),
            attempted: value,
        }),
        None => {
            *slot = Some(value);
            Ok(())
        }
    }
}
