//! Scenario: Redeploying an unchanged workspace
//!
//! Journey: A team deploys two apps to production, then deploys again from a
//! fresh process (new CI job) against the same workspace and remote store.
//!
//! Steps:
//! 1. First deploy: no state, resources and secrets are created
//! 2. DNS records are created and recorded in the ledger
//! 3. Verification confirms propagation and caches it
//! 4. Second deploy from fresh providers reads the same state back
//! 5. Reconciliation and verification are no-ops at the provider layer
//!
//! Success Criteria:
//! - Secrets and credentials never rotate
//! - No DNS upsert and no resolver lookup for verified hostnames on redeploy

use std::collections::BTreeMap;
use std::net::Ipv4Addr;
use std::path::Path;
use std::sync::Arc;

use redeploy::domain::ports::ParameterStore;
use redeploy::{
    create_state_provider, Config, DeployState, DnsProviderFactory, DnsReconcileUseCase,
    DnsVerifyUseCase, StateProvider,
};
use tempfile::tempdir;

use crate::common::{MemoryDnsProvider, MemoryParameterStore, StaticResolver};

const SERVER: Ipv4Addr = Ipv4Addr::new(9, 9, 9, 9);

const WORKSPACE_TOML: &str = r#"
name = "shop"

[state]
provider = "remote"

[dns."ex.com"]
provider = "hostinger"
ttl = 600
"#;

fn app_hostnames() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("api".to_string(), "api.ex.com".to_string()),
        ("web".to_string(), "ex.com".to_string()),
    ])
}

fn resolver() -> Arc<StaticResolver> {
    Arc::new(
        StaticResolver::default()
            .with("deploy.ex.com", SERVER)
            .with("api.ex.com", SERVER)
            .with("ex.com", SERVER),
    )
}

fn state_provider(root: &Path, store: &Arc<MemoryParameterStore>) -> Arc<dyn StateProvider> {
    let config = Config::load(&root.join("redeploy.toml")).unwrap();
    let store: Arc<dyn ParameterStore> = store.clone();
    create_state_provider(&config, root, Some(store)).unwrap()
}

/// One deploy run as the pipeline would drive it
async fn deploy(
    root: &Path,
    store: &Arc<MemoryParameterStore>,
    dns: &Arc<MemoryDnsProvider>,
    resolver: &Arc<StaticResolver>,
) -> DeployState {
    let config = Config::load(&root.join("redeploy.toml")).unwrap();
    let provider = state_provider(root, store);

    let mut state = provider
        .read("production")
        .await
        .unwrap()
        .unwrap_or_else(|| DeployState::new("production", "proj-1", "env-1"));

    if state.application_id("api").is_none() {
        state.set_application_id("api", "app-api").unwrap();
        state.set_application_id("web", "app-web").unwrap();
    }
    state.get_or_create_app_credentials("api");
    state.get_or_generate_secret("api", "JWT_SECRET");

    let factory = DnsProviderFactory::new().with_provider("ex.com", dns.clone());
    let reconcile = DnsReconcileUseCase::new(factory, resolver.clone());
    let result = reconcile
        .execute(
            &app_hostnames(),
            &config.dns_domains().unwrap(),
            "https://deploy.ex.com",
        )
        .await
        .unwrap();
    assert!(result.success());
    result.record_ledger(&mut state, chrono::Utc::now());

    let verify = DnsVerifyUseCase::new(resolver.clone());
    let report = verify.execute(&app_hostnames(), SERVER, &mut state).await;
    assert!(report.all_verified());

    provider.write("production", &mut state).await.unwrap();
    state
}

/// SCENARIO: second deploy from a fresh process changes nothing
#[tokio::test]
async fn scenario_redeploy_is_idempotent() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("redeploy.toml"), WORKSPACE_TOML).unwrap();
    let store = Arc::new(MemoryParameterStore::default());
    let dns = Arc::new(MemoryDnsProvider::default());

    // First process lifetime
    let first_resolver = resolver();
    let first = deploy(dir.path(), &store, &dns, &first_resolver).await;

    assert_eq!(dns.upsert_count(), 1);
    assert_eq!(dns.record("@").unwrap().values, vec!["9.9.9.9"]);
    assert_eq!(dns.record("api").unwrap().ttl, 600);
    assert_eq!(first.dns_records().count(), 2);
    assert!(store.get("/redeploy/shop/production").is_some());
    assert!(dir
        .path()
        .join(".redeploy/state/production.json")
        .exists());

    // Second process lifetime: fresh providers, same directory and store
    let second_resolver = resolver();
    let second = deploy(dir.path(), &store, &dns, &second_resolver).await;

    assert_eq!(
        second.generated_secret("api", "JWT_SECRET"),
        first.generated_secret("api", "JWT_SECRET")
    );
    assert_eq!(second.app_credentials("api"), first.app_credentials("api"));
    assert_eq!(second.application_id("web"), Some("app-web"));
    assert_eq!(dns.upsert_count(), 1);
    // Only the endpoint is resolved, both hostnames hit the verification cache
    assert_eq!(second_resolver.lookups(), vec!["deploy.ex.com"]);
}

/// SCENARIO: the server moves, verification is redone
#[tokio::test]
async fn scenario_new_server_ip_updates_records_and_reverifies() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("redeploy.toml"), WORKSPACE_TOML).unwrap();
    let store = Arc::new(MemoryParameterStore::default());
    let dns = Arc::new(MemoryDnsProvider::default());

    deploy(dir.path(), &store, &dns, &resolver()).await;

    let moved = Ipv4Addr::new(10, 0, 0, 7);
    let provider = state_provider(dir.path(), &store);
    let mut state = provider.read("production").await.unwrap().unwrap();
    let config = Config::load(&dir.path().join("redeploy.toml")).unwrap();
    let factory = DnsProviderFactory::new().with_provider("ex.com", dns.clone());
    let moved_resolver = Arc::new(
        StaticResolver::default()
            .with("api.ex.com", moved)
            .with("ex.com", moved),
    );

    let result = DnsReconcileUseCase::new(factory, moved_resolver.clone())
        .reconcile(&app_hostnames(), &config.dns_domains().unwrap(), moved)
        .await
        .unwrap();
    assert_eq!(result.created_count(), 0);
    assert_eq!(dns.record("api").unwrap().values, vec!["10.0.0.7"]);

    let report = DnsVerifyUseCase::new(moved_resolver.clone())
        .execute(&app_hostnames(), moved, &mut state)
        .await;
    assert!(report.all_verified());
    assert!(report.results.iter().all(|r| !r.skipped));
    assert_eq!(moved_resolver.lookups().len(), 2);
}
