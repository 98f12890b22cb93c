//! Scenario: Local cache and remote source of truth disagree
//!
//! Journey: A deploy runs on a machine with no local cache, then the remote
//! store becomes unreachable.
//!
//! Success Criteria:
//! - A missing local cache is rebuilt from remote
//! - An unreachable remote is an error, never "no state"

use std::sync::Arc;

use redeploy::domain::ports::{ParameterStore, StateError};
use redeploy::infrastructure::{CachedStateProvider, LocalStateProvider, RemoteStateProvider};
use redeploy::{DeployState, StateProvider};
use tempfile::tempdir;

use crate::common::MemoryParameterStore;

fn cached(workspace: &std::path::Path, store: &Arc<MemoryParameterStore>) -> CachedStateProvider {
    let store: Arc<dyn ParameterStore> = store.clone();
    let remote = Arc::new(RemoteStateProvider::new(store, "shop").unwrap());
    let local = Arc::new(LocalStateProvider::for_workspace(workspace));
    CachedStateProvider::new(remote, local)
}

/// SCENARIO: a fresh checkout rebuilds its cache from remote
#[tokio::test]
async fn scenario_fresh_checkout_backfills_local_cache() {
    let store = Arc::new(MemoryParameterStore::default());

    let ci = tempdir().unwrap();
    let mut state = DeployState::new("production", "proj-1", "env-1");
    state.set_postgres_id("pg-1").unwrap();
    cached(ci.path(), &store).write("production", &mut state).await.unwrap();

    let laptop = tempdir().unwrap();
    let provider = cached(laptop.path(), &store);
    let read = provider.read("production").await.unwrap().unwrap();

    assert_eq!(read.postgres_id(), Some("pg-1"));
    assert!(laptop
        .path()
        .join(".redeploy/state/production.json")
        .exists());
    assert!(provider.diff("production").await.unwrap().is_in_sync());
}

/// SCENARIO: remote outage surfaces instead of re-provisioning
#[tokio::test]
async fn scenario_remote_outage_is_not_absent_state() {
    let store = Arc::new(MemoryParameterStore::default());
    let workspace = tempdir().unwrap();
    store.set_unavailable(true);

    let err = cached(workspace.path(), &store)
        .read("production")
        .await
        .unwrap_err();

    assert!(matches!(err, StateError::Remote { .. }));
}

/// SCENARIO: a failed remote write leaves the local cache untouched
#[tokio::test]
async fn scenario_failed_remote_write_keeps_previous_local_copy() {
    let store = Arc::new(MemoryParameterStore::default());
    let workspace = tempdir().unwrap();
    let provider = cached(workspace.path(), &store);

    let mut state = DeployState::new("production", "proj-1", "env-1");
    provider.write("production", &mut state).await.unwrap();

    store.set_unavailable(true);
    state.set_redis_id("redis-1").unwrap();
    assert!(provider.write("production", &mut state).await.is_err());

    let local = LocalStateProvider::for_workspace(workspace.path())
        .read("production")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(local.redis_id(), None);
}
