//! Two-tier State Provider
//!
//! Remote is the source of truth, local is a latency and availability cache.
//!
//! - `read`: local first; on a miss read remote and backfill local
//! - `write`: remote first, then local; a remote failure leaves local untouched
//! - `pull` / `push`: forced refresh in one direction
//! - `diff`: both tiers side by side, nothing written

use std::sync::Arc;

use async_trait::async_trait;
use similar::TextDiff;

use crate::domain::entities::DeployState;
use crate::domain::ports::{StateError, StateProvider};

pub struct CachedStateProvider {
    remote: Arc<dyn StateProvider>,
    local: Arc<dyn StateProvider>,
}

impl CachedStateProvider {
    pub fn new(remote: Arc<dyn StateProvider>, local: Arc<dyn StateProvider>) -> Self {
        Self { remote, local }
    }

    /// Replace the local copy with the remote one, whatever local holds.
    ///
    /// Returns the remote state. When remote has no state for the stage there
    /// is nothing to copy and the local file, if any, is kept as it is.
    pub async fn pull(&self, stage: &str) -> Result<Option<DeployState>, StateError> {
        let remote = self.remote.read(stage).await?;
        if let Some(state) = &remote {
            self.local.persist(stage, state).await?;
            tracing::info!(stage, "pulled remote state into local cache");
        }
        Ok(remote)
    }

    /// Overwrite the remote copy with the local one.
    ///
    /// Returns the local state; nothing is sent when local has none.
    pub async fn push(&self, stage: &str) -> Result<Option<DeployState>, StateError> {
        let local = self.local.read(stage).await?;
        if let Some(state) = &local {
            self.remote.persist(stage, state).await?;
            tracing::info!(stage, "pushed local state to remote");
        }
        Ok(local)
    }

    /// Both tiers' current values, unmodified
    pub async fn diff(&self, stage: &str) -> Result<StateDiff, StateError> {
        let local = self.local.read(stage).await?;
        let remote = self.remote.read(stage).await?;
        Ok(StateDiff { local, remote })
    }
}

#[async_trait]
impl StateProvider for CachedStateProvider {
    async fn read(&self, stage: &str) -> Result<Option<DeployState>, StateError> {
        if let Some(state) = self.local.read(stage).await? {
            return Ok(Some(state));
        }

        let Some(state) = self.remote.read(stage).await? else {
            return Ok(None);
        };

        if let Err(e) = self.local.persist(stage, &state).await {
            tracing::warn!(stage, error = %e, "failed to backfill local state cache");
        }
        Ok(Some(state))
    }

    async fn persist(&self, stage: &str, state: &DeployState) -> Result<(), StateError> {
        self.remote.persist(stage, state).await?;
        self.local.persist(stage, state).await
    }
}

/// Local and remote state for one stage
#[derive(Debug, Clone, PartialEq)]
pub struct StateDiff {
    pub local: Option<DeployState>,
    pub remote: Option<DeployState>,
}

impl StateDiff {
    pub fn is_in_sync(&self) -> bool {
        self.local == self.remote
    }

    /// Unified diff of the pretty-printed JSON, local as the old side
    pub fn unified_diff(&self) -> Result<String, StateError> {
        let local = render(&self.local)?;
        let remote = render(&self.remote)?;
        Ok(TextDiff::from_lines(&local, &remote)
            .unified_diff()
            .header("local", "remote")
            .to_string())
    }
}

fn render(state: &Option<DeployState>) -> Result<String, StateError> {
    match state {
        Some(state) => {
            let mut json = serde_json::to_string_pretty(state)?;
            json.push('\n');
            Ok(json)
        }
        None => Ok(String::new()),
    }
}
