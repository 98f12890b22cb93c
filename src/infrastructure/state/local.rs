//! Filesystem State Provider
//!
//! One pretty-printed JSON file per stage under the hidden workspace
//! directory: `<workspace>/.redeploy/state/<stage>.json`.
//!
//! Reads are fail-soft. A missing file is "no state"; an unreadable or corrupt
//! file is logged and also treated as "no state", so a damaged cache can only
//! force a remote fallback or re-provisioning, never block a deploy.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::entities::DeployState;
use crate::domain::ports::{ensure_stage, StateError, StateProvider};
use crate::domain::value_objects::stage_name_problem;
use crate::infrastructure::fs::write_atomic;

/// Subdirectory of the workspace directory holding stage files
const STATE_SUBDIR: &str = "state";

/// JSON file per stage
#[derive(Debug, Clone)]
pub struct LocalStateProvider {
    state_dir: PathBuf,
}

impl LocalStateProvider {
    /// Provider rooted at a hidden workspace directory (e.g. `.redeploy`)
    pub fn new(workspace_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: workspace_dir.into().join(STATE_SUBDIR),
        }
    }

    /// Provider using the default `.redeploy` directory of a workspace
    pub fn for_workspace(workspace_root: &Path) -> Self {
        Self::new(workspace_root.join(".redeploy"))
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    /// File backing `stage`
    pub fn state_path(&self, stage: &str) -> Result<PathBuf, StateError> {
        if let Some(reason) = stage_name_problem(stage) {
            return Err(StateError::InvalidStage {
                stage: stage.to_string(),
                reason,
            });
        }
        Ok(self.state_dir.join(format!("{}.json", stage)))
    }
}

#[async_trait]
impl StateProvider for LocalStateProvider {
    async fn read(&self, stage: &str) -> Result<Option<DeployState>, StateError> {
        let path = self.state_path(stage)?;

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "unreadable local state, treating as absent"
                );
                return Ok(None);
            }
        };

        match serde_json::from_str::<DeployState>(&content) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "corrupt local state, treating as absent"
                );
                Ok(None)
            }
        }
    }

    async fn persist(&self, stage: &str, state: &DeployState) -> Result<(), StateError> {
        let path = self.state_path(stage)?;
        ensure_stage(stage, state)?;
        let mut content = serde_json::to_string_pretty(state)?;
        content.push('\n');

        tokio::task::spawn_blocking(move || {
            write_atomic(&path, content.as_bytes()).map_err(|source| StateError::Io { path, source })
        })
        .await
        .map_err(|e| StateError::Task(e.to_string()))??;

        tracing::debug!(stage, "local state written");
        Ok(())
    }
}
