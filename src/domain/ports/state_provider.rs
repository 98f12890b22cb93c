//! StateProvider port - abstraction for per-stage state persistence
//!
//! Implemented by the local (filesystem), remote (parameter store) and cached
//! (remote + local) providers in the infrastructure layer.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;

use crate::domain::entities::DeployState;
use crate::domain::ports::ParameterStoreError;

/// State operation errors
#[derive(Debug, Error)]
pub enum StateError {
    /// Stage name can't be used as a storage key
    #[error("invalid stage name '{stage}': {reason}")]
    InvalidStage { stage: String, reason: &'static str },

    /// State handed to a provider belongs to another stage
    #[error("state for stage '{actual}' cannot be stored as stage '{expected}'")]
    StageMismatch { expected: String, actual: String },

    /// Remote state is keyed by workspace name, which wasn't configured
    #[error("remote state requires a workspace name")]
    MissingWorkspaceName,

    /// Local state file could not be written
    #[error("failed to write state file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// State could not be encoded or decoded
    #[error("state serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Authoritative store failed (auth, network, throttling)
    #[error("remote state store error: {message}")]
    Remote { message: String },

    /// Blocking task panicked or was cancelled
    #[error("state task failed: {0}")]
    Task(String),
}

impl From<ParameterStoreError> for StateError {
    fn from(err: ParameterStoreError) -> Self {
        StateError::Remote {
            message: err.to_string(),
        }
    }
}

/// Reject a state whose own stage differs from the storage key.
pub fn ensure_stage(stage: &str, state: &DeployState) -> Result<(), StateError> {
    if state.stage() != stage {
        return Err(StateError::StageMismatch {
            expected: stage.to_string(),
            actual: state.stage().to_string(),
        });
    }
    Ok(())
}

/// Per-stage state storage
///
/// `read` never reports a missing stage as an error. `write` is a full
/// overwrite, so callers read, modify, then write.
#[async_trait]
pub trait StateProvider: Send + Sync {
    /// Load the state for a stage, `None` if nothing is stored
    async fn read(&self, stage: &str) -> Result<Option<DeployState>, StateError>;

    /// Store `state` exactly as given
    async fn persist(&self, stage: &str, state: &DeployState) -> Result<(), StateError>;

    /// Stamp `lastDeployedAt` and store the state
    async fn write(&self, stage: &str, state: &mut DeployState) -> Result<(), StateError> {
        state.touch(Utc::now());
        self.persist(stage, state).await
    }
}
