//! Parameter Store State Provider
//!
//! The authoritative tier. Each stage is one encrypted parameter at
//! `/redeploy/<workspace>/<stage>` holding the JSON-encoded state.
//!
//! Only "parameter not found" maps to absent. Auth, network and decoding
//! failures propagate: treating them as absent would re-provision resources
//! that already exist.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::DeployState;
use crate::domain::ports::{
    ensure_stage, ParameterStore, ParameterStoreError, StateError, StateProvider,
};
use crate::domain::value_objects::stage_name_problem;

/// Parameter path prefix
pub const PARAMETER_PREFIX: &str = "/redeploy";

pub struct RemoteStateProvider {
    store: Arc<dyn ParameterStore>,
    workspace_name: String,
}

impl RemoteStateProvider {
    pub fn new(
        store: Arc<dyn ParameterStore>,
        workspace_name: impl Into<String>,
    ) -> Result<Self, StateError> {
        let workspace_name = workspace_name.into().trim().to_string();
        if workspace_name.is_empty() {
            return Err(StateError::MissingWorkspaceName);
        }
        if let Some(reason) = stage_name_problem(&workspace_name) {
            return Err(StateError::Remote {
                message: format!("workspace name '{}' is unusable: {}", workspace_name, reason),
            });
        }
        Ok(Self {
            store,
            workspace_name,
        })
    }

    pub fn workspace_name(&self) -> &str {
        &self.workspace_name
    }

    /// Parameter holding `stage`
    pub fn parameter_name(&self, stage: &str) -> Result<String, StateError> {
        if let Some(reason) = stage_name_problem(stage) {
            return Err(StateError::InvalidStage {
                stage: stage.to_string(),
                reason,
            });
        }
        Ok(format!(
            "{}/{}/{}",
            PARAMETER_PREFIX, self.workspace_name, stage
        ))
    }
}

#[async_trait]
impl StateProvider for RemoteStateProvider {
    async fn read(&self, stage: &str) -> Result<Option<DeployState>, StateError> {
        let name = self.parameter_name(stage)?;

        match self.store.get_parameter(&name).await {
            Ok(value) => Ok(Some(serde_json::from_str(&value)?)),
            Err(ParameterStoreError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self, stage: &str, state: &DeployState) -> Result<(), StateError> {
        let name = self.parameter_name(stage)?;
        ensure_stage(stage, state)?;
        let value = serde_json::to_string(state)?;

        self.store.put_parameter(&name, &value).await?;
        tracing::debug!(stage, parameter = %name, "remote state written");
        Ok(())
    }
}
