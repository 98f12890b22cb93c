//! Use Case Factory
//!
//! Creates state providers and use cases with infrastructure dependencies
//! wired up. This is the dependency injection point for the library.

use std::path::Path;
use std::sync::Arc;

use crate::application::{DnsReconcileUseCase, DnsVerifyUseCase};
use crate::config::{Config, StateProviderKind};
use crate::domain::ports::{DnsEventSink, ParameterStore, StateError, StateProvider};
use crate::error::{RedeployError, RedeployResult};
use crate::infrastructure::{
    CachedStateProvider, DnsProviderFactory, LocalStateProvider, RemoteStateProvider,
    SystemResolver,
};

/// Create the state provider the workspace config asks for.
///
/// `remote` state is the parameter store fronted by a local cache, so the
/// store is required in that mode and ignored otherwise.
pub fn create_state_provider(
    config: &Config,
    workspace_root: &Path,
    parameter_store: Option<Arc<dyn ParameterStore>>,
) -> RedeployResult<Arc<dyn StateProvider>> {
    let local: Arc<dyn StateProvider> =
        Arc::new(LocalStateProvider::new(config.state_directory(workspace_root)));

    match config.state.provider {
        StateProviderKind::Local => Ok(local),
        StateProviderKind::Remote => {
            let workspace_name = config
                .workspace_name()
                .ok_or(StateError::MissingWorkspaceName)?;
            let store = parameter_store.ok_or_else(|| RedeployError::Config {
                message: "remote state requires a parameter store".to_string(),
            })?;
            let remote = Arc::new(RemoteStateProvider::new(store, workspace_name)?);
            tracing::debug!(workspace = workspace_name, "using cached remote state");
            Ok(Arc::new(CachedStateProvider::new(remote, local)))
        }
    }
}

/// Create a reconcile use case backed by the system resolver
pub fn create_dns_reconcile_use_case(
    factory: DnsProviderFactory,
    events: Arc<dyn DnsEventSink>,
) -> RedeployResult<DnsReconcileUseCase> {
    let resolver = Arc::new(SystemResolver::from_system_conf()?);
    Ok(DnsReconcileUseCase::new(factory, resolver).with_events(events))
}

/// Create a verify use case backed by the system resolver
pub fn create_dns_verify_use_case(
    events: Arc<dyn DnsEventSink>,
) -> RedeployResult<DnsVerifyUseCase> {
    let resolver = Arc::new(SystemResolver::from_system_conf()?);
    Ok(DnsVerifyUseCase::new(resolver).with_events(events))
}
