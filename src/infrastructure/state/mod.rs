//! State Provider Implementations
//!
//! Concrete implementations of the StateProvider port.

mod cached;
mod local;
mod remote;

pub use cached::{CachedStateProvider, StateDiff};
pub use local::LocalStateProvider;
pub use remote::{RemoteStateProvider, PARAMETER_PREFIX};

#[cfg(test)]
pub(crate) use remote::testing::MemoryParameterStore;
