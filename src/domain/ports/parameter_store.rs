//! ParameterStore port - encrypted key/value store backing remote state
//!
//! The concrete client (request signing, SecureString encryption) lives
//! outside this crate; the remote state provider only needs get and put.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParameterStoreError {
    /// No parameter under that name
    #[error("parameter not found: {name}")]
    NotFound { name: String },

    #[error("not authorized: {message}")]
    Unauthorized { message: String },

    #[error("parameter store request failed: {message}")]
    Request { message: String },
}

#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Fetch and decrypt a parameter value
    async fn get_parameter(&self, name: &str) -> Result<String, ParameterStoreError>;

    /// Create or overwrite a parameter, stored encrypted
    async fn put_parameter(&self, name: &str, value: &str) -> Result<(), ParameterStoreError>;
}
