//! Presentation Layer
//!
//! This layer handles:
//! - Creating state providers and use cases with infrastructure dependencies
//! - Rendering run summaries for operators
//!
//! ## Structure
//!
//! - `factory` - Wires ports to their implementations (dependency injection)
//! - `summary` - Plain-text reconcile and verification summaries
//!
//! ## Usage
//!
//! ```ignore
//! use redeploy::presentation::factory;
//!
//! let (config, _warnings) = Config::load_workspace(root)?;
//! let state = factory::create_state_provider(&config, root, None)?;
//! ```

pub mod factory;
pub mod summary;

pub use factory::{create_dns_reconcile_use_case, create_dns_verify_use_case, create_state_provider};
pub use summary::SummaryRenderer;
