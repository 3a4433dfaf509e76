//! Model-wide base error type.
//!
//! Sub-crates define their own error enums and wrap `VtError` as one variant
//! via `#[from]`.

use thiserror::Error;

use crate::AgentId;

/// The top-level error type for `vt-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum VtError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `vt-*` crates.
pub type VtResult<T> = Result<T, VtError>;
