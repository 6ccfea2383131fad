//! Error type shared by the kernel.
//!
//! Configuration and invariant violations are detected while the kernel is set up,
//! before any time stepping happens. The only condition reported from a computation
//! that otherwise succeeds is a stoichiometric coefficient coming out negative for a
//! product that is not allowed to be consumed, which surfaces as
//! [`GenexError::InvalidReactionScheme`].
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenexError {
    #[error("invalid reaction scheme (reaction {reaction}): {reason}")]
    InvalidReactionScheme { reaction: usize, reason: String },
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("argument out of domain: {0}")]
    Argument(String),
    #[error("singular linear system, no pivot in column {column}")]
    SingularSystem { column: usize },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GenexError {
    pub fn scheme(reaction: usize, reason: impl Into<String>) -> Self {
        GenexError::InvalidReactionScheme {
            reaction,
            reason: reason.into(),
        }
    }
    pub fn config(reason: impl Into<String>) -> Self {
        GenexError::InvalidConfiguration(reason.into())
    }
}
