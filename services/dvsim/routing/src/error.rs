//! Routing core error types.

use thiserror::Error;

/// Errors returned by registry operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    /// Referenced router does not exist
    #[error("router not found: {0}")]
    NotFound(String),

    /// A router with this name already exists
    #[error("name is taken: {0}")]
    NameTaken(String),
}

/// Result alias for routing core operations
pub type Result<T> = std::result::Result<T, RoutingError>;
