//! Bootstrap error types.

use dvsim_routing::RoutingError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a topology file.
///
/// Every variant is fatal for the whole file.
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// The file could not be read
    #[error("failed to read {path:?}: {source}")]
    Io {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Wrong number of `!`-separated fields
    #[error("line {line}: expected 3 fields, found {found}")]
    FieldCount {
        /// 1-based line number
        line: usize,
        /// Number of fields found
        found: usize,
    },

    /// Router name is empty
    #[error("line {line}: empty router name")]
    EmptyName {
        /// 1-based line number
        line: usize,
    },

    /// Neighbor list contains an empty name
    #[error("line {line}: empty neighbor name")]
    EmptyNeighbor {
        /// 1-based line number
        line: usize,
    },

    /// Network field is not `network:distance`
    #[error("line {line}: malformed network {field:?}")]
    MalformedNetwork {
        /// 1-based line number
        line: usize,
        /// Raw field text
        field: String,
    },

    /// Distance is not a non-negative integer
    #[error("line {line}: invalid distance {value:?}")]
    InvalidDistance {
        /// 1-based line number
        line: usize,
        /// Raw distance text
        value: String,
    },

    /// The same router name appears on two lines
    #[error("line {line}: router {name} defined twice")]
    DuplicateRouter {
        /// 1-based line number of the second definition
        line: usize,
        /// Router name
        name: String,
    },

    /// A neighbor name does not match any router in the file
    #[error("line {line}: router {router} lists unknown neighbor {neighbor}")]
    UnknownNeighbor {
        /// 1-based line number
        line: usize,
        /// Router whose neighbor list is being resolved
        router: String,
        /// Unresolved neighbor name
        neighbor: String,
    },

    /// Registry rejected an operation
    #[error(transparent)]
    Registry(#[from] RoutingError),
}

impl BootstrapError {
    /// Line number the error refers to, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            BootstrapError::FieldCount { line, .. }
            | BootstrapError::EmptyName { line }
            | BootstrapError::EmptyNeighbor { line }
            | BootstrapError::MalformedNetwork { line, .. }
            | BootstrapError::InvalidDistance { line, .. }
            | BootstrapError::DuplicateRouter { line, .. }
            | BootstrapError::UnknownNeighbor { line, .. } => Some(*line),
            BootstrapError::Io { .. } | BootstrapError::Registry(_) => None,
        }
    }
}
