//! Router entities, routing tables, registry and propagation for dvsim.
//!
//! This crate provides the simulation core: routers that track attached
//! networks and neighbor names, a registry that owns every router and
//! resolves names, the single-hop table propagation rule and reachability
//! queries. Routers never own each other; peers are referenced by name and
//! resolved through the [`Registry`] at call time.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod table;
pub mod router;
pub mod registry;
pub mod shared;

pub use error::*;
pub use table::*;
pub use router::*;
pub use registry::*;
pub use shared::*;
