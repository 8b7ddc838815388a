//! Bootstrap topology files for dvsim.
//!
//! A topology file lists one router per line as
//! `name!neighbor1;neighbor2!network:distance`. Loading is done in two
//! passes so that neighbor lists may reference routers defined further
//! down the file.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod record;
pub mod bootstrap;

pub use error::*;
pub use record::*;
pub use bootstrap::*;
