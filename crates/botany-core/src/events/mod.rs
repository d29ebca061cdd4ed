//! Events raised on entities and the registry that routes them to systems.

mod registry;
mod types;

pub use registry::*;
pub use types::*;
