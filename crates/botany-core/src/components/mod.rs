//! Component definitions for the ECS world.
//!
//! Components are pure data structs attached to entities.
//! They have no behavior - that lives in systems.

mod common;
mod container;
mod plant;
mod seed;
mod swab;

pub use common::*;
pub use container::*;
pub use plant::*;
pub use seed::*;
pub use swab::*;
