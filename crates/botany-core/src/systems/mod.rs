//! Systems - event handlers and schedulers that operate on components

mod container;
mod do_after;
mod swab;
mod transfer;

pub use container::*;
pub use do_after::*;
pub use swab::*;
pub use transfer::*;

use hecs::{Component, Entity, World};

use crate::events::EventRegistry;

/// Registry with every built-in system subscribed
pub fn default_registry() -> EventRegistry {
    let mut registry = EventRegistry::new();
    swab::register(&mut registry);
    registry
}

/// Does `entity` exist and carry `C`?
pub fn has<C: Component>(world: &World, entity: Entity) -> bool {
    world
        .entity(entity)
        .map(|e| e.has::<C>())
        .unwrap_or(false)
}
