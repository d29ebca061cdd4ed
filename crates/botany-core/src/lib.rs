//! Botany Core - swab and applicator interactions for plant cross-pollination
//!
//! Swabs collect seed data from one plant and cross it into another. An
//! applicator is a housing that holds one swab and mirrors its seed data.
//!
//! # Architecture
//!
//! The crate uses an Entity Component System (ECS) architecture via `hecs`:
//! - **Entities**: Actors, plants, swabs, applicators
//! - **Components**: Pure data attached to entities (BotanySwab, PlantHolder, ContainerSlot, etc.)
//! - **Systems**: Event handlers subscribed per component through an [`events::EventRegistry`]
//!
//! Swabbing takes time. An interaction starts a do-after that the engine
//! advances on every [`engine::BotanyEngine::update`]; moving away or losing
//! hands cancels it.
//!
//! # Example
//!
//! ```rust,no_run
//! use botany_core::prelude::*;
//! use botany_core::config::{EngineConfig, SwabPrototype};
//!
//! let mut engine = BotanyEngine::new(EngineConfig::default());
//!
//! let gardener = engine.spawn_actor("Gardener", Vec3::ZERO);
//! let tray = engine.spawn_plant(Some(SeedData::new("tomato")), Vec3::new(1.0, 0.0, 0.0));
//! let swab = engine.spawn_swab(&SwabPrototype::botany_swab(), Vec3::ZERO);
//!
//! engine.interact(gardener, swab, Some(tray), true);
//! engine.update(2.0);
//! assert!(engine.sample_of(swab).is_some_and(|s| s.is_loaded()));
//! ```

pub mod components;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod events;
pub mod loc;
pub mod mutation;
pub mod persistence;
pub mod services;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::BotanyEngine;
    pub use crate::mutation::{Mutation, RandomCross};
}
