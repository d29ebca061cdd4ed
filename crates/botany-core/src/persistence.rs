//! Save/Load functionality for persisting world state
//!
//! Uses bincode for compact binary serialization. Components are serialized
//! individually per entity then reconstructed on load. Entity handles are
//! kept (as `Entity::to_bits`) so container links survive the round trip.

use hecs::{Entity, World};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::components::*;
use crate::error::SaveError;

/// Version number for save file format (increment when format changes)
const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of the world
#[derive(Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version
    pub version: u32,
    /// Simulation time in seconds
    pub sim_time: f64,
    /// All entities with their components
    pub entities: Vec<SerializableEntity>,
}

/// All persisted components for an entity, serialized as optionals
#[derive(Serialize, Deserialize, Default)]
pub struct SerializableEntity {
    /// Entity handle bits
    pub id: u64,
    pub name: Option<Name>,
    pub position: Option<Position>,
    pub hands: Option<Hands>,
    pub swab: Option<BotanySwab>,
    pub plant: Option<PlantHolder>,
    pub container: Option<ContainerSlot>,
    /// Handle bits of the entity inside `container`
    pub contained: Option<u64>,
}

/// Extract all entities from a world into serializable form
fn serialize_entities(world: &World) -> Vec<SerializableEntity> {
    let mut entities = Vec::new();

    for entity_ref in world.iter() {
        let mut se = SerializableEntity {
            id: entity_ref.entity().to_bits().get(),
            ..Default::default()
        };

        if let Some(c) = entity_ref.get::<&Name>() {
            se.name = Some((*c).clone());
        }
        if let Some(c) = entity_ref.get::<&Position>() {
            se.position = Some(*c);
        }
        if let Some(c) = entity_ref.get::<&Hands>() {
            se.hands = Some(*c);
        }
        if let Some(c) = entity_ref.get::<&BotanySwab>() {
            se.swab = Some((*c).clone());
        }
        if let Some(c) = entity_ref.get::<&PlantHolder>() {
            se.plant = Some((*c).clone());
        }
        if let Some(c) = entity_ref.get::<&ContainerSlot>() {
            se.contained = c.contained.map(|e| e.to_bits().get());
            se.container = Some((*c).clone());
        }

        entities.push(se);
    }

    entities
}

fn entity_from_bits(bits: u64) -> Result<Entity, SaveError> {
    Entity::from_bits(bits).ok_or(SaveError::InvalidEntity(bits))
}

/// Rebuild a world from serialized entities
fn deserialize_entities(entities: Vec<SerializableEntity>) -> Result<World, SaveError> {
    let mut world = World::new();
    let mut links = Vec::new();

    for se in entities {
        let entity = entity_from_bits(se.id)?;
        world.spawn_at(entity, ());

        if let Some(c) = se.name {
            let _ = world.insert_one(entity, c);
        }
        if let Some(c) = se.position {
            let _ = world.insert_one(entity, c);
        }
        if let Some(c) = se.hands {
            let _ = world.insert_one(entity, c);
        }
        if let Some(c) = se.swab {
            let _ = world.insert_one(entity, c);
        }
        if let Some(c) = se.plant {
            let _ = world.insert_one(entity, c);
        }
        if let Some(c) = se.container {
            let _ = world.insert_one(entity, c);
        }
        if let Some(bits) = se.contained {
            links.push((entity, entity_from_bits(bits)?));
        }
    }

    // Relink slots once every entity exists
    for (housing, item) in links {
        if !world.contains(item) {
            return Err(SaveError::InvalidEntity(item.to_bits().get()));
        }
        if let Ok(mut slot) = world.get::<&mut ContainerSlot>(housing) {
            slot.contained = Some(item);
        }
        let _ = world.insert_one(item, InContainer { container: housing });
    }

    Ok(world)
}

/// Save the world to a writer
pub fn save_world<W: Write>(writer: W, world: &World, sim_time: f64) -> Result<(), SaveError> {
    let save_data = SaveData {
        version: SAVE_VERSION,
        sim_time,
        entities: serialize_entities(world),
    };

    bincode::serialize_into(writer, &save_data)?;
    Ok(())
}

/// Load a world from a reader
pub fn load_world<R: Read>(reader: R) -> Result<LoadedWorld, SaveError> {
    let save_data: SaveData = bincode::deserialize_from(reader)?;

    if save_data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save_data.version,
        });
    }

    Ok(LoadedWorld {
        world: deserialize_entities(save_data.entities)?,
        sim_time: save_data.sim_time,
    })
}

/// Result of loading a save
pub struct LoadedWorld {
    pub world: World,
    pub sim_time: f64,
}
