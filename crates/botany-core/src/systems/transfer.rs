//! Seed data transfer between swabs, housings and their contents.
//!
//! A housing (an entity with both [`BotanySwab`] and [`ContainerSlot`])
//! always carries the same sample as the swab inside it, or `Empty` when
//! nothing is inside. Every write to a swab sample goes through
//! [`set_sample`] so that a housing and its swab change together.

use hecs::{Entity, World};

use super::has;
use crate::components::{BotanySwab, ContainerSlot, InContainer, SwabSample};

/// Sample currently on `entity`, if it is a swab
pub fn sample_of(world: &World, entity: Entity) -> Option<SwabSample> {
    world
        .get::<&BotanySwab>(entity)
        .ok()
        .map(|swab| swab.sample.clone())
}

/// The swab inside `housing`, if any
pub fn contained_swab(world: &World, housing: Entity) -> Option<Entity> {
    let item = world.get::<&ContainerSlot>(housing).ok()?.contained?;
    has::<BotanySwab>(world, item).then_some(item)
}

/// Replace the sample on `entity`. When `entity` is a housing, the swab
/// inside it receives the same sample; when it sits inside a housing, the
/// housing does. Returns false if `entity` is not a swab.
pub fn set_sample(world: &mut World, entity: Entity, sample: SwabSample) -> bool {
    let inner = contained_swab(world, entity);
    let outer = world
        .get::<&InContainer>(entity)
        .ok()
        .map(|c| c.container)
        .filter(|&housing| has::<BotanySwab>(world, housing));

    match world.get::<&mut BotanySwab>(entity) {
        Ok(mut swab) => swab.sample = sample.clone(),
        Err(_) => return false,
    }

    for linked in inner.into_iter().chain(outer) {
        if let Ok(mut swab) = world.get::<&mut BotanySwab>(linked) {
            swab.sample = sample.clone();
        }
    }
    true
}

/// Copy the sample of `swab` onto `housing` without touching `swab`
pub fn mirror_into_housing(world: &mut World, housing: Entity, swab: Entity) {
    let Some(sample) = sample_of(world, swab) else {
        return;
    };
    if let Ok(mut applicator) = world.get::<&mut BotanySwab>(housing) {
        applicator.sample = sample;
    }
}

/// Reset `housing` to an empty sample
pub fn clear_housing(world: &mut World, housing: Entity) {
    if let Ok(mut applicator) = world.get::<&mut BotanySwab>(housing) {
        applicator.sample = SwabSample::Empty;
    }
}

/// A housing whose sample differs from the swab inside it
#[derive(Debug, Clone, PartialEq)]
pub struct MirrorViolation {
    pub housing: Entity,
    pub expected: SwabSample,
    pub actual: SwabSample,
}

/// Every housing that breaks the mirror rule. Empty when the world is consistent.
pub fn check_mirror_invariant(world: &World) -> Vec<MirrorViolation> {
    let mut violations = Vec::new();

    for (housing, (swab, slot)) in world.query::<(&BotanySwab, &ContainerSlot)>().iter() {
        let expected = slot
            .contained
            .and_then(|item| sample_of(world, item))
            .unwrap_or_default();
        if swab.sample != expected {
            violations.push(MirrorViolation {
                housing,
                expected,
                actual: swab.sample.clone(),
            });
        }
    }

    violations
}
