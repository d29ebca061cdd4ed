//! Container system - inserting into and removing from single-slot housings
//!
//! Both operations change the slot and raise their event within the same
//! call, so handlers that mirror contents (applicators) are never observed
//! out of step with the slot.

use hecs::{ComponentError, Entity};

use super::has;
use crate::components::{ContainerSlot, InContainer};
use crate::context::SystemContext;
use crate::error::ContainerError;
use crate::events::{ContainerInsertAttempt, EventRegistry, InsertedIntoContainer, RemovedFromContainer};

fn slot_error(housing: Entity, err: ComponentError) -> ContainerError {
    match err {
        ComponentError::NoSuchEntity => ContainerError::NoSuchEntity(housing),
        ComponentError::MissingComponent(_) => ContainerError::NotAContainer(housing),
    }
}

/// Put `item` into `housing`'s slot. Handlers of [`ContainerInsertAttempt`]
/// on the item may refuse, in which case nothing changes.
pub fn insert(
    ctx: &mut SystemContext<'_>,
    registry: &EventRegistry,
    item: Entity,
    housing: Entity,
) -> Result<(), ContainerError> {
    if !ctx.world.contains(item) {
        return Err(ContainerError::NoSuchEntity(item));
    }
    if item == housing {
        return Err(ContainerError::SelfInsert(item));
    }
    {
        let slot = ctx
            .world
            .get::<&ContainerSlot>(housing)
            .map_err(|e| slot_error(housing, e))?;
        if !slot.is_empty() {
            return Err(ContainerError::SlotOccupied(housing));
        }
    }
    if has::<InContainer>(ctx.world, item) {
        return Err(ContainerError::AlreadyContained(item));
    }

    let mut attempt = ContainerInsertAttempt::new(housing);
    registry.raise_local(ctx, item, &mut attempt);
    if attempt.cancelled() {
        return Err(ContainerError::Vetoed {
            item,
            container: housing,
        });
    }

    ctx.world
        .get::<&mut ContainerSlot>(housing)
        .map_err(|e| slot_error(housing, e))?
        .contained = Some(item);
    ctx.world
        .insert_one(item, InContainer { container: housing })
        .map_err(|_| ContainerError::NoSuchEntity(item))?;

    log::debug!("{:?} inserted into {:?}", item, housing);
    registry.raise_local(ctx, item, &mut InsertedIntoContainer { container: housing });
    Ok(())
}

/// Take whatever is in `housing`'s slot out and return it
pub fn remove(
    ctx: &mut SystemContext<'_>,
    registry: &EventRegistry,
    housing: Entity,
) -> Result<Entity, ContainerError> {
    let item = ctx
        .world
        .get::<&mut ContainerSlot>(housing)
        .map_err(|e| slot_error(housing, e))?
        .contained
        .take()
        .ok_or(ContainerError::SlotEmpty(housing))?;

    let _ = ctx.world.remove_one::<InContainer>(item);

    log::debug!("{:?} removed from {:?}", item, housing);
    registry.raise_local(ctx, item, &mut RemovedFromContainer { container: housing });
    Ok(item)
}

/// What `housing` currently holds
pub fn contents(ctx: &SystemContext<'_>, housing: Entity) -> Option<Entity> {
    ctx.world
        .get::<&ContainerSlot>(housing)
        .ok()
        .and_then(|slot| slot.contained)
}
