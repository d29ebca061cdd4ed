//! Typed subscription registry.
//!
//! Subscriptions are keyed by event type. A local subscription also names a
//! component: it only fires when the event is raised on an entity that has
//! that component, so behavior follows capabilities rather than entity kinds.
//! The registry is built once and handed to the engine; there is no global bus.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use hecs::{Component, Entity, World};

use crate::context::SystemContext;

/// Handler for an event raised on a specific entity
pub type LocalHandler<E> = fn(&mut SystemContext<'_>, Entity, &mut E);

/// Handler for an event raised without an owning entity
pub type BroadcastHandler<E> = fn(&mut SystemContext<'_>, &mut E);

struct LocalSubscription<E> {
    component: &'static str,
    has_component: fn(&World, Entity) -> bool,
    handler: LocalHandler<E>,
}

fn has_component<C: Component>(world: &World, entity: Entity) -> bool {
    world
        .entity(entity)
        .map(|e| e.has::<C>())
        .unwrap_or(false)
}

#[derive(Default)]
pub struct EventRegistry {
    local: HashMap<TypeId, Box<dyn Any>>,
    broadcast: HashMap<TypeId, Box<dyn Any>>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `handler` whenever `E` is raised on an entity carrying `C`
    pub fn subscribe_local<C: Component, E: 'static>(&mut self, handler: LocalHandler<E>) {
        let subs = self
            .local
            .entry(TypeId::of::<E>())
            .or_insert_with(|| Box::new(Vec::<LocalSubscription<E>>::new()));
        if let Some(subs) = subs.downcast_mut::<Vec<LocalSubscription<E>>>() {
            subs.push(LocalSubscription {
                component: std::any::type_name::<C>(),
                has_component: has_component::<C>,
                handler,
            });
        }
    }

    /// Run `handler` for every broadcast `E`
    pub fn subscribe_broadcast<E: 'static>(&mut self, handler: BroadcastHandler<E>) {
        let subs = self
            .broadcast
            .entry(TypeId::of::<E>())
            .or_insert_with(|| Box::new(Vec::<BroadcastHandler<E>>::new()));
        if let Some(subs) = subs.downcast_mut::<Vec<BroadcastHandler<E>>>() {
            subs.push(handler);
        }
    }

    /// Deliver `event` to every local subscriber whose component `entity` has,
    /// in subscription order. Returns how many handlers ran.
    pub fn raise_local<E: 'static>(
        &self,
        ctx: &mut SystemContext<'_>,
        entity: Entity,
        event: &mut E,
    ) -> usize {
        let Some(subs) = self
            .local
            .get(&TypeId::of::<E>())
            .and_then(|subs| subs.downcast_ref::<Vec<LocalSubscription<E>>>())
        else {
            return 0;
        };

        let mut invoked = 0;
        for sub in subs {
            // Re-checked per handler: an earlier handler may have removed the component
            if !(sub.has_component)(ctx.world, entity) {
                continue;
            }
            log::trace!(
                "{} -> {:?} ({})",
                std::any::type_name::<E>(),
                entity,
                sub.component
            );
            (sub.handler)(ctx, entity, event);
            invoked += 1;
        }
        invoked
    }

    /// Deliver `event` to every broadcast subscriber. Returns how many handlers ran.
    pub fn raise_broadcast<E: 'static>(&self, ctx: &mut SystemContext<'_>, event: &mut E) -> usize {
        let Some(subs) = self
            .broadcast
            .get(&TypeId::of::<E>())
            .and_then(|subs| subs.downcast_ref::<Vec<BroadcastHandler<E>>>())
        else {
            return 0;
        };

        for handler in subs {
            handler(ctx, event);
        }
        subs.len()
    }

    /// Number of local subscriptions for `E`
    pub fn local_count<E: 'static>(&self) -> usize {
        self.local
            .get(&TypeId::of::<E>())
            .and_then(|subs| subs.downcast_ref::<Vec<LocalSubscription<E>>>())
            .map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRegistry")
            .field("local_event_types", &self.local.len())
            .field("broadcast_event_types", &self.broadcast.len())
            .finish()
    }
}
