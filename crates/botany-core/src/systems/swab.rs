//! Swab system - collecting and cross-pollinating seed data
//!
//! One set of handlers serves every entity with a [`BotanySwab`]: bare
//! swabs and applicator housings alike. Applicators differ only in their
//! flags (`usable_if_clean = false`) and in owning a container slot, which
//! the container handlers below use to mirror the inserted swab.

use hecs::Entity;

use super::{has, transfer, DoAfterArgs, DoAfterEvent, DoAfterKind};
use crate::components::{BotanySwab, ContainerSlot, PlantHolder, SwabSample};
use crate::context::SystemContext;
use crate::events::{
    AfterInteractEvent, ContainerInsertAttempt, EventRegistry, ExaminedEvent,
    InsertedIntoContainer, RemovedFromContainer, UseInHandEvent,
};
use crate::loc;

pub fn register(registry: &mut EventRegistry) {
    registry.subscribe_local::<BotanySwab, ExaminedEvent>(on_examined);
    registry.subscribe_local::<BotanySwab, AfterInteractEvent>(on_after_interact);
    registry.subscribe_local::<BotanySwab, DoAfterEvent>(on_do_after);
    registry.subscribe_local::<BotanySwab, UseInHandEvent>(on_clean);
    registry.subscribe_local::<BotanySwab, ContainerInsertAttempt>(on_insert_attempt);
    registry.subscribe_local::<BotanySwab, InsertedIntoContainer>(on_inserted);
    registry.subscribe_local::<BotanySwab, RemovedFromContainer>(on_removed);
}

/// Tells used swabs from unused ones. An empty applicator says neither.
fn on_examined(ctx: &mut SystemContext<'_>, uid: Entity, args: &mut ExaminedEvent) {
    if !args.is_in_details_range {
        return;
    }
    let Ok(swab) = ctx.world.get::<&BotanySwab>(uid) else {
        return;
    };

    if swab.sample.is_loaded() {
        args.push_markup(loc::SWAB_USED);
    } else if swab.usable_if_clean {
        args.push_markup(loc::SWAB_UNUSED);
    }
}

/// Start swabbing a plant
fn on_after_interact(ctx: &mut SystemContext<'_>, uid: Entity, args: &mut AfterInteractEvent) {
    let Some(target) = args.target else {
        return;
    };
    if !args.can_reach || !has::<PlantHolder>(ctx.world, target) {
        return;
    }

    let Ok((delay, unusable)) = ctx
        .world
        .get::<&BotanySwab>(uid)
        .map(|swab| (swab.swab_delay, swab.is_unusable()))
    else {
        return;
    };

    if unusable {
        ctx.popups.popup(loc::BOTANY_SWAB_UNUSABLE, uid, Some(args.user));
        return;
    }

    let do_after = DoAfterArgs::new(args.user, delay, DoAfterKind::BotanySwab, Some(uid))
        .with_target(target)
        .with_used(uid)
        .broadcast(true)
        .break_on_move(true)
        .need_hand(true);

    if let Err(err) = ctx.do_afters.start(ctx.world, do_after) {
        log::debug!("swab {:?} not started: {}", uid, err);
    }
}

/// Pick up seed data, or cross the carried data into the plant
fn on_do_after(ctx: &mut SystemContext<'_>, uid: Entity, args: &mut DoAfterEvent) {
    if args.cancelled || args.handled || args.args.kind != DoAfterKind::BotanySwab {
        return;
    }
    let Some(target) = args.args.target else {
        return;
    };
    let Ok(old) = ctx
        .world
        .get::<&PlantHolder>(target)
        .map(|plant| plant.seed.clone())
    else {
        return;
    };
    let Ok((sample, contaminate, sound, unusable)) =
        ctx.world.get::<&BotanySwab>(uid).map(|swab| {
            (
                swab.sample.clone(),
                swab.contaminate,
                swab.swab_sound.clone(),
                swab.is_unusable(),
            )
        })
    else {
        return;
    };
    // An applicator unloaded during the delay has nothing to apply
    if unusable {
        return;
    }

    if let Some(sound) = &sound {
        ctx.audio.play_pvs(sound, uid);
    }

    let user = args.args.user;
    match sample {
        SwabSample::Empty => {
            transfer::set_sample(ctx.world, uid, SwabSample::from(old));
            log::debug!("swab {:?} collected from {:?}", uid, target);
            ctx.popups.popup(loc::BOTANY_SWAB_FROM, target, Some(user));
        }
        SwabSample::Loaded(carried) => {
            // Nothing growing to pollinate
            let Some(old) = old else {
                return;
            };

            let crossed = ctx.mutation.cross(&carried, &old);
            if let Ok(mut plant) = ctx.world.get::<&mut PlantHolder>(target) {
                plant.seed = Some(crossed);
            }

            if contaminate {
                transfer::set_sample(ctx.world, uid, SwabSample::Loaded(old));
            }

            log::debug!("swab {:?} deposited to {:?}", uid, target);
            ctx.popups.popup(loc::BOTANY_SWAB_TO, target, Some(user));
        }
    }

    args.handled = true;
}

/// Wipe a cleanable swab
fn on_clean(ctx: &mut SystemContext<'_>, uid: Entity, args: &mut UseInHandEvent) {
    if args.handled {
        return;
    }
    let Ok((cleanable, sound)) = ctx
        .world
        .get::<&BotanySwab>(uid)
        .map(|swab| (swab.cleanable, swab.clean_sound.clone()))
    else {
        return;
    };
    if !cleanable {
        return;
    }

    transfer::set_sample(ctx.world, uid, SwabSample::Empty);
    ctx.popups.popup(loc::BOTANY_SWAB_CLEAN, uid, Some(args.user));
    if let Some(sound) = &sound {
        ctx.audio.play_pvs(sound, uid);
    }
    args.handled = true;
}

/// Applicators only take bare swabs that carry pollen
fn on_insert_attempt(ctx: &mut SystemContext<'_>, uid: Entity, args: &mut ContainerInsertAttempt) {
    if !has::<BotanySwab>(ctx.world, args.container) {
        return;
    }
    // Mirroring is one level deep
    if has::<ContainerSlot>(ctx.world, uid) {
        log::warn!(
            "refusing housing {:?} for applicator {:?}",
            uid,
            args.container
        );
        ctx.popups.popup(loc::SWAB_APPLICATOR_NO_NESTING, uid, None);
        args.cancel();
        return;
    }
    let loaded = ctx
        .world
        .get::<&BotanySwab>(uid)
        .map(|swab| swab.sample.is_loaded())
        .unwrap_or(false);
    if loaded {
        return;
    }

    log::warn!(
        "refusing clean swab {:?} for applicator {:?}",
        uid,
        args.container
    );
    ctx.popups.popup(loc::SWAB_APPLICATOR_NEEDS_POLLEN, uid, None);
    args.cancel();
}

fn on_inserted(ctx: &mut SystemContext<'_>, uid: Entity, args: &mut InsertedIntoContainer) {
    transfer::mirror_into_housing(ctx.world, args.container, uid);
}

fn on_removed(ctx: &mut SystemContext<'_>, _uid: Entity, args: &mut RemovedFromContainer) {
    transfer::clear_housing(ctx.world, args.container);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Hands, Position, SeedData, Vec3};
    use crate::context::tests::TestParts;
    use crate::systems::{default_registry, DoAfterId};

    fn loaded(name: &str) -> SwabSample {
        SwabSample::Loaded(SeedData::new(name))
    }

    fn finish(
        parts: &mut TestParts,
        registry: &EventRegistry,
        swab: Entity,
        plant: Entity,
        user: Entity,
    ) -> DoAfterEvent {
        let args = DoAfterArgs::new(user, 0.0, DoAfterKind::BotanySwab, Some(swab))
            .with_target(plant)
            .with_used(swab);
        let mut ev = DoAfterEvent::new(DoAfterId(0), args, false);
        let mut ctx = parts.context();
        registry.raise_local(&mut ctx, swab, &mut ev);
        ev
    }

    fn sample(parts: &TestParts, swab: Entity) -> SwabSample {
        parts.world.get::<&BotanySwab>(swab).unwrap().sample.clone()
    }

    fn seed(parts: &TestParts, plant: Entity) -> Option<SeedData> {
        parts.world.get::<&PlantHolder>(plant).unwrap().seed.clone()
    }

    #[test]
    fn test_examine_text() {
        let registry = default_registry();
        let mut parts = TestParts::new();
        let viewer = parts.world.spawn(());
        let clean = parts.world.spawn((BotanySwab::default(),));
        let used = parts
            .world
            .spawn((BotanySwab::default().with_sample(loaded("rice")),));
        let empty_applicator = parts.world.spawn((BotanySwab {
            usable_if_clean: false,
            ..Default::default()
        },));

        let mut ctx = parts.context();
        let mut examine = |target: Entity, in_range: bool| {
            let mut ev = ExaminedEvent::new(viewer, in_range);
            registry.raise_local(&mut ctx, target, &mut ev);
            ev.into_markup()
        };

        assert_eq!(examine(clean, true), vec![loc::SWAB_UNUSED]);
        assert_eq!(examine(used, true), vec![loc::SWAB_USED]);
        assert!(examine(empty_applicator, true).is_empty());
        assert!(examine(used, false).is_empty());
    }

    #[test]
    fn test_interact_starts_do_after() {
        let registry = default_registry();
        let mut parts = TestParts::new();
        let user = parts.world.spawn((Position::new(Vec3::ZERO), Hands::default()));
        let plant = parts.world.spawn((PlantHolder::new(Some(SeedData::new("oat"))),));
        let rock = parts.world.spawn(());
        let swab = parts.world.spawn((BotanySwab::default(),));

        let mut ctx = parts.context();
        // Not a plant, out of reach, nothing targeted
        for (target, can_reach) in [(Some(rock), true), (Some(plant), false), (None, true)] {
            let mut ev = AfterInteractEvent::new(user, target, can_reach);
            registry.raise_local(&mut ctx, swab, &mut ev);
        }
        assert_eq!(ctx.do_afters.active_count(), 0);

        let mut ev = AfterInteractEvent::new(user, Some(plant), true);
        registry.raise_local(&mut ctx, swab, &mut ev);
        assert_eq!(ctx.do_afters.active_count(), 1);
        assert!(parts.popups.pending().is_empty());
    }

    #[test]
    fn test_unusable_applicator_refuses() {
        let registry = default_registry();
        let mut parts = TestParts::new();
        let user = parts.world.spawn((Position::default(), Hands::default()));
        let plant = parts.world.spawn((PlantHolder::new(Some(SeedData::new("oat"))),));
        let applicator = parts.world.spawn((BotanySwab {
            usable_if_clean: false,
            ..Default::default()
        },));

        let mut ctx = parts.context();
        registry.raise_local(
            &mut ctx,
            applicator,
            &mut AfterInteractEvent::new(user, Some(plant), true),
        );
        assert_eq!(ctx.do_afters.active_count(), 0);

        let popups = parts.popups.drain();
        assert_eq!(popups.len(), 1);
        assert_eq!(popups[0].key, loc::BOTANY_SWAB_UNUSABLE);
        assert_eq!(popups[0].viewer, Some(user));
    }

    #[test]
    fn test_pickup() {
        let registry = default_registry();
        let mut parts = TestParts::new();
        let user = parts.world.spawn(());
        let plant = parts.world.spawn((PlantHolder::new(Some(SeedData::new("kale"))),));
        let swab = parts.world.spawn((BotanySwab::default(),));

        let ev = finish(&mut parts, &registry, swab, plant, user);
        assert!(ev.handled);
        assert_eq!(sample(&parts, swab), loaded("kale"));
        assert_eq!(seed(&parts, plant), Some(SeedData::new("kale")));
        assert_eq!(parts.popups.pending()[0].key, loc::BOTANY_SWAB_FROM);
        assert_eq!(parts.popups.pending()[0].subject, plant);
    }

    #[test]
    fn test_deposit_without_contamination() {
        let registry = default_registry();
        let mut parts = TestParts::new();
        let user = parts.world.spawn(());
        let plant = parts.world.spawn((PlantHolder::new(Some(SeedData::new("b"))),));
        let swab = parts.world.spawn((BotanySwab {
            contaminate: false,
            ..Default::default()
        }
        .with_sample(loaded("a")),));

        let ev = finish(&mut parts, &registry, swab, plant, user);
        assert!(ev.handled);
        assert_eq!(seed(&parts, plant), Some(SeedData::new("axb")));
        assert_eq!(sample(&parts, swab), loaded("a"));
        assert_eq!(parts.popups.pending()[0].key, loc::BOTANY_SWAB_TO);
    }

    #[test]
    fn test_deposit_with_contamination() {
        let registry = default_registry();
        let mut parts = TestParts::new();
        let user = parts.world.spawn(());
        let plant = parts.world.spawn((PlantHolder::new(Some(SeedData::new("b"))),));
        let swab = parts
            .world
            .spawn((BotanySwab::default().with_sample(loaded("a")),));

        finish(&mut parts, &registry, swab, plant, user);
        assert_eq!(seed(&parts, plant), Some(SeedData::new("axb")));
        assert_eq!(sample(&parts, swab), loaded("b"));
    }

    #[test]
    fn test_deposit_onto_empty_plant_is_noop() {
        let registry = default_registry();
        let mut parts = TestParts::new();
        let user = parts.world.spawn(());
        let plant = parts.world.spawn((PlantHolder::empty(),));
        let swab = parts
            .world
            .spawn((BotanySwab::default().with_sample(loaded("a")),));

        let ev = finish(&mut parts, &registry, swab, plant, user);
        assert!(!ev.handled);
        assert_eq!(seed(&parts, plant), None);
        assert_eq!(sample(&parts, swab), loaded("a"));
        assert!(parts.popups.pending().is_empty());
    }

    #[test]
    fn test_cancelled_or_lost_target_is_noop() {
        let registry = default_registry();
        let mut parts = TestParts::new();
        let user = parts.world.spawn(());
        let plant = parts.world.spawn((PlantHolder::new(Some(SeedData::new("kale"))),));
        let swab = parts.world.spawn((BotanySwab::default(),));

        let args = DoAfterArgs::new(user, 0.0, DoAfterKind::BotanySwab, Some(swab))
            .with_target(plant)
            .with_used(swab);
        let mut cancelled = DoAfterEvent::new(DoAfterId(0), args, true);
        {
            let mut ctx = parts.context();
            registry.raise_local(&mut ctx, swab, &mut cancelled);
        }
        assert!(!cancelled.handled);
        assert_eq!(sample(&parts, swab), SwabSample::Empty);

        parts.world.remove_one::<PlantHolder>(plant).unwrap();
        let ev = finish(&mut parts, &registry, swab, plant, user);
        assert!(!ev.handled);
        assert_eq!(sample(&parts, swab), SwabSample::Empty);
        assert!(parts.sounds.pending().is_empty());
    }

    #[test]
    fn test_completion_on_emptied_applicator_is_noop() {
        let registry = default_registry();
        let mut parts = TestParts::new();
        let user = parts.world.spawn(());
        let plant = parts.world.spawn((PlantHolder::new(Some(SeedData::new("kale"))),));
        // Started loaded, then its swab was taken out before the delay ran out
        let applicator = parts.world.spawn((BotanySwab {
            usable_if_clean: false,
            swab_sound: Some(crate::components::SoundCue::new("swab")),
            ..Default::default()
        },));

        let ev = finish(&mut parts, &registry, applicator, plant, user);
        assert!(!ev.handled);
        assert_eq!(sample(&parts, applicator), SwabSample::Empty);
        assert!(parts.popups.pending().is_empty());
        assert!(parts.sounds.pending().is_empty());
    }

    #[test]
    fn test_handled_completion_not_reprocessed() {
        let registry = default_registry();
        let mut parts = TestParts::new();
        let user = parts.world.spawn(());
        let plant = parts.world.spawn((PlantHolder::new(Some(SeedData::new("b"))),));
        let swab = parts
            .world
            .spawn((BotanySwab::default().with_sample(loaded("a")),));

        let mut ev = finish(&mut parts, &registry, swab, plant, user);
        assert!(ev.handled);

        // A second delivery of the same completion must not cross again
        let mut ctx = parts.context();
        registry.raise_local(&mut ctx, swab, &mut ev);
        assert_eq!(seed(&parts, plant), Some(SeedData::new("axb")));
        assert_eq!(sample(&parts, swab), loaded("b"));
    }

    #[test]
    fn test_clean() {
        let registry = default_registry();
        let mut parts = TestParts::new();
        let user = parts.world.spawn(());
        let wipeable = parts.world.spawn((BotanySwab {
            cleanable: true,
            clean_sound: Some(crate::components::SoundCue::new("splat")),
            ..Default::default()
        }
        .with_sample(loaded("a")),));
        let disposable = parts
            .world
            .spawn((BotanySwab::default().with_sample(loaded("a")),));

        let mut ctx = parts.context();
        let mut ev = UseInHandEvent::new(user);
        registry.raise_local(&mut ctx, wipeable, &mut ev);
        assert!(ev.handled);

        let mut ev = UseInHandEvent::new(user);
        registry.raise_local(&mut ctx, disposable, &mut ev);
        assert!(!ev.handled);

        assert_eq!(sample(&parts, wipeable), SwabSample::Empty);
        assert_eq!(sample(&parts, disposable), loaded("a"));
        assert_eq!(parts.popups.pending()[0].key, loc::BOTANY_SWAB_CLEAN);
        assert_eq!(parts.sounds.pending().len(), 1);
    }

    #[test]
    fn test_clean_skips_handled_event() {
        let registry = default_registry();
        let mut parts = TestParts::new();
        let user = parts.world.spawn(());
        let swab = parts.world.spawn((BotanySwab {
            cleanable: true,
            ..Default::default()
        }
        .with_sample(loaded("a")),));

        let mut ctx = parts.context();
        let mut ev = UseInHandEvent {
            user,
            handled: true,
        };
        registry.raise_local(&mut ctx, swab, &mut ev);
        assert_eq!(sample(&parts, swab), loaded("a"));
    }
}
