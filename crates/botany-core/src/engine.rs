//! Botany engine - main entry point for driving swab interactions

use hecs::{Entity, World};

use crate::components::*;
use crate::config::{EngineConfig, SwabPrototype};
use crate::context::SystemContext;
use crate::error::{ContainerError, SaveError};
use crate::events::{AfterInteractEvent, EventRegistry, ExaminedEvent, UseInHandEvent};
use crate::mutation::{Mutation, RandomCross};
use crate::services::{Popup, PopupLog, SoundLog, SoundPlayback};
use crate::systems::{self, DoAfterId, DoAfterScheduler, MirrorViolation};

/// Main engine
pub struct BotanyEngine {
    /// ECS world containing all entities
    pub world: World,
    /// Simulation time in seconds since start
    pub sim_time: f64,
    registry: EventRegistry,
    do_afters: DoAfterScheduler,
    popups: PopupLog,
    sounds: SoundLog,
    mutation: Box<dyn Mutation>,
}

impl BotanyEngine {
    /// Engine with the built-in systems and the reference crossing service
    pub fn new(config: EngineConfig) -> Self {
        let mutation = Box::new(RandomCross::seeded(config.mutation_seed));
        Self::with_parts(config, systems::default_registry(), mutation)
    }

    /// Engine with a caller-built registry and crossing service
    pub fn with_parts(
        config: EngineConfig,
        registry: EventRegistry,
        mutation: Box<dyn Mutation>,
    ) -> Self {
        log::info!(
            "botany engine starting (movement threshold {})",
            config.movement_threshold
        );
        Self {
            world: World::new(),
            sim_time: 0.0,
            registry,
            do_afters: DoAfterScheduler::new(config.movement_threshold),
            popups: PopupLog::new(),
            sounds: SoundLog::new(),
            mutation,
        }
    }

    /// Run `f` with a context borrowing the engine's parts
    fn dispatch<R>(&mut self, f: impl FnOnce(&mut SystemContext<'_>, &EventRegistry) -> R) -> R {
        let mut ctx = SystemContext {
            world: &mut self.world,
            do_afters: &mut self.do_afters,
            popups: &mut self.popups,
            audio: &mut self.sounds,
            mutation: self.mutation.as_mut(),
        };
        f(&mut ctx, &self.registry)
    }

    pub fn spawn_actor(&mut self, name: &str, at: Vec3) -> Entity {
        self.world
            .spawn((Name::new(name), Position::new(at), Hands::default()))
    }

    pub fn spawn_plant(&mut self, seed: Option<SeedData>, at: Vec3) -> Entity {
        self.world.spawn((PlantHolder::new(seed), Position::new(at)))
    }

    /// Spawn a swab from a prototype. Prototypes with a container slot
    /// become applicator housings.
    pub fn spawn_swab(&mut self, proto: &SwabPrototype, at: Vec3) -> Entity {
        let entity = self.world.spawn((
            BotanySwab::from(proto),
            Name::new(proto.name.as_str()),
            Position::new(at),
        ));
        if let Some(slot) = &proto.container_slot {
            let _ = self.world.insert_one(entity, ContainerSlot::new(slot.as_str()));
        }
        entity
    }

    /// Spawn an applicator housing, optionally preloaded with `swab`.
    /// If the preload is refused the housing is despawned again and the
    /// swab stays where it was.
    pub fn spawn_applicator(
        &mut self,
        swab: Option<Entity>,
        at: Vec3,
    ) -> Result<Entity, ContainerError> {
        let housing = self.spawn_swab(&SwabPrototype::swab_applicator(), at);
        if let Some(swab) = swab {
            if let Err(err) = self.insert(swab, housing) {
                let _ = self.world.despawn(housing);
                return Err(err);
            }
        }
        Ok(housing)
    }

    /// Despawn an entity. A contained item leaves its housing first so the
    /// housing resets; a housing drops whatever it holds.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        let container = self
            .world
            .get::<&InContainer>(entity)
            .ok()
            .map(|c| c.container);
        if let Some(housing) = container {
            let _ = self.remove(housing);
        }
        if self.contents(entity).is_some() {
            let _ = self.remove(entity);
        }
        self.world.despawn(entity).is_ok()
    }

    /// Localization keys describing `target` to `examiner`
    pub fn examine(&mut self, examiner: Entity, target: Entity, in_details_range: bool) -> Vec<String> {
        let mut ev = ExaminedEvent::new(examiner, in_details_range);
        self.dispatch(|ctx, registry| registry.raise_local(ctx, target, &mut ev));
        ev.into_markup()
    }

    /// `user` used `used` on `target`
    pub fn interact(&mut self, user: Entity, used: Entity, target: Option<Entity>, can_reach: bool) {
        let mut ev = AfterInteractEvent::new(user, target, can_reach);
        self.dispatch(|ctx, registry| registry.raise_local(ctx, used, &mut ev));
    }

    /// `user` activated `item` in hand. Returns whether anything handled it.
    pub fn use_in_hand(&mut self, user: Entity, item: Entity) -> bool {
        let mut ev = UseInHandEvent::new(user);
        self.dispatch(|ctx, registry| registry.raise_local(ctx, item, &mut ev));
        ev.handled
    }

    pub fn insert(&mut self, item: Entity, housing: Entity) -> Result<(), ContainerError> {
        let result = self.dispatch(|ctx, registry| systems::insert(ctx, registry, item, housing));
        if let Err(err) = &result {
            log::warn!("insert failed: {}", err);
        }
        result
    }

    pub fn remove(&mut self, housing: Entity) -> Result<Entity, ContainerError> {
        self.dispatch(|ctx, registry| systems::remove(ctx, registry, housing))
    }

    /// Teleport an entity. Break-on-move do-afters notice on the next update.
    pub fn move_entity(&mut self, entity: Entity, to: Vec3) -> bool {
        match self.world.get::<&mut Position>(entity) {
            Ok(mut pos) => {
                pos.local = to;
                true
            }
            Err(_) => false,
        }
    }

    pub fn set_hands(&mut self, entity: Entity, count: u8) -> bool {
        match self.world.get::<&mut Hands>(entity) {
            Ok(mut hands) => {
                hands.count = count;
                true
            }
            Err(_) => false,
        }
    }

    pub fn cancel_do_after(&mut self, id: DoAfterId) -> bool {
        self.do_afters.cancel(id)
    }

    pub fn pending_do_afters(&self) -> usize {
        self.do_afters.active_count()
    }

    pub fn do_afters_of(&self, user: Entity) -> Vec<DoAfterId> {
        self.do_afters.active_for(user)
    }

    /// Advance the simulation by `delta_seconds`, resolving finished do-afters.
    /// Returns how many finished.
    pub fn update(&mut self, delta_seconds: f32) -> usize {
        self.sim_time += delta_seconds as f64;

        let finished = self.do_afters.update(&self.world, delta_seconds);
        let count = finished.len();

        for mut ev in finished {
            let target = ev.args.event_target;
            let broadcast = ev.args.broadcast;
            self.dispatch(|ctx, registry| {
                if let Some(target) = target {
                    registry.raise_local(ctx, target, &mut ev);
                }
                if broadcast {
                    registry.raise_broadcast(ctx, &mut ev);
                }
            });
            log::debug!(
                "do-after {:?} finished (cancelled: {}, handled: {})",
                ev.id,
                ev.cancelled,
                ev.handled
            );
        }

        count
    }

    pub fn drain_popups(&mut self) -> Vec<Popup> {
        self.popups.drain()
    }

    pub fn drain_sounds(&mut self) -> Vec<SoundPlayback> {
        self.sounds.drain()
    }

    pub fn sample_of(&self, entity: Entity) -> Option<SwabSample> {
        systems::sample_of(&self.world, entity)
    }

    pub fn plant_seed(&self, entity: Entity) -> Option<SeedData> {
        self.world
            .get::<&PlantHolder>(entity)
            .ok()
            .and_then(|plant| plant.seed.clone())
    }

    pub fn contents(&self, housing: Entity) -> Option<Entity> {
        self.world
            .get::<&ContainerSlot>(housing)
            .ok()
            .and_then(|slot| slot.contained)
    }

    pub fn mirror_violations(&self) -> Vec<MirrorViolation> {
        systems::check_mirror_invariant(&self.world)
    }

    /// Count swabs (including applicators)
    pub fn swab_count(&self) -> usize {
        self.world.query::<&BotanySwab>().iter().count()
    }

    /// Count plant holders
    pub fn plant_count(&self) -> usize {
        self.world.query::<&PlantHolder>().iter().count()
    }

    /// Save world state to a writer. Pending do-afters are not saved.
    pub fn save<W: std::io::Write>(&self, writer: W) -> Result<(), SaveError> {
        crate::persistence::save_world(writer, &self.world, self.sim_time)
    }

    /// Replace world state from a reader. Pending do-afters are dropped.
    pub fn load<R: std::io::Read>(&mut self, reader: R) -> Result<(), SaveError> {
        let loaded = crate::persistence::load_world(reader)?;
        self.world = loaded.world;
        self.sim_time = loaded.sim_time;
        self.do_afters = DoAfterScheduler::new(self.do_afters.movement_threshold());
        log::info!("loaded {} entities", self.world.len());
        Ok(())
    }
}

impl Default for BotanyEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
