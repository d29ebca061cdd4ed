//! Property tests: an applicator's sample always mirrors its contents,
//! whatever order swabs are loaded, unloaded, used and destroyed in, including
//! while a swabbing action is still running.

use botany_core::config::{EngineConfig, SwabPrototype};
use botany_core::prelude::*;
use botany_core::systems::default_registry;
use proptest::prelude::*;

const SWABS: usize = 3;
const APPLICATORS: usize = 2;

/// Deterministic cross so runs shrink cleanly
struct KeepFirst;

impl Mutation for KeepFirst {
    fn cross(&mut self, a: &SeedData, _b: &SeedData) -> SeedData {
        a.clone()
    }
}

#[derive(Debug, Clone)]
enum Op {
    Insert { swab: usize, applicator: usize },
    Remove { applicator: usize },
    Nest { inner: usize, outer: usize },
    Interact { applicator: usize },
    Tick { dt: f32 },
    Clean { swab: usize },
    Despawn { swab: usize },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..SWABS, 0..APPLICATORS).prop_map(|(swab, applicator)| Op::Insert { swab, applicator }),
        (0..APPLICATORS).prop_map(|applicator| Op::Remove { applicator }),
        (0..APPLICATORS, 0..APPLICATORS).prop_map(|(inner, outer)| Op::Nest { inner, outer }),
        (0..APPLICATORS).prop_map(|applicator| Op::Interact { applicator }),
        // Short ticks so container changes land mid-delay
        (0.0f32..1.5).prop_map(|dt| Op::Tick { dt }),
        (0..SWABS).prop_map(|swab| Op::Clean { swab }),
        (0..SWABS).prop_map(|swab| Op::Despawn { swab }),
    ]
}

struct Bench {
    engine: BotanyEngine,
    gardener: hecs::Entity,
    plant: hecs::Entity,
    swabs: Vec<hecs::Entity>,
    applicators: Vec<hecs::Entity>,
}

impl Bench {
    fn new(loaded: &[bool]) -> Self {
        let mut engine = BotanyEngine::with_parts(
            EngineConfig::default(),
            default_registry(),
            Box::new(KeepFirst),
        );
        let gardener = engine.spawn_actor("Gardener", Vec3::ZERO);
        let plant = engine.spawn_plant(Some(SeedData::new("tray")), Vec3::ZERO);

        // Contaminating applicators exercise write-through on pollination
        let applicator_proto = SwabPrototype {
            contaminate: true,
            ..SwabPrototype::swab_applicator()
        };
        let applicators = (0..APPLICATORS)
            .map(|_| engine.spawn_swab(&applicator_proto, Vec3::ZERO))
            .collect();

        let swabs = loaded
            .iter()
            .enumerate()
            .map(|(i, &loaded)| {
                let swab = engine.spawn_swab(&SwabPrototype::synth_swab(), Vec3::ZERO);
                if loaded {
                    engine.world.get::<&mut BotanySwab>(swab).unwrap().sample =
                        SwabSample::Loaded(SeedData::new(format!("swab{}", i)));
                }
                swab
            })
            .collect();

        Self {
            engine,
            gardener,
            plant,
            swabs,
            applicators,
        }
    }

    fn apply(&mut self, op: &Op) {
        match *op {
            Op::Insert { swab, applicator } => {
                let _ = self
                    .engine
                    .insert(self.swabs[swab], self.applicators[applicator]);
            }
            Op::Remove { applicator } => {
                let _ = self.engine.remove(self.applicators[applicator]);
            }
            Op::Nest { inner, outer } => {
                let _ = self
                    .engine
                    .insert(self.applicators[inner], self.applicators[outer]);
            }
            Op::Interact { applicator } => {
                self.engine.interact(
                    self.gardener,
                    self.applicators[applicator],
                    Some(self.plant),
                    true,
                );
            }
            Op::Tick { dt } => {
                self.engine.update(dt);
            }
            Op::Clean { swab } => {
                self.engine.use_in_hand(self.gardener, self.swabs[swab]);
            }
            Op::Despawn { swab } => {
                self.engine.despawn(self.swabs[swab]);
            }
        }
    }
}

proptest! {
    #[test]
    fn applicator_mirrors_contents(
        loaded in proptest::collection::vec(any::<bool>(), SWABS),
        ops in proptest::collection::vec(op(), 0..60),
    ) {
        let mut bench = Bench::new(&loaded);

        for op in &ops {
            bench.apply(op);
            let violations = bench.engine.mirror_violations();
            prop_assert!(violations.is_empty(), "after {:?}: {:?}", op, violations);
        }

        // Drain whatever is still pending
        bench.engine.update(10.0);
        let violations = bench.engine.mirror_violations();
        prop_assert!(violations.is_empty(), "after drain: {:?}", violations);
    }

    #[test]
    fn swab_sits_in_at_most_one_applicator(
        ops in proptest::collection::vec(op(), 0..40),
    ) {
        let mut bench = Bench::new(&[true; SWABS]);

        for op in &ops {
            bench.apply(op);
        }

        let housed: Vec<_> = bench
            .applicators
            .iter()
            .filter_map(|&a| bench.engine.contents(a))
            .collect();
        let mut unique = housed.clone();
        unique.sort_by_key(|e| e.to_bits());
        unique.dedup();
        prop_assert_eq!(housed.len(), unique.len());
    }
}
