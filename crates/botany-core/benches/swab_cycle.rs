use botany_core::config::SwabPrototype;
use botany_core::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// A greenhouse of `rows` gardeners, each with a plant and a swab
fn greenhouse(rows: usize) -> (BotanyEngine, Vec<(hecs::Entity, hecs::Entity, hecs::Entity)>) {
    let mut engine = BotanyEngine::default();
    let proto = SwabPrototype::synth_swab();
    let triples = (0..rows)
        .map(|i| {
            let at = Vec3::new(i as f32 * 2.0, 0.0, 0.0);
            let user = engine.spawn_actor("Gardener", at);
            let plant = engine.spawn_plant(Some(SeedData::new(format!("plant{}", i))), at);
            let swab = engine.spawn_swab(&proto, at);
            (user, plant, swab)
        })
        .collect();
    (engine, triples)
}

fn bench_swab_cycle(c: &mut Criterion) {
    c.bench_function("pickup_deposit_clean_100", |b| {
        let (mut engine, triples) = greenhouse(100);
        b.iter(|| {
            for &(user, plant, swab) in &triples {
                engine.interact(user, swab, Some(plant), true);
            }
            engine.update(5.0);
            for &(user, plant, swab) in &triples {
                engine.interact(user, swab, Some(plant), true);
            }
            engine.update(5.0);
            for &(user, _, swab) in &triples {
                engine.use_in_hand(user, swab);
            }
            engine.drain_popups();
            engine.drain_sounds();
        })
    });

    c.bench_function("update_1000_pending", |b| {
        let (mut engine, triples) = greenhouse(1000);
        for &(user, plant, swab) in &triples {
            engine.interact(user, swab, Some(plant), true);
        }
        b.iter(|| engine.update(black_box(0.0)))
    });

    c.bench_function("mirror_check_200_applicators", |b| {
        let mut engine = BotanyEngine::default();
        for i in 0..200 {
            let applicator = engine.spawn_swab(&SwabPrototype::swab_applicator(), Vec3::ZERO);
            let swab = engine.spawn_swab(&SwabPrototype::botany_swab(), Vec3::ZERO);
            if let Ok(mut s) = engine.world.get::<&mut BotanySwab>(swab) {
                s.sample = SwabSample::Loaded(SeedData::new(format!("seed{}", i)));
            }
            let _ = engine.insert(swab, applicator);
        }
        b.iter(|| engine.mirror_violations())
    });
}

criterion_group!(benches, bench_swab_cycle);
criterion_main!(benches);
