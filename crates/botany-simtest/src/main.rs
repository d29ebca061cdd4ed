//! Botany Headless Simulation Harness
//!
//! Drives swab interactions end to end through the engine and checks the
//! outcomes. Runs entirely in-process: no client, no rendering.
//!
//! Usage:
//!   cargo run -p botany-simtest
//!   cargo run -p botany-simtest -- --verbose
//!   cargo run -p botany-simtest -- --prototypes path/to/swabs.json

use botany_core::config::{EngineConfig, PrototypeSet, SwabPrototype};
use botany_core::loc::{self, Localization};
use botany_core::prelude::*;
use hecs::Entity;

// ── Prototype data (same JSON the engine tests use) ─────────────────────
const PROTOTYPES_JSON: &str = include_str!("../../../data/swab_prototypes.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn check(name: &str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            detail: detail.into(),
        }
    }
}

/// Fresh engine plus one gardener at the origin
struct Scene {
    engine: BotanyEngine,
    gardener: Entity,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose");

    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
    let override_path = args
        .iter()
        .position(|a| a == "--prototypes")
        .and_then(|i| args.get(i + 1));

    println!("=== Botany Swab Harness ===\n");

    let mut results = Vec::new();

    // 1. Prototype data
    let prototypes = match load_prototypes(override_path.map(String::as_str)) {
        Ok(set) => {
            results.push(TestResult::check(
                "prototypes_parse",
                true,
                format!("{} prototypes loaded", set.len()),
            ));
            set
        }
        Err(e) => {
            results.push(TestResult::check(
                "prototypes_parse",
                false,
                format!("prototype load error: {}", e),
            ));
            PrototypeSet::builtin()
        }
    };
    results.extend(validate_prototypes(&prototypes, verbose));

    let strings = Localization::english();
    let swab = proto_or_builtin(&prototypes, "BotanySwab", SwabPrototype::botany_swab);
    let synth = proto_or_builtin(&prototypes, "SynthSwab", SwabPrototype::synth_swab);
    let applicator =
        proto_or_builtin(&prototypes, "SwabApplicator", SwabPrototype::swab_applicator);

    // 2. Pickup and deposit
    results.extend(validate_pickup_deposit(&swab, &synth, &strings, verbose));

    // 3. Applicator loading and mirroring
    results.extend(validate_applicator(&swab, &applicator, verbose));

    // 4. Cleaning
    results.extend(validate_cleaning(&swab, &synth, &strings, verbose));

    // 5. Interruptions
    results.extend(validate_interruptions(&swab, verbose));

    // 6. Save / load
    results.extend(validate_persistence(&swab, &applicator, verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn load_prototypes(path: Option<&str>) -> Result<PrototypeSet, botany_core::error::ConfigError> {
    match path {
        Some(path) => {
            log::info!("loading prototypes from {}", path);
            PrototypeSet::from_path(path)
        }
        None => PrototypeSet::from_json_str(PROTOTYPES_JSON),
    }
}

fn proto_or_builtin(set: &PrototypeSet, id: &str, fallback: fn() -> SwabPrototype) -> SwabPrototype {
    set.get(id).cloned().unwrap_or_else(|| {
        log::warn!("prototype {} missing, using built-in", id);
        fallback()
    })
}

fn seed(name: &str) -> SeedData {
    SeedData::new(name).with_potency(10.0).with_yield(3)
}

impl Scene {
    fn new() -> Self {
        let mut engine = BotanyEngine::new(EngineConfig {
            mutation_seed: 42,
            ..EngineConfig::default()
        });
        let gardener = engine.spawn_actor("Gardener", Vec3::ZERO);
        Self { engine, gardener }
    }

    fn plant(&mut self, name: Option<&str>) -> Entity {
        self.engine
            .spawn_plant(name.map(seed), Vec3::new(0.5, 0.0, 0.0))
    }

    fn swab(&mut self, proto: &SwabPrototype, sample: Option<&str>) -> Entity {
        let entity = self.engine.spawn_swab(proto, Vec3::ZERO);
        if let Some(name) = sample {
            if let Ok(mut swab) = self.engine.world.get::<&mut BotanySwab>(entity) {
                swab.sample = SwabSample::Loaded(seed(name));
            }
        }
        entity
    }

    /// Interact, then run the clock past the longest delay
    fn swab_plant(&mut self, used: Entity, plant: Entity) -> usize {
        self.engine.interact(self.gardener, used, Some(plant), true);
        self.engine.update(5.0)
    }

    fn seed_name(&self, entity: Entity) -> Option<String> {
        match self.engine.sample_of(entity) {
            Some(SwabSample::Loaded(seed)) => Some(seed.name),
            _ => None,
        }
    }

    fn plant_name(&self, plant: Entity) -> Option<String> {
        self.engine.plant_seed(plant).map(|s| s.name)
    }

    fn print_popups(&mut self, strings: &Localization, verbose: bool) -> Vec<&'static str> {
        let popups = self.engine.drain_popups();
        if verbose {
            for popup in &popups {
                println!("    popup: {}", strings.get(popup.key));
            }
        }
        popups.iter().map(|p| p.key).collect()
    }
}

// ── 1. Prototypes ───────────────────────────────────────────────────────

fn validate_prototypes(set: &PrototypeSet, verbose: bool) -> Vec<TestResult> {
    println!("--- Prototypes ---");
    let mut results = Vec::new();

    for id in ["BotanySwab", "SynthSwab", "SwabApplicator"] {
        results.push(TestResult::check(
            &format!("prototype_{}", id),
            set.get(id).is_some(),
            format!("{} present", id),
        ));
    }

    let applicators = set.iter().filter(|p| p.is_applicator()).count();
    results.push(TestResult::check(
        "prototype_applicator_flags",
        set.iter()
            .filter(|p| p.is_applicator())
            .all(|p| !p.usable_if_clean),
        format!("{} applicators, none usable when clean", applicators),
    ));

    if verbose {
        for proto in set.iter() {
            match serde_json::to_string(proto) {
                Ok(json) => println!("  {}", json),
                Err(e) => println!("  {}: {}", proto.id, e),
            }
        }
    }

    results
}

// ── 2. Pickup / deposit ─────────────────────────────────────────────────

fn validate_pickup_deposit(
    swab: &SwabPrototype,
    synth: &SwabPrototype,
    strings: &Localization,
    verbose: bool,
) -> Vec<TestResult> {
    println!("--- Pickup & Deposit ---");
    let mut results = Vec::new();

    // Pickup copies the plant's seed, leaving the plant alone
    let mut scene = Scene::new();
    let tomato = scene.plant(Some("tomato"));
    let used = scene.swab(swab, None);
    let finished = scene.swab_plant(used, tomato);
    let keys = scene.print_popups(strings, verbose);
    results.push(TestResult::check(
        "pickup_copies_seed",
        finished == 1
            && scene.seed_name(used).as_deref() == Some("tomato")
            && scene.plant_name(tomato).as_deref() == Some("tomato"),
        format!("swab carries {:?}", scene.seed_name(used)),
    ));
    results.push(TestResult::check(
        "pickup_popup",
        keys == [loc::BOTANY_SWAB_FROM],
        format!("{:?}", keys),
    ));

    // Contaminating deposit: plant gets a cross, swab gets the plant's old seed
    let wheat = scene.plant(Some("wheat"));
    scene.swab_plant(used, wheat);
    let keys = scene.print_popups(strings, verbose);
    results.push(TestResult::check(
        "deposit_crosses_plant",
        scene.engine.plant_seed(wheat).is_some() && keys == [loc::BOTANY_SWAB_TO],
        format!("plant now {:?}", scene.plant_name(wheat)),
    ));
    results.push(TestResult::check(
        "deposit_contaminates",
        scene.seed_name(used).as_deref() == Some("wheat"),
        format!("swab carries {:?}", scene.seed_name(used)),
    ));

    // Non-contaminating deposit keeps the carried sample
    let mut scene = Scene::new();
    let wheat = scene.plant(Some("wheat"));
    let used = scene.swab(synth, Some("tomato"));
    scene.swab_plant(used, wheat);
    results.push(TestResult::check(
        "deposit_clean_swab_keeps_sample",
        scene.seed_name(used).as_deref() == Some("tomato"),
        format!("swab carries {:?}", scene.seed_name(used)),
    ));
    let sounds = scene.engine.drain_sounds();
    results.push(TestResult::check(
        "deposit_plays_sound",
        sounds.len() == 1,
        format!("{} sounds", sounds.len()),
    ));

    // Empty tray: nothing to pollinate
    let empty = scene.plant(None);
    let before = scene.seed_name(used);
    scene.swab_plant(used, empty);
    results.push(TestResult::check(
        "deposit_empty_tray_noop",
        scene.engine.plant_seed(empty).is_none() && scene.seed_name(used) == before,
        "empty tray left untouched",
    ));

    results
}

// ── 3. Applicator ───────────────────────────────────────────────────────

fn validate_applicator(
    swab: &SwabPrototype,
    applicator: &SwabPrototype,
    verbose: bool,
) -> Vec<TestResult> {
    println!("--- Applicator ---");
    let mut results = Vec::new();
    let mut scene = Scene::new();
    let wheat = scene.plant(Some("wheat"));
    let housing = scene.swab(applicator, None);

    // Empty applicator refuses to start
    scene.engine.interact(scene.gardener, housing, Some(wheat), true);
    let popups = scene.engine.drain_popups();
    results.push(TestResult::check(
        "applicator_empty_unusable",
        scene.engine.pending_do_afters() == 0
            && popups.first().map(|p| p.key) == Some(loc::BOTANY_SWAB_UNUSABLE),
        format!("{} popups", popups.len()),
    ));

    // Clean swabs are refused
    let clean = scene.swab(swab, None);
    let refused = scene.engine.insert(clean, housing);
    scene.engine.drain_popups();
    results.push(TestResult::check(
        "applicator_refuses_clean_swab",
        refused.is_err() && scene.engine.contents(housing).is_none(),
        match &refused {
            Ok(()) => "accepted".to_string(),
            Err(e) => e.to_string(),
        },
    ));

    // Loaded swab mirrors into the housing
    let loaded = scene.swab(swab, Some("tomato"));
    let inserted = scene.engine.insert(loaded, housing);
    results.push(TestResult::check(
        "applicator_mirrors_on_insert",
        inserted.is_ok() && scene.seed_name(housing).as_deref() == Some("tomato"),
        format!("housing carries {:?}", scene.seed_name(housing)),
    ));

    let finished = scene.swab_plant(housing, wheat);
    results.push(TestResult::check(
        "applicator_pollinates",
        finished == 1
            && scene.seed_name(housing).as_deref() == Some("tomato")
            && scene.seed_name(loaded).as_deref() == Some("tomato"),
        format!("plant now {:?}", scene.plant_name(wheat)),
    ));

    let violations = scene.engine.mirror_violations();
    results.push(TestResult::check(
        "applicator_mirror_invariant",
        violations.is_empty(),
        format!("{} violations", violations.len()),
    ));

    let removed = scene.engine.remove(housing);
    results.push(TestResult::check(
        "applicator_resets_on_remove",
        removed == Ok(loaded) && scene.engine.sample_of(housing) == Some(SwabSample::Empty),
        format!("housing {:?}", scene.engine.sample_of(housing)),
    ));

    if verbose {
        println!(
            "  {} swabs, {} plants in scene",
            scene.engine.swab_count(),
            scene.engine.plant_count()
        );
    }

    results
}

// ── 4. Cleaning ─────────────────────────────────────────────────────────

fn validate_cleaning(
    swab: &SwabPrototype,
    synth: &SwabPrototype,
    strings: &Localization,
    verbose: bool,
) -> Vec<TestResult> {
    println!("--- Cleaning ---");
    let mut results = Vec::new();
    let mut scene = Scene::new();

    let reusable = scene.swab(synth, Some("tomato"));
    let handled = scene.engine.use_in_hand(scene.gardener, reusable);
    let keys = scene.print_popups(strings, verbose);
    results.push(TestResult::check(
        "clean_wipes_reusable",
        handled
            && scene.engine.sample_of(reusable) == Some(SwabSample::Empty)
            && keys == [loc::BOTANY_SWAB_CLEAN],
        format!("{:?}", scene.engine.sample_of(reusable)),
    ));

    let disposable = scene.swab(swab, Some("tomato"));
    let handled = scene.engine.use_in_hand(scene.gardener, disposable);
    results.push(TestResult::check(
        "clean_ignores_disposable",
        !handled && scene.seed_name(disposable).as_deref() == Some("tomato"),
        format!("{:?}", scene.seed_name(disposable)),
    ));

    let marks = scene.engine.examine(scene.gardener, reusable, true);
    results.push(TestResult::check(
        "examine_clean_swab",
        marks == [loc::SWAB_UNUSED],
        format!("{:?}", marks),
    ));
    let marks = scene.engine.examine(scene.gardener, disposable, false);
    results.push(TestResult::check(
        "examine_out_of_range",
        marks.is_empty(),
        format!("{:?}", marks),
    ));

    results
}

// ── 5. Interruptions ────────────────────────────────────────────────────

fn validate_interruptions(swab: &SwabPrototype, _verbose: bool) -> Vec<TestResult> {
    println!("--- Interruptions ---");
    let mut results = Vec::new();

    // Walking away
    let mut scene = Scene::new();
    let tomato = scene.plant(Some("tomato"));
    let used = scene.swab(swab, None);
    scene.engine.interact(scene.gardener, used, Some(tomato), true);
    scene
        .engine
        .move_entity(scene.gardener, Vec3::new(2.0, 0.0, 0.0));
    scene.engine.update(5.0);
    results.push(TestResult::check(
        "interrupt_on_move",
        scene.engine.sample_of(used) == Some(SwabSample::Empty),
        "moving away cancels",
    ));

    // Small shuffles are tolerated
    let mut scene = Scene::new();
    let tomato = scene.plant(Some("tomato"));
    let used = scene.swab(swab, None);
    scene.engine.interact(scene.gardener, used, Some(tomato), true);
    scene
        .engine
        .move_entity(scene.gardener, Vec3::new(0.1, 0.0, 0.0));
    scene.engine.update(5.0);
    results.push(TestResult::check(
        "tolerate_small_move",
        scene.seed_name(used).as_deref() == Some("tomato"),
        "0.1 units is within threshold",
    ));

    // Explicit cancel
    let mut scene = Scene::new();
    let tomato = scene.plant(Some("tomato"));
    let used = scene.swab(swab, None);
    scene.engine.interact(scene.gardener, used, Some(tomato), true);
    let cancelled = scene
        .engine
        .do_afters_of(scene.gardener)
        .into_iter()
        .map(|id| scene.engine.cancel_do_after(id))
        .all(|ok| ok);
    scene.engine.update(5.0);
    results.push(TestResult::check(
        "interrupt_on_cancel",
        cancelled && scene.engine.sample_of(used) == Some(SwabSample::Empty),
        "cancelled do-after is ignored",
    ));

    // Out of reach never starts
    let mut scene = Scene::new();
    let tomato = scene.plant(Some("tomato"));
    let used = scene.swab(swab, None);
    scene.engine.interact(scene.gardener, used, Some(tomato), false);
    results.push(TestResult::check(
        "unreachable_target",
        scene.engine.pending_do_afters() == 0,
        "no do-after started",
    ));

    results
}

// ── 6. Save / load ──────────────────────────────────────────────────────

fn validate_persistence(
    swab: &SwabPrototype,
    applicator: &SwabPrototype,
    _verbose: bool,
) -> Vec<TestResult> {
    println!("--- Save / Load ---");
    let mut results = Vec::new();
    let mut scene = Scene::new();
    let tomato = scene.plant(Some("tomato"));
    let housing = scene.swab(applicator, None);
    let loaded = scene.swab(swab, Some("wheat"));
    let _ = scene.engine.insert(loaded, housing);
    scene.engine.update(1.5);

    let mut bytes = Vec::new();
    if let Err(e) = scene.engine.save(&mut bytes) {
        results.push(TestResult::check("save", false, e.to_string()));
        return results;
    }
    results.push(TestResult::check(
        "save",
        !bytes.is_empty(),
        format!("{} bytes", bytes.len()),
    ));

    let mut restored = BotanyEngine::default();
    match restored.load(bytes.as_slice()) {
        Ok(()) => {
            results.push(TestResult::check(
                "load_restores_links",
                restored.contents(housing) == Some(loaded)
                    && restored.plant_seed(tomato).map(|s| s.name).as_deref() == Some("tomato"),
                format!("{} swabs, {} plants", restored.swab_count(), restored.plant_count()),
            ));
            results.push(TestResult::check(
                "load_mirror_invariant",
                restored.mirror_violations().is_empty(),
                format!("sim_time {:.1}", restored.sim_time),
            ));
        }
        Err(e) => results.push(TestResult::check("load_restores_links", false, e.to_string())),
    }

    results
}
