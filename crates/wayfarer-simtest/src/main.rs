//! Wayfarer Headless Simulation Harness
//!
//! Validates the simulation core without a renderer, sound device or any
//! scene graph - every capability call lands in a recording stage.
//!
//! Usage:
//!   cargo run -p wayfarer-simtest
//!   cargo run -p wayfarer-simtest -- --verbose

use serde::Deserialize;
use wayfarer_core::components::{CrewMember, Position, RoomCategory, Vitals};
use wayfarer_core::engine::Ship;
use wayfarer_core::error::SimError;
use wayfarer_core::stage::{RecordingStage, StageCall};
use wayfarer_core::systems::WalkPlan;

// ── Scenario (embedded JSON, same file an interactive build would use) ──
const SCENARIO_JSON: &str = include_str!("../../../data/scenario.json");

#[derive(Debug, Deserialize)]
struct ScenarioSpec {
    name: String,
    daylight_factor: f32,
    rooms: Vec<RoomSpec>,
    crew: Vec<CrewSpec>,
    equipment: Vec<EquipmentSpec>,
}

#[derive(Debug, Deserialize)]
struct RoomSpec {
    name: String,
    category: RoomCategory,
    x: f32,
    y: f32,
}

#[derive(Debug, Deserialize)]
struct CrewSpec {
    name: String,
    room: String,
    x: f32,
    y: f32,
}

#[derive(Debug, Deserialize)]
struct EquipmentSpec {
    name: String,
    room: String,
    x: f32,
    y: f32,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    env_logger::init();
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Wayfarer Simulation Harness ===\n");

    let scenario: ScenarioSpec = match serde_json::from_str(SCENARIO_JSON) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("scenario parse error: {}", e);
            std::process::exit(1);
        }
    };
    log::info!(
        "scenario {} loaded: {} rooms, {} crew",
        scenario.name,
        scenario.rooms.len(),
        scenario.crew.len()
    );

    let mut results = Vec::new();

    // 1. Scenario & roster construction
    results.extend(validate_roster(&scenario));

    // 2. Vitals drift by room category
    results.extend(validate_vitals(&scenario));

    // 3. Walk choreography
    results.extend(validate_walks(&scenario));

    // 4. Alarm idempotence
    results.extend(validate_alarm(&scenario));

    // 5. Resource ledger
    results.extend(validate_ledger(&scenario));

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

fn build_ship(scenario: &ScenarioSpec, stage: &mut RecordingStage) -> Result<Ship, SimError> {
    let mut ship = Ship::default();
    for room in &scenario.rooms {
        ship.add_room(&room.name, room.category, room.x, room.y)?;
    }
    for member in &scenario.crew {
        ship.add_crew(&member.name, &member.room, member.x, member.y, stage)?;
    }
    for item in &scenario.equipment {
        ship.add_equipment(&item.name, &item.room, item.x, item.y)?;
    }
    ship.set_daylight_factor(scenario.daylight_factor);
    Ok(ship)
}

fn check(results: &mut Vec<TestResult>, name: &str, passed: bool, detail: String) {
    results.push(TestResult {
        name: name.into(),
        passed,
        detail,
    });
}

// ── 1. Roster ───────────────────────────────────────────────────────────

fn validate_roster(scenario: &ScenarioSpec) -> Vec<TestResult> {
    println!("--- Roster ({}) ---", scenario.name);
    let mut results = Vec::new();
    let mut stage = RecordingStage::new();

    let ship = match build_ship(scenario, &mut stage) {
        Ok(ship) => ship,
        Err(e) => {
            check(&mut results, "roster_build", false, format!("{}", e));
            return results;
        }
    };

    check(
        &mut results,
        "roster_counts",
        ship.room_count() == scenario.rooms.len()
            && ship.crew_count() == scenario.crew.len()
            && ship.equipment_count() == scenario.equipment.len(),
        format!(
            "{} rooms, {} crew, {} equipment",
            ship.room_count(),
            ship.crew_count(),
            ship.equipment_count()
        ),
    );

    // every crew member resolved four directional animation variants
    let resolves = stage.count(|c| matches!(c, StageCall::ResolveVariant { .. }));
    check(
        &mut results,
        "roster_animation_variants",
        resolves == scenario.crew.len() * 4,
        format!("{} variant lookups", resolves),
    );

    results
}

// ── 2. Vitals ───────────────────────────────────────────────────────────

fn validate_vitals(scenario: &ScenarioSpec) -> Vec<TestResult> {
    println!("--- Vitals drift ---");
    let mut results = Vec::new();
    let mut stage = RecordingStage::new();
    let mut ship = build_ship(scenario, &mut stage).expect("scenario builds");

    // ten simulated seconds at 10 Hz
    for _ in 0..100 {
        ship.update(0.1, &mut stage);
    }

    let vitals_of = |ship: &Ship, name: &str| -> Vitals {
        let entity = ship.crew_entity(name).unwrap();
        *ship.world.get::<&Vitals>(entity).unwrap()
    };

    let sleeper = vitals_of(&ship, "ada");
    check(
        &mut results,
        "vitals_sleep_recovers_fatigue",
        (sleeper.fatigue - (-1.0)).abs() < 1e-3,
        format!("fatigue {:.4} after 10s asleep", sleeper.fatigue),
    );

    let athlete = vitals_of(&ship, "kei");
    check(
        &mut results,
        "vitals_gym_costs_fatigue",
        (athlete.fatigue - 3.0).abs() < 1e-3,
        format!("fatigue {:.4} after 10s in the gym", athlete.fatigue),
    );
    check(
        &mut results,
        "vitals_gym_builds_bone",
        (athlete.bone_density - 101.0).abs() < 1e-3,
        format!("bone density {:.4}", athlete.bone_density),
    );

    let diner = vitals_of(&ship, "mir");
    check(
        &mut results,
        "vitals_cafeteria_eases_stress",
        (diner.stress - (-1.0)).abs() < 1e-3,
        format!("stress {:.4}", diner.stress),
    );
    check(
        &mut results,
        "vitals_cafeteria_draws_food",
        (ship.resources.food - 90.0).abs() < 1e-2,
        format!("food {:.4} after 100 meals-ticks", ship.resources.food),
    );

    // displayed score tracks the derived one
    check(
        &mut results,
        "vitals_health_bar_in_step",
        (sleeper.displayed_health - sleeper.overall_health()).abs() < 1e-6,
        format!("displayed {:.4}", sleeper.displayed_health),
    );

    results
}

// ── 3. Walks ────────────────────────────────────────────────────────────

fn run_walk(ship: &mut Ship, stage: &mut RecordingStage, crew: &str) -> Result<usize, String> {
    let entity = ship.crew_entity(crew).map_err(|e| e.to_string())?;
    let mut ticks = 0usize;
    while ship.world.get::<&WalkPlan>(entity).is_ok() {
        ship.update(0.1, stage);
        ticks += 1;
        if ticks > 200 {
            return Err("walk never finished".into());
        }
    }
    Ok(ticks)
}

fn validate_walks(scenario: &ScenarioSpec) -> Vec<TestResult> {
    println!("--- Walk choreography ---");
    let mut results = Vec::new();
    let mut stage = RecordingStage::new();
    let mut ship = build_ship(scenario, &mut stage).expect("scenario builds");

    // same-room walk: ada to her bed
    stage.calls.clear();
    if let Err(e) = ship.begin_walk("ada", "bed_1", Vec::new(), &mut stage) {
        check(&mut results, "walk_same_room", false, format!("{}", e));
        return results;
    }
    let starts = stage.count(|c| matches!(c, StageCall::StartAllAnimations { .. }));
    check(
        &mut results,
        "walk_batch_starts_animations",
        starts == 1,
        format!("{} batch starts", starts),
    );

    match run_walk(&mut ship, &mut stage, "ada") {
        Ok(ticks) => {
            let ada = ship.crew_entity("ada").unwrap();
            let position = ship.world.get::<&Position>(ada).unwrap().local;
            check(
                &mut results,
                "walk_lands_on_equipment",
                (position.x - 1.5).abs() < 1e-3 && (position.y - 0.5).abs() < 1e-3,
                format!("arrived at ({:.3}, {:.3}) in {} ticks", position.x, position.y, ticks),
            );
            let tweens = stage.count(|c| matches!(c, StageCall::AnimateAxisTo { .. }));
            check(
                &mut results,
                "walk_two_live_segments",
                tweens == 2,
                format!("{} axis tweens issued", tweens),
            );
        }
        Err(e) => check(&mut results, "walk_lands_on_equipment", false, e),
    }

    // cross-room walk: kei from the gym to the sleeping quarters
    stage.calls.clear();
    if let Err(e) = ship.begin_walk("kei", "bed_1", Vec::new(), &mut stage) {
        check(&mut results, "walk_cross_room", false, format!("{}", e));
        return results;
    }
    let reparents = stage.count(|c| matches!(c, StageCall::SetWorldPosition { .. }));
    check(
        &mut results,
        "walk_reparents_once",
        reparents == 1,
        format!("{} reparent placements", reparents),
    );

    match run_walk(&mut ship, &mut stage, "kei") {
        Ok(ticks) => {
            let kei = ship.crew_entity("kei").unwrap();
            let sleeping = ship.room_entity("sleeping").unwrap();
            let room = ship.world.get::<&CrewMember>(kei).unwrap().room;
            check(
                &mut results,
                "walk_hands_over_room",
                room == sleeping,
                format!("arrived in {} ticks", ticks),
            );
        }
        Err(e) => check(&mut results, "walk_hands_over_room", false, e),
    }

    // a second dispatch while one is in flight must be rejected
    ship.begin_walk("mir", "tray_rack", Vec::new(), &mut stage)
        .expect("mir is free to walk");
    let rejected = matches!(
        ship.begin_walk("mir", "bed_1", Vec::new(), &mut stage),
        Err(SimError::WalkInProgress(_))
    );
    check(
        &mut results,
        "walk_reentry_rejected",
        rejected,
        "second dispatch while in flight".into(),
    );

    results
}

// ── 4. Alarm ────────────────────────────────────────────────────────────

fn validate_alarm(scenario: &ScenarioSpec) -> Vec<TestResult> {
    println!("--- Alarm ---");
    let mut results = Vec::new();
    let mut stage = RecordingStage::new();
    let mut ship = build_ship(scenario, &mut stage).expect("scenario builds");
    stage.calls.clear();

    ship.set_alarm(true, &mut stage);
    ship.set_alarm(true, &mut stage);

    let sirens = stage.count(|c| matches!(c, StageCall::PlayLooped { .. }));
    let blinks = stage.count(|c| matches!(c, StageCall::BlinkColor { .. }));
    check(
        &mut results,
        "alarm_single_siren",
        sirens == 1,
        format!("{} siren plays after double trigger", sirens),
    );
    check(
        &mut results,
        "alarm_blink_per_room",
        blinks == scenario.rooms.len(),
        format!("{} blinks for {} rooms", blinks, scenario.rooms.len()),
    );

    ship.set_alarm(false, &mut stage);
    let cancels = stage.count(|c| matches!(c, StageCall::CancelBlink { .. }));
    let resets = stage.count(|c| matches!(c, StageCall::SetColor { .. }));
    check(
        &mut results,
        "alarm_clear_cancels_all",
        cancels == scenario.rooms.len() && resets == scenario.rooms.len(),
        format!("{} cancels, {} resets", cancels, resets),
    );

    // clearing again is a guarded no-op
    let before = stage.calls.len();
    ship.set_alarm(false, &mut stage);
    check(
        &mut results,
        "alarm_clear_idempotent",
        stage.calls.len() == before && !ship.warning_state(),
        "no further capability calls".into(),
    );

    results
}

// ── 5. Ledger ───────────────────────────────────────────────────────────

fn validate_ledger(scenario: &ScenarioSpec) -> Vec<TestResult> {
    println!("--- Resource ledger ---");
    let mut results = Vec::new();
    let mut stage = RecordingStage::new();
    let mut ship = build_ship(scenario, &mut stage).expect("scenario builds");

    // park everyone somewhere neutral for a clean fuel reading
    ship.update(5.0, &mut stage);

    check(
        &mut results,
        "ledger_fuel_drain",
        (ship.resources.fuel - 95.0).abs() < 1e-3,
        format!("fuel {:.4} after 5s", ship.resources.fuel),
    );
    check(
        &mut results,
        "ledger_mission_clock",
        (ship.resources.mission_duration - 0.05).abs() < 1e-5,
        format!("mission duration {:.4}", ship.resources.mission_duration),
    );

    results
}
