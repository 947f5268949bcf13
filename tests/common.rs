// ABOUTME: Shared fixtures for integration tests: exercise library, mesocycles, and readiness signals
// ABOUTME: Provides quiet logging setup and a seeded synthetic pool generator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::too_many_arguments,
    clippy::too_many_lines
)]
//! Shared test utilities for `liftcycle`

use std::collections::BTreeMap;
use std::env;
use std::sync::{Arc, Once};

use chrono::{DateTime, Duration, TimeZone, Utc};
use liftcycle::clock::FixedClock;
use liftcycle::repositories::memory::InMemoryStore;
use liftcycle_core::models::{
    Equipment, Exercise, Mechanics, Mesocycle, MovementPattern, Muscle, PerformanceMetrics,
    ReadinessSignal, SplitTag, SplitType, TrainingGoal, WearableSnapshot,
};
use liftcycle_engine::config::{EngineConfig, RirConfig};
use liftcycle_engine::rir_bands::RirBandScheduler;
use liftcycle_engine::volume_ramp::VolumeLandmarkRamp;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Fixed reference instant so tests never depend on the wall clock
pub fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 3, 7, 0, 0).unwrap()
}

pub struct ExerciseSpec<'a> {
    pub id: &'a str,
    pub primary: &'a [Muscle],
    pub secondary: &'a [Muscle],
    pub patterns: &'a [MovementPattern],
    pub equipment: &'a [Equipment],
    pub mechanics: Mechanics,
    pub tags: &'a [SplitTag],
}

pub fn exercise(spec: &ExerciseSpec<'_>) -> Exercise {
    Exercise {
        id: spec.id.to_owned(),
        name: spec.id.replace('_', " "),
        primary_muscles: spec.primary.to_vec(),
        secondary_muscles: spec.secondary.to_vec(),
        movement_patterns: spec.patterns.to_vec(),
        equipment: spec.equipment.to_vec(),
        mechanics: spec.mechanics,
        favorite: false,
        avoided: false,
        split_tags: spec.tags.to_vec(),
    }
}

fn compound(
    id: &str,
    primary: &[Muscle],
    secondary: &[Muscle],
    pattern: MovementPattern,
    equipment: &[Equipment],
    tags: &[SplitTag],
) -> Exercise {
    exercise(&ExerciseSpec {
        id,
        primary,
        secondary,
        patterns: &[pattern],
        equipment,
        mechanics: Mechanics::Compound,
        tags,
    })
}

fn isolation(
    id: &str,
    primary: &[Muscle],
    secondary: &[Muscle],
    pattern: MovementPattern,
    equipment: &[Equipment],
    tags: &[SplitTag],
) -> Exercise {
    exercise(&ExerciseSpec {
        id,
        primary,
        secondary,
        patterns: &[pattern],
        equipment,
        mechanics: Mechanics::Isolation,
        tags,
    })
}

/// Push-day exercises
pub fn push_exercises() -> Vec<Exercise> {
    use Equipment::{Barbell, Bench, Bodyweight, Cable, Dumbbell};
    use MovementPattern::{ElbowExtension, HorizontalPush, ShoulderIsolation, VerticalPush};
    use Muscle::{Chest, FrontDelts, SideDelts, Triceps};
    vec![
        compound("bench_press", &[Chest], &[FrontDelts, Triceps], HorizontalPush, &[Barbell, Bench], &[SplitTag::Push, SplitTag::Upper]),
        compound("overhead_press", &[FrontDelts, SideDelts], &[Triceps], VerticalPush, &[Barbell], &[SplitTag::Push, SplitTag::Upper]),
        compound("incline_dumbbell_press", &[Chest], &[FrontDelts], HorizontalPush, &[Dumbbell, Bench], &[SplitTag::Push]),
        compound("dip", &[Chest, Triceps], &[FrontDelts], HorizontalPush, &[Bodyweight], &[SplitTag::Push]),
        isolation("cable_fly", &[Chest], &[], HorizontalPush, &[Cable], &[SplitTag::Push]),
        isolation("lateral_raise", &[SideDelts], &[], ShoulderIsolation, &[Dumbbell, Cable], &[SplitTag::Push]),
        isolation("triceps_pushdown", &[Triceps], &[], ElbowExtension, &[Cable], &[SplitTag::Push]),
    ]
}

/// Pull-day exercises
pub fn pull_exercises() -> Vec<Exercise> {
    use Equipment::{Barbell, Bodyweight, Cable, Dumbbell, Machine};
    use MovementPattern::{ElbowFlexion, HorizontalPull, ShoulderIsolation, VerticalPull};
    use Muscle::{Biceps, Forearms, Lats, RearDelts, Traps, UpperBack};
    vec![
        compound("barbell_row", &[UpperBack, Lats], &[Biceps, RearDelts], HorizontalPull, &[Barbell], &[SplitTag::Pull, SplitTag::Upper]),
        compound("pull_up", &[Lats], &[Biceps], VerticalPull, &[Bodyweight], &[SplitTag::Pull, SplitTag::Upper]),
        compound("lat_pulldown", &[Lats], &[Biceps], VerticalPull, &[Cable, Machine], &[SplitTag::Pull]),
        isolation("face_pull", &[RearDelts], &[Traps], ShoulderIsolation, &[Cable], &[SplitTag::Pull]),
        isolation("barbell_curl", &[Biceps], &[Forearms], ElbowFlexion, &[Barbell], &[SplitTag::Pull]),
        isolation("hammer_curl", &[Biceps, Forearms], &[], ElbowFlexion, &[Dumbbell], &[SplitTag::Pull]),
        isolation("shrug", &[Traps], &[], HorizontalPull, &[Dumbbell], &[SplitTag::Pull]),
    ]
}

/// Leg-day exercises
pub fn leg_exercises() -> Vec<Exercise> {
    use Equipment::{Barbell, Dumbbell, Machine, Rack};
    use MovementPattern::{CalfRaise, Hinge, KneeIsolation, Lunge, Squat};
    use Muscle::{Adductors, Calves, Glutes, Hamstrings, LowerBack, Quads};
    vec![
        compound("back_squat", &[Quads, Glutes], &[Adductors, LowerBack], Squat, &[Barbell, Rack], &[SplitTag::Legs, SplitTag::Lower]),
        compound("romanian_deadlift", &[Hamstrings, Glutes], &[LowerBack], Hinge, &[Barbell], &[SplitTag::Legs, SplitTag::Lower]),
        compound("leg_press", &[Quads], &[Glutes], Squat, &[Machine], &[SplitTag::Legs]),
        compound("walking_lunge", &[Quads, Glutes], &[Adductors], Lunge, &[Dumbbell], &[SplitTag::Legs]),
        isolation("leg_curl", &[Hamstrings], &[], KneeIsolation, &[Machine], &[SplitTag::Legs]),
        isolation("leg_extension", &[Quads], &[], KneeIsolation, &[Machine], &[SplitTag::Legs]),
        isolation("calf_raise", &[Calves], &[], CalfRaise, &[Machine], &[SplitTag::Legs]),
    ]
}

/// Core exercises
pub fn core_exercises() -> Vec<Exercise> {
    use MovementPattern::{CoreFlexion, CoreStability};
    vec![
        isolation("cable_crunch", &[Muscle::Abs], &[], CoreFlexion, &[Equipment::Cable], &[SplitTag::Core]),
        isolation("plank", &[Muscle::Abs], &[Muscle::LowerBack], CoreStability, &[], &[SplitTag::Core]),
    ]
}

/// Every fixture exercise
pub fn exercise_library() -> Vec<Exercise> {
    let mut library = push_exercises();
    library.extend(pull_exercises());
    library.extend(leg_exercises());
    library.extend(core_exercises());
    library
}

/// Look up a fixture exercise by id
pub fn library_exercise(id: &str) -> Exercise {
    exercise_library()
        .into_iter()
        .find(|e| e.id == id)
        .unwrap_or_else(|| panic!("no fixture exercise {id}"))
}

/// Baseline loads for the barbell and dumbbell lifts
pub fn baseline_loads() -> BTreeMap<String, f64> {
    [
        ("bench_press", 100.0),
        ("overhead_press", 60.0),
        ("incline_dumbbell_press", 32.5),
        ("barbell_row", 90.0),
        ("pull_up", 10.0),
        ("back_squat", 140.0),
        ("romanian_deadlift", 120.0),
        ("leg_press", 200.0),
        ("lateral_raise", 12.5),
        ("barbell_curl", 40.0),
    ]
    .into_iter()
    .map(|(id, load)| (id.to_owned(), load))
    .collect()
}

/// Fresh mesocycle with default ramps and RIR bands
pub fn mesocycle(
    user_id: Uuid,
    sessions_per_week: u32,
    split_type: SplitType,
    goal: TrainingGoal,
    duration_weeks: u32,
) -> Mesocycle {
    let mut meso = Mesocycle::new(
        Uuid::new_v4(),
        user_id,
        sessions_per_week,
        split_type,
        goal,
        duration_weeks,
    );
    meso.volume_ramp = VolumeLandmarkRamp::default_config(duration_weeks);
    meso.rir_bands = RirBandScheduler::default_config(duration_weeks, &RirConfig::default());
    meso
}

/// Standard five-week push/pull/legs hypertrophy mesocycle, six sessions a week
pub fn ppl_mesocycle(user_id: Uuid) -> Mesocycle {
    mesocycle(user_id, 6, SplitType::PushPullLegs, TrainingGoal::Hypertrophy, 5)
}

/// Self-report-only signal
pub fn signal(
    user_id: Uuid,
    recorded_at: DateTime<Utc>,
    readiness: u8,
    motivation: u8,
    soreness: &[(Muscle, u8)],
) -> ReadinessSignal {
    ReadinessSignal {
        id: Uuid::new_v4(),
        user_id,
        recorded_at,
        readiness,
        motivation,
        soreness: soreness.iter().copied().collect(),
        performance: None,
        wearable: None,
    }
}

/// Signal with every data source populated
pub fn full_signal(
    user_id: Uuid,
    recorded_at: DateTime<Utc>,
    readiness: u8,
    motivation: u8,
    rpe_deviation: f64,
    recovery_score: f64,
) -> ReadinessSignal {
    ReadinessSignal {
        performance: Some(PerformanceMetrics {
            rpe_deviation,
            stall_count: 0,
            volume_compliance: 1.0,
        }),
        wearable: Some(WearableSnapshot {
            recovery_score: Some(recovery_score),
            hrv_ms: None,
            resting_hr: None,
            sleep_hours: None,
        }),
        ..signal(user_id, recorded_at, readiness, motivation, &[])
    }
}

/// Signal a trainee sends after a rough night: low readiness, sore everywhere
pub fn wrecked_signal(user_id: Uuid, recorded_at: DateTime<Utc>) -> ReadinessSignal {
    let soreness: Vec<(Muscle, u8)> = Muscle::ALL.into_iter().map(|m| (m, 3)).collect();
    signal(user_id, recorded_at, 1, 1, &soreness)
}

/// In-memory store seeded with the fixture library and baselines for `user_id`
pub async fn seeded_store(user_id: Uuid) -> Arc<InMemoryStore> {
    init_test_logging();
    let store = Arc::new(InMemoryStore::new());
    store.set_exercise_pool(user_id, exercise_library()).await;
    store.set_baseline_loads(user_id, baseline_loads()).await;
    store
}

/// Clock pinned to the reference instant
pub fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(reference_time()))
}

/// Engine configuration from defaults only
pub fn engine_config() -> Arc<EngineConfig> {
    Arc::new(EngineConfig::default())
}

/// Random but reproducible exercise pool
pub fn synthetic_pool(seed: u64, size: usize) -> Vec<Exercise> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let patterns = [
        MovementPattern::HorizontalPush,
        MovementPattern::VerticalPush,
        MovementPattern::HorizontalPull,
        MovementPattern::VerticalPull,
        MovementPattern::Squat,
        MovementPattern::Hinge,
        MovementPattern::ElbowFlexion,
        MovementPattern::ElbowExtension,
        MovementPattern::ShoulderIsolation,
        MovementPattern::CoreFlexion,
    ];
    let equipment = [
        Equipment::Barbell,
        Equipment::Dumbbell,
        Equipment::Cable,
        Equipment::Machine,
        Equipment::Bodyweight,
    ];

    (0..size)
        .map(|i| {
            let primary_count = rng.gen_range(1..=2);
            let primary: Vec<Muscle> = Muscle::ALL
                .choose_multiple(&mut rng, primary_count)
                .copied()
                .collect();
            let secondary_count = rng.gen_range(0..=2);
            let others: Vec<Muscle> = Muscle::ALL
                .into_iter()
                .filter(|m| !primary.contains(m))
                .collect();
            let secondary: Vec<Muscle> = others
                .choose_multiple(&mut rng, secondary_count)
                .copied()
                .collect();
            let mechanics = if primary.len() > 1 || rng.gen_bool(0.4) {
                Mechanics::Compound
            } else {
                Mechanics::Isolation
            };
            Exercise {
                id: format!("synthetic_{i:03}"),
                name: format!("Synthetic {i}"),
                primary_muscles: primary,
                secondary_muscles: secondary,
                movement_patterns: vec![*patterns.choose(&mut rng).unwrap()],
                equipment: vec![*equipment.choose(&mut rng).unwrap()],
                mechanics,
                favorite: rng.gen_bool(0.1),
                avoided: rng.gen_bool(0.05),
                split_tags: Vec::new(),
            }
        })
        .collect()
}

/// Shift `instant` by whole hours
pub fn hours_before(instant: DateTime<Utc>, hours: i64) -> DateTime<Utc> {
    instant - Duration::hours(hours)
}
