// ABOUTME: Tests for session planning across accumulation, realization, and deload weeks
// ABOUTME: Checks weekly targets, prescriptions, loads, warnings, and role assignments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

mod common;

use std::collections::{BTreeMap, BTreeSet};

use liftcycle_core::errors::ErrorCode;
use liftcycle_core::models::{
    BlockType, Equipment, Exercise, ExerciseRole, ExerciseRoleAssignment, Mesocycle,
    MesocycleState, Muscle, MuscleRamp, SessionIntent, SplitType, TrainingBlock, TrainingGoal,
};
use liftcycle_engine::blocks::BlockPlanner;
use liftcycle_engine::config::EngineConfig;
use liftcycle_engine::planner::{PlannedSession, PlanningInput, SessionPlanner};
use uuid::Uuid;

struct Fixture {
    meso: Mesocycle,
    blocks: Vec<TrainingBlock>,
    pool: Vec<Exercise>,
    baselines: BTreeMap<String, f64>,
}

impl Fixture {
    fn new(meso: Mesocycle) -> Self {
        let config = EngineConfig::default();
        let blocks = BlockPlanner::plan_blocks(&meso, &config.planner, Uuid::new_v4);
        Self {
            meso,
            blocks,
            pool: common::exercise_library(),
            baselines: common::baseline_loads(),
        }
    }

    fn input(&self) -> PlanningInput<'_> {
        PlanningInput {
            mesocycle: &self.meso,
            blocks: &self.blocks,
            exercise_pool: &self.pool,
            baselines: &self.baselines,
            session_index: 0,
            seed: 42,
            intent: None,
            target_muscle_groups: Vec::new(),
            available_equipment: None,
        }
    }

    fn plan(&self) -> PlannedSession {
        SessionPlanner::plan_session(&self.input(), &EngineConfig::default()).unwrap()
    }
}

#[test]
fn test_first_push_session() {
    let fixture = Fixture::new(common::ppl_mesocycle(Uuid::new_v4()));
    let planned = fixture.plan();
    let plan = &planned.plan;

    assert_eq!(plan.week, 1);
    assert_eq!(plan.intent, SessionIntent::Push);
    assert_eq!(plan.block_type, BlockType::Accumulation);
    assert_eq!(plan.mesocycle_id, fixture.meso.id);

    // front delts carry no direct target
    let expected: BTreeMap<Muscle, u32> =
        [(Muscle::Chest, 10), (Muscle::SideDelts, 8), (Muscle::Triceps, 6)].into();
    assert_eq!(planned.weekly_targets, expected);

    assert_eq!(plan.exercises.len(), 6);
    assert_eq!(planned.selection.main_lifts, vec!["dip", "overhead_press"]);
    for id in ["bench_press", "incline_dumbbell_press", "lateral_raise", "triceps_pushdown"] {
        assert!(plan.exercise(id).is_some(), "{id} missing");
    }

    for exercise in &plan.exercises {
        assert_eq!((exercise.target_rir.min, exercise.target_rir.max), (3, 4));
        assert!((2..=5).contains(&exercise.sets), "{}", exercise.exercise_id);
    }

    let bench = plan.exercise("bench_press").unwrap();
    assert_eq!(bench.load, Some(100.0));
    assert_eq!(bench.role, ExerciseRole::Accessory);
    assert_eq!((bench.rep_range.min, bench.rep_range.max), (8, 12));

    let dip = plan.exercise("dip").unwrap();
    assert_eq!(dip.load, None);
    assert_eq!(dip.role, ExerciseRole::CoreCompound);
    assert!(plan
        .warnings
        .iter()
        .any(|w| w.starts_with("No baseline load for dip")));

    let lateral = plan.exercise("lateral_raise").unwrap();
    assert_eq!((lateral.rep_range.min, lateral.rep_range.max), (10, 15));

    assert!(!plan.warnings.iter().any(|w| w.contains("maintenance volume")));
    assert!(plan.substitution_notes.is_empty());
    assert!(plan.rationale[0].starts_with("Week 1 of 5"));

    assert_eq!(planned.new_role_assignments.len(), 6);
    assert!(planned
        .new_role_assignments
        .iter()
        .all(|r| r.added_in_week == 1));
    let core: Vec<&str> = planned
        .new_role_assignments
        .iter()
        .filter(|r| r.role == ExerciseRole::CoreCompound)
        .map(|r| r.exercise_id.as_str())
        .collect();
    assert_eq!(core, vec!["dip", "overhead_press"]);
}

#[test]
fn test_planning_is_deterministic() {
    let fixture = Fixture::new(common::ppl_mesocycle(Uuid::new_v4()));
    assert_eq!(fixture.plan(), fixture.plan());
}

#[test]
fn test_rotation_selects_intent() {
    let fixture = Fixture::new(common::ppl_mesocycle(Uuid::new_v4()));
    let mut input = fixture.input();
    input.session_index = 2;
    let planned = SessionPlanner::plan_session(&input, &EngineConfig::default()).unwrap();
    assert_eq!(planned.plan.intent, SessionIntent::Legs);
    assert!(planned.plan.exercise("back_squat").is_some());
}

#[test]
fn test_existing_roles_are_kept() {
    let mut meso = common::ppl_mesocycle(Uuid::new_v4());
    meso.exercise_roles = vec![ExerciseRoleAssignment {
        exercise_id: "bench_press".to_owned(),
        role: ExerciseRole::CoreCompound,
        added_in_week: 1,
    }];
    let fixture = Fixture::new(meso);
    let planned = fixture.plan();
    assert_eq!(
        planned.plan.exercise("bench_press").unwrap().role,
        ExerciseRole::CoreCompound
    );
    assert!(planned
        .new_role_assignments
        .iter()
        .all(|r| r.exercise_id != "bench_press"));
}

#[test]
fn test_deload_week_lightens_everything() {
    let mut meso = common::ppl_mesocycle(Uuid::new_v4());
    meso.state = MesocycleState::ActiveDeload;
    meso.accumulation_sessions_completed = 12;
    meso.deload_sessions_completed = 1;
    let fixture = Fixture::new(meso);
    let planned = fixture.plan();
    let plan = &planned.plan;

    assert_eq!(plan.week, 5);
    assert_eq!(plan.block_type, BlockType::Deload);
    assert_eq!(planned.weekly_targets.get(&Muscle::Chest), Some(&7));

    let bench = plan.exercise("bench_press").unwrap();
    assert_eq!(bench.load, Some(90.0));
    assert_eq!((bench.target_rir.min, bench.target_rir.max), (4, 5));
    assert_eq!((bench.rep_range.min, bench.rep_range.max), (8, 10));

    assert!(!plan.warnings.iter().any(|w| w.contains("maintenance volume")));
}

#[test]
fn test_strength_realization_week() {
    let mut meso = common::mesocycle(
        Uuid::new_v4(),
        6,
        SplitType::PushPullLegs,
        TrainingGoal::Strength,
        5,
    );
    meso.accumulation_sessions_completed = 18;
    let fixture = Fixture::new(meso);
    let plan = fixture.plan().plan;

    assert_eq!(plan.week, 4);
    assert_eq!(plan.block_type, BlockType::Realization);
    let bench = plan.exercise("bench_press").unwrap();
    assert_eq!(bench.load, Some(105.0));
    assert_eq!((bench.rep_range.min, bench.rep_range.max), (3, 5));
    assert_eq!((bench.target_rir.min, bench.target_rir.max), (0, 1));
}

#[test]
fn test_body_part_requires_targets() {
    let fixture = Fixture::new(common::ppl_mesocycle(Uuid::new_v4()));
    let mut input = fixture.input();
    input.intent = Some(SessionIntent::BodyPart);
    let error = SessionPlanner::plan_session(&input, &EngineConfig::default()).unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
}

#[test]
fn test_body_part_session_on_explicit_targets() {
    let fixture = Fixture::new(common::ppl_mesocycle(Uuid::new_v4()));
    let mut input = fixture.input();
    input.intent = Some(SessionIntent::BodyPart);
    input.target_muscle_groups = vec!["chest".to_owned(), "triceps".to_owned()];
    let planned = SessionPlanner::plan_session(&input, &EngineConfig::default()).unwrap();

    let targets: Vec<Muscle> = planned.weekly_targets.keys().copied().collect();
    assert_eq!(targets, vec![Muscle::Chest, Muscle::Triceps]);
    assert!(planned.selection.diagnostics.aligned_ratio >= 0.7);
    assert!(planned.plan.exercise("dip").is_some());
}

#[test]
fn test_unalignable_body_part_session_fails() {
    let fixture = Fixture::new(common::ppl_mesocycle(Uuid::new_v4()));
    let mut input = fixture.input();
    input.intent = Some(SessionIntent::BodyPart);
    input.target_muscle_groups = vec!["biceps".to_owned()];
    let error = SessionPlanner::plan_session(&input, &EngineConfig::default()).unwrap_err();
    assert_eq!(error.code, ErrorCode::SelectionUnsatisfiable);
}

#[test]
fn test_equipment_limits_selection_and_warns() {
    let fixture = Fixture::new(common::ppl_mesocycle(Uuid::new_v4()));
    let mut input = fixture.input();
    input.session_index = 1;
    input.available_equipment = Some(BTreeSet::from([Equipment::Bodyweight]));
    let planned = SessionPlanner::plan_session(&input, &EngineConfig::default()).unwrap();
    let plan = &planned.plan;

    assert_eq!(plan.intent, SessionIntent::Pull);
    let ids: Vec<&str> = plan.exercises.iter().map(|e| e.exercise_id.as_str()).collect();
    assert_eq!(ids, vec!["pull_up"]);
    assert_eq!(plan.exercises[0].load, Some(10.0));

    let coverage = plan
        .warnings
        .iter()
        .find(|w| w.starts_with("No available exercise covers"))
        .unwrap();
    assert!(coverage.contains("rear_delts"));
}

#[test]
fn test_low_ramp_warns_below_maintenance() {
    let mut meso = common::ppl_mesocycle(Uuid::new_v4());
    meso.volume_ramp.muscles.insert(
        Muscle::Chest,
        MuscleRamp {
            week1_sets: 4,
            peak_sets: 4,
        },
    );
    let fixture = Fixture::new(meso);
    let plan = fixture.plan().plan;
    assert!(plan
        .warnings
        .iter()
        .any(|w| w.contains("weekly target of 4 sets is below maintenance volume (8)")));
}

#[test]
fn test_invalid_mesocycle_rejected() {
    let mut meso = common::ppl_mesocycle(Uuid::new_v4());
    meso.duration_weeks = 1;
    let fixture = Fixture::new(meso);
    let error = SessionPlanner::plan_session(&fixture.input(), &EngineConfig::default()).unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
}
