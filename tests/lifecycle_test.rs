// ABOUTME: Tests for the mesocycle state machine, week derivation, successor creation, and blocks
// ABOUTME: Walks a mesocycle from accumulation through deload into its successor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use liftcycle_core::errors::ErrorCode;
use liftcycle_core::models::{
    BlockType, ExerciseRole, ExerciseRoleAssignment, MesocycleState, Muscle, SplitType,
    TrainingGoal, VolumeTier,
};
use liftcycle_engine::blocks::BlockPlanner;
use liftcycle_engine::config::{EngineConfig, PlannerConfig};
use liftcycle_engine::lifecycle::{LifecycleDecision, MesocycleLifecycle};
use uuid::Uuid;

fn role(exercise_id: &str, role: ExerciseRole, added_in_week: u32) -> ExerciseRoleAssignment {
    ExerciseRoleAssignment {
        exercise_id: exercise_id.to_owned(),
        role,
        added_in_week,
    }
}

#[test]
fn test_accumulation_below_threshold_is_no_change() {
    let mut meso = common::ppl_mesocycle(Uuid::new_v4());
    meso.accumulation_sessions_completed = 11;
    let decision =
        MesocycleLifecycle::evaluate(&meso, &EngineConfig::default(), Uuid::new_v4).unwrap();
    assert_eq!(decision, LifecycleDecision::NoChange);
    assert!(!decision.requires_write());
}

#[test]
fn test_accumulation_threshold_enters_deload() {
    let mut meso = common::ppl_mesocycle(Uuid::new_v4());
    meso.accumulation_sessions_completed = 12;
    let decision =
        MesocycleLifecycle::evaluate(&meso, &EngineConfig::default(), Uuid::new_v4).unwrap();
    let LifecycleDecision::EnterDeload(updated) = decision else {
        panic!("expected deload, got {decision:?}");
    };
    assert_eq!(updated.state, MesocycleState::ActiveDeload);
    assert_eq!(updated.id, meso.id);
    assert!(updated.is_active);
    assert_eq!(updated.accumulation_sessions_completed, 12);
    assert_eq!(MesocycleLifecycle::current_meso_week(&updated), 5);
}

#[test]
fn test_deload_completion_creates_successor() {
    let user_id = Uuid::new_v4();
    let mut meso = common::ppl_mesocycle(user_id);
    meso.state = MesocycleState::ActiveDeload;
    meso.accumulation_sessions_completed = 12;
    meso.deload_sessions_completed = 3;
    meso.exercise_roles = vec![
        role("bench_press", ExerciseRole::CoreCompound, 1),
        role("back_squat", ExerciseRole::CoreCompound, 2),
        role("cable_fly", ExerciseRole::Accessory, 1),
    ];

    let decision =
        MesocycleLifecycle::evaluate(&meso, &EngineConfig::default(), Uuid::new_v4).unwrap();
    assert!(decision.requires_write());
    let LifecycleDecision::Complete(cascade) = decision else {
        panic!("expected completion, got {decision:?}");
    };

    assert_eq!(cascade.completed.state, MesocycleState::Completed);
    assert!(!cascade.completed.is_active);

    let next = &cascade.next;
    assert_ne!(next.id, meso.id);
    assert_eq!(next.user_id, user_id);
    assert_eq!(next.mesocycle_number, 2);
    assert_eq!(next.state, MesocycleState::ActiveAccumulation);
    assert_eq!(next.accumulation_sessions_completed, 0);
    assert_eq!(next.deload_sessions_completed, 0);
    assert_eq!(next.start_week, 6);
    assert!(next.is_active);
    assert_eq!(next.volume_ramp, meso.volume_ramp);
    assert_eq!(next.rir_bands, meso.rir_bands);
    assert_eq!(
        next.exercise_roles,
        vec![
            role("bench_press", ExerciseRole::CoreCompound, 1),
            role("back_squat", ExerciseRole::CoreCompound, 1),
        ]
    );

    assert_eq!(cascade.next_blocks.len(), 2);
    assert!(cascade.next_blocks.iter().all(|b| b.mesocycle_id == next.id));
}

#[test]
fn test_deload_below_threshold_is_no_change() {
    let mut meso = common::ppl_mesocycle(Uuid::new_v4());
    meso.state = MesocycleState::ActiveDeload;
    meso.deload_sessions_completed = 2;
    let decision =
        MesocycleLifecycle::evaluate(&meso, &EngineConfig::default(), Uuid::new_v4).unwrap();
    assert_eq!(decision, LifecycleDecision::NoChange);
}

#[test]
fn test_completed_mesocycle_is_ignored() {
    let mut meso = common::ppl_mesocycle(Uuid::new_v4());
    meso.state = MesocycleState::Completed;
    meso.is_active = false;
    meso.deload_sessions_completed = 99;
    let decision =
        MesocycleLifecycle::evaluate(&meso, &EngineConfig::default(), Uuid::new_v4).unwrap();
    assert_eq!(decision, LifecycleDecision::AlreadyCompleted);
    assert!(!decision.requires_write());
}

#[test]
fn test_invalid_record_is_rejected() {
    let mut meso = common::ppl_mesocycle(Uuid::new_v4());
    meso.sessions_per_week = 0;
    let error =
        MesocycleLifecycle::evaluate(&meso, &EngineConfig::default(), Uuid::new_v4).unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
}

#[test]
fn test_custom_thresholds() {
    let mut config = EngineConfig::default();
    config.lifecycle.accumulation_session_threshold = 4;
    let mut meso = common::mesocycle(
        Uuid::new_v4(),
        2,
        SplitType::FullBody,
        TrainingGoal::General,
        3,
    );
    meso.accumulation_sessions_completed = 4;
    let decision = MesocycleLifecycle::evaluate(&meso, &config, Uuid::new_v4).unwrap();
    assert!(matches!(decision, LifecycleDecision::EnterDeload(_)));
}

#[test]
fn test_week_derives_from_counters() {
    let mut meso = common::ppl_mesocycle(Uuid::new_v4());
    let cases = [(0, 1), (5, 1), (6, 2), (11, 2), (18, 4), (40, 4)];
    for (sessions, week) in cases {
        meso.accumulation_sessions_completed = sessions;
        assert_eq!(
            MesocycleLifecycle::current_meso_week(&meso),
            week,
            "{sessions} sessions"
        );
    }

    meso.state = MesocycleState::ActiveDeload;
    meso.accumulation_sessions_completed = 12;
    assert_eq!(MesocycleLifecycle::current_meso_week(&meso), 5);
}

#[test]
fn test_weekly_targets_follow_ramp() {
    let meso = common::ppl_mesocycle(Uuid::new_v4());
    let config = EngineConfig::default();
    let targets: Vec<u32> = (1..=5)
        .map(|week| MesocycleLifecycle::weekly_volume_target(&meso, Muscle::Chest, week, &config.volume))
        .collect();
    assert_eq!(targets, vec![10, 12, 14, 16, 7]);

    let rir = MesocycleLifecycle::rir_target(&meso, 4, &config.rir);
    assert_eq!((rir.min, rir.max), (0, 1));
}

#[test]
fn test_successor_of_successor_keeps_numbering() {
    let meso = common::ppl_mesocycle(Uuid::new_v4());
    let second = MesocycleLifecycle::initialize_next_mesocycle(&meso, Uuid::new_v4());
    let third = MesocycleLifecycle::initialize_next_mesocycle(&second, Uuid::new_v4());
    assert_eq!(third.mesocycle_number, 3);
    assert_eq!(third.start_week, 11);
    assert_eq!(third.split_type, SplitType::PushPullLegs);
}

#[test]
fn test_duplicate_core_roles_carry_once() {
    let mut meso = common::ppl_mesocycle(Uuid::new_v4());
    meso.exercise_roles = vec![
        role("back_squat", ExerciseRole::CoreCompound, 1),
        role("back_squat", ExerciseRole::CoreCompound, 3),
    ];
    let next = MesocycleLifecycle::initialize_next_mesocycle(&meso, Uuid::new_v4());
    assert_eq!(next.exercise_roles.len(), 1);
    assert_eq!(next.core_compound_ids(), vec!["back_squat".to_owned()]);
}

#[test]
fn test_strength_blocks_cover_mesocycle() {
    let meso = common::mesocycle(
        Uuid::new_v4(),
        4,
        SplitType::UpperLower,
        TrainingGoal::Strength,
        5,
    );
    let blocks = BlockPlanner::plan_blocks(&meso, &PlannerConfig::default(), Uuid::new_v4);
    let layout: Vec<(BlockType, u32, u32)> = blocks
        .iter()
        .map(|b| (b.block_type, b.start_week, b.duration_weeks))
        .collect();
    assert_eq!(
        layout,
        vec![
            (BlockType::Accumulation, 1, 2),
            (BlockType::Intensification, 3, 1),
            (BlockType::Realization, 4, 1),
            (BlockType::Deload, 5, 1),
        ]
    );
    assert_eq!(blocks[0].volume_tier, VolumeTier::High);
    assert_eq!(blocks[3].volume_tier, VolumeTier::Low);
    assert!(blocks[3].intensity_bias < 0.0);

    for week in 1..=5 {
        let covering = blocks.iter().filter(|b| b.contains_week(week)).count();
        assert_eq!(covering, 1, "week {week}");
    }
    assert_eq!(
        BlockPlanner::block_type_for_week(&blocks, 4, 5),
        BlockType::Realization
    );
}

#[test]
fn test_block_type_inferred_without_blocks() {
    assert_eq!(BlockPlanner::block_type_for_week(&[], 2, 5), BlockType::Accumulation);
    assert_eq!(BlockPlanner::block_type_for_week(&[], 5, 5), BlockType::Deload);
}
