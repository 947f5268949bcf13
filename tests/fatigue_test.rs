// ABOUTME: Tests for composite fatigue scoring from self-report, performance, and wearable data
// ABOUTME: Covers weight redistribution, per-muscle soreness, level labels, and validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use liftcycle_core::errors::ErrorCode;
use liftcycle_core::models::{Muscle, PerformanceMetrics, WearableSnapshot};
use liftcycle_engine::config::FatigueConfig;
use liftcycle_engine::fatigue::{DataCompleteness, FatigueEngine, FatigueLevel};
use uuid::Uuid;

const TOLERANCE: f64 = 1e-9;

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < TOLERANCE
}

#[test]
fn test_primed_trainee_is_fresh() {
    let signal = common::signal(Uuid::new_v4(), common::reference_time(), 5, 5, &[]);
    let score = FatigueEngine::compute_fatigue_score(&signal, &FatigueConfig::default()).unwrap();
    assert!(close(score.overall, 1.0));
    assert_eq!(score.level, FatigueLevel::Fresh);
    assert_eq!(score.data_completeness, DataCompleteness::SubjectiveOnly);
    assert!(close(score.weights.subjective, 1.0));
    assert!(score.components.performance.is_none());
}

#[test]
fn test_wrecked_trainee_is_overreached() {
    let signal = common::wrecked_signal(Uuid::new_v4(), common::reference_time());
    let score = FatigueEngine::compute_fatigue_score(&signal, &FatigueConfig::default()).unwrap();
    assert!(close(score.overall, 0.0));
    assert_eq!(score.level, FatigueLevel::Overreached);
    assert!(score
        .insights
        .iter()
        .any(|i| i.starts_with("Severe soreness reported")));
}

#[test]
fn test_soreness_lowers_only_reported_muscles() {
    let signal = common::signal(
        Uuid::new_v4(),
        common::reference_time(),
        3,
        3,
        &[(Muscle::Chest, 3)],
    );
    let score = FatigueEngine::compute_fatigue_score(&signal, &FatigueConfig::default()).unwrap();

    // 0.4 * 0.5 + 0.2 * 0.5 + 0.4 * (1 - 1/17)
    let expected = 0.4f64.mul_add(1.0 - 1.0 / 17.0, 0.3);
    assert!(close(score.overall, expected), "{}", score.overall);
    assert_eq!(score.level, FatigueLevel::Normal);

    assert!(close(score.muscle_score(Muscle::Chest), expected * 0.5));
    assert!(close(score.muscle_score(Muscle::Quads), score.overall));
    assert!(close(
        score.lowest_among(&[Muscle::Quads, Muscle::Chest]),
        expected * 0.5
    ));
    assert!(close(score.lowest_among(&[]), score.overall));
}

#[test]
fn test_all_sources_use_full_weights() {
    let signal = common::full_signal(Uuid::new_v4(), common::reference_time(), 5, 5, 0.0, 100.0);
    let score = FatigueEngine::compute_fatigue_score(&signal, &FatigueConfig::default()).unwrap();
    assert_eq!(score.data_completeness, DataCompleteness::Full);
    assert!(close(score.weights.subjective, 0.5));
    assert!(close(score.weights.performance, 0.3));
    assert!(close(score.weights.wearable, 0.2));
    assert!(close(score.overall, 1.0));
}

#[test]
fn test_poor_performance_and_recovery_drag_score() {
    let signal = common::full_signal(Uuid::new_v4(), common::reference_time(), 5, 5, 2.0, 20.0);
    let score = FatigueEngine::compute_fatigue_score(&signal, &FatigueConfig::default()).unwrap();

    // performance: 0.4 * 0 + 0.3 * 1 + 0.3 * 1; wearable: 0.2
    let expected = 0.2f64.mul_add(0.2, 0.3f64.mul_add(0.6, 0.5));
    assert!(close(score.overall, expected), "{}", score.overall);
    assert_eq!(score.level, FatigueLevel::Normal);
    assert!(score
        .insights
        .iter()
        .any(|i| i == "Wearable recovery is below normal"));
}

#[test]
fn test_sleep_only_wearable_counts() {
    let mut signal = common::signal(Uuid::new_v4(), common::reference_time(), 5, 5, &[]);
    signal.wearable = Some(WearableSnapshot {
        recovery_score: None,
        hrv_ms: None,
        resting_hr: None,
        sleep_hours: Some(4.0),
    });
    let score = FatigueEngine::compute_fatigue_score(&signal, &FatigueConfig::default()).unwrap();
    assert_eq!(score.data_completeness, DataCompleteness::Partial);
    assert_eq!(score.components.wearable, Some(0.5));
    assert!(close(score.weights.subjective, 0.5 / 0.7));
    assert!(close(score.weights.wearable, 0.2 / 0.7));
}

#[test]
fn test_wearable_without_usable_fields_is_ignored() {
    let mut signal = common::signal(Uuid::new_v4(), common::reference_time(), 4, 4, &[]);
    signal.wearable = Some(WearableSnapshot {
        recovery_score: None,
        hrv_ms: Some(65.0),
        resting_hr: Some(52.0),
        sleep_hours: None,
    });
    let score = FatigueEngine::compute_fatigue_score(&signal, &FatigueConfig::default()).unwrap();
    assert_eq!(score.data_completeness, DataCompleteness::SubjectiveOnly);
    assert!(score.components.wearable.is_none());
}

#[test]
fn test_stalls_saturate() {
    let config = FatigueConfig::default();
    let metrics = PerformanceMetrics {
        rpe_deviation: 0.0,
        stall_count: 10,
        volume_compliance: 1.0,
    };
    assert!(close(FatigueEngine::score_performance(&metrics, &config), 0.7));
}

#[test]
fn test_out_of_scale_values_rejected() {
    let config = FatigueConfig::default();
    let user_id = Uuid::new_v4();

    let bad_readiness = common::signal(user_id, common::reference_time(), 6, 3, &[]);
    let error = FatigueEngine::compute_fatigue_score(&bad_readiness, &config).unwrap_err();
    assert_eq!(error.code, ErrorCode::ValueOutOfRange);

    let bad_soreness = common::signal(user_id, common::reference_time(), 3, 3, &[(Muscle::Lats, 4)]);
    assert!(FatigueEngine::compute_fatigue_score(&bad_soreness, &config).is_err());

    let mut bad_compliance = common::signal(user_id, common::reference_time(), 3, 3, &[]);
    bad_compliance.performance = Some(PerformanceMetrics {
        rpe_deviation: 0.0,
        stall_count: 0,
        volume_compliance: 1.5,
    });
    assert!(FatigueEngine::compute_fatigue_score(&bad_compliance, &config).is_err());
}

#[test]
fn test_levels_follow_thresholds() {
    let config = FatigueConfig::default();
    assert_eq!(FatigueEngine::categorize(0.8, &config), FatigueLevel::Fresh);
    assert_eq!(FatigueEngine::categorize(0.79, &config), FatigueLevel::Normal);
    assert_eq!(FatigueEngine::categorize(0.5, &config), FatigueLevel::Fatigued);
    assert_eq!(FatigueEngine::categorize(0.1, &config), FatigueLevel::Overreached);
}
