// ABOUTME: Fatigue scoring weights and autoregulation bounds
// ABOUTME: Component weights are named and overridable rather than fixed in the scoring code
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

use liftcycle_core::constants::{autoregulation, fatigue};
use serde::{Deserialize, Serialize};

use super::ConfigError;

const WEIGHT_TOLERANCE: f64 = 0.01;

/// Composite fatigue scoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FatigueConfig {
    /// Weight of the self-report component
    pub subjective_weight: f64,
    /// Weight of the logged-performance component
    pub performance_weight: f64,
    /// Weight of the wearable component
    pub wearable_weight: f64,
    /// Readiness share of the subjective component
    pub readiness_weight: f64,
    /// Motivation share of the subjective component
    pub motivation_weight: f64,
    /// Soreness share of the subjective component
    pub soreness_weight: f64,
    /// RPE deviation share of the performance component
    pub rpe_weight: f64,
    /// Stall share of the performance component
    pub stall_weight: f64,
    /// Compliance share of the performance component
    pub compliance_weight: f64,
    /// RPE overshoot that zeroes the RPE sub-score
    pub rpe_tolerance: f64,
    /// Stall count that zeroes the stall sub-score
    pub stall_limit: u32,
    /// Sleep hours treated as fully recovered
    pub sleep_target_hours: f64,
    /// Per-muscle penalty at maximum soreness, in (0, 1]
    pub soreness_penalty: f64,
    /// Overall score at or above which a trainee is fresh
    pub fresh_threshold: f64,
    /// Overall score at or above which a trainee is normal
    pub normal_threshold: f64,
    /// Overall score at or above which a trainee is fatigued rather than overreached
    pub fatigued_threshold: f64,
}

impl Default for FatigueConfig {
    fn default() -> Self {
        Self {
            subjective_weight: fatigue::SUBJECTIVE_WEIGHT,
            performance_weight: fatigue::PERFORMANCE_WEIGHT,
            wearable_weight: fatigue::WEARABLE_WEIGHT,
            readiness_weight: 0.4,
            motivation_weight: 0.2,
            soreness_weight: 0.4,
            rpe_weight: 0.4,
            stall_weight: 0.3,
            compliance_weight: 0.3,
            rpe_tolerance: 2.0,
            stall_limit: 3,
            sleep_target_hours: fatigue::SLEEP_TARGET_HOURS,
            soreness_penalty: 0.5,
            fresh_threshold: 0.8,
            normal_threshold: 0.6,
            fatigued_threshold: 0.4,
        }
    }
}

fn sums_to_one(weights: &[f64]) -> bool {
    weights.iter().all(|w| *w >= 0.0) && (weights.iter().sum::<f64>() - 1.0).abs() <= WEIGHT_TOLERANCE
}

impl FatigueConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !sums_to_one(&[
            self.subjective_weight,
            self.performance_weight,
            self.wearable_weight,
        ]) {
            return Err(ConfigError::InvalidWeights(
                "Fatigue component weights must sum to 1.0",
            ));
        }
        if self.subjective_weight <= 0.0 || self.soreness_weight <= 0.0 {
            return Err(ConfigError::InvalidWeights(
                "Subjective and soreness weights must be positive",
            ));
        }
        if !sums_to_one(&[
            self.readiness_weight,
            self.motivation_weight,
            self.soreness_weight,
        ]) {
            return Err(ConfigError::InvalidWeights(
                "Subjective sub-weights must sum to 1.0",
            ));
        }
        if !sums_to_one(&[self.rpe_weight, self.stall_weight, self.compliance_weight]) {
            return Err(ConfigError::InvalidWeights(
                "Performance sub-weights must sum to 1.0",
            ));
        }
        if self.soreness_penalty <= 0.0 || self.soreness_penalty > 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "soreness_penalty must be in (0, 1]",
            ));
        }
        if self.rpe_tolerance <= 0.0 || self.stall_limit == 0 || self.sleep_target_hours <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "rpe_tolerance, stall_limit, and sleep_target_hours must be positive",
            ));
        }
        if !(self.fatigued_threshold < self.normal_threshold
            && self.normal_threshold < self.fresh_threshold
            && self.fresh_threshold <= 1.0
            && self.fatigued_threshold >= 0.0)
        {
            return Err(ConfigError::InvalidRange(
                "Fatigue level thresholds must ascend within [0, 1]",
            ));
        }
        Ok(())
    }
}

/// Bounds on session-to-session prescription rescaling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoregulationConfig {
    /// Signals older than this are treated as absent
    pub staleness_hours: i64,
    /// Overall score below which the session is adjusted
    pub readiness_threshold: f64,
    /// Largest fractional load reduction for one session
    pub max_load_reduction: f64,
    /// Severity at or above which one set is removed
    pub set_drop_severity: f64,
    /// Sets never reduced below this count
    pub min_sets: u32,
    /// Adjusted loads round to this increment
    pub load_increment: f64,
}

impl Default for AutoregulationConfig {
    fn default() -> Self {
        Self {
            staleness_hours: autoregulation::STALENESS_HOURS,
            readiness_threshold: autoregulation::READINESS_THRESHOLD,
            max_load_reduction: autoregulation::MAX_LOAD_REDUCTION,
            set_drop_severity: 0.5,
            min_sets: 2,
            load_increment: 2.5,
        }
    }
}

impl AutoregulationConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=autoregulation::MAX_STALENESS_HOURS).contains(&self.staleness_hours) {
            return Err(ConfigError::ValueOutOfRange(
                "staleness_hours must be in 1..=336",
            ));
        }
        if !(0.0..=1.0).contains(&self.readiness_threshold) || self.readiness_threshold == 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "readiness_threshold must be in (0, 1]",
            ));
        }
        if !(0.0..1.0).contains(&self.max_load_reduction) {
            return Err(ConfigError::ValueOutOfRange(
                "max_load_reduction must be in [0, 1)",
            ));
        }
        if !(0.0..=1.0).contains(&self.set_drop_severity) {
            return Err(ConfigError::ValueOutOfRange(
                "set_drop_severity must be in [0, 1]",
            ));
        }
        if self.min_sets == 0 || self.load_increment < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "min_sets must be positive and load_increment non-negative",
            ));
        }
        Ok(())
    }
}
