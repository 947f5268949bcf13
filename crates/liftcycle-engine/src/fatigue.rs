// ABOUTME: Composite fatigue scoring from self-report, logged performance, and wearable data
// ABOUTME: Weights renormalize over the components present; soreness penalizes muscles individually
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

//! Fatigue Engine
//!
//! Scores run on a 0-1 scale where higher means more ready to train. The
//! subjective component is always present; performance and wearable
//! components are optional and their weight is redistributed when absent.

use std::collections::BTreeMap;

use liftcycle_core::errors::AppResult;
use liftcycle_core::models::readiness::{SELF_REPORT_MAX, SELF_REPORT_MIN, SORENESS_MAX};
use liftcycle_core::models::{
    Muscle, PerformanceMetrics, ReadinessSignal, WearableSnapshot,
};
use serde::{Deserialize, Serialize};

use crate::config::FatigueConfig;

/// Readiness classification of an overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FatigueLevel {
    /// Ready for full training
    Fresh,
    /// Typical training fatigue
    Normal,
    /// Elevated fatigue; reduce stress
    Fatigued,
    /// Accumulated fatigue beyond what a session should add to
    Overreached,
}

/// Which optional data sources contributed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataCompleteness {
    /// Self-report, performance, and wearable
    Full,
    /// Self-report plus one optional source
    Partial,
    /// Self-report only
    SubjectiveOnly,
}

/// Component scores on a 0-1 scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FatigueComponents {
    /// Readiness, motivation, and soreness
    pub subjective: f64,
    /// RPE deviation, stalls, and compliance
    pub performance: Option<f64>,
    /// Wearable recovery
    pub wearable: Option<f64>,
}

/// Component weights after renormalizing over the available components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppliedWeights {
    /// Subjective weight
    pub subjective: f64,
    /// Performance weight
    pub performance: f64,
    /// Wearable weight
    pub wearable: f64,
}

/// Derived fatigue value object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FatigueScore {
    /// Overall readiness in [0, 1]
    pub overall: f64,
    /// Classification of `overall`
    pub level: FatigueLevel,
    /// Readiness per muscle; only reported soreness lowers a muscle below `overall`
    pub per_muscle: BTreeMap<Muscle, f64>,
    /// Weights actually applied
    pub weights: AppliedWeights,
    /// Component scores
    pub components: FatigueComponents,
    /// Which sources contributed
    pub data_completeness: DataCompleteness,
    /// Human-readable observations
    pub insights: Vec<String>,
}

impl FatigueScore {
    /// Readiness for one muscle, defaulting to the overall score
    #[must_use]
    pub fn muscle_score(&self, muscle: Muscle) -> f64 {
        self.per_muscle.get(&muscle).copied().unwrap_or(self.overall)
    }

    /// Lowest readiness among `muscles`, or the overall score when empty
    #[must_use]
    pub fn lowest_among(&self, muscles: &[Muscle]) -> f64 {
        muscles
            .iter()
            .map(|m| self.muscle_score(*m))
            .fold(self.overall, f64::min)
    }
}

/// Fatigue calculator
pub struct FatigueEngine;

impl FatigueEngine {
    /// Compute the composite fatigue score for a readiness signal
    ///
    /// # Errors
    ///
    /// Returns a validation error for values outside their documented scales.
    pub fn compute_fatigue_score(
        signal: &ReadinessSignal,
        config: &FatigueConfig,
    ) -> AppResult<FatigueScore> {
        signal.validate()?;

        let subjective = Self::score_subjective(signal, config);
        let performance = signal
            .performance
            .as_ref()
            .map(|p| Self::score_performance(p, config));
        let wearable = signal
            .wearable
            .as_ref()
            .and_then(|w| Self::score_wearable(w, config));

        let weights = Self::applied_weights(performance.is_some(), wearable.is_some(), config);
        let overall = weights
            .wearable
            .mul_add(
                wearable.unwrap_or(0.0),
                weights
                    .performance
                    .mul_add(performance.unwrap_or(0.0), weights.subjective * subjective),
            )
            .clamp(0.0, 1.0);

        let per_muscle = Muscle::ALL
            .into_iter()
            .map(|muscle| {
                let level = f64::from(signal.soreness_of(muscle)) / f64::from(SORENESS_MAX);
                let penalty = config.soreness_penalty * level;
                (muscle, (overall * (1.0 - penalty)).clamp(0.0, 1.0))
            })
            .collect();

        let data_completeness = match (performance.is_some(), wearable.is_some()) {
            (true, true) => DataCompleteness::Full,
            (false, false) => DataCompleteness::SubjectiveOnly,
            _ => DataCompleteness::Partial,
        };
        let components = FatigueComponents {
            subjective,
            performance,
            wearable,
        };
        let level = Self::categorize(overall, config);

        Ok(FatigueScore {
            overall,
            level,
            per_muscle,
            weights,
            insights: Self::generate_insights(signal, &components, level),
            components,
            data_completeness,
        })
    }

    /// Classify an overall score
    #[must_use]
    pub fn categorize(overall: f64, config: &FatigueConfig) -> FatigueLevel {
        if overall >= config.fresh_threshold {
            FatigueLevel::Fresh
        } else if overall >= config.normal_threshold {
            FatigueLevel::Normal
        } else if overall >= config.fatigued_threshold {
            FatigueLevel::Fatigued
        } else {
            FatigueLevel::Overreached
        }
    }

    /// Self-report component
    ///
    /// Soreness contributes `1 - mean(level / 3)` over every muscle, so an
    /// unreported muscle counts as not sore.
    #[must_use]
    pub fn score_subjective(signal: &ReadinessSignal, config: &FatigueConfig) -> f64 {
        let scale = f64::from(SELF_REPORT_MAX - SELF_REPORT_MIN);
        let readiness = f64::from(signal.readiness.saturating_sub(SELF_REPORT_MIN)) / scale;
        let motivation = f64::from(signal.motivation.saturating_sub(SELF_REPORT_MIN)) / scale;

        let soreness_load: f64 = signal
            .soreness
            .values()
            .map(|level| f64::from(*level) / f64::from(SORENESS_MAX))
            .sum();
        let soreness = 1.0 - soreness_load / Muscle::ALL.len() as f64;

        config
            .soreness_weight
            .mul_add(
                soreness,
                config
                    .motivation_weight
                    .mul_add(motivation, config.readiness_weight * readiness),
            )
            .clamp(0.0, 1.0)
    }

    /// Logged-performance component
    #[must_use]
    pub fn score_performance(metrics: &PerformanceMetrics, config: &FatigueConfig) -> f64 {
        // Sessions that felt easier than prescribed are not a recovery signal
        let overshoot = metrics.rpe_deviation.max(0.0);
        let rpe = 1.0 - (overshoot / config.rpe_tolerance).min(1.0);
        let stalls =
            1.0 - (f64::from(metrics.stall_count) / f64::from(config.stall_limit)).min(1.0);
        let compliance = metrics.volume_compliance.clamp(0.0, 1.0);

        config
            .compliance_weight
            .mul_add(
                compliance,
                config.stall_weight.mul_add(stalls, config.rpe_weight * rpe),
            )
            .clamp(0.0, 1.0)
    }

    /// Wearable component; `None` when the snapshot has nothing usable without a baseline
    #[must_use]
    pub fn score_wearable(snapshot: &WearableSnapshot, config: &FatigueConfig) -> Option<f64> {
        if let Some(recovery) = snapshot.recovery_score {
            return Some((recovery / 100.0).clamp(0.0, 1.0));
        }
        snapshot
            .sleep_hours
            .map(|hours| (hours / config.sleep_target_hours).clamp(0.0, 1.0))
    }

    fn applied_weights(
        has_performance: bool,
        has_wearable: bool,
        config: &FatigueConfig,
    ) -> AppliedWeights {
        let performance = if has_performance {
            config.performance_weight
        } else {
            0.0
        };
        let wearable = if has_wearable {
            config.wearable_weight
        } else {
            0.0
        };
        let total = config.subjective_weight + performance + wearable;
        AppliedWeights {
            subjective: config.subjective_weight / total,
            performance: performance / total,
            wearable: wearable / total,
        }
    }

    fn generate_insights(
        signal: &ReadinessSignal,
        components: &FatigueComponents,
        level: FatigueLevel,
    ) -> Vec<String> {
        let mut insights = Vec::new();
        match level {
            FatigueLevel::Fresh => insights.push("Readiness is high across reported signals".to_owned()),
            FatigueLevel::Normal => {}
            FatigueLevel::Fatigued => {
                insights.push("Fatigue is elevated; expect a lighter session".to_owned());
            }
            FatigueLevel::Overreached => {
                insights.push("Fatigue is high; session stress should be reduced".to_owned());
            }
        }

        let sore: Vec<&str> = signal
            .soreness
            .iter()
            .filter(|(_, level)| **level >= SORENESS_MAX)
            .map(|(muscle, _)| muscle.as_str())
            .collect();
        if !sore.is_empty() {
            insights.push(format!("Severe soreness reported: {}", sore.join(", ")));
        }
        if components.performance.is_some_and(|p| p < 0.5) {
            insights.push("Recent sessions ran harder than prescribed or stalled".to_owned());
        }
        if components.wearable.is_some_and(|w| w < 0.5) {
            insights.push("Wearable recovery is below normal".to_owned());
        }
        insights
    }
}
