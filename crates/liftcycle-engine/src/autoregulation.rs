// ABOUTME: Bounded, staleness-gated rescaling of a draft session from the latest readiness signal
// ABOUTME: Only ever reduces loads and sets, and records a rationale for each modification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

use chrono::{DateTime, Duration, Utc};
use liftcycle_core::constants::autoregulation::NO_RECENT_SIGNAL_REASON;
use liftcycle_core::errors::AppResult;
use liftcycle_core::models::{PrescribedExercise, ReadinessSignal, SessionPlan};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{AutoregulationConfig, FatigueConfig};
use crate::fatigue::{FatigueEngine, FatigueScore};

/// What an adjustment changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModificationKind {
    /// Prescribed load lowered
    LoadReduced,
    /// One working set removed
    SetsReduced,
}

/// One recorded change to the draft session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modification {
    /// Exercise changed
    pub exercise_id: String,
    /// Kind of change
    pub kind: ModificationKind,
    /// Value before the change
    pub before: f64,
    /// Value after the change
    pub after: f64,
    /// Explanation for the trainee
    pub rationale: String,
}

/// Result of autoregulating a draft session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoregulationResult {
    /// Session after adjustment; equal to the draft when nothing applied
    pub adjusted: SessionPlan,
    /// Whether any modification was made
    pub applied: bool,
    /// Why the session was or was not adjusted
    pub reason: String,
    /// Score used, absent when no usable signal existed
    pub fatigue_score: Option<FatigueScore>,
    /// Changes made
    pub modifications: Vec<Modification>,
}

impl AutoregulationResult {
    fn unchanged(draft: &SessionPlan, reason: impl Into<String>, score: Option<FatigueScore>) -> Self {
        Self {
            adjusted: draft.clone(),
            applied: false,
            reason: reason.into(),
            fatigue_score: score,
            modifications: Vec::new(),
        }
    }
}

/// Session autoregulator
pub struct Autoregulator;

impl Autoregulator {
    /// Whether a signal is too old to act on at `now`
    ///
    /// A staleness limit too large to represent never expires a signal.
    #[must_use]
    pub fn is_stale(signal: &ReadinessSignal, now: DateTime<Utc>, config: &AutoregulationConfig) -> bool {
        Duration::try_hours(config.staleness_hours)
            .is_some_and(|limit| now.signed_duration_since(signal.recorded_at) > limit)
    }

    /// Rescale `draft` from the latest signal
    ///
    /// A missing or stale signal returns the draft unchanged. Otherwise, when
    /// the fatigue score is below the readiness threshold, each exercise's load
    /// drops by up to `max_load_reduction` in proportion to how far the lowest
    /// score among its primary muscles sits below the threshold, and one set
    /// is removed at high severity.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the signal is outside its scales.
    pub fn apply(
        signal: Option<&ReadinessSignal>,
        draft: &SessionPlan,
        now: DateTime<Utc>,
        fatigue_config: &FatigueConfig,
        config: &AutoregulationConfig,
    ) -> AppResult<AutoregulationResult> {
        let Some(signal) = signal.filter(|s| !Self::is_stale(s, now, config)) else {
            debug!(mesocycle_id = %draft.mesocycle_id, "No fresh readiness signal; session unchanged");
            return Ok(AutoregulationResult::unchanged(draft, NO_RECENT_SIGNAL_REASON, None));
        };

        let score = FatigueEngine::compute_fatigue_score(signal, fatigue_config)?;
        if score.overall >= config.readiness_threshold {
            let reason = format!(
                "Readiness {:.2} meets threshold {:.2}; no adjustment needed",
                score.overall, config.readiness_threshold
            );
            return Ok(AutoregulationResult::unchanged(draft, reason, Some(score)));
        }

        let mut adjusted = draft.clone();
        let mut modifications = Vec::new();
        for exercise in &mut adjusted.exercises {
            Self::adjust_exercise(exercise, &score, config, &mut modifications);
        }

        if modifications.is_empty() {
            let reason = format!(
                "Readiness {:.2} below threshold {:.2}, but no load or set could be reduced further",
                score.overall, config.readiness_threshold
            );
            return Ok(AutoregulationResult::unchanged(draft, reason, Some(score)));
        }

        let reason = format!(
            "Readiness {:.2} ({:?}) below threshold {:.2}; {} adjustment(s) applied",
            score.overall,
            score.level,
            config.readiness_threshold,
            modifications.len()
        );
        adjusted.rationale.push(reason.clone());
        info!(
            mesocycle_id = %draft.mesocycle_id,
            user_id = %signal.user_id,
            overall = score.overall,
            modifications = modifications.len(),
            "Autoregulation applied"
        );

        Ok(AutoregulationResult {
            adjusted,
            applied: true,
            reason,
            fatigue_score: Some(score),
            modifications,
        })
    }

    /// Fraction in [0, 1] of how far `score` sits below the threshold
    #[must_use]
    pub fn severity(score: f64, config: &AutoregulationConfig) -> f64 {
        ((config.readiness_threshold - score) / config.readiness_threshold).clamp(0.0, 1.0)
    }

    /// Reduced load, rounded down to the increment and held within the cap
    ///
    /// Any positive severity lowers the load. When the rounded-down step
    /// would fall below the cap floor, the unrounded target is used instead.
    #[must_use]
    pub fn reduced_load(original: f64, severity: f64, config: &AutoregulationConfig) -> f64 {
        if severity <= 0.0 {
            return original;
        }
        let target = original * config.max_load_reduction.mul_add(-severity, 1.0);
        let floor = original * (1.0 - config.max_load_reduction);
        let stepped = if config.load_increment > 0.0 {
            (target / config.load_increment).floor() * config.load_increment
        } else {
            target
        };
        let reduced = if stepped >= floor && stepped < original {
            stepped
        } else {
            target
        };
        reduced.clamp(floor.min(original), original)
    }

    fn adjust_exercise(
        exercise: &mut PrescribedExercise,
        score: &FatigueScore,
        config: &AutoregulationConfig,
        modifications: &mut Vec<Modification>,
    ) {
        let muscle_score = score.lowest_among(&exercise.primary_muscles);
        let severity = Self::severity(muscle_score, config);
        if severity <= 0.0 {
            return;
        }

        if let Some(load) = exercise.load.filter(|l| *l > 0.0) {
            let reduced = Self::reduced_load(load, severity, config);
            if reduced < load {
                let percent = (1.0 - reduced / load) * 100.0;
                modifications.push(Modification {
                    exercise_id: exercise.exercise_id.clone(),
                    kind: ModificationKind::LoadReduced,
                    before: load,
                    after: reduced,
                    rationale: format!(
                        "{}: load {load:.1} -> {reduced:.1} (-{percent:.1}%) for muscle readiness {muscle_score:.2}",
                        exercise.name
                    ),
                });
                exercise.load = Some(reduced);
            }
        }

        if severity >= config.set_drop_severity && exercise.sets > config.min_sets {
            let before = exercise.sets;
            exercise.sets -= 1;
            modifications.push(Modification {
                exercise_id: exercise.exercise_id.clone(),
                kind: ModificationKind::SetsReduced,
                before: f64::from(before),
                after: f64::from(exercise.sets),
                rationale: format!(
                    "{}: {before} -> {} sets at fatigue severity {severity:.2}",
                    exercise.name, exercise.sets
                ),
            });
        }
    }
}
