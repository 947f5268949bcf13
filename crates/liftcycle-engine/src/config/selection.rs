// ABOUTME: Exercise selection configuration for scoring weights, phase budgets, and alignment
// ABOUTME: Also carries set-allocation bounds and the recent-exposure window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

use chrono::{DateTime, Duration, Utc};
use liftcycle_core::constants::selection;
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Additive scoring weights used while building a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Points per primary muscle hitting a target
    pub primary_hit: f64,
    /// Points per secondary muscle hitting a target
    pub secondary_hit: f64,
    /// Bonus per target muscle not yet covered
    pub uncovered_bonus: f64,
    /// Bonus for a user favorite
    pub favorite_bonus: f64,
    /// Bonus per new movement pattern during the isolation phase
    pub pattern_novelty_bonus: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            primary_hit: 6.0,
            secondary_hit: 2.0,
            uncovered_bonus: 0.5,
            favorite_bonus: 3.0,
            pattern_novelty_bonus: 1.5,
        }
    }
}

/// Build-quality label thresholds on the 0-100 scale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityThresholds {
    /// Minimum score labelled excellent
    pub excellent: f64,
    /// Minimum score labelled good
    pub good: f64,
    /// Minimum score labelled fair
    pub fair: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            excellent: 85.0,
            good: 70.0,
            fair: 50.0,
        }
    }
}

/// Selection engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Scoring weights
    pub weights: ScoringWeights,
    /// Share of the exercise budget reserved for the compound phase
    pub compound_share: f64,
    /// Minimum fraction of intent-aligned exercises
    pub min_aligned_ratio: f64,
    /// Analysis label thresholds
    pub quality: QualityThresholds,
    /// Fewest sets prescribed per exercise
    pub min_sets_per_exercise: u32,
    /// Most sets prescribed per exercise
    pub max_sets_per_exercise: u32,
    /// Days an exposure counts as recent
    pub exposure_window_days: i64,
    /// Recent uses after which an exercise is rested
    pub max_recent_uses: u32,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            compound_share: 0.6,
            min_aligned_ratio: 0.7,
            quality: QualityThresholds::default(),
            min_sets_per_exercise: 2,
            max_sets_per_exercise: 5,
            exposure_window_days: selection::EXPOSURE_WINDOW_DAYS,
            max_recent_uses: 4,
        }
    }
}

impl SelectionConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.weights;
        if [
            w.primary_hit,
            w.secondary_hit,
            w.uncovered_bonus,
            w.favorite_bonus,
            w.pattern_novelty_bonus,
        ]
        .iter()
        .any(|v| *v < 0.0 || !v.is_finite())
        {
            return Err(ConfigError::InvalidWeights(
                "Scoring weights must be finite and non-negative",
            ));
        }
        if !(0.0..=1.0).contains(&self.compound_share) {
            return Err(ConfigError::ValueOutOfRange(
                "compound_share must be in [0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&self.min_aligned_ratio) {
            return Err(ConfigError::ValueOutOfRange(
                "min_aligned_ratio must be in [0, 1]",
            ));
        }
        let q = &self.quality;
        if !(q.fair < q.good && q.good < q.excellent && q.excellent <= 100.0) {
            return Err(ConfigError::InvalidRange(
                "Quality thresholds must ascend: fair < good < excellent <= 100",
            ));
        }
        if self.min_sets_per_exercise == 0 || self.min_sets_per_exercise > self.max_sets_per_exercise
        {
            return Err(ConfigError::InvalidRange(
                "min_sets_per_exercise must be in 1..=max_sets_per_exercise",
            ));
        }
        if !(1..=selection::MAX_EXPOSURE_WINDOW_DAYS).contains(&self.exposure_window_days) {
            return Err(ConfigError::ValueOutOfRange(
                "exposure_window_days must be in 1..=365",
            ));
        }
        Ok(())
    }

    /// Start of the recent-exposure window ending at `now`
    ///
    /// Saturates to the earliest representable instant when the window
    /// reaches past it.
    #[must_use]
    pub fn exposure_window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        Duration::try_days(self.exposure_window_days)
            .and_then(|window| now.checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}
