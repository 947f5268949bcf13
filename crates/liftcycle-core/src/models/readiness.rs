// ABOUTME: Readiness check-in records combining self-report, performance metrics, and wearables
// ABOUTME: Validation rejects out-of-scale values before any fatigue computation runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::muscle::Muscle;
use crate::errors::{AppError, AppResult};

/// Lowest value on the readiness and motivation scales
pub const SELF_REPORT_MIN: u8 = 1;
/// Highest value on the readiness and motivation scales
pub const SELF_REPORT_MAX: u8 = 5;
/// Lowest soreness level (barely noticeable)
pub const SORENESS_MIN: u8 = 1;
/// Highest soreness level (limits training)
pub const SORENESS_MAX: u8 = 3;

/// Metrics derived from recent logged sessions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Mean logged RPE minus target RPE; positive means sessions felt harder
    pub rpe_deviation: f64,
    /// Exercises with no estimated-strength progress across consecutive sessions
    pub stall_count: u32,
    /// Completed sets divided by prescribed sets, in [0, 1]
    pub volume_compliance: f64,
}

/// Wearable recovery snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WearableSnapshot {
    /// Vendor recovery score, 0-100
    pub recovery_score: Option<f64>,
    /// Heart rate variability (RMSSD, ms)
    pub hrv_ms: Option<f64>,
    /// Resting heart rate (bpm)
    pub resting_hr: Option<f64>,
    /// Hours slept last night
    pub sleep_hours: Option<f64>,
}

/// One trainee check-in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessSignal {
    /// Identifier
    pub id: Uuid,
    /// Trainee
    pub user_id: Uuid,
    /// Check-in timestamp
    pub recorded_at: DateTime<Utc>,
    /// Overall readiness, 1 (wrecked) to 5 (primed)
    pub readiness: u8,
    /// Motivation, 1 to 5
    pub motivation: u8,
    /// Soreness per reported muscle, 1 to 3; unreported muscles are not sore
    #[serde(default)]
    pub soreness: BTreeMap<Muscle, u8>,
    /// Derived performance metrics
    #[serde(default)]
    pub performance: Option<PerformanceMetrics>,
    /// Wearable snapshot
    #[serde(default)]
    pub wearable: Option<WearableSnapshot>,
}

impl ReadinessSignal {
    /// Reject signals outside their documented scales
    ///
    /// # Errors
    ///
    /// Returns a value-out-of-range error naming the offending field.
    pub fn validate(&self) -> AppResult<()> {
        check_scale("readiness", self.readiness, SELF_REPORT_MIN, SELF_REPORT_MAX)?;
        check_scale("motivation", self.motivation, SELF_REPORT_MIN, SELF_REPORT_MAX)?;
        for (muscle, level) in &self.soreness {
            check_scale(muscle.as_str(), *level, SORENESS_MIN, SORENESS_MAX)?;
        }

        if let Some(perf) = &self.performance {
            if !perf.rpe_deviation.is_finite() {
                return Err(AppError::out_of_range("rpe_deviation must be finite"));
            }
            if !(0.0..=1.0).contains(&perf.volume_compliance) {
                return Err(AppError::out_of_range(format!(
                    "volume_compliance {} outside [0, 1]",
                    perf.volume_compliance
                )));
            }
        }

        if let Some(score) = self.wearable.and_then(|w| w.recovery_score) {
            if !(0.0..=100.0).contains(&score) {
                return Err(AppError::out_of_range(format!(
                    "recovery_score {score} outside [0, 100]"
                )));
            }
        }
        if let Some(hours) = self.wearable.and_then(|w| w.sleep_hours) {
            if !(0.0..=24.0).contains(&hours) {
                return Err(AppError::out_of_range(format!(
                    "sleep_hours {hours} outside [0, 24]"
                )));
            }
        }
        Ok(())
    }

    /// Soreness reported for `muscle`, zero when unreported
    #[must_use]
    pub fn soreness_of(&self, muscle: Muscle) -> u8 {
        self.soreness.get(&muscle).copied().unwrap_or(0)
    }
}

fn check_scale(field: &str, value: u8, min: u8, max: u8) -> AppResult<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(AppError::out_of_range(format!(
            "{field} {value} outside [{min}, {max}]"
        )))
    }
}
