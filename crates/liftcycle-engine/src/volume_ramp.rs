// ABOUTME: Weekly per-muscle volume targets interpolated between ramp endpoints
// ABOUTME: Accumulation weeks ramp linearly; the deload week resets to a fraction of the peak
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

//! Volume Landmark Ramp
//!
//! For a mesocycle of `N` weeks, weeks `1..N-1` accumulate and week `N` deloads.
//! Accumulation targets interpolate from `week1_sets` to `peak_sets` with
//! rounding, so the schedule never decreases. The deload target is
//! `round(target(N-1) * deload_fraction)`.
//!
//! Ramps must also keep every week-to-week increase at or below half of the
//! total range. Integer set counts make that impossible for some ramps (an odd
//! range over two steps, any non-zero range over a single step), so the bound is
//! enforced when ramps are configured rather than silently bent at lookup time.

use liftcycle_core::constants::default_landmarks;
use liftcycle_core::models::{Muscle, MuscleRamp, VolumeRampConfig};
use tracing::debug;

use crate::config::{ConfigError, VolumeConfig};

/// Volume ramp calculator
pub struct VolumeLandmarkRamp;

impl VolumeLandmarkRamp {
    /// Target working sets for `week` of a mesocycle lasting `duration_weeks`
    ///
    /// Weeks outside `1..=duration_weeks` are clamped into range. Mesocycles
    /// shorter than two weeks have no deload and hold the week-1 value.
    #[must_use]
    pub fn weekly_volume_target(
        ramp: &MuscleRamp,
        week: u32,
        duration_weeks: u32,
        config: &VolumeConfig,
    ) -> u32 {
        if duration_weeks < 2 {
            return ramp.week1_sets;
        }
        let week = week.clamp(1, duration_weeks);
        let accumulation_weeks = duration_weeks - 1;

        if week == duration_weeks {
            let peak = Self::accumulation_target(ramp, accumulation_weeks, accumulation_weeks);
            return Self::deload_target(peak, config.deload_fraction);
        }
        Self::accumulation_target(ramp, week, accumulation_weeks)
    }

    /// Target for `muscle`, falling back to its static MEV when unconfigured
    #[must_use]
    pub fn target_for_muscle(
        ramps: &VolumeRampConfig,
        muscle: Muscle,
        week: u32,
        duration_weeks: u32,
        config: &VolumeConfig,
    ) -> u32 {
        ramps.get(muscle).map_or_else(
            || {
                let mev = default_landmarks(muscle).mev;
                debug!(
                    muscle = %muscle,
                    week,
                    fallback_sets = mev,
                    "No volume ramp configured; using static MEV"
                );
                mev
            },
            |ramp| Self::weekly_volume_target(ramp, week, duration_weeks, config),
        )
    }

    /// Full schedule for weeks `1..=duration_weeks`
    #[must_use]
    pub fn schedule(ramp: &MuscleRamp, duration_weeks: u32, config: &VolumeConfig) -> Vec<u32> {
        (1..=duration_weeks.max(1))
            .map(|week| Self::weekly_volume_target(ramp, week, duration_weeks, config))
            .collect()
    }

    /// Deload reset: `round(peak * fraction)`
    #[must_use]
    pub fn deload_target(peak_sets: u32, deload_fraction: f64) -> u32 {
        (f64::from(peak_sets) * deload_fraction).round().max(0.0) as u32
    }

    /// Rounded linear interpolation across the accumulation span
    fn accumulation_target(ramp: &MuscleRamp, week: u32, accumulation_weeks: u32) -> u32 {
        if accumulation_weeks <= 1 {
            return ramp.week1_sets;
        }
        let range = ramp.peak_sets.saturating_sub(ramp.week1_sets);
        let steps = accumulation_weeks - 1;
        let elapsed = week.clamp(1, accumulation_weeks) - 1;
        // round-half-up of range * elapsed / steps in integer arithmetic
        let increment = (2 * range * elapsed + steps) / (2 * steps);
        ramp.week1_sets + increment
    }

    /// Reject a ramp that decreases or cannot respect the half-range step bound
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InfeasibleRamp` naming the muscle and the violation.
    pub fn check_progression(
        muscle: Muscle,
        ramp: &MuscleRamp,
        accumulation_weeks: u32,
    ) -> Result<(), ConfigError> {
        if ramp.peak_sets < ramp.week1_sets {
            return Err(ConfigError::InfeasibleRamp {
                muscle: muscle.to_string(),
                reason: format!(
                    "peak {} is below week-1 target {}",
                    ramp.peak_sets, ramp.week1_sets
                ),
            });
        }
        let range = ramp.peak_sets - ramp.week1_sets;
        for week in 1..accumulation_weeks {
            let step = Self::accumulation_target(ramp, week + 1, accumulation_weeks)
                - Self::accumulation_target(ramp, week, accumulation_weeks);
            if step * 2 > range {
                return Err(ConfigError::InfeasibleRamp {
                    muscle: muscle.to_string(),
                    reason: format!(
                        "week {week} to {} rises by {step} sets, more than half of the {range}-set range",
                        week + 1
                    ),
                });
            }
        }
        Ok(())
    }

    /// Validate every ramp in a mesocycle's configuration
    ///
    /// # Errors
    ///
    /// Returns the first infeasible ramp.
    pub fn validate_config(ramps: &VolumeRampConfig, duration_weeks: u32) -> Result<(), ConfigError> {
        let accumulation_weeks = duration_weeks.saturating_sub(1);
        for (muscle, ramp) in &ramps.muscles {
            Self::check_progression(*muscle, ramp, accumulation_weeks)?;
        }
        Ok(())
    }

    /// MEV-to-MAV ramp, with the peak lowered until the step bound holds
    #[must_use]
    pub fn default_ramp(muscle: Muscle, accumulation_weeks: u32) -> MuscleRamp {
        let landmarks = default_landmarks(muscle);
        let mut ramp = MuscleRamp {
            week1_sets: landmarks.mev,
            peak_sets: landmarks.mav,
        };
        while ramp.peak_sets > ramp.week1_sets
            && Self::check_progression(muscle, &ramp, accumulation_weeks).is_err()
        {
            ramp.peak_sets -= 1;
        }
        ramp
    }

    /// Default ramps for every muscle in a mesocycle of `duration_weeks`
    #[must_use]
    pub fn default_config(duration_weeks: u32) -> VolumeRampConfig {
        let accumulation_weeks = duration_weeks.saturating_sub(1);
        VolumeRampConfig {
            muscles: Muscle::ALL
                .into_iter()
                .map(|muscle| (muscle, Self::default_ramp(muscle, accumulation_weeks)))
                .collect(),
        }
    }
}
