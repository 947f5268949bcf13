// ABOUTME: Periodization configuration for volume ramps, RIR bands, lifecycle thresholds, and blocks
// ABOUTME: Defaults come from core constants and are overridable through the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

use liftcycle_core::constants::{lifecycle, rir, volume};
use liftcycle_core::models::{BlockType, RepRange};
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Volume ramp configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeConfig {
    /// Deload target as a fraction of the last accumulation week
    pub deload_fraction: f64,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            deload_fraction: volume::DELOAD_FRACTION,
        }
    }
}

/// RIR band generation for mesocycles without an explicit table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RirConfig {
    /// Upper RIR bound in week 1; later weeks step down toward one
    pub first_week_max_rir: u8,
    /// Deload lower bound
    pub deload_min_rir: u8,
    /// Deload upper bound
    pub deload_max_rir: u8,
}

impl Default for RirConfig {
    fn default() -> Self {
        Self {
            first_week_max_rir: rir::FIRST_WEEK_MAX_RIR,
            deload_min_rir: rir::DELOAD_MIN_RIR,
            deload_max_rir: rir::DELOAD_MAX_RIR,
        }
    }
}

/// Session-count thresholds driving state transitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleConfig {
    /// Accumulation sessions that move a mesocycle into deload
    pub accumulation_session_threshold: u32,
    /// Deload sessions that complete a mesocycle
    pub deload_session_threshold: u32,
    /// Weeks (including deload) for newly planned mesocycles
    pub default_duration_weeks: u32,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            accumulation_session_threshold: lifecycle::ACCUMULATION_SESSION_THRESHOLD,
            deload_session_threshold: lifecycle::DELOAD_SESSION_THRESHOLD,
            default_duration_weeks: lifecycle::DEFAULT_DURATION_WEEKS,
        }
    }
}

/// Prescription parameters for one block type
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BlockPrescription {
    /// Rep range for compound lifts
    pub compound_reps: RepRange,
    /// Rep range for isolation work
    pub isolation_reps: RepRange,
    /// Fractional load adjustment over the trainee's baseline
    pub intensity_bias: f64,
}

/// Session planning configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Exercises per session
    pub exercises_per_session: usize,
    /// Main lifts per session; remaining picks are accessories
    pub main_lifts_per_session: usize,
    /// Accumulation block prescription
    pub accumulation: BlockPrescription,
    /// Intensification block prescription
    pub intensification: BlockPrescription,
    /// Realization block prescription
    pub realization: BlockPrescription,
    /// Deload block prescription
    pub deload: BlockPrescription,
}

impl PlannerConfig {
    /// Prescription for a block type
    #[must_use]
    pub const fn for_block(&self, block_type: BlockType) -> &BlockPrescription {
        match block_type {
            BlockType::Accumulation => &self.accumulation,
            BlockType::Intensification => &self.intensification,
            BlockType::Realization => &self.realization,
            BlockType::Deload => &self.deload,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.exercises_per_session == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "exercises_per_session must be at least 1",
            ));
        }
        if self.main_lifts_per_session > self.exercises_per_session {
            return Err(ConfigError::InvalidRange(
                "main_lifts_per_session must be <= exercises_per_session",
            ));
        }
        for block in [
            &self.accumulation,
            &self.intensification,
            &self.realization,
            &self.deload,
        ] {
            if block.compound_reps.min > block.compound_reps.max
                || block.isolation_reps.min > block.isolation_reps.max
            {
                return Err(ConfigError::InvalidRange("rep range min must be <= max"));
            }
            if !(-0.5..=0.5).contains(&block.intensity_bias) {
                return Err(ConfigError::ValueOutOfRange(
                    "intensity_bias must be within [-0.5, 0.5]",
                ));
            }
        }
        Ok(())
    }
}

const fn reps(min: u32, max: u32) -> RepRange {
    RepRange { min, max }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            exercises_per_session: 6,
            main_lifts_per_session: 2,
            accumulation: BlockPrescription {
                compound_reps: reps(8, 12),
                isolation_reps: reps(10, 15),
                intensity_bias: 0.0,
            },
            intensification: BlockPrescription {
                compound_reps: reps(5, 8),
                isolation_reps: reps(8, 12),
                intensity_bias: 0.025,
            },
            realization: BlockPrescription {
                compound_reps: reps(3, 5),
                isolation_reps: reps(6, 10),
                intensity_bias: 0.05,
            },
            deload: BlockPrescription {
                compound_reps: reps(8, 10),
                isolation_reps: reps(10, 15),
                intensity_bias: -0.10,
            },
        }
    }
}
