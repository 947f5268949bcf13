// ABOUTME: Engine configuration for periodization, fatigue, autoregulation, and selection
// ABOUTME: Orchestrates domain-specific configs and provides unified validation and loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

//! Engine Configuration Module
//!
//! Type-safe configuration for every engine component. Values start from the
//! defaults in `liftcycle_core::constants`, are overridden by `LIFTCYCLE_*`
//! environment variables, and are validated before use.
//!
//! # Module Structure
//!
//! - `periodization` - Volume ramp, RIR bands, lifecycle thresholds, and block prescriptions
//! - `fatigue` - Fatigue component weights and autoregulation bounds
//! - `selection` - Scoring weights, phase budget, alignment, and set allocation
//!
//! There is no process-wide instance: callers load an `EngineConfig` once and
//! pass it by reference (or `Arc`) to the components that need it.

/// Configuration error types
pub mod error;
/// Fatigue scoring and autoregulation configuration
pub mod fatigue;
/// Periodization configuration
pub mod periodization;
/// Exercise selection configuration
pub mod selection;

pub use error::ConfigError;
pub use fatigue::{AutoregulationConfig, FatigueConfig};
pub use periodization::{
    BlockPrescription, LifecycleConfig, PlannerConfig, RirConfig, VolumeConfig,
};
pub use selection::{QualityThresholds, ScoringWeights, SelectionConfig};

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Main engine configuration container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Volume ramp configuration
    pub volume: VolumeConfig,
    /// RIR band defaults
    pub rir: RirConfig,
    /// Lifecycle thresholds
    pub lifecycle: LifecycleConfig,
    /// Fatigue scoring
    pub fatigue: FatigueConfig,
    /// Autoregulation bounds
    pub autoregulation: AutoregulationConfig,
    /// Exercise selection
    pub selection: SelectionConfig,
    /// Session planning
    pub planner: PlannerConfig,
}

impl EngineConfig {
    /// Load configuration from defaults and environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.volume.deload_fraction) {
            return Err(ConfigError::ValueOutOfRange(
                "deload_fraction must be in [0, 1]",
            ));
        }

        if self.rir.first_week_max_rir == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "first_week_max_rir must be at least 1",
            ));
        }
        if self.rir.deload_min_rir > self.rir.deload_max_rir {
            return Err(ConfigError::InvalidRange(
                "deload_min_rir must be <= deload_max_rir",
            ));
        }

        if self.lifecycle.accumulation_session_threshold == 0
            || self.lifecycle.deload_session_threshold == 0
        {
            return Err(ConfigError::ValueOutOfRange(
                "Lifecycle session thresholds must be positive",
            ));
        }
        if self.lifecycle.default_duration_weeks < 2 {
            return Err(ConfigError::ValueOutOfRange(
                "default_duration_weeks must be at least 2",
            ));
        }

        self.fatigue.validate()?;
        self.autoregulation.validate()?;
        self.selection.validate()?;
        self.planner.validate()?;
        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        Self::apply_env_var(
            "LIFTCYCLE_VOLUME_DELOAD_FRACTION",
            &mut self.volume.deload_fraction,
        )?;

        Self::apply_env_var(
            "LIFTCYCLE_RIR_FIRST_WEEK_MAX",
            &mut self.rir.first_week_max_rir,
        )?;
        Self::apply_env_var("LIFTCYCLE_RIR_DELOAD_MIN", &mut self.rir.deload_min_rir)?;
        Self::apply_env_var("LIFTCYCLE_RIR_DELOAD_MAX", &mut self.rir.deload_max_rir)?;

        Self::apply_env_var(
            "LIFTCYCLE_LIFECYCLE_ACCUMULATION_THRESHOLD",
            &mut self.lifecycle.accumulation_session_threshold,
        )?;
        Self::apply_env_var(
            "LIFTCYCLE_LIFECYCLE_DELOAD_THRESHOLD",
            &mut self.lifecycle.deload_session_threshold,
        )?;
        Self::apply_env_var(
            "LIFTCYCLE_LIFECYCLE_DURATION_WEEKS",
            &mut self.lifecycle.default_duration_weeks,
        )?;

        // Fatigue component weights
        Self::apply_env_var(
            "LIFTCYCLE_FATIGUE_SUBJECTIVE_WEIGHT",
            &mut self.fatigue.subjective_weight,
        )?;
        Self::apply_env_var(
            "LIFTCYCLE_FATIGUE_PERFORMANCE_WEIGHT",
            &mut self.fatigue.performance_weight,
        )?;
        Self::apply_env_var(
            "LIFTCYCLE_FATIGUE_WEARABLE_WEIGHT",
            &mut self.fatigue.wearable_weight,
        )?;
        Self::apply_env_var(
            "LIFTCYCLE_FATIGUE_SORENESS_PENALTY",
            &mut self.fatigue.soreness_penalty,
        )?;

        // Autoregulation bounds
        Self::apply_env_var(
            "LIFTCYCLE_AUTOREG_STALENESS_HOURS",
            &mut self.autoregulation.staleness_hours,
        )?;
        Self::apply_env_var(
            "LIFTCYCLE_AUTOREG_READINESS_THRESHOLD",
            &mut self.autoregulation.readiness_threshold,
        )?;
        Self::apply_env_var(
            "LIFTCYCLE_AUTOREG_MAX_LOAD_REDUCTION",
            &mut self.autoregulation.max_load_reduction,
        )?;
        Self::apply_env_var(
            "LIFTCYCLE_AUTOREG_MIN_SETS",
            &mut self.autoregulation.min_sets,
        )?;
        Self::apply_env_var(
            "LIFTCYCLE_AUTOREG_LOAD_INCREMENT",
            &mut self.autoregulation.load_increment,
        )?;

        // Selection
        Self::apply_env_var(
            "LIFTCYCLE_SELECTION_MIN_ALIGNED_RATIO",
            &mut self.selection.min_aligned_ratio,
        )?;
        Self::apply_env_var(
            "LIFTCYCLE_SELECTION_COMPOUND_SHARE",
            &mut self.selection.compound_share,
        )?;
        Self::apply_env_var(
            "LIFTCYCLE_SELECTION_FAVORITE_BONUS",
            &mut self.selection.weights.favorite_bonus,
        )?;
        Self::apply_env_var(
            "LIFTCYCLE_SELECTION_EXPOSURE_WINDOW_DAYS",
            &mut self.selection.exposure_window_days,
        )?;

        Self::apply_env_var(
            "LIFTCYCLE_PLANNER_EXERCISES_PER_SESSION",
            &mut self.planner.exercises_per_session,
        )?;
        Self::apply_env_var(
            "LIFTCYCLE_PLANNER_MAIN_LIFTS",
            &mut self.planner.main_lifts_per_session,
        )?;

        Ok(self)
    }
}
