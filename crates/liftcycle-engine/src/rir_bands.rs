// ABOUTME: Per-week reps-in-reserve band lookup with a duration-derived default table
// ABOUTME: Bands are discrete per week; missing weeks fall back to the generated default
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

use liftcycle_core::models::{RirBand, RirBandConfig};
use tracing::debug;

use crate::config::RirConfig;

/// RIR band scheduler
pub struct RirBandScheduler;

impl RirBandScheduler {
    /// Band for `week`, from the table or the generated default
    #[must_use]
    pub fn rir_target(
        bands: &RirBandConfig,
        week: u32,
        duration_weeks: u32,
        config: &RirConfig,
    ) -> RirBand {
        let week = week.clamp(1, duration_weeks.max(1));
        if let Some(band) = bands.weeks.get(&week) {
            return *band;
        }
        let band = Self::default_band(week, duration_weeks, config);
        debug!(
            week,
            duration_weeks,
            min = band.min,
            max = band.max,
            "No RIR band configured for week; using default"
        );
        band
    }

    /// Default band for one week
    ///
    /// Accumulation weeks step the upper bound from `first_week_max_rir` down
    /// toward one; the final week of a multi-week mesocycle is the deload band.
    #[must_use]
    pub fn default_band(week: u32, duration_weeks: u32, config: &RirConfig) -> RirBand {
        if duration_weeks >= 2 && week >= duration_weeks {
            return RirBand {
                min: config.deload_min_rir,
                max: config.deload_max_rir,
            };
        }
        let accumulation_weeks = duration_weeks.saturating_sub(1).max(1);
        let first = u32::from(config.first_week_max_rir);
        let elapsed = week.clamp(1, accumulation_weeks) - 1;
        let top = first.saturating_sub(first * elapsed / accumulation_weeks).max(1);
        let top = u8::try_from(top).unwrap_or(config.first_week_max_rir);
        RirBand {
            min: top.saturating_sub(1),
            max: top,
        }
    }

    /// Full default table sized from `duration_weeks`
    #[must_use]
    pub fn default_config(duration_weeks: u32, config: &RirConfig) -> RirBandConfig {
        RirBandConfig {
            weeks: (1..=duration_weeks.max(1))
                .map(|week| (week, Self::default_band(week, duration_weeks, config)))
                .collect(),
        }
    }
}
