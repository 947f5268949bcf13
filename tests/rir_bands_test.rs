// ABOUTME: Tests for weekly reps-in-reserve bands and their RPE equivalents
// ABOUTME: Verifies default tables, configured overrides, and deload bands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

mod common;

use liftcycle_core::models::{RirBand, RirBandConfig};
use liftcycle_engine::config::RirConfig;
use liftcycle_engine::rir_bands::RirBandScheduler;

#[test]
fn test_effort_rises_through_accumulation() {
    let config = RirConfig::default();
    for duration in 2..=8 {
        let table = RirBandScheduler::default_config(duration, &config);
        let accumulation: Vec<RirBand> = (1..duration)
            .map(|week| RirBandScheduler::rir_target(&table, week, duration, &config))
            .collect();
        assert!(
            accumulation.windows(2).all(|w| w[1].max <= w[0].max),
            "{duration} weeks: {accumulation:?}"
        );
        assert!(accumulation.iter().all(|band| band.min <= band.max));
        assert_eq!(accumulation[0].max, config.first_week_max_rir);
    }
}

#[test]
fn test_final_week_is_deload_band() {
    let config = RirConfig::default();
    let empty = RirBandConfig::default();
    let band = RirBandScheduler::rir_target(&empty, 6, 6, &config);
    assert_eq!(band, RirBand { min: 4, max: 5 });
}

#[test]
fn test_configured_band_wins() {
    let config = RirConfig::default();
    let mut table = RirBandScheduler::default_config(5, &config);
    table.weeks.insert(2, RirBand { min: 1, max: 1 });
    assert_eq!(
        RirBandScheduler::rir_target(&table, 2, 5, &config),
        RirBand { min: 1, max: 1 }
    );
}

#[test]
fn test_weeks_clamp_into_range() {
    let config = RirConfig::default();
    let table = RirBandScheduler::default_config(5, &config);
    assert_eq!(
        RirBandScheduler::rir_target(&table, 0, 5, &config),
        RirBand { min: 3, max: 4 }
    );
    assert_eq!(
        RirBandScheduler::rir_target(&table, 12, 5, &config),
        RirBand { min: 4, max: 5 }
    );
}

#[test]
fn test_rpe_range_mirrors_rir() {
    let band = RirBand { min: 1, max: 2 };
    assert_eq!(band.rpe_range(), (8.0, 9.0));
    assert_eq!(band.midpoint(), 1.5);
}

#[test]
fn test_custom_first_week() {
    let config = RirConfig {
        first_week_max_rir: 3,
        ..RirConfig::default()
    };
    let band = RirBandScheduler::default_band(1, 5, &config);
    assert_eq!(band, RirBand { min: 2, max: 3 });
}
