// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for landmarks, lifecycle thresholds, and autoregulation defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

//! Constants module
//!
//! Defaults live here; the engine configuration layer reads them as its
//! starting point and lets environment overrides replace them.

/// Static per-muscle volume landmark table
pub mod landmarks;

pub use landmarks::default_landmarks;

/// Mesocycle lifecycle defaults
pub mod lifecycle {
    /// Accumulation sessions that trigger the deload
    pub const ACCUMULATION_SESSION_THRESHOLD: u32 = 12;
    /// Deload sessions that complete the mesocycle
    pub const DELOAD_SESSION_THRESHOLD: u32 = 3;
    /// Default mesocycle length: four accumulation weeks and one deload week
    pub const DEFAULT_DURATION_WEEKS: u32 = 5;
    /// Week a carried-forward exercise is re-seeded at
    pub const CARRY_FORWARD_WEEK: u32 = 1;
}

/// Volume ramp defaults
pub mod volume {
    /// Deload target as a fraction of the last accumulation week
    pub const DELOAD_FRACTION: f64 = 0.45;
}

/// RIR band defaults
pub mod rir {
    /// Upper bound of the first accumulation week's band
    pub const FIRST_WEEK_MAX_RIR: u8 = 4;
    /// Deload band lower bound
    pub const DELOAD_MIN_RIR: u8 = 4;
    /// Deload band upper bound
    pub const DELOAD_MAX_RIR: u8 = 5;
}

/// Autoregulation defaults
pub mod autoregulation {
    /// Readiness signals older than this are ignored
    pub const STALENESS_HOURS: i64 = 24;
    /// Longest configurable staleness limit (two weeks)
    pub const MAX_STALENESS_HOURS: i64 = 24 * 14;
    /// Largest fractional load cut applied to one session
    pub const MAX_LOAD_REDUCTION: f64 = 0.10;
    /// Overall fatigue score below which adjustments apply
    pub const READINESS_THRESHOLD: f64 = 0.6;
    /// Reason reported when no usable signal exists
    pub const NO_RECENT_SIGNAL_REASON: &str = "No recent readiness signal";
}

/// Fatigue scoring defaults
pub mod fatigue {
    /// Subjective component weight
    pub const SUBJECTIVE_WEIGHT: f64 = 0.5;
    /// Performance component weight
    pub const PERFORMANCE_WEIGHT: f64 = 0.3;
    /// Wearable component weight
    pub const WEARABLE_WEIGHT: f64 = 0.2;
    /// Sleep hours treated as fully recovered
    pub const SLEEP_TARGET_HOURS: f64 = 8.0;
}

/// Exercise selection defaults
pub mod selection {
    /// Days an exposure counts as recent
    pub const EXPOSURE_WINDOW_DAYS: i64 = 14;
    /// Longest configurable exposure window
    pub const MAX_EXPOSURE_WINDOW_DAYS: i64 = 365;
}
