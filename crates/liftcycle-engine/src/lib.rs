// ABOUTME: Periodization, autoregulation, and exercise selection engine for liftcycle
// ABOUTME: Pure deterministic computations; callers supply time, identifiers, and seeds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

#![deny(unsafe_code)]

//! # Liftcycle Engine
//!
//! Decision functions behind liftcycle's session planning. None of them read
//! the clock, touch storage, or use ambient randomness: every timestamp, new
//! record id, and selection seed arrives as an argument, so identical inputs
//! always give identical outputs.
//!
//! ## Components
//!
//! - **volume_ramp**: weekly per-muscle set targets from MEV toward MAV, with a deload reset
//! - **rir_bands**: per-week effort bands
//! - **blocks**: training blocks laid out per mesocycle goal
//! - **lifecycle**: mesocycle state machine and successor creation
//! - **fatigue**: composite readiness scoring
//! - **autoregulation**: bounded, staleness-gated prescription rescaling
//! - **selection**: pool filtering, greedy build, set allocation, intent repair
//! - **planner**: draft session assembly
//! - **config**: tunable parameters with environment overrides

/// Bounded session rescaling from readiness
pub mod autoregulation;
/// Training block layout
pub mod blocks;
/// Engine configuration
pub mod config;
/// Composite fatigue scoring
pub mod fatigue;
/// Mesocycle state machine
pub mod lifecycle;
/// Draft session planning
pub mod planner;
/// Weekly RIR bands
pub mod rir_bands;
/// Exercise selection engine
pub mod selection;
/// Weekly volume targets
pub mod volume_ramp;
