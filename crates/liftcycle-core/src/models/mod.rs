// ABOUTME: Core data models for periodization, readiness, and exercise selection
// ABOUTME: Re-exports muscle, exercise, mesocycle, readiness, and session types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

/// Exercise candidates, movement patterns, equipment, and session intents
pub mod exercise;
/// Macro cycles, mesocycles, training blocks, ramps, and RIR bands
pub mod mesocycle;
/// Muscle taxonomy, coarse groups, and volume landmarks
pub mod muscle;
/// Readiness check-ins
pub mod readiness;
/// Session prescriptions
pub mod session;

pub use exercise::{
    Equipment, Exercise, ExerciseExposure, Mechanics, MovementPattern, SessionIntent, SplitTag,
};
pub use mesocycle::{
    BlockType, ExerciseRole, ExerciseRoleAssignment, MacroCycle, Mesocycle, MesocycleState,
    MuscleRamp, RirBand, RirBandConfig, SplitType, TrainingAge, TrainingBlock, TrainingGoal,
    VolumeRampConfig, VolumeTier,
};
pub use muscle::{resolve_muscle_groups, BodyRegion, Muscle, VolumeLandmarks};
pub use readiness::{PerformanceMetrics, ReadinessSignal, WearableSnapshot};
pub use session::{PrescribedExercise, RepRange, SessionPlan};
