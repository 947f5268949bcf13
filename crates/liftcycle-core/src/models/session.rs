// ABOUTME: Session plan returned by planning, with per-exercise set, rep, load, and RIR prescriptions
// ABOUTME: Plans are built fresh per call and only ever copied, never edited in place by the engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::exercise::SessionIntent;
use super::mesocycle::{BlockType, ExerciseRole, RirBand};
use super::muscle::Muscle;

/// Inclusive repetition range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepRange {
    /// Fewest reps per set
    pub min: u32,
    /// Most reps per set
    pub max: u32,
}

/// One exercise prescription in a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrescribedExercise {
    /// Exercise identifier
    pub exercise_id: String,
    /// Display name
    pub name: String,
    /// Main lift or accessory
    pub role: ExerciseRole,
    /// Primary muscles, used by per-muscle fatigue adjustments
    pub primary_muscles: Vec<Muscle>,
    /// Working sets
    pub sets: u32,
    /// Reps per set
    pub rep_range: RepRange,
    /// Load in the caller's unit; `None` when no baseline is known
    pub load: Option<f64>,
    /// Effort target
    pub target_rir: RirBand,
    /// Why this exercise was chosen
    pub rationale: String,
}

/// Final or draft prescription for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionPlan {
    /// Mesocycle the session belongs to
    pub mesocycle_id: Uuid,
    /// Mesocycle week (1-based)
    pub week: u32,
    /// Session focus
    pub intent: SessionIntent,
    /// Block phase for the week
    pub block_type: BlockType,
    /// Ordered prescriptions, main lifts first
    pub exercises: Vec<PrescribedExercise>,
    /// Conditions the trainee should know about
    #[serde(default)]
    pub warnings: Vec<String>,
    /// Swaps made to honor the session intent
    #[serde(default)]
    pub substitution_notes: Vec<String>,
    /// Planning rationale trail
    #[serde(default)]
    pub rationale: Vec<String>,
}

impl SessionPlan {
    /// Total working sets across the session
    #[must_use]
    pub fn total_sets(&self) -> u32 {
        self.exercises.iter().map(|e| e.sets).sum()
    }

    /// Prescription for `exercise_id`, if present
    #[must_use]
    pub fn exercise(&self, exercise_id: &str) -> Option<&PrescribedExercise> {
        self.exercises.iter().find(|e| e.exercise_id == exercise_id)
    }
}
