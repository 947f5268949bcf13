// ABOUTME: Macro cycle, mesocycle, and training block records with their lifecycle enums
// ABOUTME: Storage casing for states and roles is mapped here, never inside engine logic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::exercise::SessionIntent;
use super::muscle::Muscle;
use crate::errors::{AppError, AppResult};

/// Mesocycle lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MesocycleState {
    /// Building volume week over week
    ActiveAccumulation,
    /// Reduced-volume recovery week
    ActiveDeload,
    /// Terminal; the next mesocycle has been created
    Completed,
}

impl MesocycleState {
    /// Value written by the storage collaborator
    #[must_use]
    pub const fn as_storage_str(self) -> &'static str {
        match self {
            Self::ActiveAccumulation => "ACTIVE_ACCUMULATION",
            Self::ActiveDeload => "ACTIVE_DELOAD",
            Self::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for MesocycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_storage_str())
    }
}

impl FromStr for MesocycleState {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ACTIVE_ACCUMULATION" | "ACCUMULATION" => Ok(Self::ActiveAccumulation),
            "ACTIVE_DELOAD" | "DELOAD" => Ok(Self::ActiveDeload),
            "COMPLETED" => Ok(Self::Completed),
            _ => Err(AppError::invalid_input(format!(
                "Unknown mesocycle state: {s}"
            ))),
        }
    }
}

/// Role an exercise plays within a mesocycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExerciseRole {
    /// Main lift kept across mesocycles for load continuity
    CoreCompound,
    /// Rotated out when the mesocycle completes
    Accessory,
}

impl ExerciseRole {
    /// Value written by the storage collaborator
    #[must_use]
    pub const fn as_storage_str(self) -> &'static str {
        match self {
            Self::CoreCompound => "CORE_COMPOUND",
            Self::Accessory => "ACCESSORY",
        }
    }
}

impl FromStr for ExerciseRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CORE_COMPOUND" => Ok(Self::CoreCompound),
            "ACCESSORY" => Ok(Self::Accessory),
            _ => Err(AppError::invalid_input(format!("Unknown exercise role: {s}"))),
        }
    }
}

/// Exercise pinned to a mesocycle with a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseRoleAssignment {
    /// Exercise identifier
    pub exercise_id: String,
    /// Role within the mesocycle
    pub role: ExerciseRole,
    /// Mesocycle week the exercise was introduced
    pub added_in_week: u32,
}

/// Weekly split structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitType {
    /// Every session trains the whole body
    FullBody,
    /// Alternating upper and lower sessions
    UpperLower,
    /// Push, pull, legs rotation
    PushPullLegs,
}

impl SplitType {
    /// Session intents in rotation order
    #[must_use]
    pub const fn rotation(self) -> &'static [SessionIntent] {
        match self {
            Self::FullBody => &[SessionIntent::FullBody],
            Self::UpperLower => &[SessionIntent::Upper, SessionIntent::Lower],
            Self::PushPullLegs => &[SessionIntent::Push, SessionIntent::Pull, SessionIntent::Legs],
        }
    }

    /// Intent of the session at `session_index` within the week
    #[must_use]
    pub fn intent_for_session(self, session_index: u32) -> SessionIntent {
        let rotation = self.rotation();
        rotation
            .get(session_index as usize % rotation.len())
            .copied()
            .unwrap_or(SessionIntent::FullBody)
    }

    /// How many sessions per week train any given muscle
    #[must_use]
    pub fn muscle_frequency(self, sessions_per_week: u32) -> u32 {
        let per_rotation = self.rotation().len() as u32;
        (sessions_per_week / per_rotation).max(1)
    }
}

impl FromStr for SplitType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "full_body" | "fullbody" => Ok(Self::FullBody),
            "upper_lower" => Ok(Self::UpperLower),
            "push_pull_legs" | "ppl" => Ok(Self::PushPullLegs),
            _ => Err(AppError::invalid_input(format!("Unknown split type: {s}"))),
        }
    }
}

/// Primary training goal of a macro cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingGoal {
    /// Muscle growth
    Hypertrophy,
    /// Maximal strength
    Strength,
    /// General fitness
    General,
}

/// Trainee experience level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingAge {
    /// Under a year of structured training
    Novice,
    /// One to three years
    Intermediate,
    /// Three years or more
    Advanced,
}

/// Ordered sequence of mesocycles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroCycle {
    /// Identifier
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// First training day
    pub start_date: NaiveDate,
    /// Planned length in weeks
    pub duration_weeks: u32,
    /// Trainee experience level
    pub training_age: TrainingAge,
    /// Primary goal
    pub goal: TrainingGoal,
    /// Mesocycles in order
    pub mesocycle_ids: Vec<Uuid>,
}

impl MacroCycle {
    /// Append a mesocycle; the only mutation a macro cycle permits
    pub fn append_mesocycle(&mut self, mesocycle_id: Uuid) {
        if !self.mesocycle_ids.contains(&mesocycle_id) {
            self.mesocycle_ids.push(mesocycle_id);
        }
    }
}

/// Phase type of a training block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    /// Volume-building phase
    Accumulation,
    /// Heavier loads, moderate volume
    Intensification,
    /// Peaking
    Realization,
    /// Recovery
    Deload,
}

impl BlockType {
    /// Canonical snake_case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accumulation => "accumulation",
            Self::Intensification => "intensification",
            Self::Realization => "realization",
            Self::Deload => "deload",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Volume tier carried by a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeTier {
    /// Near maintenance
    Low,
    /// Between MEV and MAV
    Moderate,
    /// Approaching MRV
    High,
}

/// Contiguous range of weeks inside a mesocycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingBlock {
    /// Identifier
    pub id: Uuid,
    /// Owning mesocycle
    pub mesocycle_id: Uuid,
    /// Phase type
    pub block_type: BlockType,
    /// First mesocycle week of the block (1-based)
    pub start_week: u32,
    /// Number of weeks
    pub duration_weeks: u32,
    /// Volume tier
    pub volume_tier: VolumeTier,
    /// Fractional load adjustment applied to baselines
    pub intensity_bias: f64,
}

impl TrainingBlock {
    /// Last week covered by the block
    #[must_use]
    pub const fn end_week(&self) -> u32 {
        self.start_week + self.duration_weeks.saturating_sub(1)
    }

    /// Whether `week` falls inside the block
    #[must_use]
    pub const fn contains_week(&self, week: u32) -> bool {
        week >= self.start_week && week <= self.end_week()
    }
}

/// Per-muscle ramp endpoints in sets per week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuscleRamp {
    /// Target in the first accumulation week
    pub week1_sets: u32,
    /// Target in the last accumulation week
    pub peak_sets: u32,
}

/// Volume ramp schedule keyed by muscle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VolumeRampConfig {
    /// Ramp endpoints per muscle
    pub muscles: BTreeMap<Muscle, MuscleRamp>,
}

impl VolumeRampConfig {
    /// Ramp for `muscle`, if configured
    #[must_use]
    pub fn get(&self, muscle: Muscle) -> Option<&MuscleRamp> {
        self.muscles.get(&muscle)
    }
}

/// Reps-in-reserve band for one week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RirBand {
    /// Closest to failure
    pub min: u8,
    /// Furthest from failure
    pub max: u8,
}

impl RirBand {
    /// Equivalent RPE range as `(low, high)`; RPE = 10 - RIR
    #[must_use]
    pub fn rpe_range(&self) -> (f64, f64) {
        (10.0 - f64::from(self.max), 10.0 - f64::from(self.min))
    }

    /// Midpoint RIR used when a single target is prescribed
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        (f64::from(self.min) + f64::from(self.max)) / 2.0
    }
}

/// Week to RIR band table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RirBandConfig {
    /// Band per mesocycle week (1-based)
    pub weeks: BTreeMap<u32, RirBand>,
}

/// One planning cycle of accumulation weeks followed by a deload week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesocycle {
    /// Identifier
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// Parent macro cycle
    pub macro_cycle_id: Option<Uuid>,
    /// Ordinal within the macro cycle (1-based)
    pub mesocycle_number: u32,
    /// Lifecycle state
    pub state: MesocycleState,
    /// Sessions logged during accumulation
    pub accumulation_sessions_completed: u32,
    /// Sessions logged during deload
    pub deload_sessions_completed: u32,
    /// Training days per week
    pub sessions_per_week: u32,
    /// Split structure
    pub split_type: SplitType,
    /// Goal used when planning blocks
    pub goal: TrainingGoal,
    /// Total weeks including the deload week
    pub duration_weeks: u32,
    /// Macro-cycle week this mesocycle starts on (1-based)
    pub start_week: u32,
    /// Volume ramp schedule
    #[serde(default)]
    pub volume_ramp: VolumeRampConfig,
    /// RIR band table
    #[serde(default)]
    pub rir_bands: RirBandConfig,
    /// Exercise role assignments
    #[serde(default)]
    pub exercise_roles: Vec<ExerciseRoleAssignment>,
    /// Only one mesocycle per user may be active
    pub is_active: bool,
}

impl Mesocycle {
    /// Create a fresh, active mesocycle in accumulation with zeroed counters
    #[must_use]
    pub fn new(
        id: Uuid,
        user_id: Uuid,
        sessions_per_week: u32,
        split_type: SplitType,
        goal: TrainingGoal,
        duration_weeks: u32,
    ) -> Self {
        Self {
            id,
            user_id,
            macro_cycle_id: None,
            mesocycle_number: 1,
            state: MesocycleState::ActiveAccumulation,
            accumulation_sessions_completed: 0,
            deload_sessions_completed: 0,
            sessions_per_week,
            split_type,
            goal,
            duration_weeks,
            start_week: 1,
            volume_ramp: VolumeRampConfig::default(),
            rir_bands: RirBandConfig::default(),
            exercise_roles: Vec::new(),
            is_active: true,
        }
    }

    /// Number of accumulation weeks (all weeks but the deload)
    #[must_use]
    pub const fn accumulation_weeks(&self) -> u32 {
        self.duration_weeks.saturating_sub(1)
    }

    /// Week number of the deload
    #[must_use]
    pub const fn deload_week(&self) -> u32 {
        self.duration_weeks
    }

    /// Role assigned to `exercise_id`, if any
    #[must_use]
    pub fn role_of(&self, exercise_id: &str) -> Option<ExerciseRole> {
        self.exercise_roles
            .iter()
            .find(|a| a.exercise_id == exercise_id)
            .map(|a| a.role)
    }

    /// Exercise ids carrying the core-compound role
    #[must_use]
    pub fn core_compound_ids(&self) -> Vec<String> {
        self.exercise_roles
            .iter()
            .filter(|a| a.role == ExerciseRole::CoreCompound)
            .map(|a| a.exercise_id.clone())
            .collect()
    }

    /// Reject records missing the fields week derivation depends on
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error for a zero session frequency or a
    /// duration too short to hold an accumulation week and a deload week.
    pub fn validate(&self) -> AppResult<()> {
        if self.sessions_per_week == 0 || self.sessions_per_week > 7 {
            return Err(AppError::invalid_input(format!(
                "Mesocycle {} has sessions_per_week {}; expected 1-7",
                self.id, self.sessions_per_week
            )));
        }
        if self.duration_weeks < 2 {
            return Err(AppError::invalid_input(format!(
                "Mesocycle {} has duration_weeks {}; expected at least 2",
                self.id, self.duration_weeks
            )));
        }
        if self.mesocycle_number == 0 || self.start_week == 0 {
            return Err(AppError::invalid_input(format!(
                "Mesocycle {} has a zero ordinal or start week",
                self.id
            )));
        }
        Ok(())
    }
}
