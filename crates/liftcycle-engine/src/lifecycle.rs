// ABOUTME: Mesocycle state machine driven by already-incremented session counters
// ABOUTME: Emits the completion cascade (deactivate + create next) as one value for atomic commit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

//! Mesocycle Lifecycle
//!
//! States move `ACTIVE_ACCUMULATION -> ACTIVE_DELOAD -> COMPLETED`. The engine
//! never writes: [`MesocycleLifecycle::evaluate`] returns a [`LifecycleDecision`]
//! describing what the storage collaborator must persist. A completion is
//! returned as a single [`MesocycleCascade`] so the deactivation of the old
//! mesocycle and the creation of the next one cannot be applied separately.

use liftcycle_core::constants::lifecycle::CARRY_FORWARD_WEEK;
use liftcycle_core::errors::AppResult;
use liftcycle_core::models::{
    ExerciseRole, ExerciseRoleAssignment, Mesocycle, MesocycleState, Muscle, RirBand,
    TrainingBlock,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::blocks::BlockPlanner;
use crate::config::{EngineConfig, RirConfig, VolumeConfig};
use crate::rir_bands::RirBandScheduler;
use crate::volume_ramp::VolumeLandmarkRamp;

/// Writes produced by completing a mesocycle, committed all-or-nothing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MesocycleCascade {
    /// The finished mesocycle, marked completed and inactive
    pub completed: Mesocycle,
    /// Its successor, active and in accumulation
    pub next: Mesocycle,
    /// Blocks for the successor, ordered by start week
    pub next_blocks: Vec<TrainingBlock>,
}

/// Outcome of evaluating a mesocycle's counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum LifecycleDecision {
    /// Thresholds not reached; nothing to write
    NoChange,
    /// Accumulation finished; persist the updated record
    EnterDeload(Mesocycle),
    /// Deload finished; commit the cascade
    Complete(MesocycleCascade),
    /// Mesocycle was already terminal; nothing to write
    AlreadyCompleted,
}

impl LifecycleDecision {
    /// Whether the storage collaborator has anything to persist
    #[must_use]
    pub const fn requires_write(&self) -> bool {
        matches!(self, Self::EnterDeload(_) | Self::Complete(_))
    }
}

/// Mesocycle lifecycle state machine
pub struct MesocycleLifecycle;

impl MesocycleLifecycle {
    /// Decide the transition for a mesocycle
    ///
    /// `new_id` supplies identifiers for the successor mesocycle and its blocks.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a record missing fields that week
    /// derivation depends on. Business outcomes are never errors.
    pub fn evaluate<F>(
        meso: &Mesocycle,
        config: &EngineConfig,
        mut new_id: F,
    ) -> AppResult<LifecycleDecision>
    where
        F: FnMut() -> Uuid,
    {
        meso.validate()?;
        let thresholds = &config.lifecycle;

        let decision = match meso.state {
            MesocycleState::ActiveAccumulation => {
                if meso.accumulation_sessions_completed >= thresholds.accumulation_session_threshold
                {
                    let mut updated = meso.clone();
                    updated.state = MesocycleState::ActiveDeload;
                    info!(
                        mesocycle_id = %meso.id,
                        user_id = %meso.user_id,
                        sessions = meso.accumulation_sessions_completed,
                        "Mesocycle entering deload"
                    );
                    LifecycleDecision::EnterDeload(updated)
                } else {
                    LifecycleDecision::NoChange
                }
            }
            MesocycleState::ActiveDeload => {
                if meso.deload_sessions_completed >= thresholds.deload_session_threshold {
                    let mut completed = meso.clone();
                    completed.state = MesocycleState::Completed;
                    completed.is_active = false;

                    let next = Self::initialize_next_mesocycle(&completed, new_id());
                    let next_blocks = BlockPlanner::plan_blocks(&next, &config.planner, &mut new_id);
                    info!(
                        mesocycle_id = %meso.id,
                        next_mesocycle_id = %next.id,
                        next_number = next.mesocycle_number,
                        carried_core_compounds = next.exercise_roles.len(),
                        "Mesocycle completed; successor created"
                    );
                    LifecycleDecision::Complete(MesocycleCascade {
                        completed,
                        next,
                        next_blocks,
                    })
                } else {
                    LifecycleDecision::NoChange
                }
            }
            MesocycleState::Completed => {
                warn!(
                    mesocycle_id = %meso.id,
                    "Transition requested for a completed mesocycle; ignoring"
                );
                LifecycleDecision::AlreadyCompleted
            }
        };
        Ok(decision)
    }

    /// Successor of a completed mesocycle
    ///
    /// Only core-compound roles carry forward, each re-seeded at week 1;
    /// accessories rotate out. Ramp and band tables carry over unchanged.
    #[must_use]
    pub fn initialize_next_mesocycle(completed: &Mesocycle, next_id: Uuid) -> Mesocycle {
        let mut carried: Vec<ExerciseRoleAssignment> = Vec::new();
        for assignment in &completed.exercise_roles {
            if assignment.role == ExerciseRole::CoreCompound
                && !carried.iter().any(|a| a.exercise_id == assignment.exercise_id)
            {
                carried.push(ExerciseRoleAssignment {
                    exercise_id: assignment.exercise_id.clone(),
                    role: ExerciseRole::CoreCompound,
                    added_in_week: CARRY_FORWARD_WEEK,
                });
            }
        }

        Mesocycle {
            id: next_id,
            user_id: completed.user_id,
            macro_cycle_id: completed.macro_cycle_id,
            mesocycle_number: completed.mesocycle_number + 1,
            state: MesocycleState::ActiveAccumulation,
            accumulation_sessions_completed: 0,
            deload_sessions_completed: 0,
            sessions_per_week: completed.sessions_per_week,
            split_type: completed.split_type,
            goal: completed.goal,
            duration_weeks: completed.duration_weeks,
            start_week: completed.start_week + completed.duration_weeks,
            volume_ramp: completed.volume_ramp.clone(),
            rir_bands: completed.rir_bands.clone(),
            exercise_roles: carried,
            is_active: true,
        }
    }

    /// Current week, derived from counters rather than stored
    #[must_use]
    pub fn current_meso_week(meso: &Mesocycle) -> u32 {
        match meso.state {
            MesocycleState::ActiveAccumulation => {
                let week = meso.accumulation_sessions_completed / meso.sessions_per_week.max(1) + 1;
                week.min(meso.accumulation_weeks().max(1))
            }
            MesocycleState::ActiveDeload | MesocycleState::Completed => meso.duration_weeks,
        }
    }

    /// Volume target for `muscle` in `week` of this mesocycle
    #[must_use]
    pub fn weekly_volume_target(
        meso: &Mesocycle,
        muscle: Muscle,
        week: u32,
        config: &VolumeConfig,
    ) -> u32 {
        VolumeLandmarkRamp::target_for_muscle(
            &meso.volume_ramp,
            muscle,
            week,
            meso.duration_weeks,
            config,
        )
    }

    /// RIR band for `week` of this mesocycle
    #[must_use]
    pub fn rir_target(meso: &Mesocycle, week: u32, config: &RirConfig) -> RirBand {
        RirBandScheduler::rir_target(&meso.rir_bands, week, meso.duration_weeks, config)
    }
}
