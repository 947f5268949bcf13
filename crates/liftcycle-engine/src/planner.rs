// ABOUTME: Assembles a draft session plan from mesocycle week, block phase, volume targets, and selection
// ABOUTME: Prescribes sets, reps, loads, and RIR, and reports warnings and new exercise roles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

//! Session Planner
//!
//! Glue between the periodization components and the selection engine. The
//! planner derives the current week and block, computes this week's volume
//! target for every muscle the session trains, builds and repairs a
//! selection, and turns it into a [`SessionPlan`]. The plan is a draft:
//! autoregulation runs afterwards, outside this module.

use std::collections::{BTreeMap, BTreeSet};

use liftcycle_core::constants::default_landmarks;
use liftcycle_core::errors::{AppError, AppResult};
use liftcycle_core::models::{
    resolve_muscle_groups, BlockType, Equipment, Exercise, ExerciseRole, ExerciseRoleAssignment,
    Mesocycle, Muscle, PrescribedExercise, RirBand, SessionIntent, SessionPlan, TrainingBlock,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::blocks::BlockPlanner;
use crate::config::EngineConfig;
use crate::lifecycle::MesocycleLifecycle;
use crate::selection::{
    allocate_sets, enforce_intent_alignment, filter_pool, smart_build, BuildAnalysis,
    SelectionOutput, SmartBuildInput,
};

/// Inputs for planning one session
#[derive(Debug, Clone)]
pub struct PlanningInput<'a> {
    /// Active mesocycle
    pub mesocycle: &'a Mesocycle,
    /// Blocks of the mesocycle ordered by start week
    pub blocks: &'a [TrainingBlock],
    /// Candidate pool after any exposure filtering
    pub exercise_pool: &'a [Exercise],
    /// Known working loads per exercise id
    pub baselines: &'a BTreeMap<String, f64>,
    /// Zero-based session index within the week, selecting the split rotation slot
    pub session_index: u32,
    /// Selection tie-break seed
    pub seed: u64,
    /// Overrides the split rotation when set
    pub intent: Option<SessionIntent>,
    /// Explicit muscle groups; required for `body_part` sessions
    pub target_muscle_groups: Vec<String>,
    /// Equipment on hand; `None` means unrestricted
    pub available_equipment: Option<BTreeSet<Equipment>>,
}

/// A planned draft session with the artifacts that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedSession {
    /// Draft prescription
    pub plan: SessionPlan,
    /// Repaired selection
    pub selection: SelectionOutput,
    /// Build quality analysis
    pub analysis: BuildAnalysis,
    /// Weekly set targets for the session's muscles
    pub weekly_targets: BTreeMap<Muscle, u32>,
    /// Role assignments for exercises new to the mesocycle
    pub new_role_assignments: Vec<ExerciseRoleAssignment>,
}

/// Session planner
pub struct SessionPlanner;

impl SessionPlanner {
    /// Plan the next session of `input.mesocycle`
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid mesocycle, unknown muscle
    /// names, or a `body_part` session without targets. Returns
    /// `SELECTION_UNSATISFIABLE` when the selection cannot be aligned with
    /// the session intent.
    pub fn plan_session(input: &PlanningInput<'_>, config: &EngineConfig) -> AppResult<PlannedSession> {
        let meso = input.mesocycle;
        meso.validate()?;

        let week = MesocycleLifecycle::current_meso_week(meso);
        let block = BlockPlanner::block_for_week(input.blocks, week);
        let block_type = block.map_or_else(
            || BlockPlanner::block_type_for_week(input.blocks, week, meso.duration_weeks),
            |b| b.block_type,
        );
        let intent = input
            .intent
            .unwrap_or_else(|| meso.split_type.intent_for_session(input.session_index));

        let candidates = Self::candidate_muscles(intent, &input.target_muscle_groups)?;
        let weekly_targets: BTreeMap<Muscle, u32> = candidates
            .into_iter()
            .filter(|m| !default_landmarks(*m).is_untargeted())
            .map(|m| (m, MesocycleLifecycle::weekly_volume_target(meso, m, week, &config.volume)))
            .filter(|(_, sets)| *sets > 0)
            .collect();
        let target_set: BTreeSet<Muscle> = weekly_targets.keys().copied().collect();

        let build = smart_build(
            &SmartBuildInput {
                target_muscle_groups: weekly_targets.keys().map(|m| m.as_str().to_owned()).collect(),
                exercise_pool: input.exercise_pool,
                exercise_count: config.planner.exercises_per_session,
                seed: input.seed,
                intent: Some(intent),
                available_equipment: input.available_equipment.clone(),
            },
            &config.selection,
        )?;

        let mut selection =
            SelectionOutput::from_build(&build.exercises, config.planner.main_lifts_per_session);
        selection.set_targets = allocate_sets(
            &selection,
            &build.exercises,
            &weekly_targets,
            meso.split_type.muscle_frequency(meso.sessions_per_week),
            &config.selection,
        );
        // swap candidates respect avoidance and equipment but not tags
        let swap_pool = filter_pool(
            input.exercise_pool,
            &target_set,
            None,
            input.available_equipment.as_ref(),
        );
        let selection = enforce_intent_alignment(
            &selection,
            &swap_pool,
            intent,
            config.selection.min_aligned_ratio,
            (intent == SessionIntent::BodyPart).then_some(&target_set),
        )
        .map_err(AppError::from)?;

        let rir = MesocycleLifecycle::rir_target(meso, week, &config.rir);
        let intensity_bias =
            block.map_or(config.planner.for_block(block_type).intensity_bias, |b| b.intensity_bias);

        let mut warnings = Vec::new();
        let exercises: Vec<PrescribedExercise> = selection
            .exercise_ids()
            .iter()
            .filter_map(|id| swap_pool.iter().find(|e| &e.id == id))
            .map(|exercise| {
                let prescription = Self::prescribe(
                    exercise,
                    &selection,
                    meso,
                    block_type,
                    rir,
                    intensity_bias,
                    input.baselines,
                    config,
                );
                if prescription.load.is_none() {
                    warnings.push(format!(
                        "No baseline load for {}; choose a load that leaves {}-{} reps in reserve",
                        exercise.name, rir.min, rir.max
                    ));
                }
                prescription
            })
            .collect();

        if !build.analysis.uncovered_targets.is_empty() {
            let names: Vec<&str> = build.analysis.uncovered_targets.iter().map(|m| m.as_str()).collect();
            warnings.push(format!("No available exercise covers: {}", names.join(", ")));
        }
        if block_type != BlockType::Deload {
            for (muscle, sets) in &weekly_targets {
                let mv = default_landmarks(*muscle).mv;
                if *sets < mv {
                    warnings.push(format!(
                        "{muscle} weekly target of {sets} sets is below maintenance volume ({mv})"
                    ));
                }
            }
        }

        let substitution_notes = selection
            .diagnostics
            .swaps
            .iter()
            .map(|swap| format!("{} replaced by {}: {}", swap.removed_id, swap.added_id, swap.reason))
            .collect();

        let new_role_assignments: Vec<ExerciseRoleAssignment> = exercises
            .iter()
            .filter(|p| meso.role_of(&p.exercise_id).is_none())
            .map(|p| ExerciseRoleAssignment {
                exercise_id: p.exercise_id.clone(),
                role: p.role,
                added_in_week: week,
            })
            .collect();

        let (rpe_low, rpe_high) = rir.rpe_range();
        let rationale = vec![
            format!(
                "Week {week} of {} ({block_type} block), {intent} session",
                meso.duration_weeks
            ),
            format!(
                "Effort target {}-{} RIR (RPE {rpe_low:.0}-{rpe_high:.0})",
                rir.min, rir.max
            ),
            format!(
                "Build quality {:.0}/100 ({:?}), {:.0}% intent-aligned",
                build.analysis.score,
                build.analysis.label,
                selection.diagnostics.aligned_ratio * 100.0
            ),
        ];

        let plan = SessionPlan {
            mesocycle_id: meso.id,
            week,
            intent,
            block_type,
            exercises,
            warnings,
            substitution_notes,
            rationale,
        };
        info!(
            mesocycle_id = %meso.id,
            week,
            %intent,
            %block_type,
            exercises = plan.exercises.len(),
            total_sets = plan.total_sets(),
            swaps = selection.diagnostics.swaps.len(),
            "Session planned"
        );

        Ok(PlannedSession {
            plan,
            selection,
            analysis: build.analysis,
            weekly_targets,
            new_role_assignments,
        })
    }

    /// Muscles a session could target before landmark filtering
    fn candidate_muscles(intent: SessionIntent, groups: &[String]) -> AppResult<Vec<Muscle>> {
        if !groups.is_empty() {
            return resolve_muscle_groups(groups);
        }
        if intent == SessionIntent::BodyPart {
            return Err(AppError::invalid_input(
                "A body_part session requires target muscle groups",
            ));
        }
        Ok(intent.profile_muscles())
    }

    #[allow(clippy::too_many_arguments)]
    fn prescribe(
        exercise: &Exercise,
        selection: &SelectionOutput,
        meso: &Mesocycle,
        block_type: BlockType,
        rir: RirBand,
        intensity_bias: f64,
        baselines: &BTreeMap<String, f64>,
        config: &EngineConfig,
    ) -> PrescribedExercise {
        let role = meso.role_of(&exercise.id).unwrap_or(if selection.is_main_lift(&exercise.id) {
            ExerciseRole::CoreCompound
        } else {
            ExerciseRole::Accessory
        });
        let block = config.planner.for_block(block_type);
        let rep_range = if exercise.is_compound() {
            block.compound_reps
        } else {
            block.isolation_reps
        };
        let load = baselines
            .get(&exercise.id)
            .filter(|b| **b > 0.0)
            .map(|b| round_to_increment(b * (1.0 + intensity_bias), config.autoregulation.load_increment));
        if load.is_none() {
            debug!(exercise_id = %exercise.id, "No baseline load");
        }

        PrescribedExercise {
            exercise_id: exercise.id.clone(),
            name: exercise.name.clone(),
            role,
            primary_muscles: exercise.primary_muscles.clone(),
            sets: selection
                .set_targets
                .get(&exercise.id)
                .copied()
                .unwrap_or(config.selection.min_sets_per_exercise),
            rep_range,
            load,
            target_rir: rir,
            rationale: selection.rationale.get(&exercise.id).cloned().unwrap_or_default(),
        }
    }
}

fn round_to_increment(load: f64, increment: f64) -> f64 {
    if increment > 0.0 {
        (load / increment).round() * increment
    } else {
        load
    }
}
