// ABOUTME: End-to-end session planning: transition check, exposure filter, draft plan, autoregulation
// ABOUTME: Persists role assignments for exercises first used in the mesocycle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

use std::collections::BTreeSet;
use std::sync::Arc;

use liftcycle_core::errors::{AppError, AppResult};
use liftcycle_core::models::{Equipment, SessionIntent};
use liftcycle_engine::autoregulation::AutoregulationResult;
use liftcycle_engine::config::EngineConfig;
use liftcycle_engine::lifecycle::LifecycleDecision;
use liftcycle_engine::planner::{PlannedSession, PlanningInput, SessionPlanner};
use liftcycle_engine::selection::exclude_recently_used;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::autoregulation::AutoregulationService;
use super::lifecycle::LifecycleService;
use crate::clock::Clock;
use crate::logging::PlannerLogger;
use crate::repositories::TrainingStore;

/// Request to plan a user's next session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Trainee
    pub user_id: Uuid,
    /// Zero-based session index within the week
    #[serde(default)]
    pub session_index: u32,
    /// Selection tie-break seed
    #[serde(default)]
    pub seed: u64,
    /// Overrides the split rotation
    #[serde(default)]
    pub intent: Option<SessionIntent>,
    /// Explicit muscle groups
    #[serde(default)]
    pub target_muscle_groups: Vec<String>,
    /// Equipment on hand
    #[serde(default)]
    pub available_equipment: Option<BTreeSet<Equipment>>,
}

/// Result of planning a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanOutcome {
    /// Lifecycle decision applied before planning
    pub transition: LifecycleDecision,
    /// Draft plan and selection artifacts
    pub planned: PlannedSession,
    /// Autoregulated final session
    pub autoregulation: AutoregulationResult,
}

/// Session planning service
#[derive(Clone)]
pub struct PlanningService {
    store: Arc<dyn TrainingStore>,
    config: Arc<EngineConfig>,
    clock: Arc<dyn Clock>,
    lifecycle: LifecycleService,
    autoregulation: AutoregulationService,
}

impl PlanningService {
    /// Create a planning service and the services it drives
    #[must_use]
    pub fn new(store: Arc<dyn TrainingStore>, config: Arc<EngineConfig>, clock: Arc<dyn Clock>) -> Self {
        Self {
            lifecycle: LifecycleService::new(Arc::clone(&store), Arc::clone(&config)),
            autoregulation: AutoregulationService::new(
                Arc::clone(&store),
                Arc::clone(&config),
                Arc::clone(&clock),
            ),
            store,
            config,
            clock,
        }
    }

    /// Plan and autoregulate the user's next session
    ///
    /// The active mesocycle is transitioned first so the plan reflects the
    /// latest counters; a completion plans the first session of the
    /// successor.
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` when the user has no active mesocycle,
    /// `SELECTION_UNSATISFIABLE` when no intent-aligned session exists, and
    /// storage or validation errors otherwise.
    pub async fn plan_next_session(&self, request: &PlanRequest) -> AppResult<PlanOutcome> {
        let active = self
            .store
            .get_active_mesocycle(request.user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Active mesocycle for user {}", request.user_id)))?;

        let transition = self.lifecycle.transition(active.id).await?;
        let mesocycle = transition.successor.unwrap_or(transition.mesocycle);

        let blocks = self.store.blocks_for_mesocycle(mesocycle.id).await?;
        let pool = self.store.exercise_pool(request.user_id).await?;
        let baselines = self.store.baseline_loads(request.user_id).await?;

        let now = self.clock.now();
        let exposures = self
            .store
            .exposures_since(request.user_id, self.config.selection.exposure_window_start(now))
            .await?;
        let pool = exclude_recently_used(
            &pool,
            &exposures,
            now,
            &mesocycle.core_compound_ids(),
            &self.config.selection,
        );
        debug!(
            user_id = %request.user_id,
            pool = pool.len(),
            exposures = exposures.len(),
            "Planning inputs loaded"
        );

        let input = PlanningInput {
            mesocycle: &mesocycle,
            blocks: &blocks,
            exercise_pool: &pool,
            baselines: &baselines,
            session_index: request.session_index,
            seed: request.seed,
            intent: request.intent,
            target_muscle_groups: request.target_muscle_groups.clone(),
            available_equipment: request.available_equipment.clone(),
        };
        let planned = match SessionPlanner::plan_session(&input, &self.config) {
            Ok(planned) => planned,
            Err(error) => {
                let intent = request
                    .intent
                    .unwrap_or_else(|| mesocycle.split_type.intent_for_session(request.session_index));
                PlannerLogger::log_selection_failure(mesocycle.id, intent.as_str(), &error.to_string());
                return Err(error);
            }
        };

        if !planned.new_role_assignments.is_empty() {
            self.store
                .assign_exercise_roles(mesocycle.id, &planned.new_role_assignments)
                .await?;
        }

        let autoregulation = self
            .autoregulation
            .apply_autoregulation(request.user_id, &planned.plan)
            .await?;
        let plan = &autoregulation.adjusted;
        PlannerLogger::log_session_planned(
            mesocycle.id,
            plan.week,
            plan.intent.as_str(),
            plan.exercises.len(),
            plan.total_sets(),
        );

        Ok(PlanOutcome {
            transition: transition.decision,
            planned,
            autoregulation,
        })
    }
}
