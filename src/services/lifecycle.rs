// ABOUTME: Applies mesocycle lifecycle decisions through the repository layer
// ABOUTME: Commits deload entry as an update and completion as one atomic cascade
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

use std::sync::Arc;

use liftcycle_core::errors::{AppError, AppResult, ErrorCode};
use liftcycle_core::models::{Mesocycle, TrainingBlock};
use liftcycle_engine::blocks::BlockPlanner;
use liftcycle_engine::config::EngineConfig;
use liftcycle_engine::lifecycle::{LifecycleDecision, MesocycleLifecycle};
use liftcycle_engine::volume_ramp::VolumeLandmarkRamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logging::PlannerLogger;
use crate::repositories::{RepositoryError, TrainingStore};

/// What a transition call did
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionOutcome {
    /// Engine decision
    pub decision: LifecycleDecision,
    /// The mesocycle as stored after the call
    pub mesocycle: Mesocycle,
    /// Newly created successor, when the mesocycle completed
    pub successor: Option<Mesocycle>,
}

/// Mesocycle lifecycle service
#[derive(Clone)]
pub struct LifecycleService {
    store: Arc<dyn TrainingStore>,
    config: Arc<EngineConfig>,
}

impl LifecycleService {
    /// Create a service over `store`
    #[must_use]
    pub fn new(store: Arc<dyn TrainingStore>, config: Arc<EngineConfig>) -> Self {
        Self { store, config }
    }

    /// Start a mesocycle for a user with no active one
    ///
    /// Blocks are planned from the mesocycle's goal and duration.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid record or infeasible volume
    /// ramp, and `INVALID_LIFECYCLE_STATE` when the user already has an
    /// active mesocycle.
    pub async fn start_mesocycle(&self, mesocycle: &Mesocycle) -> AppResult<Vec<TrainingBlock>> {
        mesocycle.validate()?;
        VolumeLandmarkRamp::validate_config(&mesocycle.volume_ramp, mesocycle.duration_weeks)?;
        if let Some(active) = self.store.get_active_mesocycle(mesocycle.user_id).await? {
            return Err(AppError::new(
                ErrorCode::InvalidLifecycleState,
                format!("User already has active mesocycle {}", active.id),
            ));
        }
        let blocks = BlockPlanner::plan_blocks(mesocycle, &self.config.planner, Uuid::new_v4);
        self.store.create_mesocycle(mesocycle, &blocks).await?;
        Ok(blocks)
    }

    /// Apply threshold rules to a stored mesocycle
    ///
    /// Counters are read as already incremented by the session-save path.
    /// Transitioning a completed mesocycle writes nothing.
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for an unknown id and storage errors from
    /// the commit.
    pub async fn transition(&self, mesocycle_id: Uuid) -> AppResult<TransitionOutcome> {
        let mesocycle = self
            .store
            .get_mesocycle(mesocycle_id)
            .await?
            .ok_or_else(|| RepositoryError::mesocycle_not_found(mesocycle_id))?;

        let decision = MesocycleLifecycle::evaluate(&mesocycle, &self.config, Uuid::new_v4)?;
        let outcome = match &decision {
            LifecycleDecision::EnterDeload(updated) => {
                self.store.update_mesocycle(updated).await?;
                TransitionOutcome {
                    mesocycle: updated.clone(),
                    successor: None,
                    decision: decision.clone(),
                }
            }
            LifecycleDecision::Complete(cascade) => {
                self.store.commit_cascade(cascade).await?;
                TransitionOutcome {
                    mesocycle: cascade.completed.clone(),
                    successor: Some(cascade.next.clone()),
                    decision: decision.clone(),
                }
            }
            LifecycleDecision::NoChange | LifecycleDecision::AlreadyCompleted => TransitionOutcome {
                mesocycle,
                successor: None,
                decision: decision.clone(),
            },
        };

        PlannerLogger::log_transition(
            mesocycle_id,
            decision_name(&outcome.decision),
            outcome.decision.requires_write(),
        );
        Ok(outcome)
    }

    /// Successor for a completed mesocycle, not persisted
    #[must_use]
    pub fn initialize_next(&self, completed: &Mesocycle) -> Mesocycle {
        MesocycleLifecycle::initialize_next_mesocycle(completed, Uuid::new_v4())
    }
}

const fn decision_name(decision: &LifecycleDecision) -> &'static str {
    match decision {
        LifecycleDecision::NoChange => "no_change",
        LifecycleDecision::EnterDeload(_) => "enter_deload",
        LifecycleDecision::Complete(_) => "complete",
        LifecycleDecision::AlreadyCompleted => "already_completed",
    }
}
