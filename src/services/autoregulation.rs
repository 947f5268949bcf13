// ABOUTME: Autoregulation service reading the latest readiness signal for a user
// ABOUTME: Time comes from the injected clock so staleness is testable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

use std::sync::Arc;

use liftcycle_core::errors::AppResult;
use liftcycle_core::models::{ReadinessSignal, SessionPlan};
use liftcycle_engine::autoregulation::{AutoregulationResult, Autoregulator};
use liftcycle_engine::config::EngineConfig;
use liftcycle_engine::fatigue::{FatigueEngine, FatigueScore};
use uuid::Uuid;

use crate::clock::Clock;
use crate::logging::PlannerLogger;
use crate::repositories::TrainingStore;

/// Readiness check-ins and session autoregulation
#[derive(Clone)]
pub struct AutoregulationService {
    store: Arc<dyn TrainingStore>,
    config: Arc<EngineConfig>,
    clock: Arc<dyn Clock>,
}

impl AutoregulationService {
    /// Create a service over `store`
    #[must_use]
    pub fn new(store: Arc<dyn TrainingStore>, config: Arc<EngineConfig>, clock: Arc<dyn Clock>) -> Self {
        Self { store, config, clock }
    }

    /// Validate and store a check-in
    ///
    /// # Errors
    ///
    /// Returns a validation error for out-of-scale values, or a storage error
    pub async fn record_check_in(&self, signal: &ReadinessSignal) -> AppResult<()> {
        signal.validate()?;
        self.store.insert_signal(signal).await?;
        Ok(())
    }

    /// Fatigue score from the user's latest check-in, fresh or not
    ///
    /// # Errors
    ///
    /// Returns a storage error or a validation error for a malformed signal
    pub async fn current_fatigue(&self, user_id: Uuid) -> AppResult<Option<FatigueScore>> {
        self.store
            .latest_signal(user_id)
            .await?
            .map(|signal| FatigueEngine::compute_fatigue_score(&signal, &self.config.fatigue))
            .transpose()
    }

    /// Rescale `draft` from the user's latest check-in
    ///
    /// # Errors
    ///
    /// Returns a storage error or a validation error for a malformed signal
    pub async fn apply_autoregulation(
        &self,
        user_id: Uuid,
        draft: &SessionPlan,
    ) -> AppResult<AutoregulationResult> {
        let signal = self.store.latest_signal(user_id).await?;
        let result = Autoregulator::apply(
            signal.as_ref(),
            draft,
            self.clock.now(),
            &self.config.fatigue,
            &self.config.autoregulation,
        )?;
        PlannerLogger::log_autoregulation(
            user_id,
            result.applied,
            result.modifications.len(),
            &result.reason,
        );
        Ok(result)
    }
}
