// ABOUTME: In-memory implementation of every repository trait behind one tokio RwLock
// ABOUTME: The single lock makes the completion cascade atomic; also records sessions for simulations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use liftcycle_core::models::{
    Exercise, ExerciseExposure, ExerciseRoleAssignment, Mesocycle, MesocycleState,
    ReadinessSignal, TrainingBlock,
};
use liftcycle_engine::lifecycle::MesocycleCascade;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{
    ExercisePoolRepository, ExposureRepository, MesocycleRepository, ReadinessRepository,
    RepositoryError, TrainingBlockRepository,
};

#[derive(Debug, Default)]
struct StoreState {
    mesocycles: HashMap<Uuid, Mesocycle>,
    blocks: HashMap<Uuid, Vec<TrainingBlock>>,
    signals: HashMap<Uuid, Vec<ReadinessSignal>>,
    pools: HashMap<Uuid, Vec<Exercise>>,
    baselines: HashMap<Uuid, BTreeMap<String, f64>>,
    // user -> exercise id -> timestamps of use
    usage: HashMap<Uuid, BTreeMap<String, Vec<DateTime<Utc>>>>,
}

impl StoreState {
    fn mesocycle_mut(&mut self, id: Uuid) -> Result<&mut Mesocycle, RepositoryError> {
        self.mesocycles
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::mesocycle_not_found(id))
    }
}

/// Process-local store for tests, simulations, and the CLI
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a user's exercise pool
    pub async fn set_exercise_pool(&self, user_id: Uuid, pool: Vec<Exercise>) {
        self.state.write().await.pools.insert(user_id, pool);
    }

    /// Replace a user's baseline loads
    pub async fn set_baseline_loads(&self, user_id: Uuid, baselines: BTreeMap<String, f64>) {
        self.state.write().await.baselines.insert(user_id, baselines);
    }

    /// Count a finished session against the mesocycle's current phase
    ///
    /// Increments the accumulation or deload counter and logs one use of each
    /// exercise at `performed_at`. Lifecycle transitions are not evaluated.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown mesocycle and `Conflict` for a
    /// completed one.
    pub async fn record_session(
        &self,
        mesocycle_id: Uuid,
        exercise_ids: &[String],
        performed_at: DateTime<Utc>,
    ) -> Result<Mesocycle, RepositoryError> {
        let mut state = self.state.write().await;
        let mesocycle = state.mesocycle_mut(mesocycle_id)?;
        match mesocycle.state {
            MesocycleState::ActiveAccumulation => mesocycle.accumulation_sessions_completed += 1,
            MesocycleState::ActiveDeload => mesocycle.deload_sessions_completed += 1,
            MesocycleState::Completed => {
                return Err(RepositoryError::Conflict(format!(
                    "Mesocycle {mesocycle_id} is completed"
                )));
            }
        }
        let updated = mesocycle.clone();

        let usage = state.usage.entry(updated.user_id).or_default();
        for id in exercise_ids {
            usage.entry(id.clone()).or_default().push(performed_at);
        }
        debug!(
            mesocycle_id = %mesocycle_id,
            accumulation = updated.accumulation_sessions_completed,
            deload = updated.deload_sessions_completed,
            "Session recorded"
        );
        Ok(updated)
    }

    /// Every mesocycle of a user ordered by number
    pub async fn mesocycles_for_user(&self, user_id: Uuid) -> Vec<Mesocycle> {
        let state = self.state.read().await;
        let mut mesocycles: Vec<Mesocycle> = state
            .mesocycles
            .values()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        mesocycles.sort_by_key(|m| m.mesocycle_number);
        mesocycles
    }
}

#[async_trait]
impl MesocycleRepository for InMemoryStore {
    async fn get_mesocycle(&self, id: Uuid) -> Result<Option<Mesocycle>, RepositoryError> {
        Ok(self.state.read().await.mesocycles.get(&id).cloned())
    }

    async fn get_active_mesocycle(&self, user_id: Uuid) -> Result<Option<Mesocycle>, RepositoryError> {
        Ok(self
            .state
            .read()
            .await
            .mesocycles
            .values()
            .find(|m| m.user_id == user_id && m.is_active)
            .cloned())
    }

    async fn create_mesocycle(
        &self,
        mesocycle: &Mesocycle,
        blocks: &[TrainingBlock],
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        if state.mesocycles.contains_key(&mesocycle.id) {
            return Err(RepositoryError::Conflict(format!(
                "Mesocycle {} already exists",
                mesocycle.id
            )));
        }
        let mut blocks = blocks.to_vec();
        blocks.sort_by_key(|b| b.start_week);
        state.blocks.insert(mesocycle.id, blocks);
        state.mesocycles.insert(mesocycle.id, mesocycle.clone());
        Ok(())
    }

    async fn update_mesocycle(&self, mesocycle: &Mesocycle) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        let stored = state.mesocycle_mut(mesocycle.id)?;
        *stored = mesocycle.clone();
        Ok(())
    }

    async fn commit_cascade(&self, cascade: &MesocycleCascade) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;

        // check everything before the first mutation
        if !state.mesocycles.contains_key(&cascade.completed.id) {
            return Err(RepositoryError::mesocycle_not_found(cascade.completed.id));
        }
        if state.mesocycles.contains_key(&cascade.next.id) {
            return Err(RepositoryError::Conflict(format!(
                "Successor mesocycle {} already exists",
                cascade.next.id
            )));
        }

        let user_id = cascade.completed.user_id;
        for other in state.mesocycles.values_mut() {
            if other.user_id == user_id {
                other.is_active = false;
            }
        }
        state
            .mesocycles
            .insert(cascade.completed.id, cascade.completed.clone());
        state.mesocycles.insert(cascade.next.id, cascade.next.clone());
        let mut blocks = cascade.next_blocks.clone();
        blocks.sort_by_key(|b| b.start_week);
        state.blocks.insert(cascade.next.id, blocks);
        Ok(())
    }

    async fn assign_exercise_roles(
        &self,
        mesocycle_id: Uuid,
        assignments: &[ExerciseRoleAssignment],
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        let mesocycle = state.mesocycle_mut(mesocycle_id)?;
        for assignment in assignments {
            if mesocycle.role_of(&assignment.exercise_id).is_none() {
                mesocycle.exercise_roles.push(assignment.clone());
            }
        }
        Ok(())
    }
}

#[async_trait]
impl TrainingBlockRepository for InMemoryStore {
    async fn blocks_for_mesocycle(&self, mesocycle_id: Uuid) -> Result<Vec<TrainingBlock>, RepositoryError> {
        Ok(self
            .state
            .read()
            .await
            .blocks
            .get(&mesocycle_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl ReadinessRepository for InMemoryStore {
    async fn insert_signal(&self, signal: &ReadinessSignal) -> Result<(), RepositoryError> {
        self.state
            .write()
            .await
            .signals
            .entry(signal.user_id)
            .or_default()
            .push(signal.clone());
        Ok(())
    }

    async fn latest_signal(&self, user_id: Uuid) -> Result<Option<ReadinessSignal>, RepositoryError> {
        Ok(self
            .state
            .read()
            .await
            .signals
            .get(&user_id)
            .and_then(|signals| signals.iter().max_by_key(|s| s.recorded_at))
            .cloned())
    }
}

#[async_trait]
impl ExercisePoolRepository for InMemoryStore {
    async fn exercise_pool(&self, user_id: Uuid) -> Result<Vec<Exercise>, RepositoryError> {
        Ok(self
            .state
            .read()
            .await
            .pools
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn baseline_loads(&self, user_id: Uuid) -> Result<BTreeMap<String, f64>, RepositoryError> {
        Ok(self
            .state
            .read()
            .await
            .baselines
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl ExposureRepository for InMemoryStore {
    async fn exposures_since(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<ExerciseExposure>, RepositoryError> {
        let state = self.state.read().await;
        let Some(usage) = state.usage.get(&user_id) else {
            return Ok(Vec::new());
        };
        Ok(usage
            .iter()
            .filter_map(|(exercise_id, uses)| {
                let recent: Vec<&DateTime<Utc>> = uses.iter().filter(|t| **t >= since).collect();
                let last_used = **recent.iter().max()?;
                Some(ExerciseExposure {
                    exercise_id: exercise_id.clone(),
                    last_used,
                    recent_uses: recent.len() as u32,
                })
            })
            .collect())
    }
}
