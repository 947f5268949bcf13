// ABOUTME: Storage traits the services depend on, one per collaborator the engine reads or writes
// ABOUTME: Includes the repository error type and its mapping into AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

//! Repository traits
//!
//! Each trait covers one collaborator. Services hold a single
//! `Arc<dyn TrainingStore>`, which any type implementing every trait gets
//! for free. The mesocycle completion cascade is one trait method so an
//! implementation can commit it as a single transaction.

/// Tokio-locked in-memory implementation
pub mod memory;

pub use memory::InMemoryStore;

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use liftcycle_core::errors::{AppError, ErrorCode};
use liftcycle_core::models::{
    Exercise, ExerciseExposure, ExerciseRoleAssignment, Mesocycle, ReadinessSignal,
    TrainingBlock,
};
use liftcycle_engine::lifecycle::MesocycleCascade;
use thiserror::Error;
use uuid::Uuid;

/// Storage failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// Record does not exist
    #[error("{entity} {id} not found")]
    NotFound {
        /// Kind of record
        entity: &'static str,
        /// Identifier looked up
        id: String,
    },

    /// Write conflicts with existing state
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Backend failure
    #[error("Storage error: {0}")]
    Storage(String),
}

impl RepositoryError {
    /// Missing mesocycle
    #[must_use]
    pub fn mesocycle_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity: "Mesocycle",
            id: id.to_string(),
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(error: RepositoryError) -> Self {
        match &error {
            RepositoryError::NotFound { entity, id } => {
                Self::not_found(format!("{entity} {id}")).with_source(error)
            }
            RepositoryError::Conflict(message) => {
                Self::new(ErrorCode::ResourceConflict, message.clone()).with_source(error)
            }
            RepositoryError::Storage(message) => Self::storage(message.clone()).with_source(error),
        }
    }
}

/// Mesocycle records
#[async_trait]
pub trait MesocycleRepository: Send + Sync {
    /// Fetch by id
    async fn get_mesocycle(&self, id: Uuid) -> Result<Option<Mesocycle>, RepositoryError>;

    /// The user's active mesocycle, if any
    async fn get_active_mesocycle(&self, user_id: Uuid) -> Result<Option<Mesocycle>, RepositoryError>;

    /// Insert a new mesocycle with its blocks
    async fn create_mesocycle(
        &self,
        mesocycle: &Mesocycle,
        blocks: &[TrainingBlock],
    ) -> Result<(), RepositoryError>;

    /// Replace counters and state of an existing mesocycle
    async fn update_mesocycle(&self, mesocycle: &Mesocycle) -> Result<(), RepositoryError>;

    /// Deactivate the completed mesocycle and create its successor, all or nothing
    async fn commit_cascade(&self, cascade: &MesocycleCascade) -> Result<(), RepositoryError>;

    /// Append role assignments, skipping exercises that already have one
    async fn assign_exercise_roles(
        &self,
        mesocycle_id: Uuid,
        assignments: &[ExerciseRoleAssignment],
    ) -> Result<(), RepositoryError>;
}

/// Training block records
#[async_trait]
pub trait TrainingBlockRepository: Send + Sync {
    /// Blocks of a mesocycle ordered by start week
    async fn blocks_for_mesocycle(&self, mesocycle_id: Uuid) -> Result<Vec<TrainingBlock>, RepositoryError>;
}

/// Readiness check-ins
#[async_trait]
pub trait ReadinessRepository: Send + Sync {
    /// Store a check-in
    async fn insert_signal(&self, signal: &ReadinessSignal) -> Result<(), RepositoryError>;

    /// Most recent check-in for a user
    async fn latest_signal(&self, user_id: Uuid) -> Result<Option<ReadinessSignal>, RepositoryError>;
}

/// Exercise candidates with per-user overlays
#[async_trait]
pub trait ExercisePoolRepository: Send + Sync {
    /// Candidates for a user, with favorite and avoided flags applied
    async fn exercise_pool(&self, user_id: Uuid) -> Result<Vec<Exercise>, RepositoryError>;

    /// Known working loads per exercise id
    async fn baseline_loads(&self, user_id: Uuid) -> Result<BTreeMap<String, f64>, RepositoryError>;
}

/// Exercise usage history
#[async_trait]
pub trait ExposureRepository: Send + Sync {
    /// Per-exercise exposure for uses at or after `since`
    async fn exposures_since(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<ExerciseExposure>, RepositoryError>;
}

/// Every collaborator the services need
pub trait TrainingStore:
    MesocycleRepository
    + TrainingBlockRepository
    + ReadinessRepository
    + ExercisePoolRepository
    + ExposureRepository
{
}

impl<T> TrainingStore for T where
    T: MesocycleRepository
        + TrainingBlockRepository
        + ReadinessRepository
        + ExercisePoolRepository
        + ExposureRepository
{
}
