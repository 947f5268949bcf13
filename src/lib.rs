// ABOUTME: Main library entry point for the liftcycle training planner
// ABOUTME: Wires the engine to repositories, services, logging, and a clock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

#![deny(unsafe_code)]

//! # Liftcycle
//!
//! Resistance-training periodization with session-to-session autoregulation
//! and exercise selection. The decision logic lives in `liftcycle-engine`;
//! this crate supplies what surrounds it: storage traits and an in-memory
//! implementation, services that load inputs and commit decisions, logging
//! setup, and the `liftcycle-cli` binary.
//!
//! ## Architecture
//!
//! - **Repositories**: async traits for mesocycles, blocks, readiness signals,
//!   exercise pools, and exposure history
//! - **Services**: lifecycle transitions, autoregulation, and session planning
//! - **Clock**: injected time source so services stay testable
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use liftcycle::clock::SystemClock;
//! use liftcycle::repositories::InMemoryStore;
//! use liftcycle::services::LifecycleService;
//! use liftcycle_engine::config::EngineConfig;
//! use uuid::Uuid;
//!
//! # async fn run() -> liftcycle_core::errors::AppResult<()> {
//! let store = Arc::new(InMemoryStore::new());
//! let config = Arc::new(EngineConfig::load()?);
//! let service = LifecycleService::new(store, config);
//! let outcome = service.transition(Uuid::new_v4()).await?;
//! println!("{}", outcome.mesocycle.state);
//! # let _ = SystemClock;
//! # Ok(())
//! # }
//! ```

/// Time source abstraction
pub mod clock;

/// Application constants
pub mod constants;

/// Logging configuration and structured event helpers
pub mod logging;

/// Storage traits and the in-memory store
pub mod repositories;

/// Orchestration services around the engine
pub mod services;

pub use liftcycle_core::errors::{AppError, AppResult, ErrorCode};
