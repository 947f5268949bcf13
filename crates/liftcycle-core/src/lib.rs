// ABOUTME: Core types and constants for the liftcycle training engine
// ABOUTME: Foundation crate with error handling, domain models, and landmark constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

#![deny(unsafe_code)]

//! # Liftcycle Core
//!
//! Foundation crate providing shared types and constants for the liftcycle
//! periodization engine. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Volume landmarks and default thresholds organized by domain
//! - **models**: Muscles, exercises, mesocycles, readiness signals, and session plans

/// Unified error handling system with standard error codes
pub mod errors;

/// Training constants organized by domain
pub mod constants;

/// Core data models (Muscle, Exercise, Mesocycle, `ReadinessSignal`, `SessionPlan`)
pub mod models;
