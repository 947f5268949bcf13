// ABOUTME: Services that load engine inputs from repositories and commit engine decisions
// ABOUTME: Lifecycle transitions, autoregulation, and end-to-end session planning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

/// Autoregulation over stored readiness signals
pub mod autoregulation;
/// Mesocycle transitions and creation
pub mod lifecycle;
/// Session planning flow
pub mod planning;

pub use autoregulation::AutoregulationService;
pub use lifecycle::{LifecycleService, TransitionOutcome};
pub use planning::{PlanOutcome, PlanRequest, PlanningService};
