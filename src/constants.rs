// ABOUTME: Application-level constants for service identity and command defaults
// ABOUTME: Engine tuning constants live in liftcycle-core instead
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

/// Service name reported in structured logs
pub const SERVICE_NAME: &str = "liftcycle";

/// Seed used by the CLI when none is given
pub const DEFAULT_SELECTION_SEED: u64 = 42;
