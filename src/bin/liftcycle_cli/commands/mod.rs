// ABOUTME: Command implementations for liftcycle-cli
// ABOUTME: Periodization inspection, readiness scoring, and session planning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

pub mod periodization;
pub mod plan;
pub mod readiness;
