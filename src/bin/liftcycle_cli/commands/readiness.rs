// ABOUTME: Fatigue scoring command for liftcycle-cli
// ABOUTME: Scores a readiness check-in read from disk
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

use std::path::Path;

use anyhow::Result;
use liftcycle_core::models::ReadinessSignal;
use liftcycle_engine::config::EngineConfig;
use liftcycle_engine::fatigue::FatigueEngine;

use crate::helpers::{print_json, read_json};

/// Print the fatigue score of a check-in
pub fn fatigue(path: &Path, config: &EngineConfig) -> Result<()> {
    let signal: ReadinessSignal = read_json(path)?;
    let score = FatigueEngine::compute_fatigue_score(&signal, &config.fatigue)?;
    print_json(&score)
}
