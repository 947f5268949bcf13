// ABOUTME: Landmark, week, and transition commands for liftcycle-cli
// ABOUTME: Pure engine calls over a mesocycle read from disk; nothing is persisted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use liftcycle_core::constants::default_landmarks;
use liftcycle_core::models::{
    resolve_muscle_groups, BlockType, Mesocycle, Muscle, RirBand, VolumeLandmarks,
};
use liftcycle_engine::blocks::BlockPlanner;
use liftcycle_engine::config::EngineConfig;
use liftcycle_engine::lifecycle::MesocycleLifecycle;
use serde::Serialize;
use uuid::Uuid;

use crate::helpers::{print_json, read_json};

#[derive(Serialize)]
struct WeekView {
    mesocycle_id: Uuid,
    state: String,
    week: u32,
    duration_weeks: u32,
    block_type: BlockType,
    rir: RirBand,
    rpe_range: (f64, f64),
    volume_targets: BTreeMap<Muscle, u32>,
}

/// Print landmarks for every muscle or for one muscle/group
pub fn landmarks(muscle: Option<&str>) -> Result<()> {
    let muscles = match muscle {
        Some(token) => resolve_muscle_groups(&[token])?,
        None => Muscle::ALL.to_vec(),
    };
    let table: BTreeMap<Muscle, VolumeLandmarks> =
        muscles.into_iter().map(|m| (m, default_landmarks(m))).collect();
    print_json(&table)
}

/// Print what a mesocycle prescribes for its current (or a given) week
pub fn week(path: &Path, week: Option<u32>, config: &EngineConfig) -> Result<()> {
    let mesocycle: Mesocycle = read_json(path)?;
    mesocycle.validate()?;

    let week = week.unwrap_or_else(|| MesocycleLifecycle::current_meso_week(&mesocycle));
    let blocks = BlockPlanner::plan_blocks(&mesocycle, &config.planner, Uuid::new_v4);
    let rir = MesocycleLifecycle::rir_target(&mesocycle, week, &config.rir);
    let volume_targets = Muscle::ALL
        .iter()
        .filter(|m| !default_landmarks(**m).is_untargeted())
        .map(|m| {
            (
                *m,
                MesocycleLifecycle::weekly_volume_target(&mesocycle, *m, week, &config.volume),
            )
        })
        .collect();

    print_json(&WeekView {
        mesocycle_id: mesocycle.id,
        state: mesocycle.state.to_string(),
        week,
        duration_weeks: mesocycle.duration_weeks,
        block_type: BlockPlanner::block_type_for_week(&blocks, week, mesocycle.duration_weeks),
        rpe_range: rir.rpe_range(),
        rir,
        volume_targets,
    })
}

/// Print the lifecycle decision for a mesocycle
pub fn transition(path: &Path, config: &EngineConfig) -> Result<()> {
    let mesocycle: Mesocycle = read_json(path)?;
    let decision = MesocycleLifecycle::evaluate(&mesocycle, config, Uuid::new_v4)?;
    print_json(&decision)
}
