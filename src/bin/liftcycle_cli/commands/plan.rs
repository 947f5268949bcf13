// ABOUTME: Session planning command for liftcycle-cli
// ABOUTME: Loads inputs into an in-memory store and runs the full planning service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use liftcycle::clock::{Clock, FixedClock, SystemClock};
use liftcycle::repositories::{InMemoryStore, MesocycleRepository, ReadinessRepository};
use liftcycle::services::{PlanRequest, PlanningService};
use liftcycle_core::models::{Equipment, Exercise, Mesocycle, ReadinessSignal, SessionIntent};
use liftcycle_engine::blocks::BlockPlanner;
use liftcycle_engine::config::EngineConfig;
use serde_json::Value;
use uuid::Uuid;

use crate::helpers::{print_json, read_json};

/// Arguments of the `plan` command
pub struct PlanArgs {
    pub mesocycle: PathBuf,
    pub pool: PathBuf,
    pub signal: Option<PathBuf>,
    pub baselines: Option<PathBuf>,
    pub session_index: u32,
    pub seed: u64,
    pub intent: Option<String>,
    pub targets: Vec<String>,
    pub equipment: Vec<String>,
    pub now: Option<String>,
}

fn parse_equipment(items: &[String]) -> Result<Option<BTreeSet<Equipment>>> {
    if items.is_empty() {
        return Ok(None);
    }
    items
        .iter()
        .map(|item| {
            serde_json::from_value(Value::String(item.trim().to_lowercase()))
                .map_err(|_| anyhow!("Unknown equipment: {item}"))
        })
        .collect::<Result<BTreeSet<Equipment>>>()
        .map(Some)
}

/// Plan the next session and print the outcome
pub async fn plan(args: PlanArgs, config: EngineConfig) -> Result<()> {
    let mut mesocycle: Mesocycle = read_json(&args.mesocycle)?;
    // a file describes the trainee's current cycle
    mesocycle.is_active = true;
    let pool: Vec<Exercise> = read_json(&args.pool)?;
    let baselines: BTreeMap<String, f64> = match &args.baselines {
        Some(path) => read_json(path)?,
        None => BTreeMap::new(),
    };

    let clock: Arc<dyn Clock> = match &args.now {
        Some(raw) => {
            let instant = DateTime::parse_from_rfc3339(raw)
                .map_err(|e| anyhow!("Invalid --now value {raw}: {e}"))?
                .with_timezone(&Utc);
            Arc::new(FixedClock::new(instant))
        }
        None => Arc::new(SystemClock),
    };

    let store = Arc::new(InMemoryStore::new());
    let blocks = BlockPlanner::plan_blocks(&mesocycle, &config.planner, Uuid::new_v4);
    store.create_mesocycle(&mesocycle, &blocks).await?;
    store.set_exercise_pool(mesocycle.user_id, pool).await;
    store.set_baseline_loads(mesocycle.user_id, baselines).await;
    if let Some(path) = &args.signal {
        let signal: ReadinessSignal = read_json(path)?;
        store.insert_signal(&signal).await?;
    }

    let request = PlanRequest {
        user_id: mesocycle.user_id,
        session_index: args.session_index,
        seed: args.seed,
        intent: args.intent.as_deref().map(str::parse::<SessionIntent>).transpose()?,
        target_muscle_groups: args.targets,
        available_equipment: parse_equipment(&args.equipment)?,
    };
    let service = PlanningService::new(store, Arc::new(config), clock);
    let outcome = service.plan_next_session(&request).await?;
    print_json(&outcome)
}
