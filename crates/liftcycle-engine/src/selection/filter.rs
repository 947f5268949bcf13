// ABOUTME: Candidate pool filtering for avoided, intent-incompatible, and unequipped exercises
// ABOUTME: Primary-muscle overlap with the targets overrides an incompatible split tag
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

use std::collections::BTreeSet;

use liftcycle_core::models::{Equipment, Exercise, Muscle, SessionIntent};
use tracing::debug;

/// Filter a candidate pool
///
/// - Avoided exercises are always removed.
/// - With an `intent`, exercises whose split tags do not fit it are removed
///   unless a primary muscle is among `target_muscles`.
/// - With `available_equipment`, exercises are kept when at least one of
///   their equipment items is available; exercises needing nothing always pass.
///
/// Pool order is preserved.
#[must_use]
pub fn filter_pool(
    pool: &[Exercise],
    target_muscles: &BTreeSet<Muscle>,
    intent: Option<SessionIntent>,
    available_equipment: Option<&BTreeSet<Equipment>>,
) -> Vec<Exercise> {
    let filtered: Vec<Exercise> = pool
        .iter()
        .filter(|exercise| !exercise.avoided)
        .filter(|exercise| {
            intent.is_none_or(|intent| {
                exercise.tag_compatible(intent) || exercise.hits_primary(target_muscles)
            })
        })
        .filter(|exercise| {
            available_equipment.is_none_or(|available| {
                exercise.equipment.is_empty()
                    || exercise.equipment.iter().any(|item| available.contains(item))
            })
        })
        .cloned()
        .collect();

    debug!(
        pool_size = pool.len(),
        kept = filtered.len(),
        "Filtered exercise pool"
    );
    filtered
}
