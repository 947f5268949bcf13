// ABOUTME: Splits weekly per-muscle volume targets into working sets for each selected exercise
// ABOUTME: Per-session share is divided among exercises training the muscle and clamped to limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

use std::collections::BTreeMap;

use liftcycle_core::models::{Exercise, Muscle};

use super::SelectionOutput;
use crate::config::SelectionConfig;

/// Working sets for every exercise in `selection`
///
/// A muscle's weekly target is spread over `frequency` sessions, then split
/// evenly among the selected exercises training it as a primary mover. An
/// exercise receives the largest share across its muscles, clamped to the
/// configured per-exercise range. Exercises training no targeted muscle get
/// the minimum.
#[must_use]
pub fn allocate_sets(
    selection: &SelectionOutput,
    exercises: &[Exercise],
    weekly_targets: &BTreeMap<Muscle, u32>,
    frequency: u32,
    config: &SelectionConfig,
) -> BTreeMap<String, u32> {
    let frequency = frequency.max(1);
    let ids = selection.exercise_ids();
    let selected: Vec<&Exercise> = ids
        .iter()
        .filter_map(|id| exercises.iter().find(|e| &e.id == id))
        .collect();

    let mut providers: BTreeMap<Muscle, u32> = BTreeMap::new();
    for exercise in &selected {
        for muscle in &exercise.primary_muscles {
            if weekly_targets.get(muscle).is_some_and(|t| *t > 0) {
                *providers.entry(*muscle).or_default() += 1;
            }
        }
    }

    selected
        .iter()
        .map(|exercise| {
            let share = exercise
                .primary_muscles
                .iter()
                .filter_map(|muscle| {
                    let weekly = *weekly_targets.get(muscle)?;
                    let count = *providers.get(muscle)?;
                    let per_session = weekly.div_ceil(frequency);
                    Some(per_session.div_ceil(count))
                })
                .max()
                .unwrap_or(config.min_sets_per_exercise);
            let sets = share.clamp(config.min_sets_per_exercise, config.max_sets_per_exercise);
            (exercise.id.clone(), sets)
        })
        .collect()
}
