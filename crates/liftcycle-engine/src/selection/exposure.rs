// ABOUTME: Removes exercises used too often inside the recent exposure window
// ABOUTME: Core compounds carried across mesocycles are always kept
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use liftcycle_core::models::{Exercise, ExerciseExposure};
use tracing::debug;

use crate::config::SelectionConfig;

/// Drop overexposed exercises from `pool`
///
/// An exercise is overexposed when it has at least `max_recent_uses` uses and
/// was last used within `exposure_window_days` of `now`. `recent_uses` must
/// be counted over that same window. Ids in `keep_ids` are never dropped.
#[must_use]
pub fn exclude_recently_used(
    pool: &[Exercise],
    exposures: &[ExerciseExposure],
    now: DateTime<Utc>,
    keep_ids: &[String],
    config: &SelectionConfig,
) -> Vec<Exercise> {
    let window_start = config.exposure_window_start(now);
    let by_id: BTreeMap<&str, &ExerciseExposure> = exposures
        .iter()
        .map(|x| (x.exercise_id.as_str(), x))
        .collect();

    let (kept, dropped): (Vec<&Exercise>, Vec<&Exercise>) = pool.iter().partition(|exercise| {
        if keep_ids.contains(&exercise.id) {
            return true;
        }
        by_id.get(exercise.id.as_str()).is_none_or(|exposure| {
            exposure.recent_uses < config.max_recent_uses || exposure.last_used < window_start
        })
    });

    if !dropped.is_empty() {
        debug!(
            dropped = dropped.len(),
            ids = ?dropped.iter().map(|e| e.id.as_str()).collect::<Vec<_>>(),
            "Excluded recently overused exercises"
        );
    }
    kept.into_iter().cloned().collect()
}
