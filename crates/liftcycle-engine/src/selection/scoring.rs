// ABOUTME: Additive exercise scoring for greedy session building
// ABOUTME: Rewards target coverage and favorites; pattern novelty counts only in the isolation phase
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

use std::collections::BTreeSet;

use liftcycle_core::models::{Exercise, MovementPattern, Muscle};

use crate::config::ScoringWeights;

/// Score a candidate against the current build state
///
/// `primary_hit` per primary muscle in the targets, `secondary_hit` per
/// secondary muscle in the targets, `uncovered_bonus` per target muscle hit
/// that no pick covers yet, and `favorite_bonus` for favorites. When
/// `compound_phase` is false, `pattern_novelty_bonus` is added per movement
/// pattern not yet in `covered_patterns`.
#[must_use]
pub fn score_exercise_for_build(
    exercise: &Exercise,
    target_muscles: &BTreeSet<Muscle>,
    covered_muscles: &BTreeSet<Muscle>,
    covered_patterns: &BTreeSet<MovementPattern>,
    compound_phase: bool,
    weights: &ScoringWeights,
) -> f64 {
    let mut score = 0.0;
    let mut hit: BTreeSet<Muscle> = BTreeSet::new();

    for muscle in exercise
        .primary_muscles
        .iter()
        .filter(|m| target_muscles.contains(m))
    {
        score += weights.primary_hit;
        hit.insert(*muscle);
    }
    for muscle in exercise
        .secondary_muscles
        .iter()
        .filter(|m| target_muscles.contains(m))
    {
        score += weights.secondary_hit;
        hit.insert(*muscle);
    }

    let uncovered = hit.iter().filter(|m| !covered_muscles.contains(m)).count();
    score += weights.uncovered_bonus * uncovered as f64;

    if exercise.favorite {
        score += weights.favorite_bonus;
    }

    if !compound_phase {
        let novel: BTreeSet<&MovementPattern> = exercise
            .movement_patterns
            .iter()
            .filter(|p| !covered_patterns.contains(p))
            .collect();
        score += weights.pattern_novelty_bonus * novel.len() as f64;
    }

    score
}
