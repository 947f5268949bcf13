// ABOUTME: Greedy two-phase session build: compounds first, then isolations with pattern novelty
// ABOUTME: Ties break through a seeded ChaCha generator over id-sorted candidates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

use std::collections::BTreeSet;

use liftcycle_core::errors::AppResult;
use liftcycle_core::models::{
    resolve_muscle_groups, Equipment, Exercise, MovementPattern, Muscle, SessionIntent,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::analysis::{analyze_build, BuildAnalysis};
use super::filter::filter_pool;
use super::scoring::score_exercise_for_build;
use crate::config::SelectionConfig;

const SCORE_EPSILON: f64 = 1e-9;

/// Inputs to [`smart_build`]
#[derive(Debug, Clone)]
pub struct SmartBuildInput<'a> {
    /// Coarse groups (`chest`, `arms`, `legs`) or fine muscle names
    pub target_muscle_groups: Vec<String>,
    /// Candidate pool
    pub exercise_pool: &'a [Exercise],
    /// Exercises to select
    pub exercise_count: usize,
    /// Tie-break seed
    pub seed: u64,
    /// Session intent used for tag filtering
    pub intent: Option<SessionIntent>,
    /// Equipment on hand; `None` means unrestricted
    pub available_equipment: Option<BTreeSet<Equipment>>,
}

/// Result of [`smart_build`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartBuildOutput {
    /// Selected exercises in pick order
    pub exercises: Vec<Exercise>,
    /// Fine muscles the groups resolved to
    pub target_muscles: Vec<Muscle>,
    /// Coverage and quality analysis
    pub analysis: BuildAnalysis,
}

/// Mutable state of an in-progress build
struct BuildState {
    targets: BTreeSet<Muscle>,
    covered_muscles: BTreeSet<Muscle>,
    covered_patterns: BTreeSet<MovementPattern>,
    remaining: Vec<Exercise>,
    selected: Vec<Exercise>,
    rng: ChaCha8Rng,
}

impl BuildState {
    /// Pick the best remaining candidate matching `eligible`, if any
    fn pick<F>(&mut self, compound_phase: bool, config: &SelectionConfig, eligible: F) -> bool
    where
        F: Fn(&Exercise) -> bool,
    {
        let scored: Vec<(usize, f64)> = self
            .remaining
            .iter()
            .enumerate()
            .filter(|(_, e)| eligible(*e))
            .map(|(i, e)| {
                let score = score_exercise_for_build(
                    e,
                    &self.targets,
                    &self.covered_muscles,
                    &self.covered_patterns,
                    compound_phase,
                    &config.weights,
                );
                (i, score)
            })
            .collect();

        let Some(best) = scored.iter().map(|(_, s)| *s).reduce(f64::max) else {
            return false;
        };
        let ties: Vec<usize> = scored
            .iter()
            .filter(|(_, s)| (best - *s).abs() <= SCORE_EPSILON)
            .map(|(i, _)| *i)
            .collect();
        let choice = if ties.len() > 1 {
            ties[self.rng.gen_range(0..ties.len())]
        } else {
            ties[0]
        };

        let exercise = self.remaining.remove(choice);
        self.covered_muscles
            .extend(exercise.primary_muscles.iter().copied());
        self.covered_patterns
            .extend(exercise.movement_patterns.iter().copied());
        self.selected.push(exercise);
        true
    }
}

/// Select exercises maximizing target coverage and pattern novelty
///
/// Coarse groups resolve to deduplicated fine muscles and the pool is
/// filtered. A compound phase then fills up to `compound_share` of the
/// budget, an isolation phase fills the rest, and any shortfall is filled
/// from whatever remains. A pool smaller than `exercise_count` yields every
/// eligible exercise. Identical input and seed always give identical output.
///
/// # Errors
///
/// Returns a validation error for an unknown muscle or group name.
pub fn smart_build(input: &SmartBuildInput<'_>, config: &SelectionConfig) -> AppResult<SmartBuildOutput> {
    let target_muscles = resolve_muscle_groups(&input.target_muscle_groups)?;
    let targets: BTreeSet<Muscle> = target_muscles.iter().copied().collect();

    let mut remaining = filter_pool(
        input.exercise_pool,
        &targets,
        input.intent,
        input.available_equipment.as_ref(),
    );
    remaining.sort_by(|a, b| a.id.cmp(&b.id));

    let count = input.exercise_count.min(remaining.len());
    let compound_budget = ((input.exercise_count as f64) * config.compound_share).ceil() as usize;

    let mut state = BuildState {
        targets,
        covered_muscles: BTreeSet::new(),
        covered_patterns: BTreeSet::new(),
        remaining,
        selected: Vec::with_capacity(count),
        rng: ChaCha8Rng::seed_from_u64(input.seed),
    };

    while state.selected.len() < count.min(compound_budget)
        && state.pick(true, config, Exercise::is_compound)
    {}
    while state.selected.len() < count && state.pick(false, config, |e| !e.is_compound()) {}
    while state.selected.len() < count && state.pick(false, config, |_| true) {}

    let analysis = analyze_build(&target_muscles, &state.selected, &config.quality);
    debug!(
        targets = target_muscles.len(),
        selected = state.selected.len(),
        requested = input.exercise_count,
        score = analysis.score,
        seed = input.seed,
        "Smart build complete"
    );

    Ok(SmartBuildOutput {
        exercises: state.selected,
        target_muscles,
        analysis,
    })
}
