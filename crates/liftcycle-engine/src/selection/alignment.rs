// ABOUTME: Post-selection repair that swaps misaligned exercises for intent-aligned pool candidates
// ABOUTME: Full-body sessions must also cover upper and lower body; failure is a typed error value
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

use std::collections::{BTreeMap, BTreeSet};

use liftcycle_core::errors::AppError;
use liftcycle_core::models::{BodyRegion, Exercise, Muscle, SessionIntent};
use thiserror::Error;
use tracing::{debug, warn};

use super::{SelectionOutput, SwapRecord};

/// Why a selection could not be aligned with its intent
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlignmentError {
    /// Nothing was selected
    #[error("Selection is empty")]
    EmptySelection,

    /// Swap candidates ran out before the ratio was reached
    #[error("Aligned ratio {achieved:.2} below required {required:.2} after exhausting candidates")]
    BelowThreshold {
        /// Ratio reached
        achieved: f64,
        /// Ratio required
        required: f64,
    },

    /// A full-body session lacks a region and nothing can supply it
    #[error("Full-body selection has no {region} exercise and no candidate can supply one")]
    MissingBodyRegion {
        /// Region missing
        region: BodyRegion,
    },
}

impl From<AlignmentError> for AppError {
    fn from(error: AlignmentError) -> Self {
        Self::selection_unsatisfiable(error.to_string()).with_source(error)
    }
}

/// Whether `exercise` fits `intent`
///
/// An exercise aligns through a split tag belonging to the intent or through
/// a primary muscle in the intent's muscle profile. `body_part` sessions align
/// on the explicit targets; with no targets every exercise aligns.
#[must_use]
pub fn is_aligned(
    exercise: &Exercise,
    intent: SessionIntent,
    targets: Option<&BTreeSet<Muscle>>,
) -> bool {
    if intent == SessionIntent::BodyPart {
        return targets.is_none_or(|t| exercise.hits_primary(t));
    }
    if exercise.has_intent_tag(intent) {
        return true;
    }
    let profile = intent.profile_muscles();
    exercise.primary_muscles.iter().any(|m| profile.contains(m))
}

/// How well a candidate serves the intent, for ranking swaps
fn relevance(exercise: &Exercise, intent: SessionIntent, targets: Option<&BTreeSet<Muscle>>) -> usize {
    let reference: BTreeSet<Muscle> = match targets {
        Some(t) if !t.is_empty() => t.clone(),
        _ => intent.profile_muscles().into_iter().collect(),
    };
    exercise
        .primary_muscles
        .iter()
        .filter(|m| reference.contains(m))
        .count()
}

struct Repair<'a> {
    selection: SelectionOutput,
    by_id: BTreeMap<&'a str, &'a Exercise>,
    pool: &'a [Exercise],
    intent: SessionIntent,
    targets: Option<&'a BTreeSet<Muscle>>,
}

impl<'a> Repair<'a> {
    fn exercise(&self, id: &str) -> Option<&'a Exercise> {
        self.by_id.get(id).copied()
    }

    fn aligned(&self, id: &str) -> bool {
        self.exercise(id)
            .is_some_and(|e| is_aligned(e, self.intent, self.targets))
    }

    fn aligned_ratio(&self) -> f64 {
        let ids = self.selection.exercise_ids();
        if ids.is_empty() {
            return 0.0;
        }
        ids.iter().filter(|id| self.aligned(id)).count() as f64 / ids.len() as f64
    }

    /// Best unused, non-avoided candidate passing `accept`, ranked by relevance then id
    fn best_candidate<F>(&self, accept: F) -> Option<&'a Exercise>
    where
        F: Fn(&Exercise) -> bool,
    {
        let used: BTreeSet<String> = self.selection.exercise_ids().into_iter().collect();
        self.pool
            .iter()
            .filter(|e| !e.avoided && !used.contains(&e.id))
            .filter(|e| is_aligned(e, self.intent, self.targets))
            .filter(|e| accept(e))
            .max_by(|a, b| {
                relevance(a, self.intent, self.targets)
                    .cmp(&relevance(b, self.intent, self.targets))
                    .then_with(|| b.id.cmp(&a.id))
            })
    }

    /// Most misaligned selected id: least relevant, accessories before main lifts
    fn worst_misaligned(&self) -> Option<String> {
        let ids = self.selection.exercise_ids();
        ids.iter()
            .enumerate()
            .filter(|(_, id)| !self.aligned(id))
            .min_by_key(|(position, id)| {
                let relevance = self
                    .exercise(id)
                    .map_or(0, |e| relevance(e, self.intent, self.targets));
                // later positions first among equals
                (relevance, usize::MAX - position)
            })
            .map(|(_, id)| id.clone())
    }

    fn swap(&mut self, removed_id: &str, added: &Exercise, reason: String) {
        self.selection.replace(removed_id, &added.id);
        debug!(removed = removed_id, added = %added.id, %reason, "Alignment swap");
        self.selection.diagnostics.swaps.push(SwapRecord {
            removed_id: removed_id.to_owned(),
            added_id: added.id.clone(),
            reason,
        });
    }

    fn region_present(&self, region: BodyRegion) -> bool {
        self.selection
            .exercise_ids()
            .iter()
            .filter_map(|id| self.exercise(id))
            .any(|e| e.trains_region(region))
    }

    /// Selected id that can leave without dropping coverage of `keep`
    fn region_victim(&self, keep: BodyRegion) -> Option<String> {
        let ids = self.selection.exercise_ids();
        let keep_providers = ids
            .iter()
            .filter_map(|id| self.exercise(id))
            .filter(|e| e.trains_region(keep))
            .count();
        ids.iter()
            .rev()
            .find(|id| {
                self.exercise(id).is_none_or(|e| {
                    !e.trains_region(keep) || keep_providers > 1
                })
            })
            .cloned()
    }

    fn ensure_region(&mut self, region: BodyRegion, other: BodyRegion) -> Result<(), AlignmentError> {
        if self.region_present(region) {
            return Ok(());
        }
        let candidate = self.best_candidate(|e| e.trains_region(region));
        let victim = self.region_victim(other);
        match (candidate, victim) {
            (Some(candidate), Some(victim)) => {
                let reason = format!("Full-body session needs a {region} exercise");
                self.swap(&victim, candidate, reason);
                Ok(())
            }
            _ => Err(AlignmentError::MissingBodyRegion { region }),
        }
    }
}

/// Repair a selection until at least `min_aligned_ratio` of it fits `intent`
///
/// The worst-misaligned exercise is swapped for the most relevant unused
/// aligned candidate, keeping its set target and rationale under the new id.
/// Full-body sessions additionally get at least one upper-body and one
/// lower-body exercise.
///
/// # Errors
///
/// Returns an [`AlignmentError`] when the selection is empty or candidates
/// run out before the constraints hold. A partially repaired selection is
/// never returned.
pub fn enforce_intent_alignment(
    selection: &SelectionOutput,
    exercise_pool: &[Exercise],
    intent: SessionIntent,
    min_aligned_ratio: f64,
    target_muscles: Option<&BTreeSet<Muscle>>,
) -> Result<SelectionOutput, AlignmentError> {
    if selection.is_empty() {
        return Err(AlignmentError::EmptySelection);
    }

    let mut repair = Repair {
        selection: selection.clone(),
        by_id: exercise_pool.iter().map(|e| (e.id.as_str(), e)).collect(),
        pool: exercise_pool,
        intent,
        targets: target_muscles,
    };

    while repair.aligned_ratio() + f64::EPSILON < min_aligned_ratio {
        let Some(victim) = repair.worst_misaligned() else {
            break;
        };
        let Some(candidate) = repair.best_candidate(|_| true) else {
            let achieved = repair.aligned_ratio();
            warn!(%intent, achieved, required = min_aligned_ratio, "Intent alignment failed");
            return Err(AlignmentError::BelowThreshold {
                achieved,
                required: min_aligned_ratio,
            });
        };
        let reason = format!("Replaced to match {intent} intent");
        repair.swap(&victim, candidate, reason);
    }

    if intent == SessionIntent::FullBody {
        repair.ensure_region(BodyRegion::Upper, BodyRegion::Lower)?;
        repair.ensure_region(BodyRegion::Lower, BodyRegion::Upper)?;
    }

    let mut output = repair.selection;
    let ids = output.exercise_ids();
    let aligned = ids
        .iter()
        .filter(|id| {
            exercise_pool
                .iter()
                .find(|e| &e.id == *id)
                .is_some_and(|e| is_aligned(e, intent, target_muscles))
        })
        .count();
    output.diagnostics.aligned_ratio = aligned as f64 / ids.len() as f64;
    Ok(output)
}
