// ABOUTME: Exercise selection engine covering target muscles under exclusion and equipment constraints
// ABOUTME: Defines the selection output shared by the build, allocation, and alignment passes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

//! Exercise Selection Engine
//!
//! Selection runs in passes:
//!
//! 1. [`filter_pool`] removes avoided, tag-incompatible, and unequipped exercises
//! 2. [`smart_build`] greedily picks compounds then isolations, re-scoring
//!    after each pick with [`score_exercise_for_build`]
//! 3. [`allocate_sets`] turns weekly volume targets into per-exercise sets
//! 4. [`enforce_intent_alignment`] swaps out exercises that do not fit the
//!    session intent, or fails with an [`AlignmentError`]
//!
//! Every pass is deterministic for a given seed.

/// Intent alignment repair
pub mod alignment;
/// Per-exercise set allocation
pub mod allocation;
/// Build quality analysis
pub mod analysis;
/// Greedy two-phase build
pub mod build;
/// Recent-exposure pre-filter
pub mod exposure;
/// Candidate pool filtering
pub mod filter;
/// Additive build scoring
pub mod scoring;

pub use alignment::{enforce_intent_alignment, is_aligned, AlignmentError};
pub use allocation::allocate_sets;
pub use analysis::{analyze_build, BuildAnalysis, QualityLabel};
pub use build::{smart_build, SmartBuildInput, SmartBuildOutput};
pub use exposure::exclude_recently_used;
pub use filter::filter_pool;
pub use scoring::score_exercise_for_build;

use std::collections::BTreeMap;

use liftcycle_core::models::Exercise;
use serde::{Deserialize, Serialize};

/// One swap made during alignment repair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRecord {
    /// Exercise taken out
    pub removed_id: String,
    /// Exercise put in its place
    pub added_id: String,
    /// Why the swap was made
    pub reason: String,
}

/// Diagnostics carried alongside a selection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionDiagnostics {
    /// Fraction of selected exercises aligned with the session intent
    pub aligned_ratio: f64,
    /// Swaps made by alignment repair
    pub swaps: Vec<SwapRecord>,
}

/// Selected exercises partitioned into main lifts and accessories
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionOutput {
    /// Main lift ids in session order
    pub main_lifts: Vec<String>,
    /// Accessory ids in session order
    pub accessories: Vec<String>,
    /// Working sets per exercise id
    pub set_targets: BTreeMap<String, u32>,
    /// Selection rationale per exercise id
    pub rationale: BTreeMap<String, String>,
    /// Alignment diagnostics
    pub diagnostics: SelectionDiagnostics,
}

impl SelectionOutput {
    /// Partition a build: the first `main_lift_count` compounds become main lifts
    #[must_use]
    pub fn from_build(exercises: &[Exercise], main_lift_count: usize) -> Self {
        let mut output = Self::default();
        for exercise in exercises {
            let muscles: Vec<&str> = exercise.primary_muscles.iter().map(|m| m.as_str()).collect();
            let kind = if exercise.is_compound() {
                "compound"
            } else {
                "isolation"
            };
            let mut rationale = format!("Targets {} ({kind})", muscles.join(", "));
            if exercise.favorite {
                rationale.push_str("; user favorite");
            }

            if exercise.is_compound() && output.main_lifts.len() < main_lift_count {
                output.main_lifts.push(exercise.id.clone());
            } else {
                output.accessories.push(exercise.id.clone());
            }
            output.rationale.insert(exercise.id.clone(), rationale);
        }
        output
    }

    /// All selected ids, main lifts first
    #[must_use]
    pub fn exercise_ids(&self) -> Vec<String> {
        self.main_lifts
            .iter()
            .chain(self.accessories.iter())
            .cloned()
            .collect()
    }

    /// Number of selected exercises
    #[must_use]
    pub fn len(&self) -> usize {
        self.main_lifts.len() + self.accessories.len()
    }

    /// Whether nothing is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `id` is a main lift
    #[must_use]
    pub fn is_main_lift(&self, id: &str) -> bool {
        self.main_lifts.iter().any(|m| m == id)
    }

    /// Replace `old_id` with `new_id` in place, moving its sets and rationale
    pub(crate) fn replace(&mut self, old_id: &str, new_id: &str) {
        for slot in self.main_lifts.iter_mut().chain(self.accessories.iter_mut()) {
            if *slot == old_id {
                new_id.clone_into(slot);
            }
        }
        if let Some(sets) = self.set_targets.remove(old_id) {
            self.set_targets.insert(new_id.to_owned(), sets);
        }
        if let Some(rationale) = self.rationale.remove(old_id) {
            self.rationale.insert(new_id.to_owned(), rationale);
        }
    }
}
