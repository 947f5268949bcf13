// ABOUTME: Coverage and quality analysis of a built session on a 0-100 scale
// ABOUTME: Blends target coverage, movement-pattern diversity, and compound/isolation balance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

use std::collections::BTreeSet;

use liftcycle_core::models::{Exercise, MovementPattern, Muscle};
use serde::{Deserialize, Serialize};

use crate::config::QualityThresholds;

const COVERAGE_POINTS: f64 = 70.0;
const DIVERSITY_POINTS: f64 = 20.0;
const BALANCE_POINTS: f64 = 10.0;

/// Qualitative build label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityLabel {
    /// Full coverage with varied patterns
    Excellent,
    /// Minor gaps
    Good,
    /// Noticeable gaps
    Fair,
    /// Most targets missed
    Poor,
}

/// Analysis of a build for caller display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildAnalysis {
    /// Quality score, 0-100
    pub score: f64,
    /// Label for `score`
    pub label: QualityLabel,
    /// Fraction of targets hit, secondary-only hits counting half
    pub coverage_ratio: f64,
    /// Targets hit by a primary muscle
    pub covered_targets: Vec<Muscle>,
    /// Targets not hit at all
    pub uncovered_targets: Vec<Muscle>,
    /// Distinct movement patterns
    pub pattern_count: usize,
    /// Compound exercises selected
    pub compound_count: usize,
    /// Isolation exercises selected
    pub isolation_count: usize,
}

/// Analyze a finished build
#[must_use]
pub fn analyze_build(
    targets: &[Muscle],
    selected: &[Exercise],
    thresholds: &QualityThresholds,
) -> BuildAnalysis {
    let primary: BTreeSet<Muscle> = selected
        .iter()
        .flat_map(|e| e.primary_muscles.iter().copied())
        .collect();
    let secondary: BTreeSet<Muscle> = selected
        .iter()
        .flat_map(|e| e.secondary_muscles.iter().copied())
        .collect();

    let covered_targets: Vec<Muscle> = targets.iter().copied().filter(|m| primary.contains(m)).collect();
    let partial = targets
        .iter()
        .filter(|m| !primary.contains(m) && secondary.contains(m))
        .count();
    let uncovered_targets: Vec<Muscle> = targets
        .iter()
        .copied()
        .filter(|m| !primary.contains(m) && !secondary.contains(m))
        .collect();

    let coverage_ratio = if targets.is_empty() {
        if selected.is_empty() {
            0.0
        } else {
            1.0
        }
    } else {
        (covered_targets.len() as f64 + 0.5 * partial as f64) / targets.len() as f64
    };

    let patterns: BTreeSet<MovementPattern> = selected
        .iter()
        .flat_map(|e| e.movement_patterns.iter().copied())
        .collect();
    let compound_count = selected.iter().filter(|e| e.is_compound()).count();
    let isolation_count = selected.len() - compound_count;

    let (diversity, balance) = if selected.is_empty() {
        (0.0, 0.0)
    } else {
        let n = selected.len() as f64;
        let diversity = (patterns.len() as f64 / n).min(1.0);
        let balance = if selected.len() == 1 {
            1.0
        } else {
            (2.0 * compound_count.min(isolation_count) as f64 / n).min(1.0)
        };
        (diversity, balance)
    };

    let score = BALANCE_POINTS
        .mul_add(
            balance,
            DIVERSITY_POINTS.mul_add(diversity, COVERAGE_POINTS * coverage_ratio),
        )
        .clamp(0.0, 100.0);

    BuildAnalysis {
        score,
        label: label_for(score, thresholds),
        coverage_ratio,
        covered_targets,
        uncovered_targets,
        pattern_count: patterns.len(),
        compound_count,
        isolation_count,
    }
}

fn label_for(score: f64, thresholds: &QualityThresholds) -> QualityLabel {
    if score >= thresholds.excellent {
        QualityLabel::Excellent
    } else if score >= thresholds.good {
        QualityLabel::Good
    } else if score >= thresholds.fair {
        QualityLabel::Fair
    } else {
        QualityLabel::Poor
    }
}
