// ABOUTME: Exercise selection candidates with muscles, movement patterns, equipment, and tags
// ABOUTME: Also defines session intents and the split tags used to judge intent compatibility
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::muscle::{BodyRegion, Muscle};
use crate::errors::AppError;

/// Fundamental movement pattern of an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementPattern {
    /// Pressing away from the torso horizontally
    HorizontalPush,
    /// Pressing overhead
    VerticalPush,
    /// Rowing toward the torso
    HorizontalPull,
    /// Pulling down from overhead
    VerticalPull,
    /// Knee-dominant lower body
    Squat,
    /// Hip-dominant lower body
    Hinge,
    /// Single-leg work
    Lunge,
    /// Elbow flexion
    ElbowFlexion,
    /// Elbow extension
    ElbowExtension,
    /// Shoulder abduction and raises
    ShoulderIsolation,
    /// Knee flexion or extension on a machine
    KneeIsolation,
    /// Ankle plantar flexion
    CalfRaise,
    /// Trunk flexion or anti-extension
    CoreFlexion,
    /// Anti-rotation and carries
    CoreStability,
}

/// Equipment an exercise may require
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    /// Olympic barbell
    Barbell,
    /// Dumbbells
    Dumbbell,
    /// Cable stack
    Cable,
    /// Selectorized or plate-loaded machine
    Machine,
    /// Pull-up bar or dip station
    Bodyweight,
    /// Kettlebell
    Kettlebell,
    /// Resistance bands
    Band,
    /// Adjustable bench
    Bench,
    /// Squat or power rack
    Rack,
}

/// Compound or isolation mechanics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mechanics {
    /// Multi-joint movement
    Compound,
    /// Single-joint movement
    Isolation,
}

/// Split-compatibility tag attached to an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitTag {
    /// Push day
    Push,
    /// Pull day
    Pull,
    /// Leg day
    Legs,
    /// Core work
    Core,
    /// Upper day
    Upper,
    /// Lower day
    Lower,
    /// Full-body day
    FullBody,
}

/// Requested focus of a training session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionIntent {
    /// Chest, shoulders, triceps
    Push,
    /// Back, rear delts, biceps
    Pull,
    /// Lower body
    Legs,
    /// Entire upper body
    Upper,
    /// Entire lower body
    Lower,
    /// Whole body
    FullBody,
    /// Explicit target muscles only
    BodyPart,
}

impl SessionIntent {
    /// Canonical snake_case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Pull => "pull",
            Self::Legs => "legs",
            Self::Upper => "upper",
            Self::Lower => "lower",
            Self::FullBody => "full_body",
            Self::BodyPart => "body_part",
        }
    }

    /// Tags that mark an exercise as belonging to this intent
    ///
    /// A generic `upper` tag does not place an exercise in a push or pull
    /// session; only the matching specific tag does.
    #[must_use]
    pub const fn compatible_tags(self) -> &'static [SplitTag] {
        match self {
            Self::Push => &[SplitTag::Push],
            Self::Pull => &[SplitTag::Pull],
            Self::Legs => &[SplitTag::Legs, SplitTag::Lower],
            Self::Upper => &[SplitTag::Push, SplitTag::Pull, SplitTag::Upper],
            Self::Lower => &[SplitTag::Legs, SplitTag::Lower],
            Self::FullBody => &[
                SplitTag::Push,
                SplitTag::Pull,
                SplitTag::Legs,
                SplitTag::Core,
                SplitTag::Upper,
                SplitTag::Lower,
                SplitTag::FullBody,
            ],
            Self::BodyPart => &[],
        }
    }

    /// Muscles whose primary involvement aligns an exercise with this intent
    #[must_use]
    pub fn profile_muscles(self) -> Vec<Muscle> {
        let group = match self {
            Self::Push => "push",
            Self::Pull => "pull",
            Self::Legs | Self::Lower => "legs",
            Self::Upper => "upper",
            Self::FullBody => "full_body",
            Self::BodyPart => return Vec::new(),
        };
        super::muscle::expand_group(group).unwrap_or_default()
    }
}

impl fmt::Display for SessionIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionIntent {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "push" => Ok(Self::Push),
            "pull" => Ok(Self::Pull),
            "legs" => Ok(Self::Legs),
            "upper" => Ok(Self::Upper),
            "lower" => Ok(Self::Lower),
            "full_body" | "fullbody" => Ok(Self::FullBody),
            "body_part" | "bodypart" => Ok(Self::BodyPart),
            _ => Err(AppError::invalid_input(format!("Unknown session intent: {s}"))),
        }
    }
}

/// A candidate exercise as seen by the selection engine
///
/// Favorite and avoided flags are per-user overlays applied by the pool
/// collaborator before the engine sees the candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    /// Stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Muscles doing most of the work
    pub primary_muscles: Vec<Muscle>,
    /// Muscles assisting
    #[serde(default)]
    pub secondary_muscles: Vec<Muscle>,
    /// Movement patterns trained
    #[serde(default)]
    pub movement_patterns: Vec<MovementPattern>,
    /// Equipment required (any single item suffices)
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    /// Compound or isolation
    pub mechanics: Mechanics,
    /// User marked this exercise as a favorite
    #[serde(default)]
    pub favorite: bool,
    /// User asked never to be given this exercise
    #[serde(default)]
    pub avoided: bool,
    /// Split categories this exercise belongs to
    #[serde(default)]
    pub split_tags: Vec<SplitTag>,
}

impl Exercise {
    /// Whether the exercise is multi-joint
    #[must_use]
    pub fn is_compound(&self) -> bool {
        self.mechanics == Mechanics::Compound
    }

    /// Whether any primary muscle is in `targets`
    #[must_use]
    pub fn hits_primary(&self, targets: &BTreeSet<Muscle>) -> bool {
        self.primary_muscles.iter().any(|m| targets.contains(m))
    }

    /// Whether any primary muscle belongs to `region`
    #[must_use]
    pub fn trains_region(&self, region: BodyRegion) -> bool {
        self.primary_muscles.iter().any(|m| m.region() == region)
    }

    /// Whether the exercise's tags place it in `intent`
    ///
    /// Untagged exercises carry no category and are never tag-incompatible.
    #[must_use]
    pub fn tag_compatible(&self, intent: SessionIntent) -> bool {
        if self.split_tags.is_empty() || intent == SessionIntent::BodyPart {
            return true;
        }
        self.has_intent_tag(intent)
    }

    /// Whether the exercise carries a tag belonging to `intent`
    #[must_use]
    pub fn has_intent_tag(&self, intent: SessionIntent) -> bool {
        self.split_tags
            .iter()
            .any(|tag| intent.compatible_tags().contains(tag))
    }
}

/// Recent-use history for one exercise, supplied by the exposure collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseExposure {
    /// Exercise identifier
    pub exercise_id: String,
    /// Most recent session that used the exercise
    pub last_used: DateTime<Utc>,
    /// Sessions using the exercise since the start of the exposure window
    pub recent_uses: u32,
}
