// ABOUTME: Muscle taxonomy with body regions, coarse group resolution, and volume landmarks
// ABOUTME: Maps storage and user-facing muscle names onto a single typed enum
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Fine-grained muscle targeted by volume prescriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Muscle {
    /// Pectorals
    Chest,
    /// Anterior deltoid
    FrontDelts,
    /// Lateral deltoid
    SideDelts,
    /// Posterior deltoid
    RearDelts,
    /// Latissimus dorsi
    Lats,
    /// Rhomboids and mid traps
    UpperBack,
    /// Upper trapezius
    Traps,
    /// Elbow flexors
    Biceps,
    /// Elbow extensors
    Triceps,
    /// Wrist flexors and extensors
    Forearms,
    /// Knee extensors
    Quads,
    /// Knee flexors
    Hamstrings,
    /// Hip extensors
    Glutes,
    /// Plantar flexors
    Calves,
    /// Trunk flexors
    Abs,
    /// Spinal erectors
    LowerBack,
    /// Hip adductors
    Adductors,
}

/// Coarse anatomical region used for full-body coverage checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyRegion {
    /// Torso and arms
    Upper,
    /// Hips and legs
    Lower,
    /// Trunk
    Core,
}

impl fmt::Display for BodyRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Upper => "upper",
            Self::Lower => "lower",
            Self::Core => "core",
        };
        f.write_str(label)
    }
}

impl Muscle {
    /// Every muscle, in declaration order
    pub const ALL: [Self; 17] = [
        Self::Chest,
        Self::FrontDelts,
        Self::SideDelts,
        Self::RearDelts,
        Self::Lats,
        Self::UpperBack,
        Self::Traps,
        Self::Biceps,
        Self::Triceps,
        Self::Forearms,
        Self::Quads,
        Self::Hamstrings,
        Self::Glutes,
        Self::Calves,
        Self::Abs,
        Self::LowerBack,
        Self::Adductors,
    ];

    /// Canonical snake_case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chest => "chest",
            Self::FrontDelts => "front_delts",
            Self::SideDelts => "side_delts",
            Self::RearDelts => "rear_delts",
            Self::Lats => "lats",
            Self::UpperBack => "upper_back",
            Self::Traps => "traps",
            Self::Biceps => "biceps",
            Self::Triceps => "triceps",
            Self::Forearms => "forearms",
            Self::Quads => "quads",
            Self::Hamstrings => "hamstrings",
            Self::Glutes => "glutes",
            Self::Calves => "calves",
            Self::Abs => "abs",
            Self::LowerBack => "lower_back",
            Self::Adductors => "adductors",
        }
    }

    /// Body region this muscle belongs to
    #[must_use]
    pub const fn region(self) -> BodyRegion {
        match self {
            Self::Quads | Self::Hamstrings | Self::Glutes | Self::Calves | Self::Adductors => {
                BodyRegion::Lower
            }
            Self::Abs | Self::LowerBack => BodyRegion::Core,
            _ => BodyRegion::Upper,
        }
    }
}

impl fmt::Display for Muscle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize user or storage casing (`FRONT_DELTS`, `front delts`, `Front-Delts`)
fn normalize_token(raw: &str) -> String {
    raw.trim().to_lowercase().replace([' ', '-'], "_")
}

impl FromStr for Muscle {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = normalize_token(s);
        let muscle = match token.as_str() {
            "chest" | "pecs" => Self::Chest,
            "front_delts" | "anterior_delts" => Self::FrontDelts,
            "side_delts" | "lateral_delts" => Self::SideDelts,
            "rear_delts" | "posterior_delts" => Self::RearDelts,
            "lats" => Self::Lats,
            "upper_back" | "rhomboids" => Self::UpperBack,
            "traps" => Self::Traps,
            "biceps" => Self::Biceps,
            "triceps" => Self::Triceps,
            "forearms" => Self::Forearms,
            "quads" | "quadriceps" => Self::Quads,
            "hamstrings" => Self::Hamstrings,
            "glutes" => Self::Glutes,
            "calves" => Self::Calves,
            "abs" | "abdominals" => Self::Abs,
            "lower_back" | "erectors" => Self::LowerBack,
            "adductors" => Self::Adductors,
            _ => return Err(AppError::invalid_input(format!("Unknown muscle: {s}"))),
        };
        Ok(muscle)
    }
}

/// Expand a coarse group name into the fine muscles it comprises
///
/// Returns `None` when the token is not a coarse group name.
#[must_use]
pub fn expand_group(token: &str) -> Option<Vec<Muscle>> {
    use Muscle::{
        Abs, Adductors, Biceps, Calves, Chest, Forearms, FrontDelts, Glutes, Hamstrings, Lats,
        LowerBack, Quads, RearDelts, SideDelts, Traps, Triceps, UpperBack,
    };

    let muscles = match normalize_token(token).as_str() {
        "back" => vec![Lats, UpperBack, Traps, LowerBack],
        "shoulders" | "delts" => vec![FrontDelts, SideDelts, RearDelts],
        "arms" => vec![Biceps, Triceps, Forearms],
        "legs" => vec![Quads, Hamstrings, Glutes, Calves, Adductors],
        "core" => vec![Abs, LowerBack],
        "push" => vec![Chest, FrontDelts, SideDelts, Triceps],
        "pull" => vec![Lats, UpperBack, Traps, RearDelts, Biceps, Forearms],
        "upper" => Muscle::ALL
            .into_iter()
            .filter(|m| m.region() == BodyRegion::Upper)
            .collect(),
        "lower" => Muscle::ALL
            .into_iter()
            .filter(|m| m.region() == BodyRegion::Lower)
            .collect(),
        "full_body" | "full" => Muscle::ALL.to_vec(),
        _ => return None,
    };
    Some(muscles)
}

/// Resolve coarse group and fine muscle names into a deduplicated muscle list
///
/// First-seen order is preserved so callers get a stable target ordering.
///
/// # Errors
///
/// Returns an invalid-input error for a token that is neither a group nor a muscle.
pub fn resolve_muscle_groups<S: AsRef<str>>(tokens: &[S]) -> AppResult<Vec<Muscle>> {
    let mut resolved: Vec<Muscle> = Vec::new();
    for token in tokens {
        let token = token.as_ref();
        let expanded = match expand_group(token) {
            Some(group) => group,
            None => vec![token.parse::<Muscle>()?],
        };
        for muscle in expanded {
            if !resolved.contains(&muscle) {
                resolved.push(muscle);
            }
        }
    }
    Ok(resolved)
}

/// Weekly working-set landmarks for one muscle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeLandmarks {
    /// Maintenance volume
    pub mv: u32,
    /// Minimum effective volume
    pub mev: u32,
    /// Maximum adaptive volume
    pub mav: u32,
    /// Maximum recoverable volume
    pub mrv: u32,
}

impl VolumeLandmarks {
    /// Construct landmarks, rejecting non-ascending values
    ///
    /// # Errors
    ///
    /// Returns a value-out-of-range error unless `mv <= mev <= mav <= mrv`.
    pub fn new(mv: u32, mev: u32, mav: u32, mrv: u32) -> AppResult<Self> {
        let landmarks = Self { mv, mev, mav, mrv };
        landmarks.validate()?;
        Ok(landmarks)
    }

    /// Check that the landmarks ascend
    ///
    /// # Errors
    ///
    /// Returns a value-out-of-range error when ordering is violated.
    pub fn validate(&self) -> AppResult<()> {
        if self.mv <= self.mev && self.mev <= self.mav && self.mav <= self.mrv {
            Ok(())
        } else {
            Err(AppError::out_of_range(format!(
                "Landmarks must ascend (mv {} / mev {} / mav {} / mrv {})",
                self.mv, self.mev, self.mav, self.mrv
            )))
        }
    }

    /// Whether callers should leave this muscle out of targeting
    #[must_use]
    pub const fn is_untargeted(&self) -> bool {
        self.mev == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_storage_casing() {
        assert_eq!("FRONT_DELTS".parse::<Muscle>().ok(), Some(Muscle::FrontDelts));
        assert_eq!("rear delts".parse::<Muscle>().ok(), Some(Muscle::RearDelts));
        assert!("wings".parse::<Muscle>().is_err());
    }

    #[test]
    fn test_resolve_dedups_overlapping_groups() {
        let resolved = resolve_muscle_groups(&["back", "core"]).unwrap_or_default();
        let lower_back = resolved.iter().filter(|m| **m == Muscle::LowerBack).count();
        assert_eq!(lower_back, 1);
        assert_eq!(resolved.first(), Some(&Muscle::Lats));
    }

    #[test]
    fn test_landmarks_reject_descending() {
        assert!(VolumeLandmarks::new(8, 10, 16, 22).is_ok());
        assert!(VolumeLandmarks::new(8, 18, 16, 22).is_err());
    }
}
