// ABOUTME: Static volume landmark reference table in weekly working sets
// ABOUTME: Values follow commonly published hypertrophy landmarks for intermediate trainees
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

use crate::models::muscle::{Muscle, VolumeLandmarks};

const fn lm(mv: u32, mev: u32, mav: u32, mrv: u32) -> VolumeLandmarks {
    VolumeLandmarks { mv, mev, mav, mrv }
}

/// Default MV/MEV/MAV/MRV for a muscle
///
/// Front delts carry an MEV of zero because pressing covers them.
#[must_use]
pub const fn default_landmarks(muscle: Muscle) -> VolumeLandmarks {
    match muscle {
        Muscle::Chest => lm(8, 10, 16, 22),
        Muscle::FrontDelts => lm(0, 0, 8, 12),
        Muscle::SideDelts => lm(6, 8, 19, 26),
        Muscle::RearDelts => lm(0, 6, 16, 26),
        Muscle::Lats => lm(6, 10, 16, 22),
        Muscle::UpperBack => lm(6, 10, 16, 25),
        Muscle::Traps => lm(0, 4, 16, 26),
        Muscle::Biceps => lm(5, 8, 17, 26),
        Muscle::Triceps => lm(4, 6, 12, 18),
        Muscle::Forearms => lm(0, 2, 10, 20),
        Muscle::Quads => lm(6, 8, 15, 20),
        Muscle::Hamstrings => lm(3, 6, 13, 20),
        Muscle::Glutes => lm(0, 4, 12, 16),
        Muscle::Calves => lm(6, 8, 14, 20),
        Muscle::Abs => lm(0, 4, 16, 25),
        Muscle::LowerBack => lm(0, 2, 6, 10),
        Muscle::Adductors => lm(0, 2, 8, 14),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_default_ascends() {
        for muscle in Muscle::ALL {
            assert!(default_landmarks(muscle).validate().is_ok(), "{muscle}");
        }
    }
}
