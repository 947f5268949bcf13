// ABOUTME: Training block planning that partitions a mesocycle's weeks into phases by goal
// ABOUTME: Provides week-to-block lookup with a deload fallback for weeks no block covers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Contributors

use liftcycle_core::models::{BlockType, Mesocycle, TrainingBlock, TrainingGoal, VolumeTier};
use uuid::Uuid;

use crate::config::PlannerConfig;

/// Block planner
pub struct BlockPlanner;

impl BlockPlanner {
    /// Phase lengths `(type, weeks)` for a goal, deload last
    #[must_use]
    pub fn phase_layout(goal: TrainingGoal, duration_weeks: u32) -> Vec<(BlockType, u32)> {
        let accumulation_weeks = duration_weeks.saturating_sub(1);
        let mut layout = match goal {
            TrainingGoal::Strength if accumulation_weeks >= 2 => {
                let realization = 1;
                let intensification = (accumulation_weeks - realization) / 2;
                let accumulation = accumulation_weeks - realization - intensification;
                vec![
                    (BlockType::Accumulation, accumulation),
                    (BlockType::Intensification, intensification),
                    (BlockType::Realization, realization),
                ]
            }
            _ => vec![(BlockType::Accumulation, accumulation_weeks)],
        };
        if duration_weeks >= 2 {
            layout.push((BlockType::Deload, 1));
        }
        layout.retain(|(_, weeks)| *weeks > 0);
        layout
    }

    /// Create the blocks for a mesocycle, ordered by start week
    pub fn plan_blocks<F>(meso: &Mesocycle, config: &PlannerConfig, mut new_id: F) -> Vec<TrainingBlock>
    where
        F: FnMut() -> Uuid,
    {
        let mut start_week = 1;
        Self::phase_layout(meso.goal, meso.duration_weeks)
            .into_iter()
            .map(|(block_type, weeks)| {
                let block = TrainingBlock {
                    id: new_id(),
                    mesocycle_id: meso.id,
                    block_type,
                    start_week,
                    duration_weeks: weeks,
                    volume_tier: Self::volume_tier(block_type, meso.goal),
                    intensity_bias: config.for_block(block_type).intensity_bias,
                };
                start_week += weeks;
                block
            })
            .collect()
    }

    /// Block containing `week`
    #[must_use]
    pub fn block_for_week(blocks: &[TrainingBlock], week: u32) -> Option<&TrainingBlock> {
        blocks.iter().find(|b| b.contains_week(week))
    }

    /// Block type for `week`, inferring accumulation or deload when no block covers it
    #[must_use]
    pub fn block_type_for_week(blocks: &[TrainingBlock], week: u32, duration_weeks: u32) -> BlockType {
        Self::block_for_week(blocks, week).map_or_else(
            || {
                if duration_weeks >= 2 && week >= duration_weeks {
                    BlockType::Deload
                } else {
                    BlockType::Accumulation
                }
            },
            |b| b.block_type,
        )
    }

    const fn volume_tier(block_type: BlockType, goal: TrainingGoal) -> VolumeTier {
        match (block_type, goal) {
            (BlockType::Accumulation, TrainingGoal::General) | (BlockType::Intensification, _) => {
                VolumeTier::Moderate
            }
            (BlockType::Accumulation, _) => VolumeTier::High,
            (BlockType::Realization | BlockType::Deload, _) => VolumeTier::Low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_layout_covers_every_week() {
        let layout = BlockPlanner::phase_layout(TrainingGoal::Strength, 5);
        assert_eq!(
            layout,
            vec![
                (BlockType::Accumulation, 2),
                (BlockType::Intensification, 1),
                (BlockType::Realization, 1),
                (BlockType::Deload, 1),
            ]
        );
    }

    #[test]
    fn test_hypertrophy_layout() {
        let layout = BlockPlanner::phase_layout(TrainingGoal::Hypertrophy, 6);
        assert_eq!(
            layout,
            vec![(BlockType::Accumulation, 5), (BlockType::Deload, 1)]
        );
    }
}
