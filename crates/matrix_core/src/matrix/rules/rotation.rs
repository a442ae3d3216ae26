//! Rule set 1: every row is the previous row rotated by 90 degrees.
//!
//! The top row holds three unrelated single shapes; only the rotation
//! carries information down each column.

use super::{draw_color, draw_shape, MatrixBuild, MatrixGrid, RuleParams, RuleStrategy};
use crate::matrix::catalog::RuleSetId;
use crate::matrix::cell::{CellContent, Rotation};
use crate::matrix::primitives::{rotate, RotationStep};
use crate::matrix::rng::PuzzleRng;

#[derive(Debug, Clone, Copy, Default)]
pub struct RotationRule;

impl RuleStrategy for RotationRule {
    fn rule_set(&self) -> RuleSetId {
        RuleSetId::Rotation90Only
    }

    fn build(&self, _level: u8, rng: &mut dyn PuzzleRng) -> MatrixBuild {
        let kind = draw_shape(rng);
        let color = draw_color(rng);
        let first = CellContent::single(kind, color, 1, Rotation::Deg0);

        let mut top = vec![first.clone()];
        for _ in 1..3 {
            let kind = draw_shape(rng);
            let color = draw_color(rng);
            top.push(first.with_kind(kind).with_color(color));
        }

        let step = RotationStep::Quarter;
        let mut grid = MatrixGrid::filled(first);
        for (col, cell) in top.into_iter().enumerate() {
            let middle = rotate(&cell, step);
            let bottom = rotate(&middle, step);
            grid.set(0, col, cell);
            grid.set(1, col, middle);
            grid.set(2, col, bottom);
        }

        MatrixBuild {
            grid,
            params: RuleParams {
                base_count: 1,
                rotation_step: Some(step),
                ..RuleParams::default()
            },
        }
    }

    fn propose_distractor(
        &self,
        build: &MatrixBuild,
        rng: &mut dyn PuzzleRng,
    ) -> Option<CellContent> {
        let target = build.target();
        let turns = rng.int_in_range(1, 2) as i64;
        let rotation = target.rotation.turned(turns);
        if rotation == target.rotation {
            return None;
        }
        Some(target.with_rotation(rotation))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{distractor_signatures, for_each_build};
    use super::*;

    #[test]
    fn test_columns_rotate_by_quarter_turns() {
        for_each_build(&RotationRule, |_, build| {
            for col in 0..3 {
                assert_eq!(build.grid.get(0, col).rotation, Rotation::Deg0);
                assert_eq!(build.grid.get(1, col).rotation, Rotation::Deg90);
                assert_eq!(build.grid.get(2, col).rotation, Rotation::Deg180);
                assert_eq!(build.grid.get(2, col).kind(), build.grid.get(0, col).kind());
            }
            assert_eq!(build.target().count, 1);
        });
    }

    #[test]
    fn test_distractors_only_change_rotation() {
        for_each_build(&RotationRule, |_, build| {
            let sigs = distractor_signatures(&RotationRule, build, 30);
            let truth = build.target().signature(1).to_string();
            assert!(!sigs.contains(&truth));
            // +90 and +180 from the target.
            assert_eq!(sigs.len(), 2);
        });
    }
}
