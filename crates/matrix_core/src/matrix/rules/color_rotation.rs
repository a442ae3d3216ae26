//! Rule set 6: colors progress across each row, rotation steps down each
//! column by 90 degrees.

use super::color::{wrong_color, COLOR_CYCLE_BY_LEVEL};
use super::{
    draw_by_level, draw_cycle, draw_shape, MatrixBuild, MatrixGrid, RuleParams, RuleStrategy,
};
use crate::matrix::catalog::RuleSetId;
use crate::matrix::cell::{CellContent, Rotation, ShapeColor};
use crate::matrix::primitives::{color_progression, rotate, RotationStep};
use crate::matrix::rng::PuzzleRng;

#[derive(Debug, Clone, Copy, Default)]
pub struct ColorRotationRule;

impl RuleStrategy for ColorRotationRule {
    fn rule_set(&self) -> RuleSetId {
        RuleSetId::Rotation90AndColor
    }

    fn build(&self, level: u8, rng: &mut dyn PuzzleRng) -> MatrixBuild {
        let kind = draw_shape(rng);
        let len = draw_by_level(rng, level, COLOR_CYCLE_BY_LEVEL);
        let cycle = draw_cycle(rng, &ShapeColor::ALL, len, 2);

        let step = RotationStep::Quarter;
        let first = CellContent::single(kind, cycle[0], 1, Rotation::Deg0);
        let mut row_starts = vec![first];
        for row in 1..3 {
            let next = rotate(&row_starts[row - 1], step);
            row_starts.push(next);
        }
        let grid =
            MatrixGrid::from_fn(|row, col| color_progression(&row_starts[row], &cycle, col));

        MatrixBuild {
            grid,
            params: RuleParams {
                base_count: 1,
                rotation_step: Some(step),
                color_cycle: cycle,
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
        if rng.int_in_range(0, 1) == 0 {
            let rotation = target.rotation.turned(rng.int_in_range(1, 2) as i64);
            if rotation == target.rotation {
                return None;
            }
            Some(target.with_rotation(rotation))
        } else {
            wrong_color(target, &build.params.color_cycle, rng)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{distractor_signatures, for_each_build};
    use super::*;

    #[test]
    fn test_target_combines_both_rules() {
        for_each_build(&ColorRotationRule, |_, build| {
            let cycle = &build.params.color_cycle;
            let target = build.target();
            assert_eq!(target.color(), Some(cycle[2]));
            assert_eq!(target.rotation, Rotation::Deg180);
            assert_eq!(build.grid.get(1, 1).rotation, Rotation::Deg90);
            assert_eq!(build.grid.get(1, 1).color(), Some(cycle[1]));
        });
    }

    #[test]
    fn test_distractors_break_one_attribute() {
        for_each_build(&ColorRotationRule, |_, build| {
            let target = build.target();
            let mut rng = crate::matrix::rng::SeededRng::from_seed("one-attr");
            for _ in 0..50 {
                if let Some(d) = ColorRotationRule.propose_distractor(build, &mut rng) {
                    let rotation_changed = d.rotation != target.rotation;
                    let color_changed = d.color() != target.color();
                    assert!(rotation_changed ^ color_changed);
                }
            }
            let sigs = distractor_signatures(&ColorRotationRule, build, 200);
            assert_eq!(sigs.len(), 2 + build.params.color_cycle.len() - 1);
        });
    }
}
