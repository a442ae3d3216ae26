//! Rule sets 4, 5 and 11: count grows across each row while every row is
//! the row above rotated by a fixed increment.

use super::{
    draw_by_level, draw_color, draw_cycle, MatrixBuild, MatrixGrid, RuleParams, RuleStrategy,
};
use crate::matrix::catalog::RuleSetId;
use crate::matrix::cell::{CellContent, Rotation, ShapeKind};
use crate::matrix::primitives::{rotate, sum, sum_target, wrong_delta, RotationStep};
use crate::matrix::rng::PuzzleRng;

pub const BASE_COUNT_BY_LEVEL: [(i32, i32); 3] = [(1, 3), (2, 4), (3, 5)];
pub const DELTA_BY_LEVEL: [(i32, i32); 3] = [(1, 2), (1, 3), (2, 3)];
/// Number of shape kinds the base shape is picked from.
pub const SHAPE_POOL_BY_LEVEL: [(i32, i32); 3] = [(2, 3), (3, 4), (4, 4)];

#[derive(Debug, Clone, Copy)]
pub struct SumRotationRule {
    rule_set: RuleSetId,
    step: RotationStep,
}

impl SumRotationRule {
    pub fn new(rule_set: RuleSetId, step: RotationStep) -> Self {
        Self { rule_set, step }
    }
}

impl RuleStrategy for SumRotationRule {
    fn rule_set(&self) -> RuleSetId {
        self.rule_set
    }

    fn build(&self, level: u8, rng: &mut dyn PuzzleRng) -> MatrixBuild {
        let base = draw_by_level(rng, level, BASE_COUNT_BY_LEVEL).max(0) as u32;
        let delta = draw_by_level(rng, level, DELTA_BY_LEVEL).max(1);
        let pool_len = draw_by_level(rng, level, SHAPE_POOL_BY_LEVEL);
        let pool = draw_cycle(rng, &ShapeKind::ALL, pool_len, 1);
        let kind = pool[rng.index(pool.len())];
        let color = draw_color(rng);

        let first = CellContent::single(kind, color, base, Rotation::Deg0);
        let mut grid = MatrixGrid::filled(first.clone());
        let mut row_start = first;
        for row in 0..3 {
            if row > 0 {
                row_start = rotate(&row_start, self.step);
            }
            let mut cell = row_start.clone();
            grid.set(row, 0, cell.clone());
            for col in 1..3 {
                cell = sum(&cell, delta);
                grid.set(row, col, cell.clone());
            }
        }

        let target = rotate(grid.get(1, 2), self.step)
            .with_count(sum_target(grid.get(2, 1), delta).count);
        grid.set(2, 2, target);

        MatrixBuild {
            grid,
            params: RuleParams {
                base_count: base,
                delta,
                rotation_step: Some(self.step),
                shape_cycle: pool,
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
        let mut candidate = if rng.int_in_range(0, 1) == 0 {
            let wrong = wrong_delta(rng, build.params.delta);
            build
                .grid
                .get(2, 1)
                .with_count_delta(wrong)
                .with_rotation(target.rotation)
        } else {
            let turns = match self.step {
                RotationStep::Quarter => rng.int_in_range(1, 3) as i64,
                RotationStep::Half => 2,
            };
            target.with_rotation(target.rotation.turned(turns))
        };
        if candidate.count == 0 {
            candidate = candidate.with_count(1);
        }
        Some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{distractor_signatures, for_each_build};
    use super::*;

    fn quarter() -> SumRotationRule {
        SumRotationRule::new(RuleSetId::SumAndRotation90, RotationStep::Quarter)
    }

    fn half() -> SumRotationRule {
        SumRotationRule::new(RuleSetId::SumAndRotation180, RotationStep::Half)
    }

    #[test]
    fn test_rows_sum_and_columns_rotate() {
        for_each_build(&quarter(), |_, build| {
            let p = &build.params;
            for row in 0..3 {
                for col in 0..3 {
                    let cell = build.grid.get(row, col);
                    assert_eq!(cell.count as i32, p.base_count as i32 + col as i32 * p.delta);
                    assert_eq!(cell.rotation, Rotation::from_quarter_turns(row as i64));
                }
            }
        });
    }

    #[test]
    fn test_half_turn_rows_alternate() {
        for_each_build(&half(), |_, build| {
            assert_eq!(build.grid.get(1, 0).rotation, Rotation::Deg180);
            assert_eq!(build.grid.get(2, 0).rotation, Rotation::Deg0);
            assert_eq!(build.target().rotation, Rotation::Deg0);
        });
    }

    #[test]
    fn test_base_shape_comes_from_pool() {
        for_each_build(&quarter(), |level, build| {
            let pool = &build.params.shape_cycle;
            let (lo, hi) = SHAPE_POOL_BY_LEVEL[level as usize - 1];
            assert!(pool.len() as i32 >= lo && pool.len() as i32 <= hi);
            assert!(pool.contains(&build.target().kind().unwrap()));
        });
    }

    #[test]
    fn test_distractors_differ_from_target() {
        let rule = quarter();
        for_each_build(&rule, |_, build| {
            let truth = build.target().signature(4).to_string();
            let sigs = distractor_signatures(&rule, build, 100);
            assert!(!sigs.contains(&truth));
            // delta of 1 has a single wrong delta (2); three wrong rotations
            let wrong_counts = if build.params.delta == 1 { 1 } else { 2 };
            assert_eq!(sigs.len(), wrong_counts + 3);
        });
    }
}
