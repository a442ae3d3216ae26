//! Rule set 2: the count grows by a fixed delta across each row.
//!
//! All three rows are identical, so the target is `base + 2 * delta`.
//! Draw order: shape, color, base count, delta.

use super::{
    draw_by_level, draw_color, draw_shape, MatrixBuild, MatrixGrid, RuleParams, RuleStrategy,
};
use crate::matrix::catalog::RuleSetId;
use crate::matrix::cell::{CellContent, Rotation};
use crate::matrix::primitives::{sum, sum_target, wrong_delta};
use crate::matrix::rng::PuzzleRng;

/// Base count range per level.
pub const BASE_COUNT_BY_LEVEL: [(i32, i32); 3] = [(1, 3), (2, 4), (3, 5)];
/// Count delta range per level.
pub const DELTA_BY_LEVEL: [(i32, i32); 3] = [(1, 2), (1, 3), (2, 3)];

#[derive(Debug, Clone, Copy, Default)]
pub struct SumRule;

impl RuleStrategy for SumRule {
    fn rule_set(&self) -> RuleSetId {
        RuleSetId::SumOnly
    }

    fn build(&self, level: u8, rng: &mut dyn PuzzleRng) -> MatrixBuild {
        let kind = draw_shape(rng);
        let color = draw_color(rng);
        let base = draw_by_level(rng, level, BASE_COUNT_BY_LEVEL).max(0) as u32;
        let delta = draw_by_level(rng, level, DELTA_BY_LEVEL).max(1);

        let first = CellContent::single(kind, color, base, Rotation::Deg0);
        let second = sum(&first, delta);
        let third = sum(&second, delta);
        let row = [first, second, third];

        let mut grid = MatrixGrid::from_fn(|_, col| row[col].clone());
        let target = sum_target(grid.get(2, 1), delta);
        grid.set(2, 2, target);

        MatrixBuild {
            grid,
            params: RuleParams {
                base_count: base,
                delta,
                ..RuleParams::default()
            },
        }
    }

    fn propose_distractor(
        &self,
        build: &MatrixBuild,
        rng: &mut dyn PuzzleRng,
    ) -> Option<CellContent> {
        let delta = build.params.delta;
        let wrong = wrong_delta(rng, delta);
        let mut candidate = build.grid.get(2, 1).with_count_delta(wrong);
        if candidate.count == 0 {
            candidate = candidate.with_count(1);
        }
        if candidate.count == build.target().count && wrong.abs() != delta.abs() {
            return None;
        }
        Some(candidate)
    }
}
