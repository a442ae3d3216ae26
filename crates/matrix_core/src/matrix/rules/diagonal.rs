//! Rule set 10: count grows across each row, rotation steps 90 degrees down
//! each column, and every top-left to bottom-right diagonal shares one
//! color.

use super::color::{wrong_color, COLOR_CYCLE_BY_LEVEL};
use super::sum::{BASE_COUNT_BY_LEVEL, DELTA_BY_LEVEL};
use super::{
    draw_by_level, draw_cycle, draw_shape, MatrixBuild, MatrixGrid, RuleParams, RuleStrategy,
};
use crate::matrix::catalog::RuleSetId;
use crate::matrix::cell::{CellContent, Rotation, ShapeColor};
use crate::matrix::primitives::{wrong_delta, RotationStep};
use crate::matrix::rng::PuzzleRng;

#[derive(Debug, Clone, Copy, Default)]
pub struct DiagonalColorRule;

fn diagonal_index(row: usize, col: usize, len: usize) -> usize {
    (col as i64 - row as i64).rem_euclid(len as i64) as usize
}

impl RuleStrategy for DiagonalColorRule {
    fn rule_set(&self) -> RuleSetId {
        RuleSetId::SumRotationDiagonalColor
    }

    fn build(&self, level: u8, rng: &mut dyn PuzzleRng) -> MatrixBuild {
        let kind = draw_shape(rng);
        let base = draw_by_level(rng, level, BASE_COUNT_BY_LEVEL).max(1);
        let delta = draw_by_level(rng, level, DELTA_BY_LEVEL).max(1);
        let len = draw_by_level(rng, level, COLOR_CYCLE_BY_LEVEL);
        let cycle = draw_cycle(rng, &ShapeColor::ALL, len, 2);

        let step = RotationStep::Quarter;
        let grid = MatrixGrid::from_fn(|row, col| {
            CellContent::single(
                kind,
                cycle[diagonal_index(row, col, cycle.len())],
                (base + col as i32 * delta) as u32,
                Rotation::from_quarter_turns(row as i64 * step.quarter_turns()),
            )
        });

        MatrixBuild {
            grid,
            params: RuleParams {
                base_count: base as u32,
                delta,
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
        let params = &build.params;
        match rng.int_in_range(0, 2) {
            0 => {
                let wrong = wrong_delta(rng, params.delta);
                let middle = params.base_count as i32 + params.delta;
                Some(target.with_count((middle + wrong).max(1) as u32))
            }
            1 => {
                let turns = rng.int_in_range(1, 3) as i64;
                Some(target.with_rotation(target.rotation.turned(turns)))
            }
            _ => wrong_color(target, &params.color_cycle, rng),
        }
    }
}
