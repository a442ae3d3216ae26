//! Rule set 7: three rules at once. Count grows across each row, the shape
//! cycles down the rows, and the color walks one cycle over the whole
//! matrix in reading order.

use super::color::wrong_color;
use super::{draw_by_level, draw_cycle, MatrixBuild, MatrixGrid, RuleParams, RuleStrategy};
use crate::matrix::catalog::RuleSetId;
use crate::matrix::cell::{CellContent, Rotation, ShapeColor, ShapeKind};
use crate::matrix::primitives::{cycle_position, wrong_cycle_index, wrong_delta};
use crate::matrix::rng::PuzzleRng;

pub const BASE_COUNT_BY_LEVEL: [(i32, i32); 3] = [(1, 1), (1, 2), (1, 2)];
pub const DELTA_BY_LEVEL: [(i32, i32); 3] = [(1, 2), (1, 2), (2, 2)];
pub const SHAPE_CYCLE_BY_LEVEL: [(i32, i32); 3] = [(2, 3), (3, 4), (4, 4)];
pub const COLOR_CYCLE_BY_LEVEL: [(i32, i32); 3] = [(3, 4), (4, 5), (5, 6)];

#[derive(Debug, Clone, Copy, Default)]
pub struct SumShapeColorRule;

impl RuleStrategy for SumShapeColorRule {
    fn rule_set(&self) -> RuleSetId {
        RuleSetId::SumShapeColor
    }

    fn build(&self, level: u8, rng: &mut dyn PuzzleRng) -> MatrixBuild {
        let base = draw_by_level(rng, level, BASE_COUNT_BY_LEVEL);
        let delta = draw_by_level(rng, level, DELTA_BY_LEVEL).max(1);
        let shape_len = draw_by_level(rng, level, SHAPE_CYCLE_BY_LEVEL);
        let color_len = draw_by_level(rng, level, COLOR_CYCLE_BY_LEVEL);
        let shapes = draw_cycle(rng, &ShapeKind::ALL, shape_len, 2);
        let colors = draw_cycle(rng, &ShapeColor::ALL, color_len, 3);

        let grid = MatrixGrid::from_fn(|row, col| {
            let count = (base + col as i32 * delta).max(1) as u32;
            CellContent::single(
                shapes[row % shapes.len()],
                colors[(row * 3 + col) % colors.len()],
                count,
                Rotation::Deg0,
            )
        });

        MatrixBuild {
            grid,
            params: RuleParams {
                base_count: base.max(0) as u32,
                delta,
                shape_cycle: shapes,
                color_cycle: colors,
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
                let count = (middle + wrong).max(1) as u32;
                Some(target.with_count(count))
            }
            1 => {
                let cycle = &params.shape_cycle;
                let current = target.kind()?;
                let idx = wrong_cycle_index(rng, cycle.len(), cycle_position(cycle, &current));
                let kind = *cycle.get(idx)?;
                if kind == current {
                    return None;
                }
                Some(target.with_kind(kind))
            }
            _ => wrong_color(target, &params.color_cycle, rng),
        }
    }
}
