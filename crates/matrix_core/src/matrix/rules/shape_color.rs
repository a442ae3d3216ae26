//! Rule sets 8 and 12: the shape steps through a cycle across each row and
//! the color steps through a second cycle down each column.

use super::color::wrong_color;
use super::{draw_by_level, draw_cycle, MatrixBuild, MatrixGrid, RuleParams, RuleStrategy};
use crate::matrix::catalog::RuleSetId;
use crate::matrix::cell::{CellContent, Rotation, ShapeColor, ShapeKind};
use crate::matrix::primitives::{
    color_progression, cycle_position, shape_progression, wrong_cycle_index,
};
use crate::matrix::rng::PuzzleRng;

pub const SHAPE_CYCLE_BY_LEVEL: [(i32, i32); 3] = [(3, 4), (3, 4), (4, 4)];
pub const COLOR_CYCLE_BY_LEVEL: [(i32, i32); 3] = [(3, 4), (3, 4), (4, 6)];

#[derive(Debug, Clone, Copy)]
pub struct ShapeColorRule {
    rule_set: RuleSetId,
}

impl ShapeColorRule {
    pub fn new(rule_set: RuleSetId) -> Self {
        Self { rule_set }
    }
}

impl RuleStrategy for ShapeColorRule {
    fn rule_set(&self) -> RuleSetId {
        self.rule_set
    }

    fn build(&self, level: u8, rng: &mut dyn PuzzleRng) -> MatrixBuild {
        let shape_len = draw_by_level(rng, level, SHAPE_CYCLE_BY_LEVEL);
        let color_len = draw_by_level(rng, level, COLOR_CYCLE_BY_LEVEL);
        let shapes = draw_cycle(rng, &ShapeKind::ALL, shape_len, 2);
        let colors = draw_cycle(rng, &ShapeColor::ALL, color_len, 2);

        let first = CellContent::single(shapes[0], colors[0], 1, Rotation::Deg0);
        let grid = MatrixGrid::from_fn(|row, col| {
            let cell = shape_progression(&first, &shapes, col);
            color_progression(&cell, &colors, row)
        });

        MatrixBuild {
            grid,
            params: RuleParams {
                base_count: 1,
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
        if rng.int_in_range(0, 1) == 0 {
            let cycle = &build.params.shape_cycle;
            let current = target.kind()?;
            let idx = wrong_cycle_index(rng, cycle.len(), cycle_position(cycle, &current));
            let kind = *cycle.get(idx)?;
            if kind == current {
                return None;
            }
            Some(target.with_kind(kind))
        } else {
            wrong_color(target, &build.params.color_cycle, rng)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{distractor_signatures, for_each_build};
    use super::*;

    fn rule() -> ShapeColorRule {
        ShapeColorRule::new(RuleSetId::ShapeAndColorProgression)
    }

    #[test]
    fn test_shape_by_column_color_by_row() {
        for_each_build(&rule(), |_, build| {
            let p = &build.params;
            for row in 0..3 {
                for col in 0..3 {
                    let cell = build.grid.get(row, col);
                    assert_eq!(cell.kind(), Some(p.shape_cycle[col % p.shape_cycle.len()]));
                    assert_eq!(cell.color(), Some(p.color_cycle[row % p.color_cycle.len()]));
                }
            }
        });
    }

    #[test]
    fn test_every_row_varies_its_shape() {
        for_each_build(&rule(), |_, build| {
            for row in 0..3 {
                assert_ne!(build.grid.get(row, 0).kind(), build.grid.get(row, 1).kind());
            }
        });
    }

    #[test]
    fn test_distractor_count_matches_cycles() {
        for_each_build(&rule(), |_, build| {
            let p = &build.params;
            let sigs = distractor_signatures(&rule(), build, 200);
            assert_eq!(sigs.len(), p.shape_cycle.len() - 1 + p.color_cycle.len() - 1);
        });
    }

    #[test]
    fn test_classic_variant_reports_its_id() {
        let classic = ShapeColorRule::new(RuleSetId::ClassicShapeColor);
        assert_eq!(classic.rule_set().id(), 12);
        assert_eq!(classic.descriptions().len(), 1);
    }
}
