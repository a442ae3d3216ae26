//! Rule sets 9 and 13: colors alternate across each row through a short
//! palette while the middle row is hidden (presence toggles down each
//! column).

use super::color::wrong_color;
use super::{
    draw_by_level, draw_cycle, draw_shape, MatrixBuild, MatrixGrid, RuleParams, RuleStrategy,
    MAX_DIFFICULTY,
};
use crate::matrix::catalog::RuleSetId;
use crate::matrix::cell::{CellContent, Rotation, ShapeColor};
use crate::matrix::primitives::{color_alternation, presence_toggle};
use crate::matrix::rng::PuzzleRng;

/// Alternation palette length per level. Level 3 first draws its upper
/// bound from `3..=4`.
pub const ALT_PALETTE_BY_LEVEL: [(i32, i32); 3] = [(2, 3), (3, 4), (3, 4)];

#[derive(Debug, Clone, Copy)]
pub struct ColorPresenceRule {
    rule_set: RuleSetId,
}

impl ColorPresenceRule {
    pub fn new(rule_set: RuleSetId) -> Self {
        Self { rule_set }
    }
}

fn draw_palette_len(rng: &mut dyn PuzzleRng, level: u8) -> i32 {
    if level.clamp(1, MAX_DIFFICULTY) == MAX_DIFFICULTY {
        let (lo, hi) = ALT_PALETTE_BY_LEVEL[2];
        let upper = rng.int_in_range(lo, hi);
        rng.int_in_range(lo, upper)
    } else {
        draw_by_level(rng, level, ALT_PALETTE_BY_LEVEL)
    }
}

impl RuleStrategy for ColorPresenceRule {
    fn rule_set(&self) -> RuleSetId {
        self.rule_set
    }

    fn build(&self, level: u8, rng: &mut dyn PuzzleRng) -> MatrixBuild {
        let kind = draw_shape(rng);
        let len = draw_palette_len(rng, level);
        let palette = draw_cycle(rng, &ShapeColor::ALL, len, 2);

        let first = CellContent::single(kind, palette[0], 1, Rotation::Deg0);
        let grid = MatrixGrid::from_fn(|row, col| {
            let row_start = presence_toggle(&first, row);
            presence_toggle(&color_alternation(&row_start, &palette, col), row)
        });

        MatrixBuild {
            grid,
            params: RuleParams {
                base_count: 1,
                color_cycle: palette,
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
            wrong_color(target, &build.params.color_cycle, rng)
        } else if target.is_visible() {
            Some(target.with_count(0))
        } else {
            Some(target.with_count(build.grid.get(0, 0).count.max(1)))
        }
    }
}
