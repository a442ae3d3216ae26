//! Rule set 3: colors progress through a shuffled cycle across each row.

use super::{
    draw_by_level, draw_cycle, draw_shape, MatrixBuild, MatrixGrid, RuleParams, RuleStrategy,
};
use crate::matrix::catalog::RuleSetId;
use crate::matrix::cell::{CellContent, Rotation, ShapeColor};
use crate::matrix::primitives::{color_progression, cycle_position, wrong_cycle_index};
use crate::matrix::rng::PuzzleRng;

/// Color cycle length range per level.
pub const COLOR_CYCLE_BY_LEVEL: [(i32, i32); 3] = [(3, 4), (4, 5), (4, 6)];

#[derive(Debug, Clone, Copy, Default)]
pub struct ColorProgressionRule;

impl RuleStrategy for ColorProgressionRule {
    fn rule_set(&self) -> RuleSetId {
        RuleSetId::ColorProgressionOnly
    }

    fn build(&self, level: u8, rng: &mut dyn PuzzleRng) -> MatrixBuild {
        let kind = draw_shape(rng);
        let len = draw_by_level(rng, level, COLOR_CYCLE_BY_LEVEL);
        let cycle = draw_cycle(rng, &ShapeColor::ALL, len, 2);

        let first = CellContent::single(kind, cycle[0], 1, Rotation::Deg0);
        let grid = MatrixGrid::from_fn(|_, col| color_progression(&first, &cycle, col));

        MatrixBuild {
            grid,
            params: RuleParams {
                base_count: 1,
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
        wrong_color(build.target(), &build.params.color_cycle, rng)
    }
}

/// Substitute another color from `cycle`. Shared by the rules whose
/// distractors break a color progression.
pub(crate) fn wrong_color(
    target: &CellContent,
    cycle: &[ShapeColor],
    rng: &mut dyn PuzzleRng,
) -> Option<CellContent> {
    let current = target.color()?;
    let idx = wrong_cycle_index(rng, cycle.len(), cycle_position(cycle, &current));
    let color = *cycle.get(idx)?;
    if color == current {
        return None;
    }
    Some(target.with_color(color))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{distractor_signatures, for_each_build};
    use super::*;

    #[test]
    fn test_rows_follow_the_cycle() {
        for_each_build(&ColorProgressionRule, |level, build| {
            let cycle = &build.params.color_cycle;
            let (lo, hi) = COLOR_CYCLE_BY_LEVEL[level as usize - 1];
            assert!(cycle.len() as i32 >= lo && cycle.len() as i32 <= hi);
            for row in 0..3 {
                for col in 0..3 {
                    assert_eq!(build.grid.get(row, col).color(), Some(cycle[col]));
                }
            }
        });
    }

    #[test]
    fn test_distractors_use_other_cycle_colors() {
        for_each_build(&ColorProgressionRule, |_, build| {
            let sigs = distractor_signatures(&ColorProgressionRule, build, 200);
            assert_eq!(sigs.len(), build.params.color_cycle.len() - 1);
        });
    }
}
