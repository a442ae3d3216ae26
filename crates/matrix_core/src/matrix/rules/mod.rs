//! Rule strategies: one small object per rule set.
//!
//! Every strategy knows how to fill a 3x3 grid (whose bottom-right cell is
//! the withheld target) and how to propose a single distractor that breaks
//! one of the attributes its rule governs. The distractor loop, padding and
//! shuffling live in `distractor`; strategies only supply candidates.

pub mod color;
pub mod color_rotation;
pub mod diagonal;
pub mod presence;
pub mod rotation;
pub mod shape_color;
pub mod sum;
pub mod sum_rotation;
pub mod sum_shape_color;

pub use color::ColorProgressionRule;
pub use color_rotation::ColorRotationRule;
pub use diagonal::DiagonalColorRule;
pub use presence::ColorPresenceRule;
pub use rotation::RotationRule;
pub use shape_color::ShapeColorRule;
pub use sum::SumRule;
pub use sum_rotation::SumRotationRule;
pub use sum_shape_color::SumShapeColorRule;

use super::catalog::RuleSetId;
use super::cell::{CellContent, ShapeColor, ShapeKind};
use super::primitives::RotationStep;
use super::rng::PuzzleRng;

/// Highest supported difficulty level. Levels run `1..=MAX_DIFFICULTY`.
pub const MAX_DIFFICULTY: u8 = 3;

/// Side length of the matrix.
pub const GRID_SIDE: usize = 3;

/// A 3x3 grid of cells in row-major order.
///
/// The bottom-right cell is always the withheld target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixGrid {
    cells: Vec<CellContent>,
}

impl MatrixGrid {
    /// Every cell set to a copy of `cell`.
    pub fn filled(cell: CellContent) -> Self {
        Self {
            cells: vec![cell; GRID_SIDE * GRID_SIDE],
        }
    }

    /// Build every cell from its `(row, col)`.
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> CellContent) -> Self {
        let mut cells = Vec::with_capacity(GRID_SIDE * GRID_SIDE);
        for row in 0..GRID_SIDE {
            for col in 0..GRID_SIDE {
                cells.push(f(row, col));
            }
        }
        Self { cells }
    }

    pub fn get(&self, row: usize, col: usize) -> &CellContent {
        &self.cells[row * GRID_SIDE + col]
    }

    pub fn set(&mut self, row: usize, col: usize, cell: CellContent) {
        self.cells[row * GRID_SIDE + col] = cell;
    }

    /// The withheld bottom-right cell (the ground truth).
    pub fn target(&self) -> &CellContent {
        &self.cells[GRID_SIDE * GRID_SIDE - 1]
    }

    /// The eight cells shown to the test-taker, row-major.
    pub fn visible_cells(&self) -> &[CellContent] {
        &self.cells[..GRID_SIDE * GRID_SIDE - 1]
    }

    pub fn cells(&self) -> &[CellContent] {
        &self.cells
    }
}

/// The values a strategy drew while building its grid.
///
/// Distractor proposals read these back so they know which attribute the
/// rule constrains. Fields a rule does not use keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleParams {
    /// Count of the first column.
    pub base_count: u32,
    /// Count increment per column (sum rules).
    pub delta: i32,
    /// Rotation increment per row (rotation rules).
    pub rotation_step: Option<RotationStep>,
    /// Active shape cycle (shape progression rules).
    pub shape_cycle: Vec<ShapeKind>,
    /// Active color cycle (progression or alternation rules).
    pub color_cycle: Vec<ShapeColor>,
}

/// A filled grid plus the parameters that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixBuild {
    pub grid: MatrixGrid,
    pub params: RuleParams,
}

impl MatrixBuild {
    pub fn target(&self) -> &CellContent {
        self.grid.target()
    }
}

/// Common capability of every rule set: build the grid, break the rule.
pub trait RuleStrategy: Send + Sync {
    /// The rule set this strategy implements.
    fn rule_set(&self) -> RuleSetId;

    /// Fill the grid for a difficulty level in `1..=MAX_DIFFICULTY`.
    fn build(&self, level: u8, rng: &mut dyn PuzzleRng) -> MatrixBuild;

    /// Propose one distractor by perturbing a governing attribute.
    ///
    /// Returns `None` when the perturbation degenerated and the attempt
    /// should be skipped.
    fn propose_distractor(
        &self,
        build: &MatrixBuild,
        rng: &mut dyn PuzzleRng,
    ) -> Option<CellContent>;

    fn descriptions(&self) -> Vec<String> {
        self.rule_set()
            .descriptions()
            .iter()
            .map(|d| d.to_string())
            .collect()
    }
}

/// Every strategy of the standard catalog.
pub fn standard_strategies() -> Vec<Box<dyn RuleStrategy>> {
    vec![
        Box::new(RotationRule),
        Box::new(SumRule),
        Box::new(ColorProgressionRule),
        Box::new(SumRotationRule::new(
            RuleSetId::SumAndRotation90,
            RotationStep::Quarter,
        )),
        Box::new(SumRotationRule::new(
            RuleSetId::SumAndRotation180,
            RotationStep::Half,
        )),
        Box::new(ColorRotationRule),
        Box::new(SumShapeColorRule),
        Box::new(ShapeColorRule::new(RuleSetId::ShapeAndColorProgression)),
        Box::new(ColorPresenceRule::new(RuleSetId::ColorAlternationPresence)),
        Box::new(DiagonalColorRule),
        Box::new(SumRotationRule::new(
            RuleSetId::ClassicSumRotation,
            RotationStep::Quarter,
        )),
        Box::new(ShapeColorRule::new(RuleSetId::ClassicShapeColor)),
        Box::new(ColorPresenceRule::new(RuleSetId::ClassicColorPresence)),
    ]
}

/// Pick the entry of `table` for a level, clamping out-of-range levels.
pub fn by_level<T: Copy>(level: u8, table: [T; 3]) -> T {
    table[(level.clamp(1, MAX_DIFFICULTY) - 1) as usize]
}

/// Draw an integer from the `(min, max)` range listed for a level.
pub fn draw_by_level(rng: &mut dyn PuzzleRng, level: u8, table: [(i32, i32); 3]) -> i32 {
    let (min, max) = by_level(level, table);
    rng.int_in_range(min, max)
}

/// Uniform draw from the full shape table.
pub fn draw_shape(rng: &mut dyn PuzzleRng) -> ShapeKind {
    ShapeKind::ALL[rng.index(ShapeKind::ALL.len())]
}

/// Uniform draw from the full color palette.
pub fn draw_color(rng: &mut dyn PuzzleRng) -> ShapeColor {
    ShapeColor::ALL[rng.index(ShapeColor::ALL.len())]
}

/// Shuffle `table` and keep the first `len` entries (at least `min_len`).
pub fn draw_cycle<T: Copy>(
    rng: &mut dyn PuzzleRng,
    table: &[T],
    len: i32,
    min_len: usize,
) -> Vec<T> {
    let mut cycle = super::rng::shuffled(table, rng);
    cycle.truncate((len.max(0) as usize).max(min_len));
    cycle
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::matrix::rng::SeededRng;
    use std::collections::HashSet;

    /// Builds `rule` for many seeds at every level and hands each build to
    /// `check`.
    pub fn for_each_build(rule: &dyn RuleStrategy, mut check: impl FnMut(u8, &MatrixBuild)) {
        for level in 1..=MAX_DIFFICULTY {
            for i in 0..40 {
                let mut rng = SeededRng::from_seed(&format!("rule-{}-{}", level, i));
                let build = rule.build(level, &mut rng);
                check(level, &build);
            }
        }
    }

    /// Collect up to `attempts` accepted distractor signatures.
    pub fn distractor_signatures(
        rule: &dyn RuleStrategy,
        build: &MatrixBuild,
        attempts: usize,
    ) -> HashSet<String> {
        let id = rule.rule_set().id();
        let mut rng = SeededRng::from_seed("distractors");
        (0..attempts)
            .filter_map(|_| rule.propose_distractor(build, &mut rng))
            .map(|c| c.signature(id).to_string())
            .collect()
    }
}
