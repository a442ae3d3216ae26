//! Matrix synthesis: look up the strategy for a rule set and let it fill the
//! grid.
//!
//! An identifier with no registered strategy produces a uniform grid of one
//! red circle instead of failing; callers always get a playable matrix.

use tracing::{debug, error};

use super::catalog::RuleCatalog;
use super::cell::{CellContent, Rotation, ShapeColor, ShapeKind};
use super::rng::PuzzleRng;
use super::rules::{MatrixBuild, MatrixGrid, RuleParams};

/// Result of synthesizing one matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedMatrix {
    /// Rule-set identifier that was requested.
    pub rule_id: u32,
    pub build: MatrixBuild,
    pub descriptions: Vec<String>,
    /// True when no strategy was registered for `rule_id`.
    pub fallback: bool,
}

impl SynthesizedMatrix {
    pub fn target(&self) -> &CellContent {
        self.build.target()
    }
}

/// Description reported for a fallback grid.
pub const FALLBACK_DESCRIPTION: &str = "Unspecified rule";

/// The cell every position of a fallback grid holds.
pub fn fallback_cell() -> CellContent {
    CellContent::single(ShapeKind::Circle, ShapeColor::Red, 1, Rotation::Deg0)
}

/// Degenerate all-identical grid.
pub fn fallback_build() -> MatrixBuild {
    MatrixBuild {
        grid: MatrixGrid::filled(fallback_cell()),
        params: RuleParams {
            base_count: 1,
            ..RuleParams::default()
        },
    }
}

/// Build the grid for `rule_id` at `level`.
pub fn synthesize(
    catalog: &RuleCatalog,
    rule_id: u32,
    level: u8,
    rng: &mut dyn PuzzleRng,
) -> SynthesizedMatrix {
    match catalog.lookup(rule_id) {
        Some(strategy) => {
            debug!("Synthesizing rule set {} at level {}", rule_id, level);
            SynthesizedMatrix {
                rule_id,
                build: strategy.build(level, rng),
                descriptions: strategy.descriptions(),
                fallback: false,
            }
        }
        None => {
            error!(
                "No strategy registered for rule set {}, using uniform fallback grid",
                rule_id
            );
            SynthesizedMatrix {
                rule_id,
                build: fallback_build(),
                descriptions: vec![FALLBACK_DESCRIPTION.to_string()],
                fallback: true,
            }
        }
    }
}
