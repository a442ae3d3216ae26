//! Procedural matrix-reasoning item generator.
//!
//! Builds 3x3 "complete the pattern" puzzles: a rule set fills the grid,
//! the bottom-right cell is withheld, seven distractors break the rule, and
//! every cell is rendered to base64-encoded SVG. Everything is a pure
//! function of `(difficulty, item index, seed)`.
//!
//! This module provides:
//! - `rng`: seeded 32-bit generator and its derived helpers
//! - `cell`: shape, color, rotation and cell value types
//! - `catalog`: rule-set identifiers, selection policy and strategy lookup
//! - `primitives`: per-attribute transformations
//! - `rules`: one strategy per rule set
//! - `synth`: grid synthesis with the uniform fallback
//! - `distractor`: distractor search, padding and shuffling
//! - `render` / `encode`: SVG markup and base64 transport
//! - `item`: assembly into the delivered payload
//!
//! ## Example
//!
//! ```
//! use matrix_core::matrix::{decode, generate};
//!
//! let item = generate(2, 0, Some("seed-A"));
//! assert_eq!(item.options.len(), 8);
//! assert!(decode(&item.matrix_cells[0]).unwrap().starts_with("<svg"));
//! ```

pub mod catalog;
pub mod cell;
pub mod config;
pub mod distractor;
pub mod encode;
pub mod item;
pub mod primitives;
pub mod render;
pub mod rng;
pub mod rules;
pub mod synth;

pub use catalog::{select_rule_set, RuleCatalog, RuleSetId, FALLBACK_POOL};
pub use cell::{CellContent, Rotation, ShapeAttributes, ShapeColor, ShapeKind, Signature};
pub use config::{ConfigError, GeneratorConfig, OPTION_COUNT};
pub use distractor::{assemble_options, OptionSet};
pub use encode::{decode, encode, render_encoded, EncodingError};
pub use item::{
    clamp_difficulty, difficulty_estimate, fresh_seed, generate, generate_at, GeneratedItem,
    ItemGenerator, RenderedItem,
};
pub use render::{render_cell, RenderError};
pub use rng::{hash_seed, PuzzleRng, SeedCache, SeededRng};
pub use rules::{MatrixBuild, MatrixGrid, RuleParams, RuleStrategy, MAX_DIFFICULTY};
pub use synth::{synthesize, SynthesizedMatrix};
