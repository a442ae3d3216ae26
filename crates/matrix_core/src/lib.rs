//! Core of the matrix-reasoning test battery.
//!
//! This crate provides:
//! - Deterministic, seed-driven puzzle generation
//! - A catalog of pattern rule sets with per-rule distractor synthesis
//! - SVG rendering and base64 transport encoding of every cell
//! - The JSON payload handed to the UI

pub mod matrix;

pub use matrix::{
    generate, generate_at, GeneratedItem, GeneratorConfig, ItemGenerator, RenderedItem,
    RuleCatalog, RuleSetId,
};
