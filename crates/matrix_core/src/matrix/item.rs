//! Item assembly: seed, clamp, synthesize, pick options, render.
//!
//! `ItemGenerator` owns the configuration, the rule catalog and a last-seed
//! cache. The free functions `generate` and `generate_at` build a default
//! generator per call, so concurrent callers never share state.

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Builder;

use super::catalog::{select_rule_set, RuleCatalog};
use super::cell::{CellContent, Signature};
use super::config::GeneratorConfig;
use super::distractor::assemble_options;
use super::encode::render_encoded;
use super::rng::{PuzzleRng, SeedCache, SeededRng};
use super::rules::{RuleParams, MAX_DIFFICULTY};
use super::synth::synthesize;

/// An item before rendering: cells as attribute records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedItem {
    /// The eight visible matrix cells, row-major (target omitted).
    pub matrix_cells: Vec<CellContent>,
    /// Eight shuffled options.
    pub options: Vec<CellContent>,
    pub correct_option_index: usize,
    /// The withheld bottom-right cell.
    pub ground_truth: CellContent,
    pub seed: String,
    pub difficulty_level_used: u8,
    /// Rule-set identifier.
    pub pattern_type: u32,
    pub descriptions: Vec<String>,
    pub params: RuleParams,
    /// Options that came from padding. Non-zero means option distinctness
    /// is only best-effort for this item.
    pub filler_count: usize,
    /// True when the rule set had no strategy and a uniform grid was used.
    pub fallback: bool,
}

impl GeneratedItem {
    pub fn correct_option(&self) -> &CellContent {
        &self.options[self.correct_option_index]
    }

    /// Number of options whose signature equals the ground truth's.
    pub fn matching_options(&self) -> usize {
        let truth = self.ground_truth.signature(self.pattern_type);
        self.options
            .iter()
            .filter(|o| o.signature(self.pattern_type) == truth)
            .count()
    }

    /// Signatures shared by more than one option, sorted.
    pub fn duplicate_signatures(&self) -> Vec<Signature> {
        let mut counts: HashMap<Signature, usize> = HashMap::new();
        for option in &self.options {
            *counts.entry(option.signature(self.pattern_type)).or_insert(0) += 1;
        }
        let mut dups: Vec<Signature> = counts
            .into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|(sig, _)| sig)
            .collect();
        dups.sort();
        dups
    }
}

/// The delivered payload. Serializes to the camelCase JSON the UI reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedItem {
    pub matrix_cells: Vec<String>,
    pub options: Vec<String>,
    pub correct_option_index: usize,
    pub seed: String,
    pub rules: Vec<String>,
    pub difficulty_estimate: f64,
    pub difficulty_level_used: u8,
    pub pattern_type_used: u32,
    pub creation_timestamp: String,
    pub render_engine: String,
}

impl RenderedItem {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Clamp any requested difficulty into `1..=MAX_DIFFICULTY`.
pub fn clamp_difficulty(difficulty: i32) -> u8 {
    difficulty.clamp(1, MAX_DIFFICULTY as i32) as u8
}

/// Scalar difficulty in `[0.1, 0.95]`, rounded to two decimals.
///
/// Grows with the level and the rule id, plus a jitter in `[-0.05, 0.05)`
/// taken from the first draw of a fresh generator for `seed`.
pub fn difficulty_estimate(level: u8, rule_id: u32, seed: &str) -> f64 {
    let mut estimate = 0.2 + (level.max(1) - 1) as f64 * 0.15;
    if rule_id <= 10 {
        estimate += rule_id as f64 * 0.025;
    } else {
        estimate += (rule_id - 10) as f64 * 0.05;
    }
    let jitter = SeededRng::from_seed(seed).unit_f64() * 0.1 - 0.05;
    let clamped = (estimate + jitter).clamp(0.1, 0.95);
    (clamped * 100.0).round() / 100.0
}

/// A random RFC 4122 version 4 identifier.
pub fn fresh_seed() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill(&mut bytes);
    Builder::from_random_bytes(bytes).into_uuid().to_string()
}

fn resolve_seed(seed: Option<&str>) -> String {
    match seed {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => fresh_seed(),
    }
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Builds and renders matrix items.
#[derive(Debug, Default)]
pub struct ItemGenerator {
    config: GeneratorConfig,
    catalog: RuleCatalog,
    seed_cache: SeedCache,
}

impl ItemGenerator {
    /// Generator with the standard catalog.
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_catalog(config, RuleCatalog::standard())
    }

    pub fn with_catalog(config: GeneratorConfig, catalog: RuleCatalog) -> Self {
        Self {
            config,
            catalog,
            seed_cache: SeedCache::new(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Build the unrendered item for the rule selected by `item_index`.
    pub fn build_item(&mut self, difficulty: i32, item_index: usize, seed: &str) -> GeneratedItem {
        let rule = select_rule_set(item_index);
        debug!("Item {} selects rule set {}", item_index, rule);
        self.build_item_for_rule(difficulty, rule.id(), seed)
    }

    /// Build the unrendered item for an explicit rule-set identifier.
    pub fn build_item_for_rule(
        &mut self,
        difficulty: i32,
        rule_id: u32,
        seed: &str,
    ) -> GeneratedItem {
        let level = clamp_difficulty(difficulty);
        let mut rng = self.seed_cache.rng_for(seed);
        let synth = synthesize(&self.catalog, rule_id, level, &mut rng);
        let strategy = if synth.fallback {
            None
        } else {
            self.catalog.lookup(rule_id)
        };
        let set = assemble_options(strategy, &synth.build, rule_id, &self.config, &mut rng);

        GeneratedItem {
            matrix_cells: synth.build.grid.visible_cells().to_vec(),
            options: set.options,
            correct_option_index: set.correct_index,
            ground_truth: synth.target().clone(),
            seed: seed.to_string(),
            difficulty_level_used: level,
            pattern_type: rule_id,
            descriptions: synth.descriptions,
            params: synth.build.params,
            filler_count: set.filler_count,
            fallback: synth.fallback,
        }
    }

    /// Render every cell of `item` into the delivered payload.
    pub fn render(&self, item: &GeneratedItem, timestamp: DateTime<Utc>) -> RenderedItem {
        let size = self.config.cell_size;
        RenderedItem {
            matrix_cells: item
                .matrix_cells
                .iter()
                .map(|c| render_encoded(c, size))
                .collect(),
            options: item.options.iter().map(|c| render_encoded(c, size)).collect(),
            correct_option_index: item.correct_option_index,
            seed: item.seed.clone(),
            rules: item.descriptions.clone(),
            difficulty_estimate: difficulty_estimate(
                item.difficulty_level_used,
                item.pattern_type,
                &item.seed,
            ),
            difficulty_level_used: item.difficulty_level_used,
            pattern_type_used: item.pattern_type,
            creation_timestamp: format_timestamp(timestamp),
            render_engine: self.config.render_engine.clone(),
        }
    }

    /// Generate an item stamped with the current time.
    pub fn generate(
        &mut self,
        difficulty: i32,
        item_index: usize,
        seed: Option<&str>,
    ) -> RenderedItem {
        self.generate_at(difficulty, item_index, seed, Utc::now())
    }

    /// Generate an item with an explicit creation timestamp.
    pub fn generate_at(
        &mut self,
        difficulty: i32,
        item_index: usize,
        seed: Option<&str>,
        timestamp: DateTime<Utc>,
    ) -> RenderedItem {
        let seed = resolve_seed(seed);
        let item = self.build_item(difficulty, item_index, &seed);
        self.render(&item, timestamp)
    }

    /// Generate an item for a specific rule-set identifier.
    pub fn generate_with_rule(
        &mut self,
        difficulty: i32,
        rule_id: u32,
        seed: Option<&str>,
    ) -> RenderedItem {
        self.generate_with_rule_at(difficulty, rule_id, seed, Utc::now())
    }

    /// `generate_with_rule` with an explicit creation timestamp.
    pub fn generate_with_rule_at(
        &mut self,
        difficulty: i32,
        rule_id: u32,
        seed: Option<&str>,
        timestamp: DateTime<Utc>,
    ) -> RenderedItem {
        let seed = resolve_seed(seed);
        let item = self.build_item_for_rule(difficulty, rule_id, &seed);
        self.render(&item, timestamp)
    }
}

/// Generate one item with the default configuration.
pub fn generate(difficulty: i32, item_index: usize, seed: Option<&str>) -> RenderedItem {
    ItemGenerator::default().generate(difficulty, item_index, seed)
}

/// `generate` with an explicit creation timestamp.
pub fn generate_at(
    difficulty: i32,
    item_index: usize,
    seed: Option<&str>,
    timestamp: DateTime<Utc>,
) -> RenderedItem {
    ItemGenerator::default().generate_at(difficulty, item_index, seed, timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::cell::{Rotation, ShapeColor, ShapeKind};
    use chrono::TimeZone;

    #[test]
    fn test_clamp_difficulty() {
        assert_eq!(clamp_difficulty(-4), 1);
        assert_eq!(clamp_difficulty(0), 1);
        assert_eq!(clamp_difficulty(2), 2);
        assert_eq!(clamp_difficulty(99), 3);
    }

    #[test]
    fn test_difficulty_estimate_values() {
        // first draw of "seed-A" gives jitter +0.041; of "" gives -0.046
        assert_eq!(difficulty_estimate(1, 1, "seed-A"), 0.27);
        assert_eq!(difficulty_estimate(3, 10, "seed-A"), 0.79);
        assert_eq!(difficulty_estimate(3, 13, ""), 0.6);
        assert_eq!(difficulty_estimate(1, 1, ""), 0.18);
    }

    #[test]
    fn test_difficulty_estimate_bounds() {
        for i in 0..50 {
            let seed = format!("bounds-{}", i);
            for id in 1..=13 {
                for level in 1..=3 {
                    let e = difficulty_estimate(level, id, &seed);
                    assert!((0.1..=0.95).contains(&e));
                }
            }
        }
    }

    #[test]
    fn test_fresh_seed_format() {
        let seed = fresh_seed();
        let parts: Vec<&str> = seed.split('-').collect();
        assert_eq!(
            parts.iter().map(|p| p.len()).collect::<Vec<_>>(),
            vec![8, 4, 4, 4, 12]
        );
        assert!(parts[2].starts_with('4'));
        assert!(matches!(&parts[3][..1], "8" | "9" | "a" | "b"));
        assert_ne!(fresh_seed(), seed);
        let parsed = uuid::Uuid::parse_str(&seed).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn test_missing_or_empty_seed_is_replaced() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let item = generate_at(1, 0, None, at);
        assert_eq!(item.seed.len(), 36);
        let item = generate_at(1, 0, Some(""), at);
        assert_eq!(item.seed.len(), 36);
    }

    #[test]
    fn test_timestamp_has_millis() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(format_timestamp(at), "2024-05-01T12:00:00.000Z");
    }

    #[test]
    fn test_build_item_shape() {
        let mut generator = ItemGenerator::default();
        let item = generator.build_item(2, 3, "shape");
        assert_eq!(item.pattern_type, 4);
        assert_eq!(item.matrix_cells.len(), 8);
        assert_eq!(item.options.len(), 8);
        assert_eq!(item.matching_options(), 1);
        assert_eq!(*item.correct_option(), item.ground_truth);
        assert_eq!(item.descriptions.len(), 2);
        assert!(!item.fallback);
    }

    #[test]
    fn test_duplicate_signatures_reports_repeats() {
        let mut generator = ItemGenerator::default();
        let mut item = generator.build_item(1, 0, "dups");
        assert!(item.duplicate_signatures().is_empty());
        let copy = CellContent::single(ShapeKind::Star, ShapeColor::Pink, 7, Rotation::Deg90);
        item.options[0] = copy.clone();
        item.options[1] = copy.clone();
        assert_eq!(item.duplicate_signatures(), vec![copy.signature(1)]);
    }

    #[test]
    fn test_seed_cache_does_not_change_results() {
        let mut generator = ItemGenerator::default();
        let a = generator.build_item(2, 5, "cached");
        let b = generator.build_item(2, 5, "cached");
        let c = ItemGenerator::default().build_item(2, 5, "cached");
        assert_eq!(a, b);
        assert_eq!(a, c);
    }
}
