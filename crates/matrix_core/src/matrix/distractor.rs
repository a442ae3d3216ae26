//! Distractor synthesis and option assembly.
//!
//! The strategy proposes candidates that each break one governing
//! attribute. Candidates are accepted until seven unique ones exist or the
//! attempt cap runs out. Any shortfall is padded with filler cells: random
//! ones first, then a deterministic cycle over the shape and color tables.
//! Cyclic fillers never equal the target but may duplicate another option;
//! `OptionSet::filler_count` reports how many were needed.
//!
//! After assembly the eight options are shuffled and the correct index is
//! recovered by signature.

use std::collections::HashSet;

use tracing::{debug, error, warn};

use super::cell::{CellContent, Rotation, ShapeColor, ShapeKind, Signature};
use super::config::{GeneratorConfig, OPTION_COUNT};
use super::rng::{choice, shuffle_with_rng, PuzzleRng};
use super::rules::{MatrixBuild, RuleStrategy};

/// The shuffled answer options of one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSet {
    pub options: Vec<CellContent>,
    pub correct_index: usize,
    /// Options that came from padding rather than from the strategy.
    pub filler_count: usize,
    /// Distractor proposals consumed.
    pub attempts: usize,
}

/// Build the eight options for `build`.
///
/// `strategy` is `None` for fallback grids; every distractor is then a
/// filler.
pub fn assemble_options(
    strategy: Option<&dyn RuleStrategy>,
    build: &MatrixBuild,
    rule_id: u32,
    config: &GeneratorConfig,
    rng: &mut dyn PuzzleRng,
) -> OptionSet {
    let target = build.target().clone();
    let target_sig = target.signature(rule_id);
    let mut used: HashSet<Signature> = HashSet::new();
    used.insert(target_sig);

    let mut options = vec![target.clone()];
    let mut attempts = 0;
    let mut rejected = 0;
    if let Some(strategy) = strategy {
        while options.len() < OPTION_COUNT && attempts < config.distractor_attempts {
            attempts += 1;
            match strategy.propose_distractor(build, rng) {
                Some(candidate) if used.insert(candidate.signature(rule_id)) => {
                    options.push(candidate);
                }
                _ => rejected += 1,
            }
        }
    }
    debug!(
        "Rule set {}: accepted {} distractors in {} attempts ({} rejected)",
        rule_id,
        options.len() - 1,
        attempts,
        rejected
    );

    let mut filler_count = 0;
    if options.len() < OPTION_COUNT {
        warn!(
            "Rule set {}: only {} of {} distractors found, padding with fillers",
            rule_id,
            options.len() - 1,
            OPTION_COUNT - 1
        );
        filler_count =
            pad_with_fillers(&mut options, &mut used, target_sig, rule_id, config, rng);
    }

    shuffle_with_rng(&mut options, rng);
    let correct_index = ensure_correct(&mut options, &target, rule_id, rng);

    OptionSet {
        options,
        correct_index,
        filler_count,
        attempts,
    }
}

/// A random single-shape cell.
fn random_filler(rng: &mut dyn PuzzleRng) -> CellContent {
    let kind = choice(rng, &ShapeKind::ALL).copied().unwrap_or(ShapeKind::Circle);
    let color = choice(rng, &ShapeColor::ALL).copied().unwrap_or(ShapeColor::Red);
    let count = rng.int_in_range(1, 3) as u32;
    let rotation = Rotation::from_quarter_turns(rng.int_in_range(0, 3) as i64);
    CellContent::single(kind, color, count, rotation)
}

/// The cyclic filler for slot `n`, never equal to the target.
fn cyclic_filler(n: usize, target_sig: Signature, rule_id: u32) -> CellContent {
    let cell = CellContent::single(
        ShapeKind::ALL[n % ShapeKind::ALL.len()],
        ShapeColor::ALL[n % ShapeColor::ALL.len()],
        1,
        Rotation::Deg0,
    );
    if cell.signature(rule_id) == target_sig {
        cell.with_count(2)
    } else {
        cell
    }
}

fn pad_with_fillers(
    options: &mut Vec<CellContent>,
    used: &mut HashSet<Signature>,
    target_sig: Signature,
    rule_id: u32,
    config: &GeneratorConfig,
    rng: &mut dyn PuzzleRng,
) -> usize {
    let mut added = 0;
    let mut tries = 0;
    while options.len() < OPTION_COUNT && tries < config.filler_attempts {
        tries += 1;
        let cell = random_filler(rng);
        if used.insert(cell.signature(rule_id)) {
            options.push(cell);
            added += 1;
        }
    }
    while options.len() < OPTION_COUNT {
        let cell = cyclic_filler(options.len(), target_sig, rule_id);
        let sig = cell.signature(rule_id);
        if !used.insert(sig) {
            warn!("Filler option {} duplicates an existing option", sig);
        }
        options.push(cell);
        added += 1;
    }
    added
}

/// Index of the option equal to `target`, force-inserting it at a random
/// slot (and reshuffling) when no option matches.
pub fn ensure_correct(
    options: &mut Vec<CellContent>,
    target: &CellContent,
    rule_id: u32,
    rng: &mut dyn PuzzleRng,
) -> usize {
    let sig = target.signature(rule_id);
    let locate = |options: &[CellContent]| {
        options.iter().position(|o| o.signature(rule_id) == sig)
    };
    if let Some(idx) = locate(options.as_slice()) {
        return idx;
    }

    error!("Correct option {} missing after shuffle, reinserting", sig);
    if options.is_empty() {
        options.push(target.clone());
        return 0;
    }
    let slot = rng.next_u32() as usize % options.len();
    options[slot] = target.clone();
    shuffle_with_rng(options, rng);
    locate(options.as_slice()).unwrap_or(slot)
}
