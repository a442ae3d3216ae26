//! Rule-set catalog and item-index based selection.
//!
//! Selection never draws from the RNG: the first ten items of a session map
//! one-to-one onto rule sets 1..=10, after which a fixed pool repeats
//! cyclically. Replaying an item index always yields the same kind of rule;
//! only the content varies with the seed.

use super::rules::{self, RuleStrategy};
use std::collections::BTreeMap;
use std::fmt;

/// Number of item indices mapped directly onto rule identifiers.
pub const DIRECT_RULE_ITEMS: usize = 10;

/// Identifier of a rule set. The numeric value is the public pattern type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum RuleSetId {
    Rotation90Only = 1,
    SumOnly = 2,
    ColorProgressionOnly = 3,
    SumAndRotation90 = 4,
    SumAndRotation180 = 5,
    Rotation90AndColor = 6,
    SumShapeColor = 7,
    ShapeAndColorProgression = 8,
    ColorAlternationPresence = 9,
    SumRotationDiagonalColor = 10,
    ClassicSumRotation = 11,
    ClassicShapeColor = 12,
    ClassicColorPresence = 13,
}

/// Rule sets that repeat after the direct progression is exhausted.
pub const FALLBACK_POOL: [RuleSetId; 6] = [
    RuleSetId::ClassicSumRotation,
    RuleSetId::ClassicShapeColor,
    RuleSetId::ClassicColorPresence,
    RuleSetId::SumAndRotation180,
    RuleSetId::Rotation90AndColor,
    RuleSetId::SumShapeColor,
];

impl RuleSetId {
    pub const ALL: [RuleSetId; 13] = [
        RuleSetId::Rotation90Only,
        RuleSetId::SumOnly,
        RuleSetId::ColorProgressionOnly,
        RuleSetId::SumAndRotation90,
        RuleSetId::SumAndRotation180,
        RuleSetId::Rotation90AndColor,
        RuleSetId::SumShapeColor,
        RuleSetId::ShapeAndColorProgression,
        RuleSetId::ColorAlternationPresence,
        RuleSetId::SumRotationDiagonalColor,
        RuleSetId::ClassicSumRotation,
        RuleSetId::ClassicShapeColor,
        RuleSetId::ClassicColorPresence,
    ];

    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.id() == id)
    }

    /// Human-readable rule descriptions shown by the UI.
    pub fn descriptions(self) -> &'static [&'static str] {
        match self {
            RuleSetId::Rotation90Only => &["Column: 90° rotation"],
            RuleSetId::SumOnly => &["Row: sum"],
            RuleSetId::ColorProgressionOnly => &["Row: color progression"],
            RuleSetId::SumAndRotation90 => &["Row: sum", "Column: 90° rotation"],
            RuleSetId::SumAndRotation180 => &["Row: sum", "Column: 180° rotation"],
            RuleSetId::Rotation90AndColor => &["Row: color progression", "Column: 90° rotation"],
            RuleSetId::SumShapeColor => &[
                "Row: sum",
                "Column: shape progression",
                "Matrix: color progression",
            ],
            RuleSetId::ShapeAndColorProgression => {
                &["Row: shape progression", "Column: color progression"]
            }
            RuleSetId::ColorAlternationPresence => {
                &["Row: color alternation", "Column: presence toggle"]
            }
            RuleSetId::SumRotationDiagonalColor => &[
                "Row: sum",
                "Column: 90° rotation",
                "Diagonal: color progression",
            ],
            RuleSetId::ClassicSumRotation => &["Classic: row addition, column 90° rotation"],
            RuleSetId::ClassicShapeColor => {
                &["Classic: row shape progression, column color progression"]
            }
            RuleSetId::ClassicColorPresence => {
                &["Classic: row color alternation, column presence toggle"]
            }
        }
    }
}

impl fmt::Display for RuleSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.id())
    }
}

/// Rule set for the item at `item_index` within a session.
pub fn select_rule_set(item_index: usize) -> RuleSetId {
    if item_index < DIRECT_RULE_ITEMS {
        RuleSetId::ALL[item_index]
    } else {
        FALLBACK_POOL[(item_index - DIRECT_RULE_ITEMS) % FALLBACK_POOL.len()]
    }
}

/// Lookup table from rule identifier to strategy.
pub struct RuleCatalog {
    strategies: BTreeMap<u32, Box<dyn RuleStrategy>>,
}

impl RuleCatalog {
    /// Catalog with no strategies. Every lookup misses.
    pub fn empty() -> Self {
        Self {
            strategies: BTreeMap::new(),
        }
    }

    /// The full catalog: one strategy for every `RuleSetId`.
    pub fn standard() -> Self {
        Self::with_strategies(rules::standard_strategies())
    }

    pub fn with_strategies(strategies: Vec<Box<dyn RuleStrategy>>) -> Self {
        let mut catalog = Self::empty();
        for strategy in strategies {
            catalog.register(strategy);
        }
        catalog
    }

    /// Add or replace the strategy for its rule set.
    pub fn register(&mut self, strategy: Box<dyn RuleStrategy>) {
        self.strategies.insert(strategy.rule_set().id(), strategy);
    }

    pub fn lookup(&self, rule_id: u32) -> Option<&dyn RuleStrategy> {
        self.strategies.get(&rule_id).map(|s| s.as_ref())
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Registered rule identifiers in ascending order.
    pub fn rule_ids(&self) -> Vec<u32> {
        self.strategies.keys().copied().collect()
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for RuleCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleCatalog")
            .field("rule_ids", &self.rule_ids())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_first_ten_items_are_distinct_and_ordered() {
        let ids: Vec<u32> = (0..10).map(|i| select_rule_set(i).id()).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<u32>>());
        let unique: HashSet<u32> = ids.iter().copied().collect();
        assert_eq!(unique.len(), 10);
    }

    #[test]
    fn test_item_ten_starts_fallback_pool() {
        assert_eq!(select_rule_set(10), FALLBACK_POOL[0]);
        assert_eq!(select_rule_set(15), FALLBACK_POOL[5]);
        assert_eq!(select_rule_set(16), FALLBACK_POOL[0]);
    }

    #[test]
    fn test_fallback_is_cyclic() {
        assert_eq!(select_rule_set(25), select_rule_set(19));
        for i in 10..100 {
            assert_eq!(select_rule_set(i), select_rule_set(i + FALLBACK_POOL.len()));
        }
    }

    #[test]
    fn test_from_id_round_trips() {
        for rule in RuleSetId::ALL {
            assert_eq!(RuleSetId::from_id(rule.id()), Some(rule));
            assert!(!rule.descriptions().is_empty());
        }
        assert_eq!(RuleSetId::from_id(0), None);
        assert_eq!(RuleSetId::from_id(14), None);
    }

    #[test]
    fn test_standard_catalog_covers_every_rule_set() {
        let catalog = RuleCatalog::standard();
        assert_eq!(catalog.len(), RuleSetId::ALL.len());
        for rule in RuleSetId::ALL {
            let strategy = catalog.lookup(rule.id()).expect("strategy registered");
            assert_eq!(strategy.rule_set(), rule);
        }
        assert!(catalog.lookup(99).is_none());
    }

    #[test]
    fn test_empty_catalog_misses() {
        let catalog = RuleCatalog::empty();
        assert!(catalog.is_empty());
        assert!(catalog.lookup(1).is_none());
    }
}
