//! Property-based tests for item generation.

use proptest::prelude::*;

use matrix_core::matrix::{
    clamp_difficulty, decode, difficulty_estimate, encode, select_rule_set, ItemGenerator,
    PuzzleRng, SeededRng, MAX_DIFFICULTY, OPTION_COUNT,
};

fn seed_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{1,24}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // 1. Every item has eight options, exactly one of them correct
    #[test]
    fn items_are_well_formed(
        seed in seed_strategy(),
        difficulty in -10i32..10,
        item_index in 0usize..40,
    ) {
        let mut generator = ItemGenerator::default();
        let item = generator.build_item(difficulty, item_index, &seed);
        prop_assert_eq!(item.options.len(), OPTION_COUNT);
        prop_assert_eq!(item.matrix_cells.len(), 8);
        prop_assert_eq!(item.matching_options(), 1);
        prop_assert_eq!(item.correct_option(), &item.ground_truth);
        prop_assert!(
            item.duplicate_signatures().is_empty() || item.filler_count > 0,
            "duplicates without padding for seed={seed}"
        );
    }

    // 2. Generation is a pure function of its inputs
    #[test]
    fn items_are_deterministic(seed in seed_strategy(), item_index in 0usize..20) {
        let a = ItemGenerator::default().build_item(2, item_index, &seed);
        let b = ItemGenerator::default().build_item(2, item_index, &seed);
        prop_assert_eq!(a, b);
    }

    // 3. Difficulty is always clamped
    #[test]
    fn difficulty_clamped(difficulty in any::<i32>()) {
        let level = clamp_difficulty(difficulty);
        prop_assert!((1..=MAX_DIFFICULTY).contains(&level));
    }

    // 4. Difficulty estimate stays within its floor and ceiling
    #[test]
    fn estimate_bounded(seed in ".*", difficulty in any::<i32>(), item_index in 0usize..100) {
        let estimate = difficulty_estimate(
            clamp_difficulty(difficulty),
            select_rule_set(item_index).id(),
            &seed,
        );
        prop_assert!((0.1..=0.95).contains(&estimate), "estimate={estimate}");
    }

    // 5. int_in_range stays within (possibly swapped) bounds
    #[test]
    fn int_in_range_bounded(seed in ".*", a in any::<i32>(), b in any::<i32>()) {
        let mut rng = SeededRng::from_seed(&seed);
        let v = rng.int_in_range(a, b);
        prop_assert!(v >= a.min(b) && v <= a.max(b));
    }

    // 6. Transport encoding round-trips
    #[test]
    fn encoding_round_trips(markup in ".*") {
        let encoded = encode(&markup);
        prop_assert_eq!(decode(&encoded).unwrap(), markup);
    }
}
