//! Transformation primitives shared by the rule strategies.
//!
//! Each primitive takes a base cell and returns a new one. Steps are
//! absolute positions in a cycle (`step % len`), not offsets from the base.

use super::cell::{CellContent, ShapeColor, ShapeKind};
use super::rng::PuzzleRng;

/// Rotation increment applied per row or column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationStep {
    Quarter,
    Half,
}

impl RotationStep {
    pub fn quarter_turns(self) -> i64 {
        match self {
            RotationStep::Quarter => 1,
            RotationStep::Half => 2,
        }
    }

    pub fn degrees(self) -> u32 {
        self.quarter_turns() as u32 * 90
    }
}

/// Rotate the cell by one increment, wrapping modulo 360.
pub fn rotate(base: &CellContent, step: RotationStep) -> CellContent {
    base.with_rotation(base.rotation.turned(step.quarter_turns()))
}

/// Add `increment` to the shape count, flooring at zero.
pub fn sum(base: &CellContent, increment: i32) -> CellContent {
    base.with_count_delta(increment)
}

/// Sum step for a withheld target. A non-positive count is raised to one.
pub fn sum_target(base: &CellContent, increment: i32) -> CellContent {
    let target = sum(base, increment);
    if target.count == 0 {
        target.with_count(1)
    } else {
        target
    }
}

/// Recolor with the palette entry at `step`.
pub fn color_progression(base: &CellContent, palette: &[ShapeColor], step: usize) -> CellContent {
    if palette.is_empty() {
        return base.clone();
    }
    base.with_color(palette[step % palette.len()])
}

/// Replace the shape with the cycle entry at `step`.
pub fn shape_progression(base: &CellContent, cycle: &[ShapeKind], step: usize) -> CellContent {
    if cycle.is_empty() {
        return base.clone();
    }
    base.with_kind(cycle[step % cycle.len()])
}

/// Even steps are visible (an absent base is restored to one shape), odd
/// steps are absent.
pub fn presence_toggle(base: &CellContent, step: usize) -> CellContent {
    if step % 2 == 0 {
        base.with_count(base.count.max(1))
    } else {
        base.with_count(0)
    }
}

/// Recolor from a secondary palette, independent of any progression.
pub fn color_alternation(base: &CellContent, palette: &[ShapeColor], step: usize) -> CellContent {
    color_progression(base, palette, step)
}

/// A count delta that differs from `delta` by one and is never zero.
pub fn wrong_delta(rng: &mut dyn PuzzleRng, delta: i32) -> i32 {
    let mut wrong = delta + if rng.int_in_range(0, 1) == 0 { 1 } else { -1 };
    if wrong == delta || wrong == 0 {
        wrong = delta + if delta > 1 { -1 } else { 1 };
    }
    if wrong == 0 {
        wrong = 1;
    }
    wrong
}

/// Index of another entry in a cycle of `len` items, offset 1..len-1 from
/// `current`. Returns `current` when the cycle has a single entry.
pub fn wrong_cycle_index(rng: &mut dyn PuzzleRng, len: usize, current: usize) -> usize {
    if len <= 1 {
        return current;
    }
    let offset = rng.int_in_range(1, (len - 1) as i32) as usize;
    (current + offset) % len
}

/// Position of `item` in `cycle`, or 0 when absent.
pub fn cycle_position<T: PartialEq>(cycle: &[T], item: &T) -> usize {
    cycle.iter().position(|c| c == item).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::cell::Rotation;
    use crate::matrix::rng::SeededRng;

    fn base() -> CellContent {
        CellContent::single(ShapeKind::Square, ShapeColor::Blue, 2, Rotation::Deg270)
    }

    #[test]
    fn test_rotate_wraps() {
        assert_eq!(rotate(&base(), RotationStep::Quarter).rotation, Rotation::Deg0);
        assert_eq!(rotate(&base(), RotationStep::Half).rotation, Rotation::Deg90);
    }

    #[test]
    fn test_sum_floors_at_zero() {
        assert_eq!(sum(&base(), 3).count, 5);
        assert_eq!(sum(&base(), -7).count, 0);
    }

    #[test]
    fn test_sum_target_raises_non_positive_to_one() {
        assert_eq!(sum_target(&base(), -2).count, 1);
        assert_eq!(sum_target(&base(), -9).count, 1);
        assert_eq!(sum_target(&base(), 1).count, 3);
        let target = sum_target(&base(), -4);
        assert_eq!(target.kind(), base().kind());
        assert_eq!(target.rotation, base().rotation);
    }

    #[test]
    fn test_progressions_use_absolute_step() {
        let palette = [ShapeColor::Red, ShapeColor::Green, ShapeColor::Pink];
        assert_eq!(color_progression(&base(), &palette, 4).color(), Some(ShapeColor::Green));
        let cycle = [ShapeKind::Star, ShapeKind::Circle];
        assert_eq!(shape_progression(&base(), &cycle, 3).kind(), Some(ShapeKind::Circle));
        assert_eq!(color_progression(&base(), &[], 1), base());
    }

    #[test]
    fn test_presence_toggle() {
        let hidden = presence_toggle(&base(), 1);
        assert_eq!(hidden.count, 0);
        assert_eq!(presence_toggle(&hidden, 2).count, 1);
        assert_eq!(presence_toggle(&base(), 0).count, 2);
    }

    #[test]
    fn test_wrong_delta_never_matches_or_zero() {
        let mut rng = SeededRng::from_seed("wrong-delta");
        for delta in 1..=4 {
            for _ in 0..50 {
                let wrong = wrong_delta(&mut rng, delta);
                assert_ne!(wrong, delta);
                assert_ne!(wrong, 0);
                assert_eq!((wrong - delta).abs(), 1);
            }
        }
    }

    #[test]
    fn test_wrong_cycle_index_differs() {
        let mut rng = SeededRng::from_seed("cycle");
        for len in 2..=6 {
            for current in 0..len {
                let idx = wrong_cycle_index(&mut rng, len, current);
                assert!(idx < len);
                assert_ne!(idx, current);
            }
        }
        assert_eq!(wrong_cycle_index(&mut rng, 1, 0), 0);
    }
}
