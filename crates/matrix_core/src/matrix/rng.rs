//! Deterministic random number generation for matrix items.
//!
//! Every generated item is a pure function of its seed string. The seed is
//! hashed once into a 32-bit state, and every draw runs a two-round
//! xorshift-multiply mix over that state. All arithmetic is wrapping `u32`,
//! so the sequence is identical on every platform.
//!
//! - `PuzzleRng`: the trait the rule strategies draw from
//! - `SeededRng`: the string-seeded implementation
//! - `SeedCache`: optional per-generator cache of the last seed hash
//!
//! # Example
//!
//! ```
//! use matrix_core::matrix::rng::{PuzzleRng, SeededRng};
//!
//! let mut a = SeededRng::from_seed("seed-A");
//! let mut b = SeededRng::from_seed("seed-A");
//! assert_eq!(a.next_u32(), b.next_u32());
//!
//! let v = a.int_in_range(1, 3);
//! assert!((1..=3).contains(&v));
//! ```

/// Initial accumulator for the seed hash.
const HASH_INIT: u32 = 1_779_033_703;
const HASH_MUL: u32 = 3_432_918_353;
const MIX_MUL_1: u32 = 2_246_822_507;
const MIX_MUL_2: u32 = 3_266_489_909;

/// Source of 32-bit draws plus the derived helpers used by the generator.
///
/// Only `next_u32` is required. The helpers consume draws in a fixed way so
/// that two implementations returning the same raw sequence also agree on
/// every derived value.
pub trait PuzzleRng {
    /// Advance the state and return the next unsigned 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Returns an integer in `[min, max]` (inclusive).
    ///
    /// Reversed bounds are swapped. When `min == max` no draw is consumed.
    fn int_in_range(&mut self, min: i32, max: i32) -> i32 {
        let (lo, hi) = if min > max { (max, min) } else { (min, max) };
        if lo == hi {
            return lo;
        }
        let span = (hi as i64 - lo as i64 + 1) as u64;
        let offset = self.next_u32() as u64 % span;
        (lo as i64 + offset as i64) as i32
    }

    /// Returns an index in `[0, len)`. Returns 0 for `len <= 1`.
    fn index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.int_in_range(0, (len - 1) as i32) as usize
    }

    /// Returns a float in `[0.0, 1.0)` built from a single draw.
    fn unit_f64(&mut self) -> f64 {
        self.next_u32() as f64 / 4_294_967_296.0
    }
}

/// Pick one element uniformly. `None` for an empty slice.
pub fn choice<'a, T>(rng: &mut dyn PuzzleRng, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.index(items.len()))
}

/// Shuffle a slice in place using Fisher-Yates from the back.
/// This is a free function since generic methods aren't dyn-compatible.
pub fn shuffle_with_rng<T>(slice: &mut [T], rng: &mut dyn PuzzleRng) {
    for i in (1..slice.len()).rev() {
        let j = (rng.next_u32() % (i as u32 + 1)) as usize;
        slice.swap(i, j);
    }
}

/// Shuffled copy of `items`; the input is left untouched.
pub fn shuffled<T: Clone>(items: &[T], rng: &mut dyn PuzzleRng) -> Vec<T> {
    let mut out = items.to_vec();
    shuffle_with_rng(&mut out, rng);
    out
}

/// Hash a seed string into the initial generator state.
///
/// Walks the UTF-16 code units of the seed, XOR-ing each into the
/// accumulator, multiplying and rotating. Order sensitive: "ab" and "ba"
/// hash differently.
pub fn hash_seed(seed: &str) -> u32 {
    let len = seed.encode_utf16().count() as u32;
    let mut h = HASH_INIT ^ len;
    for unit in seed.encode_utf16() {
        h = (h ^ unit as u32).wrapping_mul(HASH_MUL);
        h = h.rotate_left(13);
    }
    h
}

/// String-seeded generator. Owned by exactly one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    /// Create a generator from a seed string.
    pub fn from_seed(seed: &str) -> Self {
        Self::from_hash(hash_seed(seed))
    }

    /// Create a generator from an already hashed seed.
    pub fn from_hash(hash: u32) -> Self {
        Self { state: hash }
    }

    /// Current internal state (the value the next draw will mix).
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl PuzzleRng for SeededRng {
    fn next_u32(&mut self) -> u32 {
        let mut s = self.state;
        s = (s ^ (s >> 16)).wrapping_mul(MIX_MUL_1);
        s = (s ^ (s >> 13)).wrapping_mul(MIX_MUL_2);
        s ^= s >> 16;
        self.state = s;
        s
    }
}

/// Remembers the hash of the last seed it saw.
///
/// Only skips re-hashing when the same seed is requested twice in a row.
/// Every call still returns a fresh generator starting at the seed's
/// initial state, so nothing leaks from one item into the next.
#[derive(Debug, Clone, Default)]
pub struct SeedCache {
    last: Option<(String, u32)>,
}

impl SeedCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh generator for `seed`, reusing the cached hash when possible.
    pub fn rng_for(&mut self, seed: &str) -> SeededRng {
        if let Some((cached, hash)) = &self.last {
            if cached == seed {
                return SeededRng::from_hash(*hash);
            }
        }
        let hash = hash_seed(seed);
        self.last = Some((seed.to_string(), hash));
        SeededRng::from_hash(hash)
    }

    /// Forget the cached hash.
    pub fn clear(&mut self) {
        self.last = None;
    }
}
