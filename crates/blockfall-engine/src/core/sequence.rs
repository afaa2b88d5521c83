use serde::{Deserialize, Serialize};

use super::piece::CatalogIndex;

/// LCG multiplier (GCC's constants).
pub const LCG_MULTIPLIER: u64 = 1_103_515_245;
/// LCG increment.
pub const LCG_INCREMENT: u64 = 12_345;
/// LCG modulus, `2^31`.
pub const LCG_MODULUS: u64 = 1 << 31;

/// Advances the linear congruential generator by one step.
///
/// The result is always below [`LCG_MODULUS`].
#[must_use]
#[expect(clippy::cast_possible_truncation)]
pub fn hash(seed: u32) -> u32 {
    ((LCG_MULTIPLIER * u64::from(seed) + LCG_INCREMENT) % LCG_MODULUS) as u32
}

/// Maps a hash value onto a catalog index.
///
/// Computes `floor(hash * 7 / (m - 1)) + 1`. The single hash that would land on 8
/// (`m - 1`) is clamped to 7, so the result is always a valid index.
#[must_use]
#[expect(clippy::cast_possible_truncation)]
pub fn scale(hash: u32) -> CatalogIndex {
    let count = CatalogIndex::COUNT as u64;
    let scaled = u64::from(hash) * count / (LCG_MODULUS - 1) + 1;
    CatalogIndex::new(scaled.min(count) as u8)
}

/// Reproducible stream of catalog indices.
///
/// Each item is `scale(hash(state))`, with the hash becoming the new state. Two
/// sequences created from the same seed yield identical indices.
///
/// # Example
///
/// ```
/// use blockfall_engine::PieceSequence;
///
/// let a: Vec<_> = PieceSequence::new(42).take(16).collect();
/// let b: Vec<_> = PieceSequence::new(42).take(16).collect();
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceSequence {
    state: u32,
}

impl PieceSequence {
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Current generator state (the last hash produced, or the seed).
    #[must_use]
    pub const fn state(&self) -> u32 {
        self.state
    }

    /// Returns the next index without advancing.
    #[must_use]
    pub fn peek(&self) -> CatalogIndex {
        scale(hash(self.state))
    }

    /// Advances the generator and returns the new index.
    pub fn advance(&mut self) -> CatalogIndex {
        self.state = hash(self.state);
        scale(self.state)
    }
}

impl Iterator for PieceSequence {
    type Item = CatalogIndex;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.advance())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_known_values() {
        assert_eq!(hash(0), 12_345);
        assert_eq!(hash(1), 1_103_527_590);
        // (1103515245 * 12345 + 12345) mod 2^31
        assert_eq!(hash(12_345), 1_406_932_606);
    }

    #[test]
    fn test_hash_stays_below_modulus() {
        for seed in [0, 1, 7, 0x7fff_ffff, 0x8000_0000, u32::MAX] {
            assert!(u64::from(hash(seed)) < LCG_MODULUS, "seed {seed}");
        }
    }

    #[test]
    fn test_scale_bounds() {
        assert_eq!(scale(0), CatalogIndex::new(1));
        assert_eq!(scale(0x7fff_fffe), CatalogIndex::new(7));
        // The top of the range would be 8 without clamping.
        assert_eq!(scale(0x7fff_ffff), CatalogIndex::new(7));
    }

    #[test]
    fn test_scale_splits_range_evenly() {
        let m = LCG_MODULUS - 1;
        for bucket in 0..7_u64 {
            let low = u32::try_from(bucket * m / 7 + 1).unwrap();
            assert_eq!(scale(low).get(), u8::try_from(bucket).unwrap() + 1);
        }
    }

    #[test]
    fn test_sequence_is_reproducible() {
        let a: Vec<_> = PieceSequence::new(2024).take(500).collect();
        let b: Vec<_> = PieceSequence::new(2024).take(500).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sequence_follows_hash_chain() {
        let mut sequence = PieceSequence::new(99);
        let mut seed = 99;
        for _ in 0..50 {
            seed = hash(seed);
            assert_eq!(sequence.peek(), scale(seed));
            assert_eq!(sequence.next(), Some(scale(seed)));
            assert_eq!(sequence.state(), seed);
        }
    }

    #[test]
    fn test_sequence_covers_whole_catalog() {
        let mut seen = [false; CatalogIndex::COUNT];
        for index in PieceSequence::new(1).take(1000) {
            seen[usize::from(index.get()) - 1] = true;
        }
        assert!(seen.iter().all(|&s| s), "seen: {seen:?}");
    }
}
