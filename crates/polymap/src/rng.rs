//! Seeded pseudo-random numbers for noise functions.
//!
//! A Linear Congruential Generator with Numerical Recipes parameters. Noise
//! builds a fresh generator per call from `(seed, generation)`, so the
//! result depends on nothing but those two numbers.
//!
//! # Example
//! ```
//! use polymap::rng::Rng;
//!
//! let mut rng = Rng::new(12345);
//! let value = rng.next_f64(); // Returns value in [0, 1)
//! assert!((0.0..1.0).contains(&value));
//! ```

#[derive(Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// The same seed always produces the same sequence.
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self { state: seed.wrapping_add(1) }
    }

    /// Generator for one `(seed, generation)` pair.
    pub fn for_generation(seed: u64, generation: usize) -> Self {
        // Golden-ratio multiplier spreads neighbouring generations apart
        let mut rng = Self::new(seed ^ (generation as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        // First output of an LCG is strongly correlated with the seed
        rng.next_u64();
        rng
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    /// A value in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        // High bits have the better distribution
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// A value in `[-1, 1)`.
    #[inline]
    pub fn next_signed(&mut self) -> f64 {
        self.next_f64() * 2.0 - 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Rng::new(7);
        let mut b = Rng::new(7);
        for _ in 0..10 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn signed_range() {
        let mut rng = Rng::new(99);
        for _ in 0..1000 {
            let v = rng.next_signed();
            assert!((-1.0..1.0).contains(&v), "out of range: {}", v);
        }
    }

    #[test]
    fn generations_differ() {
        let a = Rng::for_generation(42, 1).next_f64();
        let b = Rng::for_generation(42, 2).next_f64();
        assert_ne!(a, b);
        assert_eq!(a, Rng::for_generation(42, 1).next_f64());
    }
}
