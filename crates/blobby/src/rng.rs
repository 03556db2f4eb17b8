//! Deterministic random number generation.
//!
//! Shapes are generated from an explicit seed so the same seed always
//! reproduces the same blob.

use std::f64::consts::TAU;

/// A fast, deterministic pseudo-random number generator.
///
/// Uses a Linear Congruential Generator (LCG) with parameters from
/// Numerical Recipes.
///
/// # Example
/// ```
/// use blobby::rng::Rng;
///
/// let mut rng = Rng::new(12345);
/// let value = rng.next_f64(); // Returns value in [0, 1)
/// ```
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed.
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self { state: seed.wrapping_add(1) }
    }

    /// Get the next raw u64 value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    /// Get a random f64 in the range [0, 1).
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        // High bits have the better distribution
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Get a random f64 in the range [min, max).
    #[inline]
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Get a random index in the range [0, len).
    #[inline]
    pub fn next_index(&mut self, len: usize) -> usize {
        (self.next_f64() * len as f64) as usize
    }

    /// Get a random integer in the inclusive range [min, max].
    ///
    /// Callers guarantee `min <= max`.
    #[inline]
    pub fn next_int_inclusive(&mut self, min: usize, max: usize) -> usize {
        min + self.next_index(max - min + 1)
    }

    /// Get a sample from the normal distribution N(mean, std_dev²).
    ///
    /// Box-Muller transform. One of the pair is discarded.
    pub fn next_gaussian(&mut self, mean: f64, std_dev: f64) -> f64 {
        // 1 - [0, 1) = (0, 1], keeps ln() finite
        let u1 = 1.0 - self.next_f64();
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos();
        mean + z * std_dev
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::new(0)
    }
}
