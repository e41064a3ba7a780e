//! xorshift64* random number generator
//!
//! This is a fast, high-quality PRNG that is deterministic and suitable
//! for simulation purposes.
//!
//! # Algorithm
//!
//! xorshift64* is a variant of xorshift that passes TestU01's BigCrush
//! statistical tests. It uses 64-bit state and produces 64-bit output.
//!
//! # Determinism
//!
//! Same seed → same sequence of random numbers, and therefore the same
//! arrival counts for the same sequence of windows.

use crate::error::WorkloadError;
use rand::RngCore;
use rand_distr::{Distribution, Poisson};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use session_workload_core_rs::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let value = rng.next();
/// let count = rng.poisson(4.5).unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    /// Internal state (64-bit)
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    ///
    /// # Example
    /// ```
    /// use session_workload_core_rs::RngManager;
    ///
    /// let rng = RngManager::new(12345);
    /// assert_eq!(rng.get_state(), 12345);
    /// ```
    pub fn new(seed: u64) -> Self {
        // Ensure seed is never zero (xorshift requirement)
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Create an RNG seeded from operating system entropy
    ///
    /// Use this for independent runs that do not need to be replayed.
    pub fn from_entropy() -> Self {
        Self::new(rand::random::<u64>())
    }

    /// Create an RNG from an arbitrary byte seed
    ///
    /// The bytes are hashed with SHA-256 and the first eight bytes of the
    /// digest become the 64-bit seed, so byte seeds of any length are usable.
    ///
    /// # Example
    /// ```
    /// use session_workload_core_rs::RngManager;
    ///
    /// let mut a = RngManager::from_seed_bytes(b"experiment-7");
    /// let mut b = RngManager::from_seed_bytes(b"experiment-7");
    /// assert_eq!(a.next(), b.next());
    /// ```
    pub fn from_seed_bytes(bytes: &[u8]) -> Self {
        let digest = Sha256::digest(bytes);
        let mut seed = [0u8; 8];
        seed.copy_from_slice(&digest[..8]);
        Self::new(u64::from_le_bytes(seed))
    }

    /// Generate next random u64 value
    ///
    /// This advances the internal state and returns a random value.
    pub fn next(&mut self) -> u64 {
        // xorshift64* algorithm
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Get current RNG state (for checkpointing/replay)
    ///
    /// # Example
    /// ```
    /// use session_workload_core_rs::RngManager;
    ///
    /// let rng = RngManager::new(12345);
    /// let state = rng.get_state();
    ///
    /// // Later, can recreate RNG from this state
    /// let rng2 = RngManager::new(state);
    /// ```
    pub fn get_state(&self) -> u64 {
        self.state
    }

    /// Generate random f64 in range [0.0, 1.0)
    ///
    /// # Example
    /// ```
    /// use session_workload_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(12345);
    /// let probability = rng.next_f64();
    /// assert!(probability >= 0.0 && probability < 1.0);
    /// ```
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next();
        // Convert to [0.0, 1.0) by dividing by 2^64
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Sample a count from a Poisson distribution with mean `lambda`
    ///
    /// A zero mean yields 0 without consuming randomness.
    ///
    /// # Errors
    /// `InvalidRate` when `lambda` is negative or not finite.
    ///
    /// # Example
    /// ```
    /// use session_workload_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(42);
    /// assert_eq!(rng.poisson(0.0).unwrap(), 0);
    /// let _arrivals = rng.poisson(20.0).unwrap();
    /// assert!(rng.poisson(-1.0).is_err());
    /// ```
    pub fn poisson(&mut self, lambda: f64) -> Result<u64, WorkloadError> {
        if lambda == 0.0 {
            return Ok(0);
        }
        if !lambda.is_finite() {
            return Err(WorkloadError::InvalidRate(lambda));
        }
        let dist = Poisson::new(lambda).map_err(|_| WorkloadError::InvalidRate(lambda))?;
        let draw: f64 = dist.sample(self);
        Ok(draw as u64)
    }
}

/// Lets `rand_distr` distributions draw from the xorshift stream, so every
/// sample advances the same replayable state
impl RngCore for RngManager {
    fn next_u32(&mut self) -> u32 {
        (self.next() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_seed_converted_to_nonzero() {
        let rng = RngManager::new(0);
        assert_ne!(rng.get_state(), 0, "Zero seed should be converted to 1");
    }

    #[test]
    fn test_next_f64_in_range() {
        let mut rng = RngManager::new(12345);

        for _ in 0..1000 {
            let val = rng.next_f64();
            assert!(
                (0.0..1.0).contains(&val),
                "next_f64() produced value {} outside [0.0, 1.0)",
                val
            );
        }
    }

    #[test]
    fn test_poisson_zero_mean_consumes_nothing() {
        let mut rng = RngManager::new(7);
        let before = rng.get_state();

        assert_eq!(rng.poisson(0.0).unwrap(), 0);
        assert_eq!(rng.get_state(), before);
    }

    #[test]
    fn test_poisson_rejects_bad_means() {
        let mut rng = RngManager::new(7);
        let before = rng.get_state();

        for bad in [-3.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(rng.poisson(bad), Err(WorkloadError::InvalidRate(_))));
        }
        assert_eq!(rng.get_state(), before);
    }

    fn sample_mean(lambda: f64, draws: usize, seed: u64) -> f64 {
        let mut rng = RngManager::new(seed);
        let total: u64 = (0..draws).map(|_| rng.poisson(lambda).unwrap()).sum();
        total as f64 / draws as f64
    }

    #[test]
    fn test_small_mean_converges() {
        let lambda = 3.5;
        let draws = 20_000;
        let mean = sample_mean(lambda, draws, 11);
        // 5 standard errors
        let tolerance = 5.0 * (lambda / draws as f64).sqrt();
        assert!((mean - lambda).abs() < tolerance, "mean {} vs {}", mean, lambda);
    }

    #[test]
    fn test_large_mean_converges() {
        let lambda = 250.0;
        let draws = 20_000;
        let mean = sample_mean(lambda, draws, 12);
        let tolerance = 5.0 * (lambda / draws as f64).sqrt();
        assert!((mean - lambda).abs() < tolerance, "mean {} vs {}", mean, lambda);
    }

    #[test]
    fn test_large_mean_variance_matches_mean() {
        let lambda = 40.0;
        let draws = 20_000;
        let mut rng = RngManager::new(99);
        let samples: Vec<f64> = (0..draws)
            .map(|_| rng.poisson(lambda).unwrap() as f64)
            .collect();
        let mean = samples.iter().sum::<f64>() / draws as f64;
        let variance =
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (draws as f64 - 1.0);

        assert!(
            (variance / lambda - 1.0).abs() < 0.1,
            "variance {} should be close to {}",
            variance,
            lambda
        );
    }

    #[test]
    fn test_rng_core_u64_matches_next() {
        let mut a = RngManager::new(5);
        let mut b = RngManager::new(5);
        for _ in 0..16 {
            assert_eq!(a.next_u64(), b.next());
        }
    }

    #[test]
    fn test_seed_bytes_differ() {
        let a = RngManager::from_seed_bytes(b"alpha");
        let b = RngManager::from_seed_bytes(b"beta");
        assert_ne!(a.get_state(), b.get_state());
    }

    #[test]
    fn test_entropy_seeds_are_nonzero() {
        let rng = RngManager::from_entropy();
        assert_ne!(rng.get_state(), 0);
    }
}
