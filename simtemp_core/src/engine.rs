//! Synthetic temperature generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use simtemp_traits::TempSource;

/// Lowest reading the engine can produce (inclusive), in m°C.
pub const TEMP_MIN_MC: i32 = 40_000;
/// Upper bound of the reading range (exclusive), in m°C.
pub const TEMP_MAX_MC: i32 = 50_000;

/// Uniform pseudo-random readings in `[TEMP_MIN_MC, TEMP_MAX_MC)`.
#[derive(Debug, Clone)]
pub struct SamplingEngine {
    rng: StdRng,
}

impl SamplingEngine {
    /// Engine seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible engine: the same seed yields the same sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn generate(&mut self) -> i32 {
        self.rng.random_range(TEMP_MIN_MC..TEMP_MAX_MC)
    }
}

impl Default for SamplingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TempSource for SamplingEngine {
    fn sample(&mut self) -> Result<i32, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.generate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readings_stay_in_range() {
        let mut engine = SamplingEngine::new();
        for _ in 0..10_000 {
            let v = engine.generate();
            assert!((TEMP_MIN_MC..TEMP_MAX_MC).contains(&v), "out of range: {v}");
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SamplingEngine::with_seed(7);
        let mut b = SamplingEngine::with_seed(7);
        let xs: Vec<i32> = (0..32).map(|_| a.generate()).collect();
        let ys: Vec<i32> = (0..32).map(|_| b.generate()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn readings_cover_the_range() {
        // 10 buckets of 1000 m°C; 5000 draws leave every bucket hit with overwhelming odds
        let mut engine = SamplingEngine::with_seed(1);
        let mut hits = [0u32; 10];
        for _ in 0..5_000 {
            let v = engine.generate();
            hits[((v - TEMP_MIN_MC) / 1_000) as usize] += 1;
        }
        assert!(hits.iter().all(|&h| h > 0), "uneven coverage: {hits:?}");
    }
}
