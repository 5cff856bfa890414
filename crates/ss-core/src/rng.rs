//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! A model run owns exactly one [`SimRng`], seeded from
//! [`CrowdConfig::seed`](crate::CrowdConfig::seed).  It is passed by `&mut`
//! into agent construction (exit choice, speeds, activation times) and then
//! kept by the model for the per-tick wiggle draws.  The tick loop is
//! strictly sequential, so the draw order is fixed by population order and
//! two runs with the same seed and configuration are bit-identical.
//!
//! There is no process-wide generator anywhere in the workspace.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp, Normal};

use crate::{CoreError, CoreResult};

/// Simulation-level RNG, threaded explicitly through the model.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform sample in `[0, 1)`.
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }

    /// Sample `Normal(mean, std_dev)`.
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> CoreResult<f64> {
        let dist = Normal::new(mean, std_dev)
            .map_err(|e| CoreError::Config(format!("normal({mean}, {std_dev}): {e}")))?;
        Ok(dist.sample(&mut self.0))
    }

    /// Sample an exponential distribution with rate `lambda` (mean `1 / lambda`).
    pub fn exponential(&mut self, lambda: f64) -> CoreResult<f64> {
        let dist = Exp::new(lambda)
            .map_err(|e| CoreError::Config(format!("exp({lambda}): {e}")))?;
        Ok(dist.sample(&mut self.0))
    }
}
