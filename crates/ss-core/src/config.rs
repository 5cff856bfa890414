//! Crowd model configuration.
//!
//! Every recognized option is a named, typed field.  [`CrowdConfig::validate`]
//! is the single validation pass; the model builder calls it before any agent
//! is created so bad parameters fail fast at construction instead of at the
//! first movement.

use crate::{Bounds, CoreError, CoreResult};

/// Top-level crowd model configuration.
///
/// Typically built in code (`CrowdConfig { population_size: 50,
/// ..Default::default() }`) or loaded from JSON by the application crate
/// with the `serde` feature enabled.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CrowdConfig {
    /// Corridor length along the flow axis.
    pub width: f64,
    /// Corridor extent across the flow axis.
    pub height: f64,

    /// Number of agents, fixed for the whole run.
    pub population_size: usize,

    /// Number of entrance gates on the left edge.
    pub entrance_count: usize,
    /// Spread of the initial position around an entrance gate, across the
    /// flow axis.
    pub entrance_spacing: f64,
    /// Rate of the exponential activation-time distribution.  Mean
    /// activation time is `1 / entrance_rate` ticks.
    pub entrance_rate: f64,

    /// Number of exit gates on the right edge.
    pub exit_count: usize,
    /// Exit proximity radius: an agent closer than this to its exit leaves.
    pub exit_spacing: f64,

    /// Slowest speed an agent will consider before wiggling.
    pub min_speed: f64,
    pub desired_speed_mean: f64,
    pub desired_speed_std: f64,
    /// Number of speed decrements between the mean desired speed and
    /// `min_speed`.
    pub speed_steps: u32,

    /// Collision query radius.
    pub separation: f64,
    /// Largest integer offset, per axis, of the wiggle fallback.
    pub max_wiggle: u32,

    /// Iteration budget for the batch driver.
    pub iteration_limit: u64,
    /// Keep per-agent location histories, completion samples and the
    /// per-tick state history.
    pub history_enabled: bool,

    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,
}

impl Default for CrowdConfig {
    fn default() -> Self {
        Self {
            width:              200.0,
            height:             100.0,
            population_size:    700,
            entrance_count:     3,
            entrance_spacing:   2.0,
            entrance_rate:      10.0,
            exit_count:         2,
            exit_spacing:       1.0,
            min_speed:          0.1,
            desired_speed_mean: 1.0,
            desired_speed_std:  1.0,
            speed_steps:        3,
            separation:         2.0,
            max_wiggle:         1,
            iteration_limit:    900,
            history_enabled:    true,
            seed:               42,
        }
    }
}

impl CrowdConfig {
    /// The corridor rectangle.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::corridor(self.width, self.height)
    }

    /// Decrement between consecutive candidate speeds.
    #[inline]
    pub fn speed_step(&self) -> f64 {
        (self.desired_speed_mean - self.min_speed) / self.speed_steps as f64
    }

    /// Length of the flattened state vector (`2 × population_size`).
    #[inline]
    pub fn state_len(&self) -> usize {
        2 * self.population_size
    }

    /// Check every field; the first violation is returned.
    pub fn validate(&self) -> CoreResult<()> {
        positive("width", self.width)?;
        positive("height", self.height)?;
        positive("entrance_rate", self.entrance_rate)?;
        positive("min_speed", self.min_speed)?;
        non_negative("entrance_spacing", self.entrance_spacing)?;
        non_negative("exit_spacing", self.exit_spacing)?;
        non_negative("desired_speed_std", self.desired_speed_std)?;
        non_negative("separation", self.separation)?;

        if self.entrance_count == 0 {
            return Err(CoreError::Config("entrance_count must be at least 1".into()));
        }
        if self.exit_count == 0 {
            return Err(CoreError::Config("exit_count must be at least 1".into()));
        }
        if self.speed_steps == 0 {
            return Err(CoreError::Config("speed_steps must be at least 1".into()));
        }
        if !self.desired_speed_mean.is_finite() || self.desired_speed_mean <= self.min_speed {
            return Err(CoreError::Config(format!(
                "desired_speed_mean ({}) must exceed min_speed ({}); the candidate speed ladder would be empty",
                self.desired_speed_mean, self.min_speed,
            )));
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> CoreResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CoreError::InvalidParameter { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> CoreResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CoreError::InvalidParameter { name, value })
    }
}
