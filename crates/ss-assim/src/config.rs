//! Ensemble filter configuration.

use nalgebra::{DMatrix, DVector};
use ss_core::{CrowdConfig, Tick};

use crate::{AssimError, AssimResult};

/// Parameters an ensemble estimator is constructed from.
///
/// `observation_operator` maps a state vector (length
/// `state_vector_length`) to an observation vector (length
/// `data_vector_length`).  `observation_noise` holds the diagonal of the
/// observation-noise covariance, one entry per observed coordinate.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterConfig {
    /// Ticks the estimator is expected to be stepped for.
    pub max_iterations:       u64,
    pub ensemble_size:        usize,
    /// Assimilate on ticks that are a multiple of this.
    pub assimilation_period:  u64,
    pub state_vector_length:  usize,
    pub data_vector_length:   usize,
    pub observation_operator: DMatrix<f64>,
    pub observation_noise:    DVector<f64>,
    /// Keep per-member forecasts and analyses for `process_results`.
    pub keep_results:         bool,
}

impl FilterConfig {
    /// Every coordinate observed directly, with the same noise on each.
    pub fn identity(
        state_vector_length: usize,
        noise_std:           f64,
        ensemble_size:       usize,
        assimilation_period: u64,
        max_iterations:      u64,
    ) -> Self {
        Self {
            max_iterations,
            ensemble_size,
            assimilation_period,
            state_vector_length,
            data_vector_length: state_vector_length,
            observation_operator: DMatrix::identity(state_vector_length, state_vector_length),
            observation_noise: DVector::from_element(state_vector_length, noise_std),
            keep_results: true,
        }
    }

    /// Shape and range checks; the first violation is returned.
    pub fn validate(&self) -> AssimResult<()> {
        if self.ensemble_size == 0 {
            return Err(AssimError::Config("ensemble_size must be at least 1".into()));
        }
        if self.assimilation_period == 0 {
            return Err(AssimError::Config("assimilation_period must be at least 1".into()));
        }

        let (rows, cols) = self.observation_operator.shape();
        if rows != self.data_vector_length {
            return Err(AssimError::LengthMismatch {
                expected: self.data_vector_length,
                got:      rows,
                what:     "observation operator rows",
            });
        }
        if cols != self.state_vector_length {
            return Err(AssimError::LengthMismatch {
                expected: self.state_vector_length,
                got:      cols,
                what:     "observation operator columns",
            });
        }
        if self.observation_noise.len() != self.data_vector_length {
            return Err(AssimError::LengthMismatch {
                expected: self.data_vector_length,
                got:      self.observation_noise.len(),
                what:     "observation noise",
            });
        }
        if let Some(bad) = self.observation_noise.iter().find(|v| !(v.is_finite() && **v >= 0.0)) {
            return Err(AssimError::Config(format!("observation noise entry {bad} must be finite and >= 0")));
        }
        Ok(())
    }

    /// [`validate`](Self::validate), plus agreement with the model's state
    /// vector length.
    pub fn validate_for(&self, model: &CrowdConfig) -> AssimResult<()> {
        self.validate()?;
        if self.state_vector_length != model.state_len() {
            return Err(AssimError::LengthMismatch {
                expected: model.state_len(),
                got:      self.state_vector_length,
                what:     "filter state vector",
            });
        }
        Ok(())
    }

    #[inline]
    pub fn is_assimilation_tick(&self, tick: Tick) -> bool {
        tick.is_multiple_of(self.assimilation_period)
    }
}
