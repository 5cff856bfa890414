//! Synthetic truth and noisy observations for twin experiments.

use nalgebra::{DMatrix, DVector};
use ss_core::{CrowdConfig, SimRng};
use ss_sim::CrowdModel;
use tracing::info;

use crate::{AssimError, AssimResult};

/// Run a full batch of the crowd model and return its state after every
/// step.
///
/// Requires `history_enabled`; runs for `iteration_limit` steps or until
/// every agent has left.
pub fn make_truth(config: &CrowdConfig) -> AssimResult<Vec<Vec<f64>>> {
    if !config.history_enabled {
        return Err(AssimError::Config("truth run needs history_enabled".into()));
    }
    let mut model = CrowdModel::new(config.clone())?;
    let report = model.batch(config.iteration_limit);
    info!(steps = report.iterations, finished = report.finished, "truth generated");
    Ok(model.state_history().to_vec())
}

/// `operator · state`.
pub fn observe(operator: &DMatrix<f64>, state: &[f64]) -> AssimResult<Vec<f64>> {
    if operator.ncols() != state.len() {
        return Err(AssimError::LengthMismatch {
            expected: operator.ncols(),
            got:      state.len(),
            what:     "state vector",
        });
    }
    let observed = operator * DVector::from_column_slice(state);
    Ok(observed.iter().copied().collect())
}

/// Observe every truth state and add independent `Normal(noise_mean,
/// noise_std)` noise to each observed coordinate.
pub fn make_observations(
    truth:      &[Vec<f64>],
    operator:   &DMatrix<f64>,
    noise_mean: f64,
    noise_std:  f64,
    rng:        &mut SimRng,
) -> AssimResult<Vec<Vec<f64>>> {
    let mut observations = Vec::with_capacity(truth.len());
    for state in truth {
        let mut observed = observe(operator, state)?;
        for v in &mut observed {
            *v += rng.normal(noise_mean, noise_std)?;
        }
        observations.push(observed);
    }
    Ok(observations)
}
