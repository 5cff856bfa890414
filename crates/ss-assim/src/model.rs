//! The model side of the estimator seam.

use ss_core::{CrowdConfig, Tick};
use ss_sim::{CrowdModel, CrowdModelBuilder};

use crate::AssimResult;

/// A simulation an ensemble estimator can run members of.
///
/// The estimator constructs one instance per ensemble member from the shared
/// model configuration and a per-member seed, steps them in lockstep, and
/// reads or overwrites their state vectors around each assimilation.
pub trait ForecastModel: Sized {
    type Config;

    fn from_config(config: &Self::Config, seed: u64) -> AssimResult<Self>;

    fn step(&mut self);

    fn tick(&self) -> Tick;

    fn state(&self) -> Vec<f64>;

    fn set_state(&mut self, state: &[f64]) -> AssimResult<()>;
}

impl ForecastModel for CrowdModel {
    type Config = CrowdConfig;

    fn from_config(config: &CrowdConfig, seed: u64) -> AssimResult<Self> {
        Ok(CrowdModelBuilder::new(config.clone()).seed(seed).build()?)
    }

    fn step(&mut self) {
        CrowdModel::step(self);
    }

    fn tick(&self) -> Tick {
        CrowdModel::tick(self)
    }

    fn state(&self) -> Vec<f64> {
        CrowdModel::state(self)
    }

    fn set_state(&mut self, state: &[f64]) -> AssimResult<()> {
        Ok(CrowdModel::set_state(self, state)?)
    }
}
