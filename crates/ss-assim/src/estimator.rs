//! The estimator side of the seam.

use ss_core::Tick;

use crate::{AssimResult, FilterConfig, ForecastModel};

/// Root-mean-square errors against truth for one tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ErrorRecord {
    pub tick:        Tick,
    /// Ensemble mean before assimilation.
    pub forecast:    f64,
    /// Ensemble mean after assimilation.
    pub analysis:    f64,
    /// The observation itself.
    pub observation: f64,
}

/// An ensemble state estimator driving members of `Self::Model`.
///
/// Implementations step every member once per [`step`](Self::step) and
/// assimilate when [`FilterConfig::is_assimilation_tick`] holds for the
/// tick just simulated.  After the run, [`process_results`](Self::process_results)
/// fills the error records returned by [`rmse`](Self::rmse), in tick order.
pub trait EnsembleEstimator: Sized {
    type Model: ForecastModel;

    fn new(
        filter: FilterConfig,
        model_config: &<Self::Model as ForecastModel>::Config,
    ) -> AssimResult<Self>;

    fn step(&mut self) -> AssimResult<()>;

    fn process_results(&mut self) -> AssimResult<()>;

    fn rmse(&self) -> &[ErrorRecord];
}
