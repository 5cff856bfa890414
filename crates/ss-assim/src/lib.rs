//! `ss-assim` — the seam between the crowd model and an ensemble state
//! estimator.
//!
//! The estimator itself lives outside this workspace.  This crate pins down
//! what it is built from ([`FilterConfig`]), what it drives
//! ([`ForecastModel`], implemented for [`ss_sim::CrowdModel`]) and what it
//! reports ([`EnsembleEstimator`], [`ErrorRecord`]), plus the generators for
//! twin experiments: a truth run and noisy observations of it.
//!
//! ```rust,ignore
//! let truth = make_truth(&model_config)?;
//! let filter = FilterConfig::identity(model_config.state_len(), 1.0, 10, 50, 300);
//! let obs = make_observations(&truth, &filter.observation_operator, 0.0, 1.0, &mut rng)?;
//! println!("{}", rmse(&obs[0], &truth[0])?);
//! ```

pub mod config;
pub mod error;
pub mod estimator;
pub mod metrics;
pub mod model;
pub mod synthetic;


pub use config::FilterConfig;
pub use error::{AssimError, AssimResult};
pub use estimator::{EnsembleEstimator, ErrorRecord};
pub use metrics::{ensemble_mean, rmse};
pub use model::ForecastModel;
pub use synthetic::{make_observations, make_truth, observe};
