//! `ss-sim` — the crowd model and its batch driver.
//!
//! # Tick
//!
//! ```text
//! step():
//!   ① Index    — rebuild the spatial index from every agent's location
//!   ② Agents   — for each agent in population order: step_agent
//!                  NotStarted → activate once tick > activation_time
//!                  Active     → move, rebound, exit test, history
//!   ③ Counters — active / finished, completion samples
//!   ④ Advance  — tick += 1, step_count += 1, state history
//! ```
//!
//! ① – ③ are skipped once every agent has finished.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ss_core::CrowdConfig;
//! use ss_sim::CrowdModel;
//!
//! let mut model = CrowdModel::new(CrowdConfig::default())?;
//! let report = model.batch(900);
//! println!("{report}");
//! ```

pub mod batch;
pub mod builder;
pub mod error;
pub mod gates;
pub mod model;
pub mod observer;
pub mod stats;


pub use builder::CrowdModelBuilder;
pub use error::{ModelError, ModelResult};
pub use gates::{gate_positions, Gates};
pub use model::CrowdModel;
pub use observer::{ModelObserver, NoopObserver, PopulationCounts};
pub use stats::{BatchReport, Histogram, SampleSummary, HISTOGRAM_BINS};
