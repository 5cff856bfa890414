//! `ss-core` — foundational types for the StationSim crowd model.
//!
//! This crate is a dependency of every other `ss-*` crate.  It intentionally
//! has no `ss-*` dependencies and minimal external ones (`rand`,
//! `rand_distr` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                             |
//! | [`geo`]         | `Point2`, `Bounds` (corridor rectangle, clamping)     |
//! | [`time`]        | `Tick`                                                |
//! | [`rng`]         | `SimRng` (explicitly threaded, seedable)              |
//! | [`config`]      | `CrowdConfig` and its validation pass                 |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::CrowdConfig;
pub use error::{CoreError, CoreResult};
pub use geo::{Bounds, Point2};
pub use ids::AgentId;
pub use rng::SimRng;
pub use time::Tick;
