//! `ss-agent` — agents of the StationSim crowd model.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`state`]    | `AgentState` — `NotStarted → Active → Finished`             |
//! | [`agent`]    | `Agent`, `AgentSpec`, `speed_ladder`                        |
//! | [`policy`]   | `propose`, `collides`, `blockers` — the movement decision   |
//! | [`step`]     | `TickEnv`, `step_agent`, `StepOutcome`                      |
//! | [`error`]    | `AgentError`, `AgentResult<T>`                              |
//!
//! # Read phase, then write phase, per agent
//!
//! Agents live in a plain slice owned by the model and are addressed by
//! [`AgentId`](ss_core::AgentId).  [`step_agent`] first decides the move with
//! a shared borrow of the whole slice (the policy has to look at other
//! agents' state and live locations), then takes `&mut` of just the moving
//! agent to commit it.  The next agent in population order therefore sees
//! the already-committed move, while the spatial index it queries still
//! holds the locations from the start of the tick.

pub mod agent;
pub mod error;
pub mod policy;
pub mod state;
pub mod step;

#[cfg(test)]
mod tests;

pub use agent::{speed_ladder, Agent, AgentSpec, MAX_CANDIDATE_SPEEDS};
pub use error::{AgentError, AgentResult};
pub use policy::{MoveKind, Proposal};
pub use state::AgentState;
pub use step::{step_agent, Completion, StepOutcome, TickEnv};
