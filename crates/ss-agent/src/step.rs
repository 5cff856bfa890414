//! One agent's update for one tick.

use ss_core::{AgentId, Bounds, SimRng, Tick};
use ss_spatial::SpatialIndex;

use crate::policy::{self, MoveKind};
use crate::{Agent, AgentState};

/// Read-only tick environment shared by every agent update in a tick.
///
/// Built once per tick by the model.  `index` is the snapshot taken before
/// any agent moved.
pub struct TickEnv<'a> {
    pub tick:        Tick,
    pub bounds:      Bounds,
    pub separation:  f64,
    pub max_wiggle:  i32,
    /// An agent closer than this to its exit leaves the corridor.
    pub exit_radius: f64,
    pub index:       &'a SpatialIndex,
}

/// Time bookkeeping for an agent that just left.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Completion {
    /// `tick − start_time`.
    pub elapsed: u64,
    /// `elapsed − expected_duration`; negative when faster than expected.
    pub delay:   f64,
}

/// What happened to one agent during one tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StepOutcome {
    /// Still before its activation time.
    Waiting,
    /// Became active this tick (no movement on the activation tick).
    Activated,
    /// Moved and is still active.
    Moved(MoveKind),
    /// Moved and reached its exit.
    Finished { kind: MoveKind, completion: Completion },
    /// Already finished before this tick.
    Gone,
}

/// Run the per-tick update for `agents[id]`.
///
/// Active agents go through move, rebound, commit, exit test and history
/// append, in that order.
pub fn step_agent(agents: &mut [Agent], id: AgentId, env: &TickEnv<'_>, rng: &mut SimRng) -> StepOutcome {
    let i = id.index();
    match agents[i].state() {
        AgentState::NotStarted => {
            if agents[i].try_activate(env.tick) {
                StepOutcome::Activated
            } else {
                StepOutcome::Waiting
            }
        }
        AgentState::Finished => StepOutcome::Gone,
        AgentState::Active => {
            let proposal = policy::propose(&agents[i], agents, env, rng);

            let agent = &mut agents[i];
            agent.commit(env.bounds.clamp(proposal.target), proposal.kind);

            let at_exit = agent.location().distance(agent.desired_exit()) < env.exit_radius;
            if at_exit || proposal.kind == MoveKind::Arrived {
                let completion = agent.finish(env.tick);
                return StepOutcome::Finished { kind: proposal.kind, completion };
            }

            agent.record_location();
            StepOutcome::Moved(proposal.kind)
        }
    }
}
