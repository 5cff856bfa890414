//! Movement decision: direct moves at decreasing speeds, then wiggle.
//!
//! # Collision rule
//!
//! A candidate position collides when it is outside the corridor, or when
//! the index returns another **active** agent within `separation` whose live
//! `x` is `>=` the candidate's `x`.  Agents behind the candidate on the flow
//! axis never block, and neither do agents that have not started or have
//! already left.
//!
//! The index is queried with the candidate position, so neighbours are found
//! by where they were when the index was built, but the state and `x` tests
//! read the neighbour's current record.

use ss_core::{AgentId, Point2, SimRng};

use crate::step::TickEnv;
use crate::Agent;

/// How a move was chosen.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveKind {
    /// Straight towards the exit at this candidate speed.
    Direct { speed: f64 },
    /// No candidate speed was collision-free; random integer offset.
    Wiggle,
    /// Already standing exactly on the exit point.
    Arrived,
}

/// A proposed position, before the boundary clamp.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Proposal {
    pub kind:   MoveKind,
    pub target: Point2,
}

/// Decide where `agent` wants to go this tick.
///
/// `agents` is the whole population, indexed by `AgentId`.
pub fn propose(agent: &Agent, agents: &[Agent], env: &TickEnv<'_>, rng: &mut SimRng) -> Proposal {
    let here = agent.location();
    let exit = agent.desired_exit();

    for &speed in agent.candidate_speeds() {
        let Some(target) = here.step_toward(exit, speed) else {
            // Zero distance: no direction to normalize.
            return Proposal { kind: MoveKind::Arrived, target: here };
        };
        if !collides(agent.id(), target, agents, env) {
            return Proposal { kind: MoveKind::Direct { speed }, target };
        }
    }

    Proposal { kind: MoveKind::Wiggle, target: wiggle(here, env.max_wiggle, rng) }
}

/// `true` if `candidate` is outside the corridor or blocked by an agent ahead.
pub fn collides(mover: AgentId, candidate: Point2, agents: &[Agent], env: &TickEnv<'_>) -> bool {
    !env.bounds.contains(candidate) || blockers(mover, candidate, agents, env).next().is_some()
}

/// Every agent that blocks `mover` from taking `candidate`.
pub fn blockers<'a>(
    mover:     AgentId,
    candidate: Point2,
    agents:    &'a [Agent],
    env:       &'a TickEnv<'a>,
) -> impl Iterator<Item = AgentId> + 'a {
    env.index
        .within(candidate, env.separation)
        .filter(move |&other| {
            other != mover
                && agents
                    .get(other.index())
                    .is_some_and(|a| a.state().is_active() && a.location().x >= candidate.x)
        })
}

/// `here` plus an integer offset drawn uniformly from
/// `[-max_offset, max_offset]` on each axis.
pub fn wiggle(here: Point2, max_offset: i32, rng: &mut SimRng) -> Point2 {
    let dx = rng.gen_range(-max_offset..=max_offset);
    let dy = rng.gen_range(-max_offset..=max_offset);
    here + Point2::new(f64::from(dx), f64::from(dy))
}
