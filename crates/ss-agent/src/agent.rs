//! The `Agent` record and its construction.

use ss_core::{AgentId, CrowdConfig, Point2, SimRng, Tick};

use crate::policy::MoveKind;
use crate::step::Completion;
use crate::{AgentError, AgentResult, AgentState};

/// Longest candidate speed ladder an agent may carry.
pub const MAX_CANDIDATE_SPEEDS: usize = 1_000;

/// Descending candidate speeds `desired, desired - step, desired - 2·step, …`,
/// keeping only values strictly greater than `min_speed`, at most
/// [`MAX_CANDIDATE_SPEEDS`] of them.
///
/// Returns an empty ladder when `step` is not a positive finite number or
/// when `desired <= min_speed`.
pub fn speed_ladder(desired: f64, min_speed: f64, step: f64) -> Vec<f64> {
    if !(step.is_finite() && step > 0.0) || !desired.is_finite() {
        return Vec::new();
    }
    (0..MAX_CANDIDATE_SPEEDS)
        .map(|k| desired - k as f64 * step)
        .take_while(|&speed| speed > min_speed)
        .collect()
}

// ── AgentSpec ─────────────────────────────────────────────────────────────────

/// Hand-specified agent parameters, bypassing the random draws.
///
/// Used to build scenario populations; the candidate speed ladder is still
/// derived from the model's `min_speed` and `speed_step`.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentSpec {
    pub location:        Point2,
    pub desired_exit:    Point2,
    pub desired_speed:   f64,
    pub activation_time: f64,
}

// ── Agent ─────────────────────────────────────────────────────────────────────

/// One pedestrian.
///
/// Only `state`, `location` and the bookkeeping fields change after
/// construction; exit, speeds and activation time are fixed.
#[derive(Clone, Debug)]
pub struct Agent {
    id:                AgentId,
    state:             AgentState,
    location:          Point2,
    desired_exit:      Point2,
    desired_speed:     f64,
    candidate_speeds:  Vec<f64>,
    activation_time:   f64,
    start_time:        Option<Tick>,
    expected_duration: Option<f64>,
    history:           Option<Vec<Point2>>,
    last_move:         Option<MoveKind>,
}

impl Agent {
    /// Draw a new agent: entrance (with jitter across the flow axis), exit,
    /// activation time and desired speed, in that order.
    pub fn spawn(
        id:        AgentId,
        config:    &CrowdConfig,
        entrances: &[Point2],
        exits:     &[Point2],
        rng:       &mut SimRng,
    ) -> AgentResult<Agent> {
        let gate = *rng.choose(entrances).ok_or(AgentError::NoGates("entrance"))?;
        let jitter = config.entrance_spacing * (rng.uniform() - 0.5);
        let location = config.bounds().clamp(Point2::new(gate.x, gate.y + jitter));

        let desired_exit = *rng.choose(exits).ok_or(AgentError::NoGates("exit"))?;
        let activation_time = rng.exponential(config.entrance_rate)?;
        let desired_speed = rng
            .normal(config.desired_speed_mean, config.desired_speed_std)?
            .max(2.0 * config.min_speed);

        let spec = AgentSpec { location, desired_exit, desired_speed, activation_time };
        Agent::from_spec(id, &spec, config)
    }

    /// Build an agent from explicit parameters, validating them exactly like
    /// sampled ones.
    pub fn from_spec(id: AgentId, spec: &AgentSpec, config: &CrowdConfig) -> AgentResult<Agent> {
        if !(spec.desired_speed.is_finite() && spec.desired_speed > 0.0) {
            return Err(AgentError::InvalidSample { agent: id, what: "desired speed", value: spec.desired_speed });
        }
        if !(spec.activation_time.is_finite() && spec.activation_time >= 0.0) {
            return Err(AgentError::InvalidSample { agent: id, what: "activation time", value: spec.activation_time });
        }
        if !spec.location.is_finite() {
            let value = if spec.location.x.is_finite() { spec.location.y } else { spec.location.x };
            return Err(AgentError::InvalidSample { agent: id, what: "location", value });
        }

        let step = config.speed_step();
        if (spec.desired_speed - config.min_speed) / step > MAX_CANDIDATE_SPEEDS as f64 {
            return Err(AgentError::SpeedLadderTooLong {
                agent:         id,
                desired_speed: spec.desired_speed,
                speed_step:    step,
                limit:         MAX_CANDIDATE_SPEEDS,
            });
        }
        let candidate_speeds = speed_ladder(spec.desired_speed, config.min_speed, step);
        if candidate_speeds.is_empty() {
            return Err(AgentError::EmptySpeedLadder {
                agent:         id,
                desired_speed: spec.desired_speed,
                min_speed:     config.min_speed,
            });
        }

        Ok(Agent {
            id,
            state: AgentState::NotStarted,
            location: spec.location,
            desired_exit: spec.desired_exit,
            desired_speed: spec.desired_speed,
            candidate_speeds,
            activation_time: spec.activation_time,
            start_time: None,
            expected_duration: None,
            history: config.history_enabled.then(Vec::new),
            last_move: None,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    #[inline]
    pub fn state(&self) -> AgentState {
        self.state
    }

    #[inline]
    pub fn location(&self) -> Point2 {
        self.location
    }

    #[inline]
    pub fn desired_exit(&self) -> Point2 {
        self.desired_exit
    }

    #[inline]
    pub fn desired_speed(&self) -> f64 {
        self.desired_speed
    }

    /// Fastest first.
    #[inline]
    pub fn candidate_speeds(&self) -> &[f64] {
        &self.candidate_speeds
    }

    #[inline]
    pub fn activation_time(&self) -> f64 {
        self.activation_time
    }

    /// Tick at which the agent became active.
    #[inline]
    pub fn start_time(&self) -> Option<Tick> {
        self.start_time
    }

    /// Straight-line travel time at desired speed, from activation.
    #[inline]
    pub fn expected_duration(&self) -> Option<f64> {
        self.expected_duration
    }

    /// Locations after each active tick; `None` when history is disabled.
    #[inline]
    pub fn history(&self) -> Option<&[Point2]> {
        self.history.as_deref()
    }

    /// Kind of the most recent move, `None` before the first one.
    #[inline]
    pub fn last_move(&self) -> Option<MoveKind> {
        self.last_move
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Overwrite the location from outside the movement policy (state-vector
    /// injection).  The state machine is untouched.
    #[inline]
    pub fn set_location(&mut self, location: Point2) {
        self.location = location;
    }

    /// `NotStarted → Active` once `now` is past the activation time.
    /// Returns `true` if the transition fired.
    pub(crate) fn try_activate(&mut self, now: Tick) -> bool {
        if self.state != AgentState::NotStarted || now.as_f64() <= self.activation_time {
            return false;
        }
        self.state = AgentState::Active;
        self.start_time = Some(now);
        self.expected_duration = Some(self.location.distance(self.desired_exit) / self.desired_speed);
        true
    }

    /// Commit an already-clamped location.
    pub(crate) fn commit(&mut self, location: Point2, kind: MoveKind) {
        self.location = location;
        self.last_move = Some(kind);
    }

    /// `Active → Finished`, returning the elapsed time and delay.
    pub(crate) fn finish(&mut self, now: Tick) -> Completion {
        self.state = AgentState::Finished;
        let start = self.start_time.unwrap_or(now);
        let elapsed = now.since(start);
        let delay = elapsed as f64 - self.expected_duration.unwrap_or(0.0);
        Completion { elapsed, delay }
    }

    pub(crate) fn record_location(&mut self) {
        if let Some(history) = &mut self.history {
            history.push(self.location);
        }
    }
}
